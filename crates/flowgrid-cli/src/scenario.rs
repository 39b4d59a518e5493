//! Scenario file parsing (TOML).
//!
//! A scenario bundles everything one deployment run needs: the substrate
//! topology, the NF catalog, the request batch, and engine options. The
//! format is a CLI concern; the library crates only ever see the parsed
//! model types.

use std::path::Path;

use serde::Deserialize;

use flowgrid_core::{
    LinkMatrix, NfCatalog, NfProfile, NfTypeId, Node, Request, Topology,
};
use flowgrid_deploy::Strategy;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub topology: TopologySection,
    #[serde(rename = "nf")]
    pub nfs: Vec<NfSection>,
    #[serde(rename = "request", default)]
    pub requests: Vec<RequestSection>,
    #[serde(default)]
    pub deploy: DeploySection,
}

#[derive(Debug, Deserialize)]
pub struct TopologySection {
    /// Symmetric bandwidth matrix; 0 means no link.
    pub bandwidth: Vec<Vec<f64>>,
    #[serde(rename = "node")]
    pub nodes: Vec<NodeSection>,
}

#[derive(Debug, Deserialize)]
pub struct NodeSection {
    pub id: usize,
    pub cpu: u32,
    pub availability: f64,
}

#[derive(Debug, Deserialize)]
pub struct NfSection {
    pub id: u32,
    pub cpu: u32,
    pub capacity: f64,
}

#[derive(Debug, Deserialize)]
pub struct RequestSection {
    pub id: usize,
    pub source: usize,
    pub destination: usize,
    pub chain: Vec<u32>,
    pub rate: f64,
    pub availability: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeploySection {
    #[serde(default)]
    pub strategy: Strategy,
}

impl Scenario {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = toml::from_str(&content)?;
        Ok(scenario)
    }

    /// Convert the parsed sections into validated engine inputs.
    pub fn into_inputs(self) -> anyhow::Result<(Topology, NfCatalog, Vec<Request>, Strategy)> {
        let links = LinkMatrix::from_rows(&self.topology.bandwidth)?;
        let nodes: Vec<Node> = self
            .topology
            .nodes
            .iter()
            .map(|n| Node::new(n.id, n.cpu, n.availability))
            .collect();
        let topology = Topology::new(links, nodes)?;

        let catalog: NfCatalog = self
            .nfs
            .iter()
            .map(|nf| {
                (NfTypeId(nf.id), NfProfile { cpu_cost: nf.cpu, capacity: nf.capacity })
            })
            .collect();

        let requests = self
            .requests
            .iter()
            .map(|r| Request {
                id: r.id,
                source: r.source,
                destination: r.destination,
                chain: r.chain.iter().map(|&t| NfTypeId(t)).collect(),
                rate: r.rate,
                required_availability: r.availability,
            })
            .collect();

        Ok((topology, catalog, requests, self.deploy.strategy))
    }
}

/// Parse a strategy name given on the command line.
pub fn parse_strategy(name: &str) -> anyhow::Result<Strategy> {
    match name {
        "extend" => Ok(Strategy::Extend),
        "vne" => Ok(Strategy::Vne),
        other => anyhow::bail!("unknown strategy '{other}' (expected: extend, vne)"),
    }
}
