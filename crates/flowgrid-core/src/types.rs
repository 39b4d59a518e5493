//! Shared types used across FlowGrid crates.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matrix::{LinkMatrix, MatrixError};

/// Index of a substrate node; doubles as its row in the link matrix.
pub type NodeId = usize;

/// Identifier of a service function chain request.
pub type RequestId = usize;

/// A network function type from the NF catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NfTypeId(pub u32);

impl fmt::Display for NfTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nf{}", self.0)
    }
}

/// A deployed instance, identified by its type and a per-type sequence number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InstanceId {
    pub nf: NfTypeId,
    pub seq: u32,
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.nf, self.seq)
    }
}

/// One substrate compute node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Original CPU budget.
    pub cpu_total: u32,
    /// Residual CPU; debited when an instance is created, never restored.
    pub cpu_free: u32,
    /// Probability the node is up, in [0, 1].
    pub availability: f64,
    /// Hosted instances in creation order.
    pub instances: Vec<InstanceId>,
}

impl Node {
    pub fn new(id: NodeId, cpu: u32, availability: f64) -> Self {
        Self { id, cpu_total: cpu, cpu_free: cpu, availability, instances: Vec::new() }
    }

    pub fn cpu_used(&self) -> u32 {
        self.cpu_total - self.cpu_free
    }
}

/// One chain deployment request. Immutable input; the engine keeps derived
/// ranks in its own table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub source: NodeId,
    pub destination: NodeId,
    /// NF types the traffic must traverse, in order.
    pub chain: Vec<NfTypeId>,
    /// Traffic rate demand.
    pub rate: f64,
    /// Required end-to-end chain availability, in [0, 1].
    pub required_availability: f64,
}

/// Where a request's chain stages landed: one node→instance map per stage.
/// A stage with several entries runs parallel replicas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    stages: Vec<BTreeMap<NodeId, InstanceId>>,
}

impl Placement {
    /// Empty placement with one (initially unassigned) slot per chain stage.
    pub fn for_chain(stage_count: usize) -> Self {
        Self { stages: vec![BTreeMap::new(); stage_count] }
    }

    pub fn stage(&self, i: usize) -> &BTreeMap<NodeId, InstanceId> {
        &self.stages[i]
    }

    pub fn stage_mut(&mut self, i: usize) -> &mut BTreeMap<NodeId, InstanceId> {
        &mut self.stages[i]
    }

    pub fn stages(&self) -> &[BTreeMap<NodeId, InstanceId>] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Total node→instance entries across all stages.
    pub fn replica_count(&self) -> usize {
        self.stages.iter().map(BTreeMap::len).sum()
    }
}

/// Errors assembling a substrate topology.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("link matrix spans {matrix} nodes but {nodes} were supplied")]
    NodeCount { matrix: usize, nodes: usize },

    #[error("node at position {index} has id {id}; ids must equal their position")]
    NodeIdMismatch { index: usize, id: NodeId },

    #[error("node {id} availability {value} is outside [0, 1]")]
    AvailabilityRange { id: NodeId, value: f64 },
}

/// The substrate: residual link bandwidth plus per-node state. Mutated in
/// place for the duration of one deployment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub links: LinkMatrix,
    pub nodes: Vec<Node>,
}

impl Topology {
    /// Validate that the matrix and node list describe the same substrate.
    pub fn new(links: LinkMatrix, nodes: Vec<Node>) -> Result<Self, TopologyError> {
        if links.len() != nodes.len() {
            return Err(TopologyError::NodeCount { matrix: links.len(), nodes: nodes.len() });
        }
        for (index, node) in nodes.iter().enumerate() {
            if node.id != index {
                return Err(TopologyError::NodeIdMismatch { index, id: node.id });
            }
            if !(0.0..=1.0).contains(&node.availability) {
                return Err(TopologyError::AvailabilityRange {
                    id: node.id,
                    value: node.availability,
                });
            }
        }
        Ok(Self { links, nodes })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_tracks_cpu_usage() {
        let mut node = Node::new(3, 100, 0.9);
        assert_eq!(node.cpu_used(), 0);
        node.cpu_free -= 30;
        assert_eq!(node.cpu_used(), 30);
    }

    #[test]
    fn placement_starts_with_empty_stages() {
        let p = Placement::for_chain(3);
        assert_eq!(p.len(), 3);
        assert_eq!(p.replica_count(), 0);
        assert!(p.stage(0).is_empty());
    }

    #[test]
    fn placement_counts_replicas_across_stages() {
        let mut p = Placement::for_chain(2);
        let id = InstanceId { nf: NfTypeId(1), seq: 0 };
        p.stage_mut(0).insert(0, id);
        p.stage_mut(0).insert(1, InstanceId { nf: NfTypeId(1), seq: 1 });
        p.stage_mut(1).insert(0, InstanceId { nf: NfTypeId(2), seq: 0 });
        assert_eq!(p.replica_count(), 3);
    }

    #[test]
    fn topology_rejects_size_mismatch() {
        let links = LinkMatrix::zeros(2);
        let nodes = vec![Node::new(0, 100, 0.9)];
        assert!(matches!(
            Topology::new(links, nodes),
            Err(TopologyError::NodeCount { matrix: 2, nodes: 1 })
        ));
    }

    #[test]
    fn topology_rejects_out_of_order_ids() {
        let links = LinkMatrix::zeros(2);
        let nodes = vec![Node::new(1, 100, 0.9), Node::new(0, 100, 0.9)];
        assert!(matches!(
            Topology::new(links, nodes),
            Err(TopologyError::NodeIdMismatch { index: 0, id: 1 })
        ));
    }

    #[test]
    fn topology_rejects_bad_availability() {
        let links = LinkMatrix::zeros(1);
        let nodes = vec![Node::new(0, 100, 1.5)];
        assert!(matches!(
            Topology::new(links, nodes),
            Err(TopologyError::AvailabilityRange { id: 0, .. })
        ));
    }

    #[test]
    fn instance_id_display() {
        let id = InstanceId { nf: NfTypeId(3), seq: 7 };
        assert_eq!(id.to_string(), "nf3/7");
    }
}
