//! `flowgrid check` — validate a scenario file without deploying.

use std::path::Path;

use crate::scenario::Scenario;

pub fn run(scenario_path: &str) -> anyhow::Result<()> {
    let scenario = Scenario::from_file(Path::new(scenario_path))?;
    let (topology, catalog, requests, strategy) = scenario.into_inputs()?;

    println!("scenario ok");
    println!("  nodes: {}", topology.node_count());
    println!("  total link bandwidth: {}", topology.links.total_weight());
    println!("  nf types: {}", catalog.len());
    println!("  requests: {}", requests.len());
    println!("  strategy: {}", strategy.label());
    Ok(())
}
