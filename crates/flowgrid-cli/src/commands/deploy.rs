//! `flowgrid deploy` — run a scenario and report the outcome.

use std::path::Path;

use anyhow::bail;
use tracing::info;

use flowgrid_deploy::{DeployOptions, DeploymentEngine, DeploymentReport, ExhaustionPolicy};

use crate::scenario::{Scenario, parse_strategy};

pub fn run(
    scenario_path: &str,
    strategy_override: Option<&str>,
    skip_failed: bool,
    format: &str,
) -> anyhow::Result<()> {
    let scenario = Scenario::from_file(Path::new(scenario_path))?;
    let (topology, catalog, requests, mut strategy) = scenario.into_inputs()?;

    if let Some(name) = strategy_override {
        strategy = parse_strategy(name)?;
    }
    let exhaustion = if skip_failed {
        ExhaustionPolicy::SkipRequest
    } else {
        ExhaustionPolicy::FailFast
    };

    info!(
        nodes = topology.node_count(),
        requests = requests.len(),
        strategy = strategy.label(),
        "starting deployment"
    );

    let engine = DeploymentEngine::new(catalog, DeployOptions { strategy, exhaustion });
    let report = engine.deploy(topology, &requests)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&report),
        other => bail!("unknown format '{other}' (expected: text, json)"),
    }
    Ok(())
}

fn print_text(report: &DeploymentReport) {
    println!("deployed requests: {}", report.placements.len());
    for (request, placement) in &report.placements {
        println!("  request {request}: {} stage(s), {} replica(s)", placement.len(), placement.replica_count());
        for (i, stage) in placement.stages().iter().enumerate() {
            let entries: Vec<String> = stage
                .iter()
                .map(|(node, instance)| format!("node {node} → {instance}"))
                .collect();
            println!("    stage {i}: {}", entries.join(", "));
        }
    }

    println!("instances created:");
    for (nf, count) in &report.instance_counts {
        println!("  {nf}: {count}");
    }

    if !report.skipped.is_empty() {
        println!("skipped requests:");
        for skip in &report.skipped {
            println!("  request {}: {}", skip.request, skip.reason);
        }
    }

    println!("residual bandwidth: min cell {}", report.residual.min_cell());
}
