//! Bottleneck checks over a request's current placement.
//!
//! Both checks return the index of the limiting stage, or `None` when the
//! placement satisfies the request. The deployment engine keeps adding
//! replicas to the returned stage until the check clears or the placer runs
//! out of nodes.

use std::collections::BTreeMap;

use flowgrid_core::{InstanceId, InstanceRegistry, NodeId, Placement, Request, Topology};

/// Effective availability of one stage: parallel replicas fail
/// independently, so the stage is up unless every host is down.
pub fn stage_availability(topology: &Topology, stage: &BTreeMap<NodeId, InstanceId>) -> f64 {
    1.0 - stage
        .keys()
        .map(|&node| 1.0 - topology.nodes[node].availability)
        .product::<f64>()
}

/// End-to-end chain availability: stages compose in series.
pub fn chain_availability(topology: &Topology, placement: &Placement) -> f64 {
    placement
        .stages()
        .iter()
        .map(|stage| stage_availability(topology, stage))
        .product()
}

/// The least-available stage when the chain misses the request's target.
///
/// Returns `None` once the combined availability meets the requirement.
/// An empty stage counts as availability 0 and is always the bottleneck.
pub fn availability_bottleneck(
    topology: &Topology,
    request: &Request,
    placement: &Placement,
) -> Option<usize> {
    if placement.is_empty() {
        return None;
    }
    if chain_availability(topology, placement) >= request.required_availability {
        return None;
    }

    let mut weakest = 0;
    let mut weakest_availability = f64::INFINITY;
    for (i, stage) in placement.stages().iter().enumerate() {
        let availability = if stage.is_empty() {
            0.0
        } else {
            stage_availability(topology, stage)
        };
        if availability < weakest_availability {
            weakest = i;
            weakest_availability = availability;
        }
    }
    Some(weakest)
}

/// The stage whose worst instance cannot carry its equal-split share of the
/// request rate, or `None` when every instance has enough residual capacity.
///
/// Each stage splits the rate evenly across its replicas; the bottleneck is
/// the placement-wide minimum of `capacity_free − share`.
pub fn capacity_bottleneck(
    registry: &InstanceRegistry,
    request: &Request,
    placement: &Placement,
) -> Option<usize> {
    let mut worst: Option<(usize, f64)> = None;

    for (i, stage) in placement.stages().iter().enumerate() {
        if stage.is_empty() {
            continue;
        }
        let share = request.rate / stage.len() as f64;
        for &id in stage.values() {
            let Some(instance) = registry.get(id) else { continue };
            let slack = instance.capacity_free - share;
            if worst.is_none_or(|(_, w)| slack < w) {
                worst = Some((i, slack));
            }
        }
    }

    match worst {
        Some((stage, slack)) if slack < 0.0 => Some(stage),
        _ => None,
    }
}
