//! Stage placement — put one instance of one NF type on the best candidate.
//!
//! The same scan serves the initial per-stage pass and replica growth:
//! candidates already carrying an entry for this stage are skipped, so every
//! call adds a distinct node→instance pair. That bound (at most one entry
//! per node per stage) is what keeps the bottleneck loops finite.

use std::collections::BTreeMap;

use tracing::debug;

use flowgrid_core::{InstanceId, InstanceRegistry, NfCatalog, NfTypeId, NodeId, Topology};

use crate::error::PlacementError;
use crate::ranker::Candidate;

/// Place (or reuse) one instance of `nf` for the stage described by `stage`.
///
/// Scans `candidates` in rank order: first an existing same-type instance
/// with residual capacity is reused; otherwise a node whose residual CPU
/// strictly exceeds the type's cost receives a fresh instance. Fails with
/// [`PlacementError::ResourceExhausted`] when no candidate fits.
pub fn place_stage(
    topology: &mut Topology,
    registry: &mut InstanceRegistry,
    catalog: &NfCatalog,
    candidates: &[Candidate],
    nf: NfTypeId,
    stage: &mut BTreeMap<NodeId, InstanceId>,
) -> Result<InstanceId, PlacementError> {
    let profile = catalog.profile(nf).ok_or(PlacementError::UnknownNf(nf))?;

    for candidate in candidates {
        if stage.contains_key(&candidate.node) {
            continue;
        }

        if let Some(id) = registry.reusable_on(&topology.nodes[candidate.node], nf) {
            stage.insert(candidate.node, id);
            debug!(node = candidate.node, instance = %id, "reused instance");
            return Ok(id);
        }

        if topology.nodes[candidate.node].cpu_free > profile.cpu_cost {
            let id = registry.create(nf, candidate.node, profile.capacity);
            let node = &mut topology.nodes[candidate.node];
            node.cpu_free -= profile.cpu_cost;
            node.instances.push(id);
            stage.insert(candidate.node, id);
            debug!(node = candidate.node, instance = %id, cpu_left = node.cpu_free, "created instance");
            return Ok(id);
        }
    }

    Err(PlacementError::ResourceExhausted { nf })
}
