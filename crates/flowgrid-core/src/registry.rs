//! Instance registry — every live instance in the topology, keyed by NF type.
//!
//! The registry owns instances; nodes and placements refer to them by
//! [`InstanceId`]. Instances are created lazily and never destroyed within a
//! run, so per-type sequence numbers are simply the insertion index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{InstanceId, NfTypeId, Node, NodeId};

/// A deployed, capacity-bounded copy of one NF type on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    /// Hosting node.
    pub node: NodeId,
    pub capacity_total: f64,
    /// Residual throughput; consumed once per request-stage assignment.
    pub capacity_free: f64,
}

impl Instance {
    pub fn nf(&self) -> NfTypeId {
        self.id.nf
    }
}

/// All instances in the topology, grouped by NF type in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceRegistry {
    by_type: BTreeMap<NfTypeId, Vec<Instance>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance of `nf` on `node` and return its id.
    pub fn create(&mut self, nf: NfTypeId, node: NodeId, capacity: f64) -> InstanceId {
        let slot = self.by_type.entry(nf).or_default();
        let id = InstanceId { nf, seq: slot.len() as u32 };
        slot.push(Instance { id, node, capacity_total: capacity, capacity_free: capacity });
        id
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.by_type.get(&id.nf)?.get(id.seq as usize)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.by_type.get_mut(&id.nf)?.get_mut(id.seq as usize)
    }

    /// A same-type instance hosted on `node` with residual capacity, if any.
    /// The last match in the node's hosting order wins.
    pub fn reusable_on(&self, node: &Node, nf: NfTypeId) -> Option<InstanceId> {
        node.instances
            .iter()
            .rev()
            .find(|id| {
                id.nf == nf && self.get(**id).is_some_and(|inst| inst.capacity_free > 0.0)
            })
            .copied()
    }

    /// Instances created for one type.
    pub fn count(&self, nf: NfTypeId) -> usize {
        self.by_type.get(&nf).map_or(0, Vec::len)
    }

    /// Per-type instance counts, for the deployment report.
    pub fn counts(&self) -> BTreeMap<NfTypeId, u32> {
        self.by_type.iter().map(|(&nf, v)| (nf, v.len() as u32)).collect()
    }

    pub fn total(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }
}
