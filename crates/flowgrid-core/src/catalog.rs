//! NF catalog — per-type resource profile.
//!
//! The catalog is an immutable value handed to the deployment engine at
//! construction. Nothing in FlowGrid reads NF requirements from process-wide
//! state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::NfTypeId;

/// Resource profile of one NF type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NfProfile {
    /// CPU debited from a node when an instance of this type is created.
    pub cpu_cost: u32,
    /// Throughput capacity a fresh instance starts with.
    pub capacity: f64,
}

/// NF type → resource profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NfCatalog {
    profiles: BTreeMap<NfTypeId, NfProfile>,
}

impl NfCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, nf: NfTypeId, profile: NfProfile) {
        self.profiles.insert(nf, profile);
    }

    pub fn profile(&self, nf: NfTypeId) -> Option<NfProfile> {
        self.profiles.get(&nf).copied()
    }

    pub fn contains(&self, nf: NfTypeId) -> bool {
        self.profiles.contains_key(&nf)
    }

    /// Number of distinct NF types.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = NfTypeId> + '_ {
        self.profiles.keys().copied()
    }
}

impl FromIterator<(NfTypeId, NfProfile)> for NfCatalog {
    fn from_iter<T: IntoIterator<Item = (NfTypeId, NfProfile)>>(iter: T) -> Self {
        Self { profiles: iter.into_iter().collect() }
    }
}
