//! Deployment strategies and failure policy.
//!
//! Both strategies share the candidate ranking, the stage placer, and the
//! capacity loop; they differ only in how a request's replicas grow before
//! capacity is considered.

use serde::{Deserialize, Serialize};

/// How replicas are grown for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Reactive: add replicas to the least-available stage until the chain
    /// meets its availability target, then resolve capacity.
    #[default]
    Extend,
    /// Pre-estimating: top every stage up to the replica target derived from
    /// the worst node availability, then resolve capacity.
    Vne,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Extend => "extend",
            Strategy::Vne => "vne",
        }
    }
}

/// What to do when a request cannot be deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustionPolicy {
    /// Abort the whole batch on the first failed request.
    #[default]
    FailFast,
    /// Record the failure in the report and continue with the next request.
    /// Resources the failed request already consumed are not rolled back.
    SkipRequest,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeployOptions {
    pub strategy: Strategy,
    pub exhaustion: ExhaustionPolicy,
}
