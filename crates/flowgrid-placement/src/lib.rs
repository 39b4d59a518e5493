//! Placement decisions for chain deployment.
//!
//! # Components
//!
//! - **`ranker`** — per-request candidate node ordering (combined distance
//!   to source and destination, availability tie-break)
//! - **`placer`** — place or reuse one instance for one chain stage
//! - **`bottleneck`** — availability and capacity checks over a placement
//! - **`estimator`** — proactive replica targets from node availability

pub mod bottleneck;
pub mod error;
pub mod estimator;
pub mod placer;
pub mod ranker;

pub use bottleneck::{availability_bottleneck, capacity_bottleneck, chain_availability, stage_availability};
pub use error::PlacementError;
pub use estimator::{replica_target, worst_node_availability};
pub use placer::place_stage;
pub use ranker::{Candidate, rank_candidates};
