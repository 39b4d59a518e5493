//! FlowGrid deployment engine.
//!
//! Places a batch of service function chain requests onto a substrate
//! topology, one request at a time in rank order. Each request gets one
//! instance per chain stage, grows replicas until availability and capacity
//! clear, is routed into a flow matrix, and permanently consumes bandwidth
//! before the next request starts. Strictly greedy: earlier decisions are
//! never revisited.
//!
//! # Components
//!
//! - **`rank`** — request priority ordering
//! - **`engine`** — the per-batch orchestrator and its report
//! - **`strategy`** — replica-growth strategies and the exhaustion policy
//! - **`refine`** — seam for a post-greedy refinement pass

pub mod engine;
pub mod error;
pub mod rank;
pub mod refine;
pub mod strategy;

pub use engine::{DeploymentEngine, DeploymentReport, SkippedRequest};
pub use error::{DeployError, DeployResult};
pub use rank::{deployment_order, request_ranks};
pub use refine::{CoolingSchedule, RefinementPass, acceptance_probability};
pub use strategy::{DeployOptions, ExhaustionPolicy, Strategy};
