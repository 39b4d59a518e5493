//! Routing over the residual substrate.
//!
//! Two primitives the placement side consumes:
//!
//! - **`shortest_path`** — hop-count distance and paths over links with
//!   positive residual bandwidth
//! - **`router`** — the [`FlowRouter`] seam turning a finished placement
//!   into a bandwidth flow matrix, with an equal-split shortest-path default

pub mod error;
pub mod router;
pub mod shortest_path;

pub use error::RoutingError;
pub use router::{FlowRouter, ShortestPathRouter};
pub use shortest_path::{hop_distance, shortest_path};
