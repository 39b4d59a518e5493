//! Routing error types.

use thiserror::Error;

use flowgrid_core::{LinkUnderflow, NodeId};

/// Errors that can occur while converting a placement into a flow matrix.
#[derive(Debug, Error, PartialEq)]
pub enum RoutingError {
    #[error("no path from node {from} to node {to} in the residual graph")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("stage {stage} has no placed instance")]
    EmptyStage { stage: usize },

    #[error("bandwidth exhausted: {0}")]
    Bandwidth(#[from] LinkUnderflow),
}
