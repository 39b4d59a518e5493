//! Deployment error types.

use thiserror::Error;

use flowgrid_core::RequestId;
use flowgrid_placement::PlacementError;
use flowgrid_routing::RoutingError;

/// Errors that can occur during a deployment run.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The placer could not satisfy a stage of this request.
    #[error("request {request}, stage {stage}: {source}")]
    Placement {
        request: RequestId,
        stage: usize,
        #[source]
        source: PlacementError,
    },

    /// The flow router could not produce a feasible flow matrix.
    #[error("request {request}: {source}")]
    Routing {
        request: RequestId,
        #[source]
        source: RoutingError,
    },

    #[error("invalid deployment input: {0}")]
    InvalidInput(String),
}

pub type DeployResult<T> = Result<T, DeployError>;
