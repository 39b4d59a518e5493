//! Placement error types.

use thiserror::Error;

use flowgrid_core::NfTypeId;

/// Errors that can occur while placing instances.
#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    /// No candidate node can host the required instance: nothing to reuse
    /// and no node's residual CPU covers the type's cost.
    #[error("no node can host an instance of {nf}")]
    ResourceExhausted { nf: NfTypeId },

    #[error("NF type {0} is not in the catalog")]
    UnknownNf(NfTypeId),
}
