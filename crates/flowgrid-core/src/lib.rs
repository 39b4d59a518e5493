pub mod catalog;
pub mod matrix;
pub mod registry;
pub mod types;

pub use catalog::{NfCatalog, NfProfile};
pub use matrix::{LinkMatrix, LinkUnderflow, MatrixError};
pub use registry::{Instance, InstanceRegistry};
pub use types::*;
