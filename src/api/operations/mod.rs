//! Directory write operations
//!
//! Creations are queued as `Operation`s and committed together through the
//! Graph JSON `$batch` endpoint.

pub mod batch;
pub mod operation;
pub mod operations;

pub use batch::{BatchRequest, BatchRequestBuilder, BatchResponseItem, BatchResponseParser};
pub use operation::{Operation, OperationResult};
pub use operations::Operations;
