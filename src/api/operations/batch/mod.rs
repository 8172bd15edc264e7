//! Batch operations module for the Microsoft Graph JSON batch endpoint

pub mod builder;
pub mod parser;

pub use builder::{BatchRequest, BatchRequestBuilder};
pub use parser::{BatchResponseItem, BatchResponseParser};
