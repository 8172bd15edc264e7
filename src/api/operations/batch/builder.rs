//! Microsoft Graph JSON batch request builder
//!
//! Builds the `{"requests": [...]}` body accepted by `POST /v1.0/$batch`.
//! Request ids are the 1-based position of the operation in the batch so the
//! parser can map sub-responses back to their operations.

use crate::api::constants::headers;
use crate::api::operations::Operation;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// One request inside a JSON batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequestItem {
    pub id: String,
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

/// Complete JSON batch body
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest {
    pub requests: Vec<BatchRequestItem>,
}

/// Builder for Graph JSON batch requests
#[derive(Default)]
pub struct BatchRequestBuilder {
    requests: Vec<BatchRequestItem>,
}

impl BatchRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation; its id is its position in the batch
    pub fn add_operation(mut self, operation: &Operation) -> anyhow::Result<Self> {
        let mut request_headers = HashMap::new();
        request_headers.insert("Content-Type".to_string(), headers::CONTENT_TYPE_JSON.to_string());

        self.requests.push(BatchRequestItem {
            id: (self.requests.len() + 1).to_string(),
            method: operation.http_method().to_string(),
            url: operation.path().to_string(),
            headers: request_headers,
            body: operation.body()?,
        });
        Ok(self)
    }

    pub fn add_operations(self, operations: &[Operation]) -> anyhow::Result<Self> {
        operations.iter().try_fold(self, |builder, op| builder.add_operation(op))
    }

    pub fn build(self) -> BatchRequest {
        BatchRequest {
            requests: self.requests,
        }
    }
}
