//! Microsoft Graph JSON batch response parser

use crate::api::operations::{Operation, OperationResult};
use serde::Deserialize;
use serde_json::Value;

/// Individual response item from a batch
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponseItem {
    pub id: String,
    pub status: u16,
    #[serde(default)]
    pub body: Option<Value>,
}

impl BatchResponseItem {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error message from a Graph error body, falling back to the status
    fn error_message(&self) -> String {
        self.body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    responses: Vec<BatchResponseItem>,
}

/// Parser for batch responses
pub struct BatchResponseParser;

impl BatchResponseParser {
    /// Parse a batch response into one result per submitted operation
    pub fn parse(response: Value, operations: &[Operation]) -> anyhow::Result<Vec<OperationResult>> {
        let batch: BatchResponse = serde_json::from_value(response)
            .map_err(|e| anyhow::anyhow!("Malformed batch response: {}", e))?;

        // Sub-responses may arrive in any order
        let mut results = Vec::with_capacity(operations.len());
        for (index, operation) in operations.iter().enumerate() {
            let id = (index + 1).to_string();
            let result = match batch.responses.iter().find(|r| r.id == id) {
                Some(item) if item.is_success() => {
                    OperationResult::success(operation.clone(), item.body.clone(), item.status)
                }
                Some(item) => OperationResult::error(operation.clone(), item.error_message(), Some(item.status)),
                None => OperationResult::error(
                    operation.clone(),
                    format!("No response for batch request {}", id),
                    None,
                ),
            };
            results.push(result);
        }

        Ok(results)
    }
}
