//! Core Operation types for directory object creation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::models::{NewGroup, NewUser};

/// A single directory write that can be queued and committed in a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Operation {
    /// Create a user account
    CreateUser(NewUser),
    /// Create a security group
    CreateGroup(NewGroup),
}

/// Result of one operation inside a committed batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    /// The operation that was executed
    pub operation: Operation,
    /// Whether the operation succeeded
    pub success: bool,
    /// Created object returned by the service
    pub data: Option<Value>,
    /// Error message if operation failed
    pub error: Option<String>,
    /// HTTP status code of the sub-response
    pub status_code: Option<u16>,
}

impl Operation {
    /// Relative Graph path the request is sent to
    pub fn path(&self) -> &'static str {
        match self {
            Self::CreateUser(_) => "/users",
            Self::CreateGroup(_) => "/groups",
        }
    }

    pub fn http_method(&self) -> &'static str {
        "POST"
    }

    /// Get the operation type as a string
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::CreateUser(_) => "create_user",
            Self::CreateGroup(_) => "create_group",
        }
    }

    /// Human readable identity used in logs
    pub fn describe(&self) -> String {
        match self {
            Self::CreateUser(user) => format!("user '{}'", user.user_principal_name),
            Self::CreateGroup(group) => format!("group '{}'", group.display_name),
        }
    }

    pub fn body(&self) -> anyhow::Result<Value> {
        let body = match self {
            Self::CreateUser(user) => serde_json::to_value(user)?,
            Self::CreateGroup(group) => serde_json::to_value(group)?,
        };
        Ok(body)
    }

    /// Reject payloads the service would refuse before they are queued
    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            Self::CreateUser(user) => {
                if user.mail_nickname.is_empty() {
                    anyhow::bail!("User '{}' has an empty mail nickname", user.display_name);
                }
                if !user.user_principal_name.contains('@') {
                    anyhow::bail!("Invalid user principal name '{}'", user.user_principal_name);
                }
                if user.password_profile.password.is_empty() {
                    anyhow::bail!("User '{}' has an empty password", user.user_principal_name);
                }
            }
            Self::CreateGroup(group) => {
                if group.display_name.trim().is_empty() {
                    anyhow::bail!("Group display name is empty");
                }
                if group.mail_nickname.is_empty() {
                    anyhow::bail!("Group '{}' has an empty mail nickname", group.display_name);
                }
            }
        }
        Ok(())
    }
}

impl OperationResult {
    pub fn success(operation: Operation, data: Option<Value>, status_code: u16) -> Self {
        Self {
            operation,
            success: true,
            data,
            error: None,
            status_code: Some(status_code),
        }
    }

    pub fn error(operation: Operation, error: String, status_code: Option<u16>) -> Self {
        Self {
            operation,
            success: false,
            data: None,
            error: Some(error),
            status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
