use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Credentials used to acquire tokens for a tenant
#[derive(Debug, Clone)]
pub enum CredentialSet {
    UsernamePassword {
        username: String,
        password: String,
        client_id: String,
        client_secret: Option<String>,
    },
    /// Pre-issued bearer token, used as-is
    AccessToken { token: String },
}

/// Cached token information for a resource
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: SystemTime,
    pub refresh_token: Option<String>,
}

impl TokenInfo {
    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}

/// Password settings for a new directory user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
    pub password: String,
    pub force_change_password_next_sign_in: bool,
}

/// Directory user payload for `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub account_enabled: bool,
    pub given_name: String,
    pub surname: String,
    pub display_name: String,
    pub mail_nickname: String,
    pub user_principal_name: String,
    pub usage_location: String,
    pub password_profile: PasswordProfile,
}

/// Security group payload for `POST /groups`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub display_name: String,
    pub mail_nickname: String,
    pub mail_enabled: bool,
    pub security_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedDomain {
    pub name: String,
    #[serde(default)]
    pub is_default: Option<bool>,
}

/// Subset of the Graph `organization` resource
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDetail {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub verified_domains: Vec<VerifiedDomain>,
}

impl TenantDetail {
    /// Name of the verified domain flagged as default
    pub fn default_domain(&self) -> Option<&str> {
        self.verified_domains
            .iter()
            .find(|d| d.is_default == Some(true))
            .map(|d| d.name.as_str())
    }
}

/// One page of an OData collection
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPrincipal {
    pub user_principal_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupName {
    #[serde(default)]
    pub display_name: Option<String>,
}
