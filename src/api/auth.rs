use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use super::constants;
use super::models::{CredentialSet, TokenInfo};

/// Acquires and caches bearer tokens per resource for a single tenant
pub struct AuthManager {
    tenant_name: String,
    token_url: String,
    http_client: reqwest::Client,
    tokens: HashMap<String, TokenInfo>,
}

impl AuthManager {
    pub fn new(tenant_name: impl Into<String>) -> Self {
        let tenant_name = tenant_name.into();
        let token_url = constants::token_endpoint(&tenant_name);
        Self::with_token_url(tenant_name, token_url)
    }

    /// Use a custom token endpoint (sovereign clouds, tests)
    pub fn with_token_url(tenant_name: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            tenant_name: tenant_name.into(),
            token_url: token_url.into(),
            http_client: reqwest::Client::new(),
            tokens: HashMap::new(),
        }
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    /// Get a cached, non-expired token for a resource
    pub fn get_token(&self, resource: &str) -> anyhow::Result<&TokenInfo> {
        let token = self
            .tokens
            .get(resource)
            .ok_or_else(|| anyhow::anyhow!("No token for resource '{}'", resource))?;

        if token.is_expired() {
            anyhow::bail!("Token for resource '{}' has expired. Please re-authenticate.", resource);
        }

        Ok(token)
    }

    /// Authenticate against a resource and return its access token
    pub async fn access_token(&mut self, resource: &str, credentials: &CredentialSet) -> anyhow::Result<String> {
        if let Ok(token) = self.get_token(resource) {
            return Ok(token.access_token.clone());
        }

        self.authenticate(resource, credentials).await?;
        Ok(self.get_token(resource)?.access_token.clone())
    }

    pub async fn authenticate(&mut self, resource: &str, credentials: &CredentialSet) -> anyhow::Result<()> {
        log::info!("Authenticating to {} for tenant {}", resource, self.tenant_name);

        match credentials {
            CredentialSet::AccessToken { token } => {
                // Lifetime is unknown, the service rejects it once it lapses
                let token_info = TokenInfo {
                    access_token: token.clone(),
                    expires_at: SystemTime::now() + Duration::from_secs(3600),
                    refresh_token: None,
                };
                self.tokens.insert(resource.to_string(), token_info);
                Ok(())
            }
            CredentialSet::UsernamePassword {
                username,
                password,
                client_id,
                client_secret,
            } => {
                let mut form = vec![
                    ("grant_type", "password"),
                    ("client_id", client_id.as_str()),
                    ("username", username.as_str()),
                    ("password", password.as_str()),
                    ("resource", resource),
                ];
                if let Some(secret) = client_secret.as_deref().filter(|s| !s.is_empty()) {
                    form.push(("client_secret", secret));
                }

                let response = self
                    .http_client
                    .post(&self.token_url)
                    .form(&form)
                    .send()
                    .await?;

                log::debug!("Token request status: {}", response.status());

                if response.status().is_success() {
                    let token_data: serde_json::Value = response.json().await?;

                    if let Some(access_token) = token_data.get("access_token").and_then(|t| t.as_str()) {
                        // expires_in arrives as a string on the v1 endpoint
                        let expires_in = token_data
                            .get("expires_in")
                            .and_then(|e| e.as_u64().or_else(|| e.as_str().and_then(|s| s.parse().ok())))
                            .unwrap_or(3600);

                        let refresh_token = token_data
                            .get("refresh_token")
                            .and_then(|t| t.as_str())
                            .map(|s| s.to_string());

                        let token_info = TokenInfo {
                            access_token: access_token.to_string(),
                            expires_at: SystemTime::now() + Duration::from_secs(expires_in),
                            refresh_token,
                        };

                        self.tokens.insert(resource.to_string(), token_info);

                        log::info!("Successfully authenticated to {}", resource);
                        Ok(())
                    } else {
                        anyhow::bail!("No access token in response")
                    }
                } else {
                    let error_text = response.text().await?;
                    anyhow::bail!("Authentication failed: {}", error_text)
                }
            }
        }
    }
}
