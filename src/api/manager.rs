use anyhow::Context;

use super::auth::AuthManager;
use super::client::GraphClient;
use super::constants;
use super::models::CredentialSet;
use super::sharepoint::SharePointClient;
use crate::config::TenantConfig;

/// Builds authenticated Graph and SharePoint clients for one tenant
///
/// Lives for a single generator run; nothing is pooled across runs.
pub struct ClientManager {
    tenant: TenantConfig,
    auth_manager: AuthManager,
    graph_token_override: Option<String>,
}

impl ClientManager {
    pub fn new(tenant: TenantConfig) -> Self {
        let auth_manager = AuthManager::new(tenant.tenant_name.clone());
        Self {
            tenant,
            auth_manager,
            graph_token_override: None,
        }
    }

    /// Authenticate through a specific token endpoint
    pub fn with_auth_manager(mut self, auth_manager: AuthManager) -> Self {
        self.auth_manager = auth_manager;
        self
    }

    /// Use a pre-issued directory token instead of the password grant
    pub fn with_graph_token(mut self, token: Option<String>) -> Self {
        self.graph_token_override = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn tenant(&self) -> &TenantConfig {
        &self.tenant
    }

    fn password_credentials(&self) -> CredentialSet {
        CredentialSet::UsernamePassword {
            username: self.tenant.username.clone(),
            password: self.tenant.password.clone(),
            client_id: self.tenant.client_id.clone(),
            client_secret: self.tenant.client_secret.clone(),
        }
    }

    pub async fn graph_client(&mut self) -> anyhow::Result<GraphClient> {
        let credentials = match &self.graph_token_override {
            Some(token) => CredentialSet::AccessToken { token: token.clone() },
            None => self.password_credentials(),
        };

        let token = self
            .auth_manager
            .access_token(constants::GRAPH_HOST, &credentials)
            .await?;
        Ok(GraphClient::new(token))
    }

    pub async fn sharepoint_client(&mut self) -> anyhow::Result<SharePointClient> {
        let resource = constants::sharepoint_root(&self.tenant.tenant_name);
        let credentials = self.password_credentials();

        let token = self.auth_manager.access_token(&resource, &credentials).await?;
        Ok(SharePointClient::new(resource, token))
    }

    /// Acquire both tokens without creating anything
    pub async fn test_authentication(&mut self) -> anyhow::Result<()> {
        self.graph_client().await?;
        self.sharepoint_client().await?;
        Ok(())
    }
}

/// SharePoint client that signs in the first time it is needed
///
/// A run that never touches site collections never asks for a SharePoint
/// token, and a failed sign-in surfaces from the call that needed it.
pub struct DeferredSharePoint {
    manager: ClientManager,
    client: Option<SharePointClient>,
}

impl DeferredSharePoint {
    pub fn new(manager: ClientManager) -> Self {
        Self { manager, client: None }
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    pub async fn client(&mut self) -> anyhow::Result<&mut SharePointClient> {
        if self.client.is_none() {
            let client = self
                .manager
                .sharepoint_client()
                .await
                .context("Failed to authenticate against SharePoint Online")?;
            self.client = Some(client);
        }
        self.client
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("SharePoint client is not connected"))
    }
}
