//! Remote services the generator drives
//!
//! The generator only sees these traits; `GraphClient` and `SharePointClient`
//! are the production implementations.

use async_trait::async_trait;

use crate::api::models::{NewGroup, NewUser};
use crate::api::{DeferredSharePoint, GraphClient, SharePointClient};

/// Azure AD directory: lookups plus deferred creation with batch commit
#[async_trait]
pub trait Directory: Send {
    /// Default verified domain of the tenant
    async fn default_domain(&mut self) -> anyhow::Result<String>;

    async fn user_principal_names(&mut self) -> anyhow::Result<Vec<String>>;

    async fn group_display_names(&mut self) -> anyhow::Result<Vec<String>>;

    /// Queue a user; it is persisted by the next `save_changes`
    async fn add_user(&mut self, user: &NewUser) -> anyhow::Result<()>;

    /// Queue a group; it is persisted by the next `save_changes`
    async fn add_group(&mut self, group: &NewGroup) -> anyhow::Result<()>;

    async fn save_changes(&mut self) -> anyhow::Result<()>;
}

/// Host able to enumerate and create site collections
#[async_trait]
pub trait SiteCollectionHost: Send {
    async fn site_collection_urls(&mut self) -> anyhow::Result<Vec<String>>;

    async fn create_site_collection(&mut self, title: &str, leaf_name: &str, owner: &str) -> anyhow::Result<()>;
}

#[async_trait]
impl Directory for GraphClient {
    async fn default_domain(&mut self) -> anyhow::Result<String> {
        GraphClient::default_domain(self).await
    }

    async fn user_principal_names(&mut self) -> anyhow::Result<Vec<String>> {
        self.list_user_principal_names().await
    }

    async fn group_display_names(&mut self) -> anyhow::Result<Vec<String>> {
        self.list_group_display_names().await
    }

    async fn add_user(&mut self, user: &NewUser) -> anyhow::Result<()> {
        GraphClient::add_user(self, user.clone())
    }

    async fn add_group(&mut self, group: &NewGroup) -> anyhow::Result<()> {
        GraphClient::add_group(self, group.clone())
    }

    async fn save_changes(&mut self) -> anyhow::Result<()> {
        GraphClient::save_changes(self).await.map(|_| ())
    }
}

#[async_trait]
impl SiteCollectionHost for SharePointClient {
    async fn site_collection_urls(&mut self) -> anyhow::Result<Vec<String>> {
        self.get_all_site_collections().await
    }

    async fn create_site_collection(&mut self, title: &str, leaf_name: &str, owner: &str) -> anyhow::Result<()> {
        SharePointClient::create_site_collection(self, title, leaf_name, owner)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl SiteCollectionHost for DeferredSharePoint {
    async fn site_collection_urls(&mut self) -> anyhow::Result<Vec<String>> {
        self.client().await?.get_all_site_collections().await
    }

    async fn create_site_collection(&mut self, title: &str, leaf_name: &str, owner: &str) -> anyhow::Result<()> {
        self.client()
            .await?
            .create_site_collection(title, leaf_name, owner)
            .await
            .map(|_| ())
    }
}
