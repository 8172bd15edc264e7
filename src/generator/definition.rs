//! Generator definitions: the configuration snapshot a run works from

use serde::{Deserialize, Serialize};

use crate::config::TenantConfig;

/// Settings shared by every kind of generator run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorDefinition {
    pub number_of_users_to_create: usize,
    pub number_of_security_groups_to_create: usize,
    /// Zero means "reuse `site_collection`"
    pub create_new_site_collections: usize,
    /// Existing site collection URL used when none are created
    pub site_collection: String,
    /// Owner of created site collections; empty falls back to the username
    pub site_coll_owner_login: String,
    pub max_number_of_views_per_list: u32,
    pub max_number_of_columns_per_list: u32,
    pub create_views: bool,
    pub create_columns: bool,
}

/// Definition for a SharePoint Online tenant backed by Azure AD
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientGeneratorDefinition {
    #[serde(flatten)]
    pub base: GeneratorDefinition,
    pub tenant_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Pre-issued directory token; when absent one is requested with the password grant
    #[serde(default, skip_serializing)]
    pub azure_ad_access_token: Option<String>,
}

impl ClientGeneratorDefinition {
    pub fn from_tenant(tenant: &TenantConfig) -> Self {
        Self {
            base: GeneratorDefinition::default(),
            tenant_name: tenant.tenant_name.clone(),
            username: tenant.username.clone(),
            password: tenant.password.clone(),
            azure_ad_access_token: None,
        }
    }

    /// Login that owns newly created site collections
    pub fn site_collection_owner(&self) -> &str {
        let owner = self.base.site_coll_owner_login.trim();
        if owner.is_empty() { &self.username } else { owner }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tenant_name.trim().is_empty() {
            anyhow::bail!("Tenant name is required");
        }
        if self.username.trim().is_empty() {
            anyhow::bail!("Username is required");
        }
        Ok(())
    }

    /// True when the run would not create anything
    pub fn is_empty_run(&self) -> bool {
        self.base.number_of_users_to_create == 0
            && self.base.number_of_security_groups_to_create == 0
            && self.base.create_new_site_collections == 0
    }
}
