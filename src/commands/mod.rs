pub mod auth;
pub mod directory;
pub mod generate;
pub mod settings;

use anyhow::Result;

use crate::config::{Config, TenantConfig};

/// Name and details of the selected tenant profile
pub fn current_tenant(config: &Config) -> Result<(&str, &TenantConfig)> {
    let (Some(name), Some(tenant)) = (config.get_current_tenant_name(), config.get_current_tenant()) else {
        anyhow::bail!("No tenant profile selected. Run 'spdg-cli auth setup' or 'spdg-cli auth select' first.");
    };
    Ok((name.as_str(), tenant))
}
