use anyhow::Result;
use log::info;
use std::path::Path;

use crate::config::TenantConfig;

const TENANT_VAR: &str = "SPDG_TENANT";
const USERNAME_VAR: &str = "SPDG_USERNAME";
const PASSWORD_VAR: &str = "SPDG_PASSWORD";
const CLIENT_ID_VAR: &str = "SPDG_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "SPDG_CLIENT_SECRET";

/// Sources a tenant profile can be imported from
pub struct Credentials;

impl Credentials {
    pub fn from_env() -> Result<TenantConfig> {
        info!("Importing from environment variables");

        let tenant = Self::read_vars(|name| {
            std::env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
        })?;

        println!("✓ Imported credentials from environment variables");
        Ok(tenant)
    }

    pub fn from_env_file(path: &str) -> Result<TenantConfig> {
        info!("Importing from .env file: {}", path);

        if !Path::new(path).exists() {
            anyhow::bail!("Environment file not found: {}", path);
        }

        let vars: Vec<(String, String)> = dotenvy::from_path_iter(path)
            .map_err(|e| anyhow::anyhow!("Failed to load .env file '{}': {}", path, e))?
            .collect::<Result<_, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to parse .env file '{}': {}", path, e))?;

        let tenant = Self::read_vars(|name| {
            vars.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| anyhow::anyhow!("{} not found in .env file: {}", name, path))
        })?;

        println!("✓ Imported credentials from .env file: {}", path);
        Ok(tenant)
    }

    pub fn from_command_line(
        tenant_name: String,
        username: String,
        password: String,
        client_id: String,
        client_secret: Option<String>,
    ) -> TenantConfig {
        info!("Using command line parameters");
        println!("✓ Using credentials from command line parameters");

        TenantConfig {
            tenant_name: normalize_tenant_name(&tenant_name),
            username,
            password,
            client_id,
            client_secret,
        }
    }

    fn read_vars<F>(mut lookup: F) -> Result<TenantConfig>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let tenant_name = lookup(TENANT_VAR)?;
        let username = lookup(USERNAME_VAR)?;
        let password = lookup(PASSWORD_VAR)?;
        let client_id = lookup(CLIENT_ID_VAR)?;
        // Public client applications have no secret
        let client_secret = lookup(CLIENT_SECRET_VAR).ok().filter(|s| !s.is_empty());

        Ok(TenantConfig {
            tenant_name: normalize_tenant_name(&tenant_name),
            username,
            password,
            client_id,
            client_secret,
        })
    }
}

/// Accept `contoso`, `contoso.sharepoint.com` or a full tenant URL
pub fn normalize_tenant_name(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    without_scheme
        .split('.')
        .next()
        .unwrap_or(without_scheme)
        .trim_end_matches("-admin")
        .to_ascii_lowercase()
}
