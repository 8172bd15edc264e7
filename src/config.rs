use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Connection details for one SharePoint Online tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Tenant prefix, as in `{tenant}.sharepoint.com`
    pub tenant_name: String,
    pub username: String,
    pub password: String,
    /// Azure AD application used for the password grant
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub current_tenant: Option<String>,
    #[serde(default)]
    pub tenants: BTreeMap<String, TenantConfig>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(skip)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Successful adds between two directory commits
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Initial password given to generated users
    #[serde(default = "default_user_password")]
    pub default_user_password: String,
    /// Usage location given to generated users
    #[serde(default = "default_usage_location")]
    pub usage_location: String,
}

fn default_batch_size() -> usize {
    50
}

fn default_user_password() -> String {
    "pass@word1".to_string()
}

fn default_usage_location() -> String {
    "US".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            default_user_password: default_user_password(),
            usage_location: default_usage_location(),
        }
    }
}

/// Names accepted by `settings get/set/reset`
pub const SETTING_NAMES: &[&str] = &["batch-size", "default-user-password", "usage-location"];

impl Settings {
    pub fn get(&self, name: &str) -> Result<String> {
        match name {
            "batch-size" => Ok(self.batch_size.to_string()),
            "default-user-password" => Ok(self.default_user_password.clone()),
            "usage-location" => Ok(self.usage_location.clone()),
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "batch-size" => {
                let size: usize = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid value for batch-size: '{}'. Must be a positive integer.", value)
                })?;
                if size == 0 {
                    anyhow::bail!("batch-size must be greater than 0");
                }
                self.batch_size = size;
            }
            "default-user-password" => {
                if value.is_empty() {
                    anyhow::bail!("default-user-password must not be empty");
                }
                self.default_user_password = value.to_string();
            }
            "usage-location" => {
                if value.len() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    anyhow::bail!("usage-location must be a two-letter country code, got '{}'", value);
                }
                self.usage_location = value.to_ascii_uppercase();
            }
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
        Ok(())
    }

    pub fn reset(&mut self, name: &str) -> Result<()> {
        let defaults = Settings::default();
        match name {
            "batch-size" => self.batch_size = defaults.batch_size,
            "default-user-password" => self.default_user_password = defaults.default_user_password,
            "usage-location" => self.usage_location = defaults.usage_location,
            _ => anyhow::bail!("Unknown setting: {}", name),
        }
        Ok(())
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("spdg-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".spdg-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path; later saves go back to the same file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self {
                path: Some(config_path.to_path_buf()),
                ..Self::default()
            });
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        config.path = Some(config_path.to_path_buf());

        debug!("Loaded config with {} tenants", config.tenants.len());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = match &self.path {
            Some(path) => path.clone(),
            None => Self::get_config_path()?,
        };
        debug!("Saving config to: {:?}", config_path);

        let config_content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn add_tenant(&mut self, name: String, tenant: TenantConfig) -> Result<()> {
        info!("Adding tenant profile: {}", name);
        self.tenants.insert(name.clone(), tenant);

        // First profile becomes the current one
        if self.current_tenant.is_none() {
            self.current_tenant = Some(name.clone());
            info!("Set {} as current tenant", name);
        }

        self.save()
    }

    pub fn get_current_tenant(&self) -> Option<&TenantConfig> {
        let current = self.current_tenant.as_ref()?;
        self.tenants.get(current)
    }

    pub fn get_current_tenant_name(&self) -> Option<&String> {
        self.current_tenant.as_ref()
    }

    pub fn set_current_tenant(&mut self, name: String) -> Result<()> {
        if !self.tenants.contains_key(&name) {
            anyhow::bail!("Tenant profile '{}' not found", name);
        }

        info!("Setting current tenant to: {}", name);
        self.current_tenant = Some(name);
        self.save()
    }

    pub fn list_tenants(&self) -> Vec<&String> {
        self.tenants.keys().collect()
    }

    pub fn remove_tenant(&mut self, name: &str) -> Result<()> {
        if self.tenants.remove(name).is_none() {
            anyhow::bail!("Tenant profile '{}' not found", name);
        }
        info!("Removed tenant profile: {}", name);

        if self.current_tenant.as_deref() == Some(name) {
            warn!("Removed current tenant, clearing current selection");
            self.current_tenant = None;
        }

        self.save()
    }

    pub fn update_setting(&mut self, name: &str, value: &str) -> Result<()> {
        info!("Updating setting {}", name);
        self.settings.set(name, value)?;
        self.save()
    }

    pub fn reset_setting(&mut self, name: &str) -> Result<()> {
        info!("Resetting setting {}", name);
        self.settings.reset(name)?;
        self.save()
    }
}
