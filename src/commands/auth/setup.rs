use anyhow::Result;
use log::{error, info, warn};

use crate::api::ClientManager;
use crate::auth::Credentials;
use crate::cli::ui::with_spinner;
use crate::config::{Config, TenantConfig};
use crate::ui::{
    prompt_overwrite_confirmation, prompt_profile_name, prompt_save_anyway_confirmation, prompt_tenant_config,
};

pub struct SetupOptions {
    pub name: Option<String>,
    pub tenant: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub from_env: bool,
    pub from_env_file: Option<String>,
}

pub async fn setup_command(options: SetupOptions) -> Result<()> {
    info!("Starting auth setup");

    let mut config = Config::load()?;

    let (profile_name, tenant, interactive) = if options.from_env {
        let name = options.name.clone().unwrap_or_else(|| "from-env".to_string());
        (name, Credentials::from_env()?, false)
    } else if let Some(ref env_file_path) = options.from_env_file {
        let name = options.name.clone().unwrap_or_else(|| "from-env-file".to_string());
        (name, Credentials::from_env_file(env_file_path)?, false)
    } else if let (Some(tenant), Some(username), Some(password), Some(client_id)) = (
        &options.tenant,
        &options.username,
        &options.password,
        &options.client_id,
    ) {
        // Everything needed was given on the command line
        let tenant = Credentials::from_command_line(
            tenant.clone(),
            username.clone(),
            password.clone(),
            client_id.clone(),
            options.client_secret.clone(),
        );
        let name = options.name.clone().unwrap_or_else(|| tenant.tenant_name.clone());
        (name, tenant, false)
    } else {
        info!("Starting interactive setup");

        let name = prompt_profile_name(options.name.clone())?;

        if config.tenants.contains_key(&name) && !prompt_overwrite_confirmation(&name)? {
            println!("Setup cancelled.");
            return Ok(());
        }

        let tenant = prompt_tenant_config(
            options.tenant.clone(),
            options.username.clone(),
            options.password.clone(),
            options.client_id.clone(),
            options.client_secret.clone(),
        )?;
        (name, tenant, true)
    };

    if !interactive && config.tenants.contains_key(&profile_name) {
        warn!("Tenant profile '{}' already exists, overwriting", profile_name);
    }

    println!("\nTesting authentication...");
    match test_tenant(&tenant).await {
        Ok(()) => {
            println!("✓ Authentication test successful");
            save_profile(&mut config, profile_name, tenant)?;
        }
        Err(e) => {
            error!("Authentication test failed: {:#}", e);
            println!("✗ Authentication test failed: {:#}", e);

            // Non-interactive setups save regardless
            let save_anyway = if interactive { prompt_save_anyway_confirmation()? } else { true };

            if save_anyway {
                config.add_tenant(profile_name.clone(), tenant)?;
                println!("⚠ Tenant profile '{}' saved (authentication failed)", profile_name);
            } else {
                println!("Setup cancelled.");
            }
        }
    }

    Ok(())
}

async fn test_tenant(tenant: &TenantConfig) -> Result<()> {
    let mut manager = ClientManager::new(tenant.clone());
    with_spinner("Requesting Graph and SharePoint tokens...", manager.test_authentication()).await
}

fn save_profile(config: &mut Config, profile_name: String, tenant: TenantConfig) -> Result<()> {
    config.add_tenant(profile_name.clone(), tenant)?;
    println!("✓ Tenant profile '{}' saved successfully", profile_name);

    if config.get_current_tenant_name() == Some(&profile_name) {
        println!("✓ Set as current tenant");
    }
    Ok(())
}
