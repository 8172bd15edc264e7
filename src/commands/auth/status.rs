use anyhow::Result;
use log::{error, info};

use crate::api::ClientManager;
use crate::api::constants::sharepoint_root;
use crate::cli::ui::with_spinner;
use crate::config::Config;

pub async fn status_command() -> Result<()> {
    info!("Executing auth status command");

    let config = Config::load()?;

    println!("SharePoint Data Generator Authentication Status");
    println!("===============================================");

    let profiles = config.list_tenants();
    if profiles.is_empty() {
        println!("No tenant profiles configured.");
        println!("Run 'spdg-cli auth setup' to create one.");
        return Ok(());
    }

    println!("Configured tenant profiles:");
    for profile in &profiles {
        if config.get_current_tenant_name() == Some(*profile) {
            println!("  ● {} (current)", profile);
        } else {
            println!("  ○ {}", profile);
        }
    }

    let (Some(current_name), Some(tenant)) = (config.get_current_tenant_name(), config.get_current_tenant()) else {
        println!("\nNo current tenant profile selected.");
        println!("Run 'spdg-cli auth select' to choose one.");
        return Ok(());
    };

    println!("\nCurrent tenant profile: {}", current_name);
    println!("  Tenant: {}", sharepoint_root(&tenant.tenant_name));
    println!("  Username: {}", tenant.username);
    println!("  Client ID: {}", tenant.client_id);

    println!("\nTesting authentication...");
    let mut manager = ClientManager::new(tenant.clone());
    match with_spinner("Requesting Graph and SharePoint tokens...", manager.test_authentication()).await {
        Ok(()) => {
            info!("Authentication test successful");
            println!("✓ Authentication successful");
        }
        Err(e) => {
            error!("Authentication test failed: {:#}", e);
            println!("✗ Authentication failed: {:#}", e);
        }
    }

    Ok(())
}
