use anyhow::Result;
use log::info;

use crate::config::Config;
use crate::ui::prompt_remove_confirmation;

pub async fn remove_command(name: String, force: bool) -> Result<()> {
    info!("Removing tenant profile: {}", name);

    let mut config = Config::load()?;

    if !config.tenants.contains_key(&name) {
        println!("Tenant profile '{}' not found.", name);
        println!("Available profiles:");
        for profile in config.list_tenants() {
            if config.get_current_tenant_name() == Some(profile) {
                println!("  ● {} (current)", profile);
            } else {
                println!("  ○ {}", profile);
            }
        }
        return Ok(());
    }

    if config.get_current_tenant_name() == Some(&name) {
        println!("⚠ Warning: '{}' is the current tenant profile", name);
    }

    let confirm = if force { true } else { prompt_remove_confirmation(&name)? };

    if !confirm {
        println!("Removal cancelled.");
        return Ok(());
    }

    config.remove_tenant(&name)?;
    println!("✓ Tenant profile '{}' removed successfully", name);

    if let Some(current) = config.get_current_tenant_name() {
        println!("Current tenant profile: {}", current);
    } else {
        println!("No current tenant profile selected. Run 'spdg-cli auth select' to choose one.");
    }

    Ok(())
}
