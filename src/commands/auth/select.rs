use anyhow::Result;
use log::info;

use crate::config::Config;
use crate::ui::prompt_tenant_selection;

pub async fn select_command(name: Option<String>) -> Result<()> {
    info!("Starting auth select");

    let mut config = Config::load()?;
    let profiles = config.list_tenants();

    if profiles.is_empty() {
        println!("No tenant profiles configured. Run 'spdg-cli auth setup' to create one.");
        return Ok(());
    }

    let selected = if let Some(name) = name {
        if !config.tenants.contains_key(&name) {
            anyhow::bail!("Tenant profile '{}' not found", name);
        }
        name
    } else {
        let names: Vec<String> = profiles.iter().map(|s| (*s).clone()).collect();
        prompt_tenant_selection(&names, config.get_current_tenant_name())?
    };

    config.set_current_tenant(selected.clone())?;
    println!("✓ Selected tenant profile: {}", selected);

    Ok(())
}
