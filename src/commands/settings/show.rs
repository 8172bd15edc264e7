use crate::config::{Config, SETTING_NAMES};
use anyhow::Result;
use log::info;

/// Print every setting with its current value
pub async fn show_command() -> Result<()> {
    info!("Showing settings");

    let config = Config::load()?;

    println!("Settings");
    println!("========");
    for name in SETTING_NAMES {
        let value = config.settings.get(name)?;
        if *name == "default-user-password" {
            println!("  {}: {}", name, "*".repeat(value.len()));
        } else {
            println!("  {}: {}", name, value);
        }
    }

    Ok(())
}
