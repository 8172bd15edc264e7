use crate::config::Config;
use anyhow::Result;
use log::info;

/// Set the value of a specific setting
///
/// # Arguments
/// * `name` - Setting name
/// * `value` - Setting value
///
/// # Returns
/// * `Err(anyhow::Error)` - Configuration error or invalid setting/value
pub async fn set_command(name: String, value: String) -> Result<()> {
    info!("Setting {}", name);

    let mut config = Config::load()?;
    config.update_setting(&name, &value)?;

    if name == "default-user-password" {
        println!("✓ Updated {}", name);
    } else {
        println!("✓ Set {} to {}", name, config.settings.get(&name)?);
    }

    Ok(())
}
