use crate::config::Config;
use anyhow::Result;
use log::info;

/// Reset a setting to its default value
pub async fn reset_command(name: String) -> Result<()> {
    info!("Resetting setting: {}", name);

    let mut config = Config::load()?;
    config.reset_setting(&name)?;

    println!("Reset {} to its default value", name);

    Ok(())
}
