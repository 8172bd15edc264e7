use anyhow::Result;
use clap::Parser;
use log::info;

use spdg_cli::cli::commands::{AuthSubcommands, SettingsSubcommands};
use spdg_cli::cli::{Cli, Commands};
use spdg_cli::commands::auth::{SetupOptions, remove_command, select_command, setup_command, status_command};
use spdg_cli::commands::directory::directory_command;
use spdg_cli::commands::generate::{generate_command, wizard_command};
use spdg_cli::commands::settings::{reset_command, set_command, show_command};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("spdg-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting spdg-cli");

    match cli.command {
        Commands::Auth(auth) => match auth.command {
            AuthSubcommands::Setup {
                name,
                tenant,
                username,
                password,
                client_id,
                client_secret,
                from_env,
                from_env_file,
            } => {
                setup_command(SetupOptions {
                    name,
                    tenant,
                    username,
                    password,
                    client_id,
                    client_secret,
                    from_env,
                    from_env_file,
                })
                .await
            }
            AuthSubcommands::Select { name } => select_command(name).await,
            AuthSubcommands::Remove { name, force } => remove_command(name, force).await,
            AuthSubcommands::Status => status_command().await,
        },
        Commands::Generate(args) => generate_command(args).await,
        Commands::Wizard(args) => wizard_command(args).await,
        Commands::Directory(directory) => directory_command(directory.command).await,
        Commands::Settings(settings) => match settings.command {
            SettingsSubcommands::Show => show_command().await,
            SettingsSubcommands::Set { name, value } => set_command(name, value).await,
            SettingsSubcommands::Reset { name } => reset_command(name).await,
        },
    }
}
