use anyhow::Result;
use log::info;

use crate::api::{ClientManager, DeferredSharePoint};
use crate::cli::commands::DirectorySubcommands;
use crate::cli::ui::with_spinner;
use crate::config::Config;
use crate::generator::{ClientDataGenerator, ClientGeneratorDefinition, Directory, SiteCollectionHost};

use super::current_tenant;

pub async fn directory_command(command: DirectorySubcommands) -> Result<()> {
    let config = Config::load()?;
    let (_, tenant) = current_tenant(&config)?;

    let (kind, access_token) = match &command {
        DirectorySubcommands::Users { access_token } => ("users", access_token.clone()),
        DirectorySubcommands::Groups { access_token } => ("groups", access_token.clone()),
    };
    info!("Listing directory {}", kind);

    let mut manager = ClientManager::new(tenant.clone()).with_graph_token(access_token);
    let graph = with_spinner("Authenticating against Azure AD...", manager.graph_client()).await?;

    let definition = ClientGeneratorDefinition::from_tenant(tenant);
    let mut generator = ClientDataGenerator::new(definition, graph, DeferredSharePoint::new(manager));

    let names = with_spinner(format!("Reading {}...", kind), directory_names(&mut generator, &command)).await?;

    for name in &names {
        println!("{}", name);
    }
    println!("\n{} {} in directory", names.len(), kind);

    Ok(())
}

/// Names a directory subcommand lists, read through the generator's cache
pub async fn directory_names<D, H>(
    generator: &mut ClientDataGenerator<D, H>,
    command: &DirectorySubcommands,
) -> Result<Vec<String>>
where
    D: Directory,
    H: SiteCollectionHost,
{
    let names = match command {
        DirectorySubcommands::Users { .. } => generator.available_users_in_directory().await?,
        DirectorySubcommands::Groups { .. } => generator.available_groups_in_directory().await?,
    };
    Ok(names.to_vec())
}
