use anyhow::Result;
use log::info;

use crate::api::{ClientManager, DeferredSharePoint};
use crate::api::constants::sharepoint_root;
use crate::cli::commands::GenerateCommands;
use crate::cli::ui::{ConsoleProgress, print_run_summary, with_spinner};
use crate::config::{Config, Settings, TenantConfig};
use crate::generator::{ClientDataGenerator, ClientGeneratorDefinition, RunSummary, SampleData};

use super::super::current_tenant;

/// Definition for the current tenant filled from command line flags
pub fn definition_from_args(tenant: &TenantConfig, args: &GenerateCommands) -> ClientGeneratorDefinition {
    let mut definition = ClientGeneratorDefinition::from_tenant(tenant);
    definition.azure_ad_access_token = args.access_token.clone();

    let base = &mut definition.base;
    base.number_of_users_to_create = args.users;
    base.number_of_security_groups_to_create = args.groups;
    base.create_new_site_collections = args.site_collections;
    base.site_collection = args
        .site_collection
        .clone()
        .unwrap_or_else(|| sharepoint_root(&tenant.tenant_name));
    base.site_coll_owner_login = args.owner.clone().unwrap_or_default();
    base.max_number_of_views_per_list = args.max_views;
    base.max_number_of_columns_per_list = args.max_columns;
    base.create_views = args.create_views;
    base.create_columns = args.create_columns;

    definition
}

pub async fn generate_command(args: GenerateCommands) -> Result<()> {
    info!("Starting generate command");

    let config = Config::load()?;
    let (profile_name, tenant) = current_tenant(&config)?;
    println!("Using tenant profile: {}", profile_name);

    let definition = definition_from_args(tenant, &args);
    definition.validate()?;

    if definition.is_empty_run() {
        println!("Nothing to create; only the existing site collection will be resolved.");
    }

    run_generator(definition, &config.settings, tenant, args.seed).await?;
    Ok(())
}

/// Authenticate, run every generator phase and print the summary
///
/// SharePoint is signed in to only when the site collection phase needs it,
/// so a SharePoint login failure aborts that phase alone.
pub async fn run_generator(
    definition: ClientGeneratorDefinition,
    settings: &Settings,
    tenant: &TenantConfig,
    seed: Option<u64>,
) -> Result<RunSummary> {
    let mut manager = ClientManager::new(tenant.clone()).with_graph_token(definition.azure_ad_access_token.clone());

    let graph = with_spinner("Authenticating against Azure AD...", manager.graph_client()).await?;
    let sharepoint = DeferredSharePoint::new(manager);

    let sample_data = match seed {
        Some(seed) => {
            info!("Using sample data seed {}", seed);
            SampleData::seeded(seed)
        }
        None => SampleData::new(),
    };

    let mut generator = ClientDataGenerator::new(definition, graph, sharepoint)
        .with_settings(settings.clone())
        .with_sample_data(sample_data)
        .with_progress(Box::new(ConsoleProgress::default()));

    let summary = generator.generate().await;
    print_run_summary(&summary);

    Ok(summary)
}
