use anyhow::Result;
use log::info;

use crate::api::constants::sharepoint_root;
use crate::cli::commands::WizardCommands;
use crate::config::Config;
use crate::generator::ClientGeneratorDefinition;
use crate::ui::{DialoguerPrompter, prompt_run_confirmation};
use crate::wizard::Wizard;

use super::super::current_tenant;
use super::run::run_generator;

pub async fn wizard_command(args: WizardCommands) -> Result<()> {
    info!("Starting generator wizard");

    let config = Config::load()?;
    let (profile_name, tenant) = current_tenant(&config)?;
    println!("Using tenant profile: {}", profile_name);

    let mut definition = ClientGeneratorDefinition::from_tenant(tenant);
    definition.base.site_collection = sharepoint_root(&tenant.tenant_name);

    let mut wizard = Wizard::client();
    wizard.run(&mut DialoguerPrompter, &mut definition)?;
    definition.validate()?;

    print_definition(&definition);

    if !prompt_run_confirmation()? {
        println!("Generation cancelled.");
        return Ok(());
    }

    run_generator(definition, &config.settings, tenant, args.seed).await?;
    Ok(())
}

fn print_definition(definition: &ClientGeneratorDefinition) {
    let base = &definition.base;
    println!("\nGenerator settings");
    println!("==================");
    println!("  Users: {}", base.number_of_users_to_create);
    println!("  Security groups: {}", base.number_of_security_groups_to_create);
    if base.create_new_site_collections == 0 {
        println!("  Site collection: {}", base.site_collection);
    } else {
        println!("  New site collections: {}", base.create_new_site_collections);
        println!("  Owner: {}", definition.site_collection_owner());
    }
    println!(
        "  Columns per list: up to {} ({})",
        base.max_number_of_columns_per_list,
        if base.create_columns { "enabled" } else { "disabled" }
    );
    println!(
        "  Views per list: up to {} ({})",
        base.max_number_of_views_per_list,
        if base.create_views { "enabled" } else { "disabled" }
    );
}
