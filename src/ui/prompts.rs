use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};

use crate::auth::credentials::normalize_tenant_name;
use crate::config::TenantConfig;
use crate::wizard::Prompter;

pub fn prompt_profile_name(default_name: Option<String>) -> Result<String> {
    if let Some(name) = default_name {
        Ok(name)
    } else {
        let name = Input::<String>::new()
            .with_prompt("Profile name (e.g., 'contoso-test')")
            .interact_text()?;
        Ok(name)
    }
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

pub fn prompt_overwrite_confirmation(profile_name: &str) -> Result<bool> {
    prompt_confirmation(&format!("Tenant profile '{}' already exists. Overwrite?", profile_name), false)
}

pub fn prompt_save_anyway_confirmation() -> Result<bool> {
    prompt_confirmation("Save tenant profile anyway?", false)
}

pub fn prompt_remove_confirmation(profile_name: &str) -> Result<bool> {
    prompt_confirmation(&format!("Remove tenant profile '{}'?", profile_name), false)
}

pub fn prompt_run_confirmation() -> Result<bool> {
    prompt_confirmation("Start generating data now?", true)
}

/// Collect whichever tenant details were not given on the command line
pub fn prompt_tenant_config(
    tenant_name: Option<String>,
    username: Option<String>,
    password: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<TenantConfig> {
    let tenant_val = if let Some(t) = tenant_name {
        t
    } else {
        Input::<String>::new()
            .with_prompt("Tenant name (e.g., contoso for contoso.sharepoint.com)")
            .interact_text()?
    };

    let username_val = if let Some(u) = username {
        u
    } else {
        Input::<String>::new().with_prompt("Username").interact_text()?
    };

    let password_val = if let Some(p) = password {
        p
    } else {
        Password::new().with_prompt("Password").interact()?
    };

    let client_id_val = if let Some(c) = client_id {
        c
    } else {
        Input::<String>::new()
            .with_prompt("Azure AD Application Client ID")
            .interact_text()?
    };

    // Optional for public client applications
    let client_secret_val = if client_secret.is_some() {
        client_secret
    } else {
        let secret = Password::new()
            .with_prompt("Azure AD Application Client Secret (leave empty for none)")
            .allow_empty_password(true)
            .interact()?;
        Some(secret).filter(|s| !s.is_empty())
    };

    Ok(TenantConfig {
        tenant_name: normalize_tenant_name(&tenant_val),
        username: username_val,
        password: password_val,
        client_id: client_id_val,
        client_secret: client_secret_val,
    })
}

pub fn prompt_tenant_selection(profile_names: &[String], current: Option<&String>) -> Result<String> {
    let mut items = Vec::new();
    for name in profile_names {
        if current == Some(name) {
            items.push(format!("{} (current)", name));
        } else {
            items.push(name.clone());
        }
    }

    let selection = Select::new()
        .with_prompt("Select tenant profile")
        .items(&items)
        .interact()?;

    Ok(profile_names[selection].clone())
}

/// Wizard input through terminal prompts
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn number(&mut self, prompt: &str, min: u32, max: u32, default: u32) -> Result<u32> {
        let value = Input::<u32>::new()
            .with_prompt(format!("{} ({}-{})", prompt, min, max))
            .default(default)
            .validate_with(|input: &u32| -> Result<(), String> {
                if (min..=max).contains(input) {
                    Ok(())
                } else {
                    Err(format!("Value must be between {} and {}", min, max))
                }
            })
            .interact_text()?;
        Ok(value)
    }

    fn count(&mut self, prompt: &str, default: usize) -> Result<usize> {
        Ok(Input::<usize>::new().with_prompt(prompt).default(default).interact_text()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }

    fn text(&mut self, prompt: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}
