use super::commands::{AuthCommands, DirectoryCommands, GenerateCommands, SettingsCommands, WizardCommands};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spdg-cli")]
#[command(about = "Generate synthetic test data in SharePoint Online and Azure AD", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tenant profile management
    Auth(AuthCommands),
    /// Create users, groups and site collections in the current tenant
    Generate(GenerateCommands),
    /// Walk through every generator setting interactively, then run
    Wizard(WizardCommands),
    /// List objects already in the directory
    Directory(DirectoryCommands),
    /// Application settings management
    Settings(SettingsCommands),
}
