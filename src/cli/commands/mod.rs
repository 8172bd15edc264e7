pub mod auth;
pub mod directory;
pub mod generate;
pub mod settings;

pub use auth::{AuthCommands, AuthSubcommands};
pub use directory::{DirectoryCommands, DirectorySubcommands};
pub use generate::{GenerateCommands, WizardCommands};
pub use settings::{SettingsCommands, SettingsSubcommands};
