use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Save a tenant profile
    Setup {
        /// Name for this profile (e.g., "contoso-test")
        #[arg(short, long)]
        name: Option<String>,
        /// Tenant name, as in {tenant}.sharepoint.com
        #[arg(long)]
        tenant: Option<String>,
        /// Username
        #[arg(long)]
        username: Option<String>,
        /// Password
        #[arg(long)]
        password: Option<String>,
        /// Azure AD Application Client ID
        #[arg(long)]
        client_id: Option<String>,
        /// Azure AD Application Client Secret
        #[arg(long)]
        client_secret: Option<String>,
        /// Import credentials from environment variables
        #[arg(long)]
        from_env: bool,
        /// Import credentials from specified .env file
        #[arg(long)]
        from_env_file: Option<String>,
    },
    /// Select the current tenant profile
    Select {
        /// Profile name to select
        name: Option<String>,
    },
    /// Remove a tenant profile
    Remove {
        /// Profile name to remove
        name: String,
        /// Force removal without confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show current authentication status
    Status,
}
