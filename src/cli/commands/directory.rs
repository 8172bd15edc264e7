use clap::{Args, Subcommand};

#[derive(Args)]
pub struct DirectoryCommands {
    #[command(subcommand)]
    pub command: DirectorySubcommands,
}

#[derive(Subcommand)]
pub enum DirectorySubcommands {
    /// List user principal names
    Users {
        /// Use this Graph access token instead of the password grant
        #[arg(long)]
        access_token: Option<String>,
    },
    /// List group display names
    Groups {
        /// Use this Graph access token instead of the password grant
        #[arg(long)]
        access_token: Option<String>,
    },
}
