use clap::Args;

#[derive(Args)]
pub struct GenerateCommands {
    /// Number of users to create
    #[arg(long, default_value_t = 0)]
    pub users: usize,
    /// Number of security groups to create
    #[arg(long, default_value_t = 0)]
    pub groups: usize,
    /// Number of new site collections; 0 reuses --site-collection
    #[arg(long, default_value_t = 0)]
    pub site_collections: usize,
    /// Existing site collection URL used when no new ones are created
    #[arg(long)]
    pub site_collection: Option<String>,
    /// Owner login for new site collections (defaults to the profile username)
    #[arg(long)]
    pub owner: Option<String>,
    /// Max number of views per list (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_views: u32,
    /// Max number of columns per list (0-10)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub max_columns: u32,
    /// Create views on generated lists
    #[arg(long)]
    pub create_views: bool,
    /// Create columns on generated lists
    #[arg(long)]
    pub create_columns: bool,
    /// Pre-issued Azure AD access token for the directory
    #[arg(long)]
    pub access_token: Option<String>,
    /// Seed for repeatable sample data
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct WizardCommands {
    /// Seed for repeatable sample data
    #[arg(long)]
    pub seed: Option<u64>,
}
