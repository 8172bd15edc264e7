//! Terminal wizard that fills a generator definition step by step

pub mod views_columns;

use anyhow::Result;

use crate::generator::ClientGeneratorDefinition;

pub use views_columns::{TrackBar, ViewsColumnsPage};

/// Input source for wizard steps
pub trait Prompter {
    /// Integer within `min..=max`
    fn number(&mut self, prompt: &str, min: u32, max: u32, default: u32) -> Result<u32>;

    /// Non-negative count without an upper bound
    fn count(&mut self, prompt: &str, default: usize) -> Result<usize>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    fn text(&mut self, prompt: &str, default: &str) -> Result<String>;
}

/// One page of the wizard
pub trait WizardStep {
    fn title(&self) -> &'static str;

    /// Initialise the controls from the definition
    fn load_settings(&mut self, definition: &ClientGeneratorDefinition);

    /// Ask for every control and write the answers into the definition
    fn prompt(&mut self, prompter: &mut dyn Prompter, definition: &mut ClientGeneratorDefinition) -> Result<()>;
}

/// Users and security groups to create
#[derive(Debug, Default)]
pub struct ObjectCountsStep {
    users: usize,
    groups: usize,
}

impl WizardStep for ObjectCountsStep {
    fn title(&self) -> &'static str {
        "Users and Groups"
    }

    fn load_settings(&mut self, definition: &ClientGeneratorDefinition) {
        self.users = definition.base.number_of_users_to_create;
        self.groups = definition.base.number_of_security_groups_to_create;
    }

    fn prompt(&mut self, prompter: &mut dyn Prompter, definition: &mut ClientGeneratorDefinition) -> Result<()> {
        self.users = prompter.count("Number of users to create", self.users)?;
        definition.base.number_of_users_to_create = self.users;

        self.groups = prompter.count("Number of security groups to create", self.groups)?;
        definition.base.number_of_security_groups_to_create = self.groups;
        Ok(())
    }
}

/// New site collections, or the existing one to reuse
#[derive(Debug, Default)]
pub struct SiteCollectionsStep {
    new_site_collections: usize,
    site_collection: String,
    owner: String,
}

impl WizardStep for SiteCollectionsStep {
    fn title(&self) -> &'static str {
        "Site Collections"
    }

    fn load_settings(&mut self, definition: &ClientGeneratorDefinition) {
        self.new_site_collections = definition.base.create_new_site_collections;
        self.site_collection = definition.base.site_collection.clone();
        self.owner = definition.base.site_coll_owner_login.clone();
    }

    fn prompt(&mut self, prompter: &mut dyn Prompter, definition: &mut ClientGeneratorDefinition) -> Result<()> {
        self.new_site_collections = prompter.count("Number of new site collections", self.new_site_collections)?;
        definition.base.create_new_site_collections = self.new_site_collections;

        if self.new_site_collections == 0 {
            let default_url = if self.site_collection.is_empty() {
                crate::api::constants::sharepoint_root(&definition.tenant_name)
            } else {
                self.site_collection.clone()
            };
            self.site_collection = prompter.text("Existing site collection URL", &default_url)?;
            definition.base.site_collection = self.site_collection.trim().to_string();
        } else {
            let default_owner = if self.owner.is_empty() {
                definition.username.clone()
            } else {
                self.owner.clone()
            };
            self.owner = prompter.text("Site collection owner login", &default_owner)?;
            definition.base.site_coll_owner_login = self.owner.trim().to_string();
        }
        Ok(())
    }
}

/// Ordered list of steps
pub struct Wizard {
    steps: Vec<Box<dyn WizardStep>>,
}

impl Wizard {
    pub fn new(steps: Vec<Box<dyn WizardStep>>) -> Self {
        Self { steps }
    }

    /// Steps for a SharePoint Online tenant
    pub fn client() -> Self {
        let steps: Vec<Box<dyn WizardStep>> = vec![
            Box::new(ObjectCountsStep::default()),
            Box::new(SiteCollectionsStep::default()),
            Box::new(ViewsColumnsPage::new()),
        ];
        Self::new(steps)
    }

    pub fn step_titles(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.title()).collect()
    }

    pub fn run(&mut self, prompter: &mut dyn Prompter, definition: &mut ClientGeneratorDefinition) -> Result<()> {
        let total = self.steps.len();
        for (index, step) in self.steps.iter_mut().enumerate() {
            log::debug!("Wizard step {}/{}: {}", index + 1, total, step.title());
            println!("\nStep {}/{}: {}", index + 1, total, step.title());
            step.load_settings(definition);
            step.prompt(prompter, definition)?;
        }
        Ok(())
    }
}
