//! Data generator for SharePoint Online tenants backed by Azure AD

use anyhow::Context;

use super::definition::ClientGeneratorDefinition;
use super::naming::{group_mail_nickname, user_mail_nickname};
use super::progress::{LogProgress, Progress};
use super::provisioning::{provision, GroupSink, ProvisionReport, UserSink};
use super::remote::{Directory, SiteCollectionHost};
use super::sample_data::{PoolNames, SampleData};
use super::site_collections::{resolve_site_collections, SiteCollInfo, SiteCollectionReport};
use crate::api::models::{NewGroup, NewUser, PasswordProfile};
use crate::config::Settings;

/// How one phase of a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome<R> {
    /// Nothing was requested
    Skipped,
    Completed(R),
    /// The phase stopped early; `report` holds what happened before
    Aborted { report: R, error: String },
}

impl<R> PhaseOutcome<R> {
    pub fn report(&self) -> Option<&R> {
        match self {
            PhaseOutcome::Skipped => None,
            PhaseOutcome::Completed(report) | PhaseOutcome::Aborted { report, .. } => Some(report),
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, PhaseOutcome::Aborted { .. })
    }
}

/// Result of a full generator run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub users: PhaseOutcome<ProvisionReport>,
    pub groups: PhaseOutcome<ProvisionReport>,
    pub site_collections: PhaseOutcome<SiteCollectionReport>,
    pub working_site_collections: Vec<SiteCollInfo>,
}

/// Creates users, security groups and site collections for one definition
///
/// Every remote call is awaited before the next one starts. The directory
/// and site collection host are owned for the length of the run.
pub struct ClientDataGenerator<D, H> {
    definition: ClientGeneratorDefinition,
    settings: Settings,
    directory: D,
    sites: H,
    sample_data: SampleData,
    progress: Box<dyn Progress + Send>,
    working_site_collections: Vec<SiteCollInfo>,
    all_users: Option<Vec<String>>,
    all_groups: Option<Vec<String>>,
}

impl<D: Directory, H: SiteCollectionHost> ClientDataGenerator<D, H> {
    pub fn new(definition: ClientGeneratorDefinition, directory: D, sites: H) -> Self {
        Self {
            definition,
            settings: Settings::default(),
            directory,
            sites,
            sample_data: SampleData::new(),
            progress: Box::new(LogProgress),
            working_site_collections: Vec::new(),
            all_users: None,
            all_groups: None,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_sample_data(mut self, sample_data: SampleData) -> Self {
        self.sample_data = sample_data;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress + Send>) -> Self {
        self.progress = progress;
        self
    }

    pub fn definition(&self) -> &ClientGeneratorDefinition {
        &self.definition
    }

    pub fn working_site_collections(&self) -> &[SiteCollInfo] {
        &self.working_site_collections
    }

    /// Hand back the remote services once the run is over
    pub fn into_parts(self) -> (D, H) {
        (self.directory, self.sites)
    }

    /// User principal names in the directory, read once per run
    pub async fn available_users_in_directory(&mut self) -> anyhow::Result<&[String]> {
        if self.all_users.is_none() {
            let users = self
                .directory
                .user_principal_names()
                .await
                .context("Failed to enumerate directory users")?;
            log::debug!("Directory holds {} users", users.len());
            self.all_users = Some(users);
        }
        Ok(self.all_users.as_deref().unwrap_or_default())
    }

    /// Group display names in the directory, read once per run
    pub async fn available_groups_in_directory(&mut self) -> anyhow::Result<&[String]> {
        if self.all_groups.is_none() {
            let groups = self
                .directory
                .group_display_names()
                .await
                .context("Failed to enumerate directory groups")?;
            log::debug!("Directory holds {} groups", groups.len());
            self.all_groups = Some(groups);
        }
        Ok(self.all_groups.as_deref().unwrap_or_default())
    }

    /// Run every phase in order: users, groups, site collections
    ///
    /// A phase that aborts does not stop the phases after it.
    pub async fn generate(&mut self) -> RunSummary {
        log::info!("Starting generator run for tenant {}", self.definition.tenant_name);

        let (users, groups) = self.create_users_and_groups().await;
        let site_collections = self.resolve_web_apps_and_site_collections().await;

        RunSummary {
            users,
            groups,
            site_collections,
            working_site_collections: self.working_site_collections.clone(),
        }
    }

    pub async fn create_users_and_groups(&mut self) -> (PhaseOutcome<ProvisionReport>, PhaseOutcome<ProvisionReport>) {
        let users = self.create_users().await;
        let groups = self.create_groups().await;
        (users, groups)
    }

    pub async fn create_users(&mut self) -> PhaseOutcome<ProvisionReport> {
        let count = self.definition.base.number_of_users_to_create;
        if count == 0 {
            return PhaseOutcome::Skipped;
        }

        self.progress.overall("Creating Users", count);

        let domain = match self.directory.default_domain().await {
            Ok(domain) => domain,
            Err(e) => {
                log::error!("Tenant lookup failed, skipping user creation: {:#}", e);
                return PhaseOutcome::Aborted {
                    report: ProvisionReport::new(count),
                    error: format!("{:#}", e),
                };
            }
        };
        log::info!("Creating {} users in {}", count, domain);

        let settings = &self.settings;
        let sample_data = &mut self.sample_data;
        let progress = &mut self.progress;
        let mut sink = UserSink(&mut self.directory);

        let outcome = provision(
            count,
            settings.batch_size,
            &mut sink,
            || (sample_data.first_name(), sample_data.last_name()),
            |&(first, last)| {
                let user = build_user(first, last, &domain, settings);
                progress.detail(&format!("Creating user {}", user.user_principal_name));
                user
            },
        )
        .await;

        finish_phase(outcome.report, outcome.error)
    }

    pub async fn create_groups(&mut self) -> PhaseOutcome<ProvisionReport> {
        let count = self.definition.base.number_of_security_groups_to_create;
        if count == 0 {
            return PhaseOutcome::Skipped;
        }

        self.progress.overall("Creating Groups", count);
        log::info!("Creating {} security groups", count);

        let settings = &self.settings;
        let sample_data = &mut self.sample_data;
        let progress = &mut self.progress;
        let mut names = PoolNames::accounts();
        let mut sink = GroupSink(&mut self.directory);

        let outcome = provision(
            count,
            settings.batch_size,
            &mut sink,
            || names.next(sample_data),
            |name: &String| {
                progress.detail(&format!("Creating group {}", name));
                build_group(name)
            },
        )
        .await;

        finish_phase(outcome.report, outcome.error)
    }

    pub async fn resolve_web_apps_and_site_collections(&mut self) -> PhaseOutcome<SiteCollectionReport> {
        let result = resolve_site_collections(
            &self.definition,
            &mut self.sites,
            &mut self.sample_data,
            self.progress.as_mut(),
            &mut self.working_site_collections,
        )
        .await;

        match result {
            Ok(report) => PhaseOutcome::Completed(report),
            Err(e) => {
                log::error!("Site collection phase aborted: {:#}", e);
                PhaseOutcome::Aborted {
                    report: SiteCollectionReport {
                        requested: self.definition.base.create_new_site_collections,
                        ..Default::default()
                    },
                    error: format!("{:#}", e),
                }
            }
        }
    }
}

fn finish_phase(report: ProvisionReport, error: Option<anyhow::Error>) -> PhaseOutcome<ProvisionReport> {
    match error {
        Some(e) => PhaseOutcome::Aborted {
            report,
            error: format!("{:#}", e),
        },
        None => PhaseOutcome::Completed(report),
    }
}

/// User payload for a sampled name pair
pub fn build_user(first_name: &str, last_name: &str, domain: &str, settings: &Settings) -> NewUser {
    let mail_nickname = user_mail_nickname(first_name, last_name);
    NewUser {
        account_enabled: true,
        given_name: first_name.to_string(),
        surname: last_name.to_string(),
        display_name: format!("{} {}", first_name, last_name),
        user_principal_name: format!("{}@{}", mail_nickname, domain),
        mail_nickname,
        usage_location: settings.usage_location.clone(),
        password_profile: PasswordProfile {
            password: settings.default_user_password.clone(),
            force_change_password_next_sign_in: false,
        },
    }
}

/// Security group payload for a sampled display name
pub fn build_group(display_name: &str) -> NewGroup {
    NewGroup {
        display_name: display_name.to_string(),
        mail_nickname: group_mail_nickname(display_name),
        mail_enabled: false,
        security_enabled: true,
    }
}
