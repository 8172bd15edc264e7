use async_trait::async_trait;
use spdg_cli::api::{NewGroup, NewUser};
use spdg_cli::generator::{Directory, SiteCollectionHost};

/// In-memory directory that records every call
#[derive(Default)]
pub struct FakeDirectory {
    pub domain: Option<String>,
    pub existing_users: Vec<String>,
    pub existing_groups: Vec<String>,
    pub pending_users: Vec<NewUser>,
    pub pending_groups: Vec<NewGroup>,
    pub users: Vec<NewUser>,
    pub groups: Vec<NewGroup>,
    /// Size of the queue at each successful commit
    pub commits: Vec<usize>,
    pub user_enumerations: usize,
    /// Display names whose add is rejected
    pub rejected_groups: Vec<String>,
    /// 1-based commit number that fails
    pub fail_commit: Option<usize>,
    pub commit_calls: usize,
}

impl FakeDirectory {
    pub fn with_domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn default_domain(&mut self) -> anyhow::Result<String> {
        self.domain
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Tenant has no default verified domain"))
    }

    async fn user_principal_names(&mut self) -> anyhow::Result<Vec<String>> {
        self.user_enumerations += 1;
        Ok(self.existing_users.clone())
    }

    async fn group_display_names(&mut self) -> anyhow::Result<Vec<String>> {
        Ok(self.existing_groups.clone())
    }

    async fn add_user(&mut self, user: &NewUser) -> anyhow::Result<()> {
        self.pending_users.push(user.clone());
        Ok(())
    }

    async fn add_group(&mut self, group: &NewGroup) -> anyhow::Result<()> {
        if self.rejected_groups.contains(&group.display_name) {
            anyhow::bail!("Group '{}' rejected", group.display_name);
        }
        self.pending_groups.push(group.clone());
        Ok(())
    }

    async fn save_changes(&mut self) -> anyhow::Result<()> {
        self.commit_calls += 1;
        let queued = self.pending_users.len() + self.pending_groups.len();
        let users = std::mem::take(&mut self.pending_users);
        let groups = std::mem::take(&mut self.pending_groups);

        if self.fail_commit == Some(self.commit_calls) {
            anyhow::bail!("Batch request failed");
        }

        self.users.extend(users);
        self.groups.extend(groups);
        self.commits.push(queued);
        Ok(())
    }
}

/// In-memory site collection host
#[derive(Default)]
pub struct FakeSites {
    pub existing: Vec<String>,
    pub created: Vec<(String, String, String)>,
    pub enumerations: usize,
}

#[async_trait]
impl SiteCollectionHost for FakeSites {
    async fn site_collection_urls(&mut self) -> anyhow::Result<Vec<String>> {
        self.enumerations += 1;
        Ok(self.existing.clone())
    }

    async fn create_site_collection(&mut self, title: &str, leaf_name: &str, owner: &str) -> anyhow::Result<()> {
        self.created
            .push((title.to_string(), leaf_name.to_string(), owner.to_string()));
        Ok(())
    }
}
