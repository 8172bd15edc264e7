use super::constants::{self, headers};
use super::models::{GroupName, NewGroup, NewUser, PagedResponse, TenantDetail, UserPrincipal};
use super::operations::{BatchRequestBuilder, BatchResponseParser, Operation, OperationResult, Operations};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Microsoft Graph directory client
///
/// Reads go straight to the service. Creations are queued by `add_user` /
/// `add_group` and only sent when `save_changes` commits them as JSON batches.
pub struct GraphClient {
    base_url: String,
    http_client: reqwest::Client,
    access_token: String,
    request_id: String,
    pending: Operations,
}

impl GraphClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(constants::GRAPH_HOST.to_string(), access_token)
    }

    /// Create a client against a custom Graph host
    pub fn with_base_url(base_url: String, access_token: String) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("spdg-cli/1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url,
            http_client,
            access_token,
            request_id: uuid::Uuid::new_v4().to_string(),
            pending: Operations::new(),
        }
    }

    /// Number of queued, uncommitted creations
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Fetch the tenant's organization record
    pub async fn tenant_detail(&self) -> anyhow::Result<TenantDetail> {
        let url = constants::graph_endpoint(&self.base_url, "organization");
        let page: PagedResponse<TenantDetail> = self.get_json(&url).await?;

        page.value
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Directory returned no tenant details"))
    }

    /// Name of the tenant's default verified domain
    pub async fn default_domain(&self) -> anyhow::Result<String> {
        let tenant = self.tenant_detail().await?;
        tenant
            .default_domain()
            .map(|d| d.to_string())
            .ok_or_else(|| anyhow::anyhow!("Tenant has no default verified domain"))
    }

    /// User principal names of every user in the directory
    pub async fn list_user_principal_names(&self) -> anyhow::Result<Vec<String>> {
        let url = format!(
            "{}?$select=userPrincipalName&$top={}",
            constants::graph_endpoint(&self.base_url, "users"),
            constants::DIRECTORY_PAGE_SIZE
        );
        let users: Vec<UserPrincipal> = self.collect_pages(url).await?;
        Ok(users.into_iter().map(|u| u.user_principal_name).collect())
    }

    /// Display names of every group in the directory
    pub async fn list_group_display_names(&self) -> anyhow::Result<Vec<String>> {
        let url = format!(
            "{}?$select=displayName&$top={}",
            constants::graph_endpoint(&self.base_url, "groups"),
            constants::DIRECTORY_PAGE_SIZE
        );
        let groups: Vec<GroupName> = self.collect_pages(url).await?;
        Ok(groups.into_iter().filter_map(|g| g.display_name).collect())
    }

    /// Queue a user for the next commit
    pub fn add_user(&mut self, user: NewUser) -> anyhow::Result<()> {
        self.pending.push(Operation::CreateUser(user))
    }

    /// Queue a group for the next commit
    pub fn add_group(&mut self, group: NewGroup) -> anyhow::Result<()> {
        self.pending.push(Operation::CreateGroup(group))
    }

    /// Commit every queued creation
    ///
    /// The queue is emptied whether or not the commit succeeds. Every chunk is
    /// sent even when an earlier one fails; a batch request that fails as a
    /// whole or any failed sub-request fails the commit.
    pub async fn save_changes(&mut self) -> anyhow::Result<Vec<OperationResult>> {
        let chunks = self.pending.drain_chunks(constants::MAX_BATCH_REQUESTS);
        let total: usize = chunks.iter().map(Vec::len).sum();
        let mut results = Vec::new();
        let mut unsent = 0;
        let mut request_errors = Vec::new();

        for chunk in chunks {
            match self.execute_batch(&chunk).await {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(e) => {
                    log::error!("Batch of {} operations was not committed: {:#}", chunk.len(), e);
                    unsent += chunk.len();
                    request_errors.push(format!("{:#}", e));
                }
            }
        }

        let failures: Vec<String> = results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| {
                format!(
                    "{}: {}",
                    r.operation.describe(),
                    r.error.as_deref().unwrap_or("unknown error")
                )
            })
            .collect();

        if unsent > 0 {
            anyhow::bail!(
                "{} of {} operations were not sent ({} batch requests failed: {}); {} sent operations failed",
                unsent,
                total,
                request_errors.len(),
                request_errors.join("; "),
                failures.len()
            );
        }

        if !failures.is_empty() {
            anyhow::bail!(
                "{} of {} operations failed in batch commit: {}",
                failures.len(),
                results.len(),
                failures.join("; ")
            );
        }

        log::info!("Committed {} directory operations", results.len());
        Ok(results)
    }

    async fn execute_batch(&self, operations: &[Operation]) -> anyhow::Result<Vec<OperationResult>> {
        let url = constants::batch_endpoint(&self.base_url);
        let request = BatchRequestBuilder::new().add_operations(operations)?.build();

        log::debug!("Sending batch of {} operations to {}", operations.len(), url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .header(headers::CLIENT_REQUEST_ID, &self.request_id)
            .json(&request)
            .send()
            .await
            .context("Batch request failed")?;

        let body: Value = Self::parse_json(response).await?;
        BatchResponseParser::parse(body, operations)
    }

    /// Follow `@odata.nextLink` until the collection is exhausted
    async fn collect_pages<T: DeserializeOwned>(&self, first_url: String) -> anyhow::Result<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(first_url);
        let mut pages = 0;

        while let Some(url) = next {
            let page: PagedResponse<T> = self.get_json(&url).await?;
            pages += 1;
            items.extend(page.value);
            next = page.next_link;
        }

        log::debug!("Read {} items across {} pages", items.len(), pages);
        Ok(items)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .header("Accept", headers::CONTENT_TYPE_JSON)
            .header(headers::CLIENT_REQUEST_ID, &self.request_id)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        Self::parse_json(response).await
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
        let status = response.status();
        log::debug!("Graph response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Graph request failed with HTTP {}: {}", status.as_u16(), error_text);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse Graph response")
    }
}
