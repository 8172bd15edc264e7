//! SharePoint Online REST client for site collection enumeration and creation

use super::constants::{self, headers, site_defaults};
use anyhow::Context;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    primary_query_result: Option<PrimaryQueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PrimaryQueryResult {
    relevant_results: RelevantResults,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelevantResults {
    #[serde(default)]
    total_rows: u64,
    table: ResultTable,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultTable {
    #[serde(default)]
    rows: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultRow {
    #[serde(default)]
    cells: Vec<ResultCell>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultCell {
    key: String,
    value: Option<String>,
}

/// Status returned by `SPSiteManager/create`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SiteCreationStatus {
    #[serde(default)]
    pub site_id: Option<String>,
    pub site_status: i64,
    #[serde(default)]
    pub site_url: Option<String>,
}

/// SharePoint Online client scoped to one tenant root
pub struct SharePointClient {
    root_url: String,
    http_client: reqwest::Client,
    access_token: String,
}

impl SharePointClient {
    pub fn new(root_url: String, access_token: String) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            // Site provisioning can take a while to answer
            .timeout(Duration::from_secs(180))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("spdg-cli/1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            root_url: root_url.trim_end_matches('/').to_string(),
            http_client,
            access_token,
        }
    }

    /// Client for `https://{tenant}.sharepoint.com`
    pub fn for_tenant(tenant_name: &str, access_token: String) -> Self {
        Self::new(constants::sharepoint_root(tenant_name), access_token)
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// URLs of every site collection visible to search
    pub async fn get_all_site_collections(&self) -> anyhow::Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut start_row: u64 = 0;

        loop {
            let url = format!(
                "{}/_api/search/query?querytext='{}'&selectproperties='Path'&trimduplicates=false&rowlimit={}&startrow={}",
                self.root_url,
                urlencoding::encode("contentclass:STS_Site"),
                constants::SEARCH_ROW_LIMIT,
                start_row
            );

            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&self.access_token)
                .header("Accept", headers::ACCEPT_SHAREPOINT_JSON)
                .send()
                .await
                .with_context(|| format!("Site search request failed at row {}", start_row))?;

            let search: SearchResponse = Self::parse_json(response).await?;
            let Some(result) = search.primary_query_result else {
                break;
            };

            let rows = result.relevant_results.table.rows;
            if rows.is_empty() {
                break;
            }
            start_row += rows.len() as u64;

            urls.extend(rows.into_iter().filter_map(|row| {
                row.cells
                    .into_iter()
                    .find(|cell| cell.key == "Path")
                    .and_then(|cell| cell.value)
            }));

            if start_row >= result.relevant_results.total_rows {
                break;
            }
        }

        log::debug!("Found {} existing site collections", urls.len());
        Ok(urls)
    }

    /// Create a site collection under `/sites/{leaf_name}`
    pub async fn create_site_collection(
        &self,
        title: &str,
        leaf_name: &str,
        owner: &str,
    ) -> anyhow::Result<SiteCreationStatus> {
        let url = format!("{}/_api/SPSiteManager/create", self.root_url);
        let site_url = format!("{}/sites/{}", self.root_url, leaf_name);
        let body = json!({
            "request": {
                "Title": title,
                "Url": site_url,
                "Lcid": site_defaults::LCID,
                "ShareByEmailEnabled": false,
                "Description": "",
                "WebTemplate": site_defaults::WEB_TEMPLATE,
                "Owner": owner,
            }
        });

        log::info!("Creating site collection {} owned by {}", site_url, owner);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Accept", headers::ACCEPT_SHAREPOINT_JSON)
            .header("Content-Type", headers::CONTENT_TYPE_JSON)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Site creation request failed for {}", site_url))?;

        let status: SiteCreationStatus = Self::parse_json(response).await?;
        if status.site_status == site_defaults::SITE_STATUS_ERROR {
            anyhow::bail!("SharePoint reported an error creating {}", site_url);
        }

        Ok(status)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
        let status = response.status();
        log::debug!("SharePoint response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("SharePoint request failed with HTTP {}: {}", status.as_u16(), error_text);
        }

        let value: Value = response.json().await.context("Failed to read SharePoint response")?;
        serde_json::from_value(value).context("Failed to parse SharePoint response")
    }
}
