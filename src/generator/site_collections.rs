//! Site collection resolution: reuse the configured one or create new ones
//! under names that do not clash with anything already in the tenant.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::definition::ClientGeneratorDefinition;
use super::naming::generate_slug;
use super::progress::Progress;
use super::provisioning::MAX_SAMPLE_ATTEMPTS;
use super::remote::SiteCollectionHost;
use super::sample_data::SampleData;
use crate::api::constants::{site_collection_url, site_defaults};

/// A site collection the rest of the run works against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCollInfo {
    pub url: String,
}

impl SiteCollInfo {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Counts for the site collection phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteCollectionReport {
    pub requested: usize,
    pub created: usize,
    pub failed: usize,
}

/// Fill `working` with the site collections for this run
///
/// With nothing requested the configured site collection is reused as is.
/// Otherwise the existing URLs are read once and each new site gets a
/// company/office name whose URL is neither in that snapshot nor generated
/// earlier in the run. Comparison ignores case. Failing to create one site is
/// logged and skipped; failing to read the snapshot is returned as an error.
pub async fn resolve_site_collections<H>(
    definition: &ClientGeneratorDefinition,
    host: &mut H,
    sample_data: &mut SampleData,
    progress: &mut dyn Progress,
    working: &mut Vec<SiteCollInfo>,
) -> anyhow::Result<SiteCollectionReport>
where
    H: SiteCollectionHost + ?Sized,
{
    let requested = definition.base.create_new_site_collections;
    let mut report = SiteCollectionReport {
        requested,
        ..Default::default()
    };

    if requested == 0 {
        log::info!("Using existing site collection {}", definition.base.site_collection);
        working.push(SiteCollInfo::new(definition.base.site_collection.clone()));
        return Ok(report);
    }

    progress.overall("Creating Web Applications / Site Collections", requested);

    let mut taken: HashSet<String> = host
        .site_collection_urls()
        .await
        .context("Failed to enumerate existing site collections")?
        .into_iter()
        .map(|url| url.to_lowercase())
        .collect();
    log::debug!("{} site collections already exist", taken.len());

    let owner = definition.site_collection_owner().to_string();

    for index in 0..requested {
        let Some((title, leaf_name, url)) = unused_site_name(&definition.tenant_name, sample_data, &mut taken) else {
            log::error!(
                "No unused site collection name left after {} attempts, skipping site {} of {}",
                MAX_SAMPLE_ATTEMPTS,
                index + 1,
                requested
            );
            report.failed += 1;
            continue;
        };

        progress.detail(&format!("Creating site collection {}", url));

        match host.create_site_collection(&title, &leaf_name, &owner).await {
            Ok(()) => {
                log::info!("Created site collection {}", url);
                working.push(SiteCollInfo::new(url));
                report.created += 1;
            }
            Err(e) => {
                log::error!("Failed to create site collection {}: {:#}", url, e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Title, leaf name and URL of a site not in `taken`; the URL is recorded
fn unused_site_name(
    tenant_name: &str,
    sample_data: &mut SampleData,
    taken: &mut HashSet<String>,
) -> Option<(String, String, String)> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let title = sample_data.company_office_name();
        let leaf_name = generate_slug(&title, site_defaults::LEAF_NAME_MAX_LEN);
        let url = site_collection_url(tenant_name, &leaf_name);
        if taken.insert(url.to_lowercase()) {
            return Some((title, leaf_name, url));
        }
    }
    None
}
