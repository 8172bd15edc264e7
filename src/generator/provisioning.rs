//! Batched creation of uniquely named remote objects
//!
//! `provision` creates `count` objects: each gets a name not used earlier in
//! the run, a failed add is logged and skipped, and a commit is issued after
//! every `batch_size` successful adds plus once at the end for any remainder.
//! A failed commit stops the loop; the caller decides what that means for the
//! rest of the run.

use async_trait::async_trait;
use std::collections::HashSet;
use std::hash::Hash;

use super::remote::Directory;
use crate::api::models::{NewGroup, NewUser};

/// Successful adds between two commits unless configured otherwise
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Resamples allowed before a name pool counts as exhausted
pub const MAX_SAMPLE_ATTEMPTS: usize = 10_000;

/// Remote add/commit pair for one object type
#[async_trait]
pub trait BatchSink<T: Sync>: Send {
    /// Object type used in log lines
    fn kind(&self) -> &'static str;

    /// Identity of an item used in log lines
    fn describe(&self, item: &T) -> String;

    async fn add(&mut self, item: &T) -> anyhow::Result<()>;

    async fn commit(&mut self) -> anyhow::Result<()>;
}

/// Counters for one provisioning phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub requested: usize,
    /// Add invocations
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub commits: usize,
}

impl ProvisionReport {
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// Requested objects that were not created
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.succeeded)
    }
}

/// Report plus the error that stopped the loop, if any
#[derive(Debug)]
pub struct ProvisionOutcome {
    pub report: ProvisionReport,
    pub error: Option<anyhow::Error>,
}

impl ProvisionOutcome {
    pub fn is_aborted(&self) -> bool {
        self.error.is_some()
    }
}

/// Draw keys until one is not in `used`, recording it
pub fn sample_unique<K, F>(used: &mut HashSet<K>, mut sample: F, max_attempts: usize) -> Option<K>
where
    K: Eq + Hash + Clone,
    F: FnMut() -> K,
{
    for _ in 0..max_attempts {
        let key = sample();
        if used.insert(key.clone()) {
            return Some(key);
        }
    }
    None
}

/// Run the add/commit loop for `count` objects
///
/// `sample_key` draws a candidate name, `build` turns an unused name into the
/// object handed to the sink.
pub async fn provision<T, K, S, F, B>(
    count: usize,
    batch_size: usize,
    sink: &mut S,
    mut sample_key: F,
    mut build: B,
) -> ProvisionOutcome
where
    T: Sync,
    K: Eq + Hash + Clone,
    S: BatchSink<T> + ?Sized,
    F: FnMut() -> K,
    B: FnMut(&K) -> T,
{
    let batch_size = batch_size.max(1);
    let mut report = ProvisionReport::new(count);
    let mut used: HashSet<K> = HashSet::with_capacity(count);
    let mut uncommitted = 0;

    for index in 0..count {
        let Some(key) = sample_unique(&mut used, &mut sample_key, MAX_SAMPLE_ATTEMPTS) else {
            log::error!(
                "No unused {} name left after {} attempts, skipping item {} of {}",
                sink.kind(),
                MAX_SAMPLE_ATTEMPTS,
                index + 1,
                count
            );
            report.failed += 1;
            continue;
        };

        let item = build(&key);
        report.attempted += 1;

        match sink.add(&item).await {
            Ok(()) => {
                report.succeeded += 1;
                uncommitted += 1;
            }
            Err(e) => {
                log::error!("Failed to add {} {}: {:#}", sink.kind(), sink.describe(&item), e);
                report.failed += 1;
                continue;
            }
        }

        if uncommitted >= batch_size {
            if let Err(e) = sink.commit().await {
                log::error!("Commit of {} {}s failed: {:#}", uncommitted, sink.kind(), e);
                return ProvisionOutcome { report, error: Some(e) };
            }
            log::info!("Committed {} {}s ({} so far)", uncommitted, sink.kind(), report.succeeded);
            report.commits += 1;
            uncommitted = 0;
        }
    }

    if uncommitted > 0 {
        if let Err(e) = sink.commit().await {
            log::error!("Commit of {} {}s failed: {:#}", uncommitted, sink.kind(), e);
            return ProvisionOutcome { report, error: Some(e) };
        }
        log::info!("Committed {} {}s ({} total)", uncommitted, sink.kind(), report.succeeded);
        report.commits += 1;
    }

    ProvisionOutcome { report, error: None }
}

/// Users through a directory
pub struct UserSink<'a, D: Directory + ?Sized>(pub &'a mut D);

/// Security groups through a directory
pub struct GroupSink<'a, D: Directory + ?Sized>(pub &'a mut D);

#[async_trait]
impl<D: Directory + ?Sized> BatchSink<NewUser> for UserSink<'_, D> {
    fn kind(&self) -> &'static str {
        "user"
    }

    fn describe(&self, item: &NewUser) -> String {
        item.user_principal_name.clone()
    }

    async fn add(&mut self, item: &NewUser) -> anyhow::Result<()> {
        self.0.add_user(item).await
    }

    async fn commit(&mut self) -> anyhow::Result<()> {
        self.0.save_changes().await
    }
}

#[async_trait]
impl<D: Directory + ?Sized> BatchSink<NewGroup> for GroupSink<'_, D> {
    fn kind(&self) -> &'static str {
        "group"
    }

    fn describe(&self, item: &NewGroup) -> String {
        item.display_name.clone()
    }

    async fn add(&mut self, item: &NewGroup) -> anyhow::Result<()> {
        self.0.add_group(item).await
    }

    async fn commit(&mut self) -> anyhow::Result<()> {
        self.0.save_changes().await
    }
}
