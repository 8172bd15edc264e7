//! Synthetic data generation
//!
//! Sample name pools, the batched provisioning loop, site collection
//! resolution and the `ClientDataGenerator` that runs them against a tenant.

pub mod client_generator;
pub mod definition;
pub mod naming;
pub mod progress;
pub mod provisioning;
pub mod remote;
pub mod sample_data;
pub mod site_collections;

pub use client_generator::{ClientDataGenerator, PhaseOutcome, RunSummary};
pub use definition::{ClientGeneratorDefinition, GeneratorDefinition};
pub use progress::{LogProgress, Progress};
pub use provisioning::{ProvisionReport, DEFAULT_BATCH_SIZE};
pub use remote::{Directory, SiteCollectionHost};
pub use sample_data::{PoolNames, SampleData};
pub use site_collections::{SiteCollInfo, SiteCollectionReport};
