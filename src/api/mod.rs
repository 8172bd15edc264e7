//! Microsoft Graph and SharePoint Online API Module
//!
//! Token acquisition, the directory client (tenant lookup, paged user/group
//! enumeration, batched creation) and the SharePoint site collection client.

pub mod auth;
pub mod client;
pub mod constants;
pub mod manager;
pub mod models;
pub mod operations;
pub mod sharepoint;

pub use auth::AuthManager;
pub use client::GraphClient;
pub use manager::{ClientManager, DeferredSharePoint};
pub use models::{CredentialSet, NewGroup, NewUser, PasswordProfile, TenantDetail, TokenInfo};
pub use operations::{Operation, OperationResult, Operations};
pub use sharepoint::{SharePointClient, SiteCreationStatus};
