//! API Constants and Configuration for Microsoft Graph and SharePoint Online

/// Microsoft Graph host, also used as the token `resource`
pub const GRAPH_HOST: &str = "https://graph.microsoft.com";

/// Microsoft Graph API version
pub const GRAPH_API_VERSION: &str = "v1.0";

/// Batch endpoint for multi-request calls
pub const BATCH_ENDPOINT: &str = "$batch";

/// Microsoft Graph rejects JSON batches with more than 20 requests
pub const MAX_BATCH_REQUESTS: usize = 20;

/// Page size requested when enumerating users and groups
pub const DIRECTORY_PAGE_SIZE: u32 = 999;

/// Row limit for each SharePoint search page
pub const SEARCH_ROW_LIMIT: u32 = 500;

/// Login authority used for the password grant
pub const LOGIN_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Standard headers
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// SharePoint REST accept header without OData metadata noise
    pub const ACCEPT_SHAREPOINT_JSON: &str = "application/json;odata=nometadata";

    /// Header to correlate a run's requests in server-side diagnostics
    pub const CLIENT_REQUEST_ID: &str = "client-request-id";
}

/// SharePoint defaults used when creating site collections
pub mod site_defaults {
    /// English (United States)
    pub const LCID: u32 = 1033;

    /// Modern team site without a Microsoft 365 group
    pub const WEB_TEMPLATE: &str = "STS#3";

    /// Maximum length of the generated site leaf name
    pub const LEAF_NAME_MAX_LEN: usize = 25;

    /// `SiteStatus` value reported when provisioning failed
    pub const SITE_STATUS_ERROR: i64 = 3;
}

/// Full Graph API root for a base URL
pub fn graph_root(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), GRAPH_API_VERSION)
}

/// Build a Graph resource endpoint URL (`users`, `groups`, `organization`)
pub fn graph_endpoint(base_url: &str, resource: &str) -> String {
    format!("{}/{}", graph_root(base_url), resource)
}

/// Build the Graph batch endpoint URL
pub fn batch_endpoint(base_url: &str) -> String {
    graph_endpoint(base_url, BATCH_ENDPOINT)
}

/// Root URL of a SharePoint Online tenant
pub fn sharepoint_root(tenant_name: &str) -> String {
    format!("https://{}.sharepoint.com", tenant_name)
}

/// URL of a site collection under the `/sites` managed path
pub fn site_collection_url(tenant_name: &str, leaf_name: &str) -> String {
    format!("{}/sites/{}", sharepoint_root(tenant_name), leaf_name)
}

/// OAuth2 token endpoint for a tenant
pub fn token_endpoint(tenant_name: &str) -> String {
    format!("{}/{}.onmicrosoft.com/oauth2/token", LOGIN_AUTHORITY, tenant_name)
}
