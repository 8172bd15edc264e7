/// Test modules for spdg-cli
///
/// Tests are organized into logical groupings:
/// - api: Graph, SharePoint and token clients against mock servers
/// - generator: full generator runs against in-memory tenants
mod api;
mod generator;
