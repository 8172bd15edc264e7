mod auth;
mod graph;
mod sharepoint;
