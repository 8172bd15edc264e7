pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod generator;
pub mod ui;
pub mod wizard;
