pub mod remove;
pub mod select;
pub mod setup;
pub mod status;

pub use remove::remove_command;
pub use select::select_command;
pub use setup::{SetupOptions, setup_command};
pub use status::status_command;
