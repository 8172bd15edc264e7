pub mod run;
pub mod wizard;

pub use run::{definition_from_args, generate_command, run_generator};
pub use wizard::wizard_command;
