pub mod reset;
pub mod set;
pub mod show;

pub use reset::reset_command;
pub use set::set_command;
pub use show::show_command;
