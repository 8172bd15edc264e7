pub mod progress;
pub mod spinner;

pub use progress::{print_run_summary, ConsoleProgress};
pub use spinner::{with_spinner, Spinner};
