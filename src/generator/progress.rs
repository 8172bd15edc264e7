//! Progress reporting hooks for a generator run

/// Receives phase titles and per-step detail messages
pub trait Progress {
    /// A new phase starts with `total` steps
    fn overall(&mut self, title: &str, total: usize);

    fn detail(&mut self, message: &str);
}

/// Writes progress to the log only
#[derive(Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn overall(&mut self, title: &str, total: usize) {
        log::info!("{} ({})", title, total);
    }

    fn detail(&mut self, message: &str) {
        log::debug!("{}", message);
    }
}

/// Collects every message, used by tests
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub phases: Vec<(String, usize)>,
    pub details: Vec<String>,
}

impl Progress for RecordingProgress {
    fn overall(&mut self, title: &str, total: usize) {
        self.phases.push((title.to_string(), total));
    }

    fn detail(&mut self, message: &str) {
        self.details.push(message.to_string());
    }
}
