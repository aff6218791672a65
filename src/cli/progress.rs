use colored::Colorize;

use crate::core::ProgressReporter;

/// Writes `[i/n] message` lines to stderr.
pub struct TerminalProgress {
    label: &'static str,
    enabled: bool,
}

impl TerminalProgress {
    pub fn new(label: &'static str, enabled: bool) -> Self {
        Self { label, enabled }
    }
}

impl ProgressReporter for TerminalProgress {
    fn report(&mut self, current: usize, total: usize, message: &str) {
        if !self.enabled {
            return;
        }
        eprintln!(
            "{} [{}/{}] {}",
            format!("{:>12}", self.label).green().bold(),
            current,
            total,
            message
        );
    }
}
