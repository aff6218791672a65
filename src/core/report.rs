//! Outcome types returned by the orchestrator.
//!
//! Nothing in the core prints; the CLI renders these in `cli::report`.

use std::fmt;

use super::sync::SyncReport;

/// De-duplicated, ordered warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn push_unique(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.0.contains(&message) {
            self.0.push(message);
        }
    }

    pub fn extend(&mut self, other: &Warnings) {
        for message in &other.0 {
            self.push_unique(message.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Stage of an extraction run, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanning,
    Committing,
    Synchronizing,
    Generating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scanning => "scan",
            Stage::Committing => "edit",
            Stage::Synchronizing => "sync",
            Stage::Generating => "generate",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub stage: Stage,
    /// File or document the failure belongs to.
    pub target: String,
    pub message: String,
}

/// Where an extracted literal was, in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedKey {
    pub key: String,
    pub value: String,
    pub document: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub col: usize,
    pub source_line: String,
}

/// Result of one orchestrator entry point.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Literals whose replacement was committed, in processing order.
    pub extracted: Vec<ExtractedKey>,
    /// Literals skipped because the prompt was cancelled or no key resulted.
    pub skipped: usize,
    /// Documents written by a successful commit.
    pub documents_edited: Vec<String>,
    pub sync: Option<SyncReport>,
    pub generated: bool,
    pub failures: Vec<Failure>,
    pub warnings: Warnings,
}

impl ExtractionReport {
    /// Nothing was discovered or every literal was skipped.
    pub fn nothing_to_do(&self) -> bool {
        self.extracted.is_empty() && self.failures.is_empty()
    }

    /// Every attempted stage completed, including every resource file.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn fail(&mut self, stage: Stage, target: impl Into<String>, message: impl Into<String>) {
        self.failures.push(Failure {
            stage,
            target: target.into(),
            message: message.into(),
        });
    }
}
