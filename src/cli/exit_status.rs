use std::process::ExitCode;

use crate::core::ExtractionReport;

/// Exit status for CLI commands.
///
/// - `Success` (0): Everything was extracted, or there was nothing to extract
/// - `Failure` (1): The run finished but some document or resource file failed
/// - `Error` (2): The run could not start (bad arguments, unreadable source file)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_report(report: &ExtractionReport) -> Self {
        if report.is_success() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
