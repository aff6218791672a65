//! Report formatting and printing utilities.
//!
//! Extracted keys are shown in cargo style with the literal underlined.
//! Separate from the core so the engine can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{ExtractionReport, report::ExtractedKey};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print the outcome to stdout and its warnings and errors to stderr.
pub fn print(report: &ExtractionReport, verbose: bool) {
    write_diagnostics(report, &mut io::stderr().lock());
    write_report(report, verbose, &mut io::stdout().lock());
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warning:".bold().yellow(), message);
}

/// Write extracted keys (verbose only) and the summary line.
pub fn write_report<W: Write>(report: &ExtractionReport, verbose: bool, writer: &mut W) {
    if verbose {
        let max_line_width = report
            .extracted
            .iter()
            .map(|e| e.line.to_string().len())
            .max()
            .unwrap_or(1);
        for extracted in &report.extracted {
            print_extracted(extracted, writer, max_line_width);
        }
        print_resource_files(report, writer);
    }

    print_summary(report, writer);
}

/// Write warnings and failures.
pub fn write_diagnostics<W: Write>(report: &ExtractionReport, writer: &mut W) {
    for warning in report.warnings.iter() {
        let _ = writeln!(writer, "{} {}", "warning:".bold().yellow(), warning);
    }
    for failure in &report.failures {
        let _ = writeln!(
            writer,
            "{} {}: {}  {}",
            "error:".bold().red(),
            failure.target,
            failure.message,
            failure.stage.to_string().dimmed().cyan()
        );
    }
}

fn print_extracted<W: Write>(extracted: &ExtractedKey, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "{}: \"{}\" as {}",
        "extracted".bold().green(),
        extracted.value,
        extracted.key.cyan()
    );
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        extracted.document,
        extracted.line,
        extracted.col
    );
    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        extracted.line.to_string().blue(),
        "|".blue(),
        extracted.source_line,
        width = max_line_width
    );

    // Underline the literal, quotes included (col is 1-based).
    let prefix: String = extracted
        .source_line
        .chars()
        .take(extracted.col.saturating_sub(1))
        .collect();
    let literal: String = extracted
        .source_line
        .chars()
        .skip(extracted.col.saturating_sub(1))
        .take(extracted.value.chars().count() + 2)
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let carets = "^".repeat(UnicodeWidthStr::width(literal.as_str()).max(1));
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets.green(),
        width = max_line_width,
        padding = caret_padding
    );
    let _ = writeln!(writer);
}

fn print_resource_files<W: Write>(report: &ExtractionReport, writer: &mut W) {
    let Some(sync) = &report.sync else {
        return;
    };
    for outcome in sync.written() {
        let Ok(stats) = &outcome.result else {
            continue;
        };
        let _ = writeln!(
            writer,
            "  {} {} ({} added, {} updated{})",
            SUCCESS_MARK.green(),
            outcome.file.file_name,
            stats.added,
            stats.updated,
            if outcome.translated { ", translated" } else { "" }
        );
    }
}

fn print_summary<W: Write>(report: &ExtractionReport, writer: &mut W) {
    let skipped = if report.skipped > 0 {
        format!(" ({} skipped)", report.skipped)
    } else {
        String::new()
    };

    if report.nothing_to_do() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Nothing to extract{}", skipped).green()
        );
        return;
    }

    let keys = report.extracted.len();
    let keys_label = if keys == 1 { "key" } else { "keys" };

    if report.is_success() {
        let files = report.sync.as_ref().map_or(0, |s| s.written().count());
        let generated = if report.generated {
            ", regenerated localizations"
        } else {
            ""
        };
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Extracted {} {} into {} resource {}{}{}",
                keys,
                keys_label,
                files,
                if files == 1 { "file" } else { "files" },
                generated,
                skipped
            )
            .green()
        );
    } else {
        let problems = report.failures.len();
        let _ = writeln!(
            writer,
            "{} Extracted {} {}{}, {} {}",
            FAILURE_MARK.red(),
            keys,
            keys_label,
            skipped,
            problems,
            if problems == 1 { "problem" } else { "problems" }.red()
        );
    }
}
