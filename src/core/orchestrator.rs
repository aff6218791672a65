//! Extraction runs.
//!
//! One [`ExtractionOrchestrator`] call walks a run through its stages:
//! scan, name each literal, stage replacements, commit the document, write
//! the resource files, then regenerate accessors. A failed stage skips the
//! stages after it for the same scope; nothing already written is rolled
//! back. Every outcome ends up in the returned [`ExtractionReport`].

use std::path::Path;

use super::{
    batch::ExtractionBatch,
    codegen::Codegen,
    edit::{FileDocument, TextEditTarget},
    error::SyncError,
    naming::{KeyNamer, UserPrompt, is_valid_key},
    report::{ExtractedKey, ExtractionReport, Stage, Warnings},
    scan::{ExtractionRequest, LineIndex, find_literals},
    source_files::{SOURCE_DIR, scan_source_files},
    sync::{ResourceFileSynchronizer, SyncReport},
};
use crate::{config::RunConfig, translate::Translator};

/// Receives `(current, total)` progress while a run advances.
pub trait ProgressReporter {
    fn report(&mut self, current: usize, total: usize, message: &str);
}

/// Discards progress.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _current: usize, _total: usize, _message: &str) {}
}

pub struct ExtractionOrchestrator<'a> {
    config: &'a RunConfig,
    project_root: &'a Path,
    translator: &'a dyn Translator,
    prompt: &'a mut dyn UserPrompt,
    progress: &'a mut dyn ProgressReporter,
    codegen: &'a mut dyn Codegen,
    namer: KeyNamer<'a>,
}

impl<'a> ExtractionOrchestrator<'a> {
    pub fn new(
        config: &'a RunConfig,
        project_root: &'a Path,
        translator: &'a dyn Translator,
        prompt: &'a mut dyn UserPrompt,
        progress: &'a mut dyn ProgressReporter,
        codegen: &'a mut dyn Codegen,
    ) -> Self {
        Self {
            config,
            project_root,
            translator,
            prompt,
            progress,
            codegen,
            namer: KeyNamer::from_config(config, translator),
        }
    }

    /// Extract one literal selected in `target`.
    pub fn extract_selection(
        &mut self,
        target: &mut dyn TextEditTarget,
        request: &ExtractionRequest,
    ) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        let range = request.source_range.clone();
        if target.text().get(range.clone()) != Some(request.raw_literal_text.as_str()) {
            report.fail(
                Stage::Scanning,
                target.id(),
                format!(
                    "{} no longer matches the document at {}..{}",
                    request.raw_literal_text, range.start, range.end
                ),
            );
            return report;
        }

        let value = request.value();
        let Some(key) = self.name_key(value, &mut report.warnings) else {
            report.skipped += 1;
            return report;
        };

        let index = LineIndex::new(target.text());
        let (line, col) = index.position(range.start);
        let extracted = ExtractedKey {
            key: key.clone(),
            value: value.to_string(),
            document: target.id().to_string(),
            line,
            col,
            source_line: index.line_text(range.start).to_string(),
        };

        target.replace(range, &self.replacement(&key));
        self.stage_import(target);
        if let Err(err) = target.commit() {
            report.fail(Stage::Committing, target.id(), format!("{:#}", err));
            return report;
        }
        report.documents_edited.push(target.id().to_string());
        report.extracted.push(extracted);

        let result = self.synchronizer().apply(&key, value);
        self.finish(&mut report, result);
        report
    }

    /// Extract every eligible literal in `target` with a single commit.
    pub fn extract_file(&mut self, target: &mut dyn TextEditTarget) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        let Some(batch) = self.extract_document(target, &mut report, true) else {
            return report;
        };

        let result = self.synchronizer().apply_batch(&batch);
        self.finish(&mut report, result);
        report
    }

    /// Extract every eligible literal under `lib/`.
    ///
    /// Each document is committed as soon as it is processed. Resource files
    /// are written once at the end, with the pairs of committed documents only.
    pub fn extract_project(&mut self) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        let scan = scan_source_files(self.project_root);
        if scan.skipped_count > 0 {
            report.warnings.push_unique(format!(
                "{} entries under {}/ could not be read",
                scan.skipped_count, SOURCE_DIR
            ));
        }

        let total = scan.files.len();
        let mut project_batch = ExtractionBatch::new();
        for (i, path) in scan.files.iter().enumerate() {
            let id = path
                .strip_prefix(self.project_root)
                .unwrap_or(path)
                .display()
                .to_string();
            self.progress.report(i + 1, total, &id);

            let mut document = match FileDocument::open(path) {
                Ok(document) => document.with_id(id),
                Err(err) => {
                    report.fail(Stage::Scanning, id, format!("{:#}", err));
                    continue;
                }
            };
            if let Some(batch) = self.extract_document(&mut document, &mut report, false) {
                for entry in batch.entries() {
                    merge_pair(&mut project_batch, &entry.key, &entry.value, &mut report.warnings);
                }
            }
        }

        if project_batch.is_empty() {
            return report;
        }

        let result = self.synchronizer().apply_batch(&project_batch);
        self.finish(&mut report, result);
        report
    }

    /// Name, stage, and commit every literal of one document.
    ///
    /// Returns the document's pairs, or `None` when nothing was committed.
    fn extract_document(
        &mut self,
        target: &mut dyn TextEditTarget,
        report: &mut ExtractionReport,
        per_literal_progress: bool,
    ) -> Option<ExtractionBatch> {
        let literals = find_literals(target.text());
        let total = literals.len();
        let mut batch = ExtractionBatch::new();
        let mut extracted = Vec::new();

        // Back to front, so each staged range still matches the original text.
        for (i, literal) in literals.iter().rev().enumerate() {
            if per_literal_progress {
                self.progress.report(i + 1, total, &literal.value);
            }

            let Some(key) = self.name_key(&literal.value, &mut report.warnings) else {
                report.skipped += 1;
                continue;
            };

            target.replace(literal.range.clone(), &self.replacement(&key));
            merge_pair(&mut batch, &key, &literal.value, &mut report.warnings);
            extracted.push(ExtractedKey {
                key,
                value: literal.value.clone(),
                document: target.id().to_string(),
                line: literal.line,
                col: literal.col,
                source_line: literal.source_line.clone(),
            });
        }

        if batch.is_empty() {
            return None;
        }

        self.stage_import(target);
        if let Err(err) = target.commit() {
            report.fail(Stage::Committing, target.id(), format!("{:#}", err));
            return None;
        }
        report.documents_edited.push(target.id().to_string());
        report.extracted.extend(extracted);
        Some(batch)
    }

    /// Obtain a usable key for `value`, or `None` to skip the literal.
    fn name_key(&mut self, value: &str, warnings: &mut Warnings) -> Option<String> {
        let key = self.namer.name_key(value, &mut *self.prompt, warnings)?;

        if key.is_empty() {
            warnings.push_unique(format!("no key could be derived from \"{}\", skipped", value));
            return None;
        }
        if !is_valid_key(&key) {
            warnings.push_unique(format!("key `{}` is not a valid Dart identifier", key));
        }
        Some(key)
    }

    fn replacement(&self, key: &str) -> String {
        format!("{}{}", self.config.key_prefix, key)
    }

    fn stage_import(&self, target: &mut dyn TextEditTarget) {
        let line = self.config.import_line.as_str();
        if !line.is_empty() && !target.text().contains(line) {
            target.insert_at_top(&format!("{}\n", line));
        }
    }

    fn synchronizer(&self) -> ResourceFileSynchronizer<'a> {
        ResourceFileSynchronizer::from_config(self.config, self.project_root, self.translator)
    }

    /// Record the sync outcome, then regenerate if every file was written.
    fn finish(&mut self, report: &mut ExtractionReport, result: Result<SyncReport, SyncError>) {
        let sync = match result {
            Ok(sync) => sync,
            Err(err) => {
                let dir = self.config.resource_dir_in(self.project_root);
                report.fail(Stage::Synchronizing, dir.display().to_string(), err.to_string());
                return;
            }
        };

        report.warnings.extend(&sync.warnings);
        for outcome in sync.failed() {
            if let Err(err) = &outcome.result {
                report.fail(
                    Stage::Synchronizing,
                    outcome.file.path.display().to_string(),
                    err.to_string(),
                );
            }
        }

        let run_codegen = self.config.generate && sync.success() && sync.written().count() > 0;
        report.sync = Some(sync);
        if !run_codegen {
            return;
        }

        match self.codegen.generate(self.project_root) {
            Ok(()) => report.generated = true,
            Err(err) => report.fail(
                Stage::Generating,
                self.project_root.display().to_string(),
                format!("{:#}", err),
            ),
        }
    }
}

/// Add a pair to `batch`, warning when a key is reused for another value.
fn merge_pair(batch: &mut ExtractionBatch, key: &str, value: &str, warnings: &mut Warnings) {
    if let Some(previous) = batch.insert(key, value)
        && previous != value
    {
        warnings.push_unique(format!(
            "key `{}` used for \"{}\" and \"{}\", keeping \"{}\"",
            key, previous, value, value
        ));
    }
}
