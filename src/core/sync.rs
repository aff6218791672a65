//! Resource file synchronization.
//!
//! Fans a batch of key/value pairs out to every resource file in the
//! catalog, translating values for non-source languages.
//!
//! ## Guarantees
//!
//! - An unreadable resource directory fails the whole call before any file
//!   is touched.
//! - Each file is read, merged, and written once. A failure on one file
//!   does not stop or roll back the others; it shows up in [`SyncReport`].
//! - Translation chunks are sent one after another, never concurrently.
//! - The file in the source language is never sent to the translator.
//!
//! There is no optimistic locking: two overlapping runs on the same file can
//! lose one run's keys (last writer wins).

use std::{
    cell::Cell,
    path::{Path, PathBuf},
};

use super::{
    batch::{BatchEntry, CHUNK_SIZE, ExtractionBatch},
    catalog::{ResourceCatalog, ResourceFile},
    error::{FileSyncError, SyncError},
    report::Warnings,
    resource_file::{KeyStats, ResourceMap},
};
use crate::{
    config::RunConfig,
    translate::{TranslateError, Translator},
};

/// Outcome for one resource file.
#[derive(Debug)]
pub struct FileOutcome {
    pub file: ResourceFile,
    /// Values went through the translator (at least partially).
    pub translated: bool,
    pub result: Result<KeyStats, FileSyncError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default)]
pub struct SyncReport {
    pub files: Vec<FileOutcome>,
    pub warnings: Warnings,
}

impl SyncReport {
    /// True when every resource file was written.
    pub fn success(&self) -> bool {
        self.files.iter().all(FileOutcome::is_ok)
    }

    pub fn written(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| !f.is_ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallShape {
    /// One translator call per key.
    PerKey,
    /// One translator call per chunk.
    Chunked,
}

pub struct ResourceFileSynchronizer<'a> {
    dir: PathBuf,
    extension: String,
    source_language: String,
    translate: bool,
    translator: &'a dyn Translator,
    chunk_size: usize,
    auth_failed: Cell<bool>,
}

impl<'a> ResourceFileSynchronizer<'a> {
    pub fn new(
        dir: impl Into<PathBuf>,
        extension: impl Into<String>,
        source_language: impl Into<String>,
        translate: bool,
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            source_language: source_language.into(),
            translate,
            translator,
            chunk_size: CHUNK_SIZE,
            auth_failed: Cell::new(false),
        }
    }

    pub fn from_config(
        config: &RunConfig,
        project_root: &Path,
        translator: &'a dyn Translator,
    ) -> Self {
        Self::new(
            config.resource_dir_in(project_root),
            config.resource_extension(),
            config.source_language(),
            config.translate,
            translator,
        )
    }

    #[cfg(test)]
    fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Write one key to every resource file.
    pub fn apply(&self, key: &str, value: &str) -> Result<SyncReport, SyncError> {
        self.sync(&ExtractionBatch::single(key, value), CallShape::PerKey)
    }

    /// Write a whole batch to every resource file, translating in chunks.
    pub fn apply_batch(&self, batch: &ExtractionBatch) -> Result<SyncReport, SyncError> {
        self.sync(batch, CallShape::Chunked)
    }

    fn sync(&self, batch: &ExtractionBatch, shape: CallShape) -> Result<SyncReport, SyncError> {
        let catalog = ResourceCatalog::scan(&self.dir, &self.extension)?;
        let mut report = SyncReport::default();

        if catalog.is_empty() {
            report.warnings.push_unique(format!(
                "no *_<lang>.{} files in {}",
                self.extension,
                self.dir.display()
            ));
            return Ok(report);
        }
        if batch.is_empty() {
            return Ok(report);
        }

        for file in catalog.files {
            let translated = self.needs_translation(&file);
            let result = self.sync_file(&file, batch, shape, translated, &mut report.warnings);
            report.files.push(FileOutcome {
                file,
                translated,
                result,
            });
        }

        Ok(report)
    }

    fn needs_translation(&self, file: &ResourceFile) -> bool {
        self.translate && !same_language(&file.language, &self.source_language)
    }

    fn sync_file(
        &self,
        file: &ResourceFile,
        batch: &ExtractionBatch,
        shape: CallShape,
        translate: bool,
        warnings: &mut Warnings,
    ) -> Result<KeyStats, FileSyncError> {
        let mut map = ResourceMap::open_or_create(&file.path)?;
        let mut stats = KeyStats::default();

        for chunk in batch.chunks(self.chunk_size) {
            let values = if translate {
                self.localize(chunk, &file.language, shape, warnings)?
            } else {
                chunk.iter().map(|e| e.value.clone()).collect()
            };

            for (entry, value) in chunk.iter().zip(&values) {
                stats.record(map.set(&entry.key, value));
            }
        }

        map.save()?;
        Ok(stats)
    }

    /// Translate one chunk, index-aligned with `chunk`.
    ///
    /// Auth failures fall back to the source values; any other failure fails
    /// the file.
    fn localize(
        &self,
        chunk: &[BatchEntry],
        language: &str,
        shape: CallShape,
        warnings: &mut Warnings,
    ) -> Result<Vec<String>, FileSyncError> {
        let passthrough = || chunk.iter().map(|e| e.value.clone()).collect::<Vec<_>>();
        if self.auth_failed.get() {
            return Ok(passthrough());
        }

        let texts: Vec<&str> = chunk.iter().map(|e| e.value.as_str()).collect();
        let result = match shape {
            CallShape::PerKey => texts
                .iter()
                .map(|text| self.translator.translate(text, language))
                .collect::<Result<Vec<_>, _>>(),
            CallShape::Chunked => self.translator.translate_batch(&texts, language),
        };

        match result {
            Ok(values) if values.len() == chunk.len() => Ok(values),
            Ok(values) => Err(FileSyncError::Translation {
                language: language.to_string(),
                source: TranslateError::Provider(format!(
                    "expected {} translations, got {}",
                    chunk.len(),
                    values.len()
                )),
            }),
            Err(err) if err.is_auth() => {
                self.auth_failed.set(true);
                warnings.push_unique(format!("values copied untranslated: {}", err));
                Ok(passthrough())
            }
            Err(source) => Err(FileSyncError::Translation {
                language: language.to_string(),
                source,
            }),
        }
    }
}

/// Compare language codes ignoring case and `_`/`-` differences.
fn same_language(a: &str, b: &str) -> bool {
    let normalize = |code: &str| code.replace('-', "_").to_lowercase();
    normalize(a) == normalize(b)
}
