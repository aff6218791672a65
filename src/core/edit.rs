//! Text edits staged against a document and committed as one transaction.

use std::{
    fs,
    io::Write,
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedEdit {
    Replace { range: Range<usize>, text: String },
    InsertAtTop { text: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit range {start}..{end} is outside the document ({len} bytes)")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit range {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },

    #[error("edit ranges {first:?} and {second:?} overlap")]
    Overlap {
        first: Range<usize>,
        second: Range<usize>,
    },
}

/// Apply `edits` to `text`, all or nothing.
///
/// Replacement ranges refer to `text` as it was before any edit, so they can
/// be staged in any order. Top insertions keep their staging order and land
/// before everything else.
pub fn apply_edits(text: &str, edits: &[StagedEdit]) -> Result<String, EditError> {
    let mut replacements: Vec<(&Range<usize>, &str)> = Vec::new();
    let mut header = String::new();

    for edit in edits {
        match edit {
            StagedEdit::Replace { range, text: replacement } => {
                if range.start > range.end || range.end > text.len() {
                    return Err(EditError::OutOfBounds {
                        start: range.start,
                        end: range.end,
                        len: text.len(),
                    });
                }
                if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
                    return Err(EditError::NotCharBoundary {
                        start: range.start,
                        end: range.end,
                    });
                }
                replacements.push((range, replacement));
            }
            StagedEdit::InsertAtTop { text: inserted } => header.push_str(inserted),
        }
    }

    replacements.sort_by_key(|(range, _)| (range.start, range.end));
    for pair in replacements.windows(2) {
        let (first, second) = (pair[0].0, pair[1].0);
        if second.start < first.end {
            return Err(EditError::Overlap {
                first: first.clone(),
                second: second.clone(),
            });
        }
    }

    let mut result = text.to_string();
    for (range, replacement) in replacements.iter().rev() {
        result.replace_range((*range).clone(), replacement);
    }
    result.insert_str(0, &header);

    Ok(result)
}

/// An editable document.
///
/// Edits are staged with [`replace`](TextEditTarget::replace) and
/// [`insert_at_top`](TextEditTarget::insert_at_top), then applied together by
/// [`commit`](TextEditTarget::commit). Staged ranges always refer to the text
/// as it was when staging started.
pub trait TextEditTarget {
    /// Identifier shown in reports (usually a path).
    fn id(&self) -> &str;

    /// Current committed text.
    fn text(&self) -> &str;

    fn replace(&mut self, range: Range<usize>, text: &str);

    fn insert_at_top(&mut self, text: &str);

    /// Apply all staged edits or none. Staged edits are cleared either way.
    fn commit(&mut self) -> Result<()>;
}

/// A source file on disk.
pub struct FileDocument {
    path: PathBuf,
    id: String,
    text: String,
    staged: Vec<StagedEdit>,
}

impl FileDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            id: path.display().to_string(),
            text,
            staged: Vec::new(),
        })
    }

    /// Use `id` instead of the full path in reports.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

}

impl TextEditTarget for FileDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.staged.push(StagedEdit::Replace {
            range,
            text: text.to_string(),
        });
    }

    fn insert_at_top(&mut self, text: &str) {
        self.staged.push(StagedEdit::InsertAtTop {
            text: text.to_string(),
        });
    }

    fn commit(&mut self) -> Result<()> {
        let edits = std::mem::take(&mut self.staged);
        if edits.is_empty() {
            return Ok(());
        }
        let updated = apply_edits(&self.text, &edits)
            .with_context(|| format!("Failed to apply edits to {}", self.path.display()))?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        tmp.write_all(updated.as_bytes())
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        }
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;

        self.text = updated;
        Ok(())
    }
}
