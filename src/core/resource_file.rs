use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use super::error::FileSyncError;

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
}

/// Counts of [`KeyAction`]s applied to one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyStats {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl KeyStats {
    pub fn record(&mut self, action: KeyAction) {
        match action {
            KeyAction::Added => self.added += 1,
            KeyAction::Updated => self.updated += 1,
            KeyAction::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.added + self.updated + self.unchanged
    }
}

/// The key/value map of one resource file, held fully in memory.
///
/// Keys are flat: `"Navigation.signOut"` is a single key, not a path.
/// Entries that are not plain strings (ARB `@key` metadata, `@@locale`) are
/// kept as-is, and key order is preserved with new keys appended.
pub struct ResourceMap {
    file_path: PathBuf,
    data: Map<String, Value>,
}

impl ResourceMap {
    /// Open an existing resource file, or start an empty map if it is absent.
    ///
    /// A file that exists but is not a JSON object is an error; its content is
    /// never discarded.
    pub fn open_or_create(path: &Path) -> Result<Self, FileSyncError> {
        let data = match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Map::new(),
            Ok(content) => parse_object(&content).map_err(|reason| FileSyncError::Corrupt {
                path: path.to_path_buf(),
                reason,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(source) => {
                return Err(FileSyncError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Ok(Self {
            file_path: path.to_path_buf(),
            data,
        })
    }

    /// Set `key` to `value`, overwriting any previous value.
    pub fn set(&mut self, key: &str, value: &str) -> KeyAction {
        let value = Value::String(value.to_string());
        match self.data.get_mut(key) {
            Some(existing) if *existing == value => KeyAction::Unchanged,
            Some(existing) => {
                *existing = value;
                KeyAction::Updated
            }
            None => {
                self.data.insert(key.to_string(), value);
                KeyAction::Added
            }
        }
    }

    /// Render the map the way it is persisted: 2-space indentation and a
    /// trailing newline.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let content = serde_json::to_string_pretty(&self.data)?;
        Ok(format!("{}\n", content))
    }

    /// Write the whole map back to disk.
    ///
    /// The content goes to a temporary file in the same directory which then
    /// replaces the target, so readers never observe a half-written file.
    pub fn save(&self) -> Result<(), FileSyncError> {
        let write_err = |source| FileSyncError::Write {
            path: self.file_path.clone(),
            source,
        };

        let content = self
            .render()
            .map_err(|e| write_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let parent = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        tmp.persist(&self.file_path)
            .map_err(|e| write_err(e.error))?;

        Ok(())
    }
}

fn parse_object(content: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("root of the file must be an object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
