//! Resource file discovery.
//!
//! Resource files follow the `<base>_<lang>.<ext>` convention, e.g.
//! `app_en.arb` or `app_pt_BR.arb`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::error::SyncError;

/// A resource file in the catalog. The file itself may not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub language: String,
}

/// Extract the language code from a resource file name.
///
/// The code is everything after the first `_` of the stem. It must start
/// with two or three ASCII letters; subtags may follow after `_` or `-`.
///
/// ```
/// use arbx::core::catalog::language_code;
///
/// assert_eq!(language_code("app_fr.arb").as_deref(), Some("fr"));
/// assert_eq!(language_code("app_pt_BR.arb").as_deref(), Some("pt_BR"));
/// assert_eq!(language_code("app.arb"), None);
/// ```
pub fn language_code(file_name: &str) -> Option<String> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    let (base, code) = stem.split_once('_')?;
    if base.is_empty() || !is_language_shaped(code) {
        return None;
    }
    Some(code.to_string())
}

fn is_language_shaped(code: &str) -> bool {
    let mut subtags = code.split(['_', '-']);
    let primary_ok = subtags.next().is_some_and(|primary| {
        (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic())
    });
    primary_ok
        && subtags.all(|subtag| !subtag.is_empty() && subtag.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// The resource files in one directory that share an extension.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    pub files: Vec<ResourceFile>,
}

impl ResourceCatalog {
    /// List `dir` for files named `<base>_<lang>.<extension>`.
    ///
    /// Files are sorted by name so runs are reproducible. Names that do not
    /// carry a language code are skipped.
    pub fn scan(dir: &Path, extension: &str) -> Result<Self, SyncError> {
        let unreadable = |source| SyncError::ResourceDirUnreadable {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()).map(String::from)
            else {
                continue;
            };
            let Some(language) = language_code(&file_name) else {
                continue;
            };
            files.push(ResourceFile {
                path,
                file_name,
                language,
            });
        }
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Ok(Self { files })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
