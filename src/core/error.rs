use std::{io, path::PathBuf};

use thiserror::Error;

use crate::translate::TranslateError;

/// Failure of a whole synchronization call. Nothing was written.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot read resource directory {}: {source}", path.display())]
    ResourceDirUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of a single resource file. Sibling files are unaffected.
#[derive(Debug, Error)]
pub enum FileSyncError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a JSON object. It is left untouched.
    #[error("{} is not a valid JSON object, refusing to overwrite it: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("translation into \"{language}\" failed: {source}")]
    Translation {
        language: String,
        #[source]
        source: TranslateError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
