//! Extraction engine.
//!
//! - `scan` / `source_files`: find literals and the documents that hold them
//! - `naming`: turn a literal into a key
//! - `edit`: stage and commit source replacements
//! - `sync`: write key/value pairs into every resource file
//! - `orchestrator`: run the stages above for a selection, file, or project
//!
//! Nothing here prints. Results come back as [`ExtractionReport`].

pub mod batch;
pub mod catalog;
pub mod codegen;
pub mod edit;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod report;
pub mod resource_file;
pub mod scan;
pub mod source_files;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{CHUNK_SIZE, ExtractionBatch};
pub use codegen::{Codegen, FlutterGenL10n};
pub use edit::{FileDocument, TextEditTarget};
pub use naming::{NamingMode, UserPrompt};
pub use orchestrator::{ExtractionOrchestrator, NoProgress, ProgressReporter};
pub use report::{ExtractionReport, Failure, Stage};
pub use scan::ExtractionRequest;
pub use sync::{ResourceFileSynchronizer, SyncReport};
