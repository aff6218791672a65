//! arbx - extract hardcoded Flutter strings into ARB resource files
//!
//! arbx finds string literals in Dart sources, names a key for each one,
//! writes the value into every `<base>_<lang>.arb` file (machine-translated
//! for the other languages), and replaces the literal with a generated
//! localization accessor.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, prompts, report output)
//! - `config`: `l10n.yaml` loading and defaults
//! - `core`: Extraction engine (scan, naming, edits, resource file sync)
//! - `translate`: Machine translation providers

pub mod cli;
pub mod config;
pub mod core;
pub mod translate;
