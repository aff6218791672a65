use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{catalog::language_code, naming::NamingMode};

/// Flutter's localization config, read from the project root.
pub const CONFIG_FILE_NAME: &str = "l10n.yaml";

/// Marks a Flutter project root when there is no `l10n.yaml` yet.
pub const PUBSPEC_FILE_NAME: &str = "pubspec.yaml";

pub const NULLABLE_KEY_PREFIX: &str = "AppLocalizations.of(context)!.";
pub const NON_NULLABLE_KEY_PREFIX: &str = "AppLocalizations.of(context).";

const DEFAULT_RESOURCE_EXTENSION: &str = "arb";
const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// `l10n.yaml` as written on disk.
///
/// Keys Flutter itself understands (`output-dir`, `synthetic-package`, ...)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct L10nConfig {
    #[serde(default = "default_resource_dir", rename = "arb-dir", alias = "resource-dir")]
    pub resource_dir: String,
    #[serde(
        default = "default_template_file",
        rename = "template-arb-file",
        alias = "template-file"
    )]
    pub template_file: String,
    #[serde(default = "default_true")]
    pub translate: bool,
    #[serde(default)]
    pub import_line: String,
    /// Overrides the prefix derived from `nullable-getter`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,
    #[serde(default = "default_true")]
    pub nullable_getter: bool,
    #[serde(default)]
    pub auto_name_key: NamingMode,
    #[serde(default = "default_true")]
    pub generate: bool,
    /// Defaults to the template file's language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_name_language: Option<String>,
}

fn default_resource_dir() -> String {
    "lib/l10n".to_string()
}

fn default_template_file() -> String {
    "app_en.arb".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for L10nConfig {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            template_file: default_template_file(),
            translate: true,
            import_line: String::new(),
            key_prefix: None,
            nullable_getter: true,
            auto_name_key: NamingMode::default(),
            generate: true,
            key_name_language: None,
        }
    }
}

/// Settings for one invocation, with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Resource directory, relative to the project root unless absolute.
    pub resource_dir: PathBuf,
    pub template_file: String,
    pub translate: bool,
    /// Line ensured at the top of edited files; empty means none.
    pub import_line: String,
    pub key_prefix: String,
    pub naming_mode: NamingMode,
    pub generate: bool,
    pub key_name_language: String,
}

impl From<L10nConfig> for RunConfig {
    fn from(file: L10nConfig) -> Self {
        let key_prefix = file.key_prefix.unwrap_or_else(|| {
            if file.nullable_getter {
                NULLABLE_KEY_PREFIX.to_string()
            } else {
                NON_NULLABLE_KEY_PREFIX.to_string()
            }
        });
        let key_name_language = file
            .key_name_language
            .filter(|lang| !lang.trim().is_empty())
            .unwrap_or_else(|| template_language(&file.template_file));

        Self {
            resource_dir: PathBuf::from(file.resource_dir),
            import_line: normalize_import_line(&file.import_line),
            template_file: file.template_file,
            translate: file.translate,
            key_prefix,
            naming_mode: file.auto_name_key,
            generate: file.generate,
            key_name_language,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        L10nConfig::default().into()
    }
}

impl RunConfig {
    pub fn resource_dir_in(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.resource_dir)
    }

    /// Extension shared by all resource files, taken from the template file.
    pub fn resource_extension(&self) -> &str {
        Path::new(&self.template_file)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_RESOURCE_EXTENSION)
    }

    /// Language of the template file.
    pub fn source_language(&self) -> String {
        template_language(&self.template_file)
    }
}

fn template_language(template_file: &str) -> String {
    language_code(template_file).unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string())
}

/// Trim the line and drop quotes wrapped around it.
fn normalize_import_line(line: &str) -> String {
    line.trim()
        .trim_start_matches(['\'', '"'])
        .trim_end_matches(['\'', '"'])
        .trim()
        .to_string()
}

/// Why the defaults were used instead of `l10n.yaml`.
#[derive(Debug, Error)]
pub enum ConfigDiagnostic {
    #[error("{} not found, using defaults", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read {}: {source}, using defaults", path.display())]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {reason}, using defaults", path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// Result of resolving configuration.
pub struct ConfigResolution {
    pub config: RunConfig,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    pub diagnostic: Option<ConfigDiagnostic>,
}

/// Resolve the configuration of the project at `project_root`.
///
/// Never fails: problems with `l10n.yaml` fall back to the defaults and are
/// described in [`ConfigResolution::diagnostic`].
pub fn resolve(project_root: &Path) -> ConfigResolution {
    let path = project_root.join(CONFIG_FILE_NAME);
    let defaults = |diagnostic| ConfigResolution {
        config: RunConfig::default(),
        from_file: false,
        diagnostic: Some(diagnostic),
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return defaults(ConfigDiagnostic::Missing { path });
        }
        Err(source) => return defaults(ConfigDiagnostic::Unreadable { path, source }),
    };

    match parse_config(&content) {
        Ok(file) => ConfigResolution {
            config: file.into(),
            from_file: true,
            diagnostic: None,
        },
        Err(err) => defaults(ConfigDiagnostic::Malformed {
            path,
            reason: err.to_string(),
        }),
    }
}

/// Parse `l10n.yaml` content. An empty document means all defaults.
pub fn parse_config(content: &str) -> Result<L10nConfig, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    if value.is_null() {
        return Ok(L10nConfig::default());
    }
    serde_yaml::from_value(value)
}

pub fn default_config_yaml() -> Result<String> {
    serde_yaml::to_string(&L10nConfig::default()).context("Failed to generate default config.")
}

/// Walk up from `start_dir` to the directory holding `l10n.yaml` or
/// `pubspec.yaml`. Stops at a repository root.
pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).exists() || current.join(PUBSPEC_FILE_NAME).exists() {
            return Some(current);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}
