//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract the string literal at a cursor position
//! - `file`: Extract every `Text()` literal in one file
//! - `project`: Extract every `Text()` literal under `lib/`
//! - `init`: Write a default `l10n.yaml`

use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::File(cmd)) => cmd.common.verbose,
            Some(Command::Project(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the extraction commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Flutter project root (default: nearest directory with l10n.yaml or pubspec.yaml)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Resource directory, relative to the project root (overrides l10n.yaml)
    #[arg(long)]
    pub resource_dir: Option<PathBuf>,

    /// Accept suggested keys without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Copy values into every resource file untranslated
    #[arg(long)]
    pub no_translate: bool,

    /// Skip `flutter gen-l10n` after extraction
    #[arg(long)]
    pub no_generate: bool,

    /// DeepL authentication key
    #[arg(long, env = "DEEPL_AUTH_KEY", hide_env_values = true)]
    pub auth_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// A 1-based `LINE:COL` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub col: usize,
}

impl FromStr for CursorPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (line, col) = s
            .split_once(':')
            .ok_or_else(|| format!("expected LINE:COL, got \"{}\"", s))?;
        let parse = |part: &str, name: &str| match part.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("{} must be a positive number, got \"{}\"", name, part)),
        };
        Ok(Self {
            line: parse(line, "line")?,
            col: parse(col, "column")?,
        })
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Dart source file
    pub file: PathBuf,

    /// Position inside the string literal
    #[arg(long, value_name = "LINE:COL")]
    pub at: CursorPosition,

    /// Use this key instead of naming one
    #[arg(long)]
    pub key: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FileCommand {
    /// Dart source file
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ProjectCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract the string literal at a position into the resource files
    Extract(ExtractCommand),
    /// Extract every Text() literal in a file
    File(FileCommand),
    /// Extract every Text() literal under lib/
    Project(ProjectCommand),
    /// Initialize a new l10n.yaml configuration file
    Init,
}
