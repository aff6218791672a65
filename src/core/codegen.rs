use std::{
    path::Path,
    process::{Command, Stdio},
};

use anyhow::{Context, Result, bail};

/// Regenerates localization accessors after resource files change.
pub trait Codegen {
    fn generate(&mut self, project_root: &Path) -> Result<()>;
}

/// Runs `flutter gen-l10n` in the project root.
#[derive(Debug, Clone)]
pub struct FlutterGenL10n {
    program: String,
}

impl Default for FlutterGenL10n {
    fn default() -> Self {
        Self {
            program: "flutter".to_string(),
        }
    }
}

impl FlutterGenL10n {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Codegen for FlutterGenL10n {
    fn generate(&mut self, project_root: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("gen-l10n")
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .with_context(|| format!("Failed to run `{} gen-l10n`", self.program))?;

        if !status.success() {
            bail!("`{} gen-l10n` exited with {}", self.program, status);
        }
        Ok(())
    }
}
