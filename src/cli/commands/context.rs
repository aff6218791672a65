use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use super::super::{
    args::CommonArgs,
    prompt::{AcceptDefaultsPrompt, TerminalPrompt},
    report::print_warning,
};
use crate::{
    config::{RunConfig, find_project_root, resolve},
    core::{FileDocument, UserPrompt},
    translate::DeeplTranslator,
};

/// Everything an extraction command needs, resolved once per invocation.
pub struct RunContext {
    pub cwd: PathBuf,
    pub project_root: PathBuf,
    pub config: RunConfig,
    pub translator: DeeplTranslator,
    pub yes: bool,
    pub verbose: bool,
}

impl RunContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;
        let project_root = match &common.project_root {
            Some(root) => cwd.join(root),
            None => find_project_root(&cwd).unwrap_or_else(|| cwd.clone()),
        };
        if !project_root.is_dir() {
            bail!("Project root {} is not a directory", project_root.display());
        }

        let resolution = resolve(&project_root);
        if let Some(diagnostic) = &resolution.diagnostic {
            print_warning(&diagnostic.to_string());
        }

        let mut config = resolution.config;
        if let Some(dir) = &common.resource_dir {
            config.resource_dir = dir.clone();
        }
        if common.no_translate {
            config.translate = false;
        }
        if common.no_generate {
            config.generate = false;
        }

        Ok(Self {
            cwd,
            project_root,
            config,
            translator: DeeplTranslator::new(common.auth_key.clone()),
            yes: common.yes,
            verbose: common.verbose,
        })
    }

    pub fn prompt(&self) -> Box<dyn UserPrompt> {
        if self.yes {
            Box::new(AcceptDefaultsPrompt)
        } else {
            Box::new(TerminalPrompt::stdio())
        }
    }

    /// Open a source file given on the command line.
    pub fn open_document(&self, file: &Path) -> Result<FileDocument> {
        let path = self.cwd.join(file);
        let id = path
            .strip_prefix(&self.project_root)
            .unwrap_or(file)
            .display()
            .to_string();
        Ok(FileDocument::open(&path)?.with_id(id))
    }
}
