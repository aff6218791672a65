//! Test doubles for the orchestrator's collaborators.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    ops::Range,
    path::Path,
};

use anyhow::{Result, bail};

use super::{
    codegen::Codegen,
    edit::{StagedEdit, TextEditTarget, apply_edits},
    naming::UserPrompt,
    orchestrator::ProgressReporter,
};
use crate::translate::{TranslateError, TranslateResult, Translator};

/// Returns every text unchanged.
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _target_lang: &str) -> TranslateResult<String> {
        Ok(text.to_string())
    }
}

/// Looks up `(text, language)` pairs; anything else comes back unchanged.
pub struct MapTranslator {
    entries: HashMap<(String, String), String>,
}

impl MapTranslator {
    pub fn new(entries: &[(&str, &str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(text, lang, out)| ((text.to_string(), lang.to_string()), out.to_string()))
                .collect(),
        }
    }
}

impl Translator for MapTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String> {
        Ok(self
            .entries
            .get(&(text.to_string(), target_lang.to_string()))
            .cloned()
            .unwrap_or_else(|| text.to_string()))
    }
}

/// Fails every call, counting them.
pub struct FailingTranslator {
    auth: bool,
    calls: Cell<usize>,
}

impl FailingTranslator {
    pub fn auth() -> Self {
        Self {
            auth: true,
            calls: Cell::new(0),
        }
    }

    pub fn provider() -> Self {
        Self {
            auth: false,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Translator for FailingTranslator {
    fn translate(&self, _text: &str, _target_lang: &str) -> TranslateResult<String> {
        self.calls.set(self.calls.get() + 1);
        if self.auth {
            Err(TranslateError::Auth("403 Forbidden".to_string()))
        } else {
            Err(TranslateError::Provider("503 Service Unavailable".to_string()))
        }
    }
}

/// Prefixes texts with `[lang] ` and records how it was called.
#[derive(Default)]
pub struct RecordingTranslator {
    drop_last: bool,
    languages: RefCell<Vec<String>>,
    chunk_sizes: RefCell<Vec<usize>>,
    single_calls: Cell<usize>,
}

impl RecordingTranslator {
    /// Returns one translation fewer than requested from batch calls.
    pub fn dropping_last() -> Self {
        Self {
            drop_last: true,
            ..Self::default()
        }
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.borrow().clone()
    }

    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.chunk_sizes.borrow().clone()
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.get()
    }
}

impl Translator for RecordingTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String> {
        self.single_calls.set(self.single_calls.get() + 1);
        self.languages.borrow_mut().push(target_lang.to_string());
        Ok(format!("[{}] {}", target_lang, text))
    }

    fn translate_batch(&self, texts: &[&str], target_lang: &str) -> TranslateResult<Vec<String>> {
        self.chunk_sizes.borrow_mut().push(texts.len());
        self.languages.borrow_mut().push(target_lang.to_string());
        let mut out: Vec<String> = texts
            .iter()
            .map(|text| format!("[{}] {}", target_lang, text))
            .collect();
        if self.drop_last {
            out.pop();
        }
        Ok(out)
    }
}

/// Answers key prompts from a script, recording every question.
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    accept_defaults: bool,
    pub asked: Vec<(String, Option<String>)>,
}

impl ScriptedPrompt {
    /// Answers in order; cancels once the script runs out.
    pub fn new(answers: Vec<Option<String>>) -> Self {
        Self {
            answers: answers.into(),
            accept_defaults: false,
            asked: Vec::new(),
        }
    }

    /// Accepts whatever default is offered.
    pub fn accept_defaults() -> Self {
        Self {
            answers: VecDeque::new(),
            accept_defaults: true,
            asked: Vec::new(),
        }
    }
}

impl UserPrompt for ScriptedPrompt {
    fn ask_for_key(&mut self, value: &str, default: Option<&str>) -> Option<String> {
        self.asked
            .push((value.to_string(), default.map(str::to_string)));
        if self.accept_defaults {
            return default.map(str::to_string);
        }
        self.answers.pop_front().flatten()
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Vec<(usize, usize, String)>,
}

impl ProgressReporter for RecordingProgress {
    fn report(&mut self, current: usize, total: usize, message: &str) {
        self.events.push((current, total, message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingCodegen {
    pub runs: usize,
    pub fail: bool,
}

impl Codegen for RecordingCodegen {
    fn generate(&mut self, _project_root: &Path) -> Result<()> {
        self.runs += 1;
        if self.fail {
            bail!("gen-l10n failed");
        }
        Ok(())
    }
}

/// An in-memory document.
pub struct MemoryDocument {
    id: String,
    text: String,
    staged: Vec<StagedEdit>,
    reject_commit: bool,
    /// Number of commit calls, successful or not.
    pub commits: usize,
}

impl MemoryDocument {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            staged: Vec::new(),
            reject_commit: false,
            commits: 0,
        }
    }

    /// Every commit fails, as when the editor refuses the change.
    pub fn rejecting(mut self) -> Self {
        self.reject_commit = true;
        self
    }
}

impl TextEditTarget for MemoryDocument {
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
        self.commits += 1;
        let edits = std::mem::take(&mut self.staged);
        if self.reject_commit {
            bail!("document {} rejected the edit", self.id);
        }
        self.text = apply_edits(&self.text, &edits)?;
        Ok(())
    }
}
