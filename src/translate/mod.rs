//! Machine translation capability.
//!
//! The synchronizer and the key naming policy only see the [`Translator`]
//! trait. [`DeeplTranslator`] is the HTTP implementation used by the CLI.
//!
//! Implementations never receive the source language: the provider detects it.
//! Callers decide when a value must not be translated at all (e.g. the
//! canonical resource file).

mod deepl;

pub use deepl::{AUTH_KEY_ENV, DeeplTranslator};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// Credentials are missing or rejected. Callers degrade to passthrough.
    #[error("translation provider rejected the credentials: {0}")]
    Auth(String),

    /// Any other provider or transport failure.
    #[error("translation provider error: {0}")]
    Provider(String),
}

impl TranslateError {
    pub fn is_auth(&self) -> bool {
        matches!(self, TranslateError::Auth(_))
    }
}

pub type TranslateResult<T> = std::result::Result<T, TranslateError>;

pub trait Translator {
    /// Translate a single text into `target_lang` (e.g. `fr`, `pt_BR`).
    fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String>;

    /// Translate several texts in one call.
    ///
    /// The returned vector must be index-aligned with `texts`. The default
    /// implementation issues one call per text, in order.
    fn translate_batch(&self, texts: &[&str], target_lang: &str) -> TranslateResult<Vec<String>> {
        texts
            .iter()
            .map(|text| self.translate(text, target_lang))
            .collect()
    }
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String> {
        (**self).translate(text, target_lang)
    }

    fn translate_batch(&self, texts: &[&str], target_lang: &str) -> TranslateResult<Vec<String>> {
        (**self).translate_batch(texts, target_lang)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String> {
        (**self).translate(text, target_lang)
    }

    fn translate_batch(&self, texts: &[&str], target_lang: &str) -> TranslateResult<Vec<String>> {
        (**self).translate_batch(texts, target_lang)
    }
}
