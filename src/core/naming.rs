//! Key naming policy.
//!
//! Turns a literal's value into a resource key, either by slugging it
//! (optionally after translating it into the key-name language) or by asking
//! the user through a [`UserPrompt`].

use std::{cell::Cell, fmt};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::report::Warnings;
use crate::config::RunConfig;
use crate::translate::Translator;

/// How keys are obtained for each literal.
///
/// In `l10n.yaml` this is `auto-name-key: ask | true | false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingMode {
    /// Suggest a slug and let the user accept, edit, or cancel it.
    #[default]
    Ask,
    /// Use the slug without asking.
    Auto,
    /// Ask for every key with no suggestion.
    Manual,
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingMode::Ask => write!(f, "ask"),
            NamingMode::Auto => write!(f, "true"),
            NamingMode::Manual => write!(f, "false"),
        }
    }
}

impl Serialize for NamingMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NamingMode::Ask => serializer.serialize_str("ask"),
            NamingMode::Auto => serializer.serialize_bool(true),
            NamingMode::Manual => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for NamingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Word(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(NamingMode::Auto),
            Raw::Flag(false) => Ok(NamingMode::Manual),
            Raw::Word(word) => match word.trim().to_lowercase().as_str() {
                "ask" => Ok(NamingMode::Ask),
                "true" => Ok(NamingMode::Auto),
                "false" => Ok(NamingMode::Manual),
                other => Err(de::Error::custom(format!(
                    "invalid auto-name-key \"{}\" (expected ask, true or false)",
                    other
                ))),
            },
        }
    }
}

/// Asks the user for a key.
pub trait UserPrompt {
    /// Ask for the key of `value`, pre-filled with `default` when present.
    ///
    /// Returns `None` when the user cancels.
    fn ask_for_key(&mut self, value: &str, default: Option<&str>) -> Option<String>;
}

/// Convert text into a lower-camel-case key.
///
/// Every run of characters outside `[a-z0-9]` (after lowercasing) becomes a
/// word boundary. Returns an empty string when the text has no ASCII
/// alphanumerics.
///
/// ```
/// use arbx::core::naming::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "helloWorld");
/// assert_eq!(slugify("  already-lower  "), "alreadyLower");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut spaced = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            spaced.push(c);
            in_gap = false;
        } else if !in_gap {
            spaced.push(' ');
            in_gap = true;
        }
    }

    let mut camel = String::with_capacity(spaced.len());
    for (i, word) in spaced.split_whitespace().enumerate() {
        if i == 0 {
            camel.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                camel.extend(first.to_uppercase());
                camel.push_str(chars.as_str());
            }
        }
    }

    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `key` is usable as a generated getter name.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Applies a [`NamingMode`] to literal values.
pub struct KeyNamer<'a> {
    mode: NamingMode,
    key_name_language: &'a str,
    /// `None` when translation is disabled.
    translator: Option<&'a dyn Translator>,
    /// Set after the first auth failure; later values are not sent.
    auth_failed: Cell<bool>,
}

impl<'a> KeyNamer<'a> {
    pub fn new(
        mode: NamingMode,
        key_name_language: &'a str,
        translator: Option<&'a dyn Translator>,
    ) -> Self {
        Self {
            mode,
            key_name_language,
            translator,
            auth_failed: Cell::new(false),
        }
    }

    pub fn from_config(config: &'a RunConfig, translator: &'a dyn Translator) -> Self {
        Self::new(
            config.naming_mode,
            &config.key_name_language,
            config.translate.then_some(translator),
        )
    }

    /// The deterministic key for `value`.
    ///
    /// Translation failures fall back to the untranslated value and are
    /// recorded in `warnings`.
    pub fn suggest(&self, value: &str, warnings: &mut Warnings) -> String {
        let translator = self.translator.filter(|_| !self.auth_failed.get());
        let normalized = match translator {
            Some(translator) => match translator.translate(value, self.key_name_language) {
                Ok(translated) => translated,
                Err(err) => {
                    if err.is_auth() {
                        self.auth_failed.set(true);
                    }
                    warnings.push_unique(format!(
                        "key names use untranslated text ({})",
                        err
                    ));
                    value.to_string()
                }
            },
            None => value.to_string(),
        };
        slugify(&normalized)
    }

    /// Obtain the key for `value`, or `None` if the user cancelled.
    pub fn name_key(
        &self,
        value: &str,
        prompt: &mut dyn UserPrompt,
        warnings: &mut Warnings,
    ) -> Option<String> {
        let answer = match self.mode {
            NamingMode::Manual => prompt.ask_for_key(value, None),
            NamingMode::Auto => return Some(self.suggest(value, warnings)),
            NamingMode::Ask => {
                let suggestion = self.suggest(value, warnings);
                let default = (!suggestion.is_empty()).then_some(suggestion.as_str());
                prompt.ask_for_key(value, default)
            }
        };

        answer
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
