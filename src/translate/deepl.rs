use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use serde::{Deserialize, Serialize};

use super::{TranslateError, TranslateResult, Translator};

/// Environment variable holding the DeepL authentication key.
pub const AUTH_KEY_ENV: &str = "DEEPL_AUTH_KEY";

const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a [&'a str],
    target_lang: String,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
struct TranslatedText {
    text: String,
}

/// DeepL REST client.
///
/// Constructed without a key it still works as a [`Translator`]: every call
/// fails with [`TranslateError::Auth`], which callers turn into passthrough.
pub struct DeeplTranslator {
    /// The build error, kept for the first call to report.
    client: Result<Client, String>,
    auth_key: Option<String>,
    endpoint: String,
}

impl DeeplTranslator {
    pub fn new(auth_key: Option<String>) -> Self {
        let auth_key = auth_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        // Free-plan keys carry a ":fx" suffix and must use the free endpoint.
        let endpoint = match &auth_key {
            Some(key) if key.ends_with(":fx") => FREE_ENDPOINT,
            _ => PRO_ENDPOINT,
        };
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| e.to_string());

        Self {
            client,
            auth_key,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn has_auth_key(&self) -> bool {
        self.auth_key.is_some()
    }

    fn post(&self, texts: &[&str], target_lang: &str) -> TranslateResult<Vec<String>> {
        let Some(auth_key) = &self.auth_key else {
            return Err(TranslateError::Auth(format!(
                "no DeepL authentication key (set {} or pass --auth-key)",
                AUTH_KEY_ENV
            )));
        };
        let client = self.client.as_ref().map_err(|reason| {
            TranslateError::Provider(format!("HTTP client could not be initialized: {}", reason))
        })?;

        let request = TranslateRequest {
            text: texts,
            target_lang: deepl_target_lang(target_lang),
        };
        let response = client
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", auth_key))
            .json(&request)
            .send()
            .map_err(|e| TranslateError::Provider(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(TranslateError::Auth(format!("DeepL returned {}", status)));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TranslateError::Provider(format!(
                "DeepL returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .map_err(|e| TranslateError::Provider(format!("invalid DeepL response: {}", e)))?;
        Ok(parsed.translations.into_iter().map(|t| t.text).collect())
    }
}

impl Translator for DeeplTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> TranslateResult<String> {
        self.post(&[text], target_lang)?
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::Provider("DeepL returned no translation".to_string()))
    }

    fn translate_batch(&self, texts: &[&str], target_lang: &str) -> TranslateResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.post(texts, target_lang)
    }
}

/// Map a resource-file language code to a DeepL `target_lang`.
///
/// `fr` -> `FR`, `pt_BR` -> `PT-BR`. Bare `en` and `pt` are deprecated as
/// targets, so they map to a regional variant.
fn deepl_target_lang(code: &str) -> String {
    let normalized = code.replace('_', "-").to_uppercase();
    match normalized.as_str() {
        "EN" => "EN-US".to_string(),
        "PT" => "PT-PT".to_string(),
        _ => normalized,
    }
}
