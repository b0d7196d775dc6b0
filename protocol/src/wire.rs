//! JSON contract with the translation backend.
//!
//! `POST /translate` with `{"text": "..."}`. The backend answers with either
//! `{"translation": "..."}` or `{"error": "..."}`; the HTTP status is not what decides failure.

use serde::Deserialize;
use serde::Serialize;

use crate::TranslationOutcome;

/// Path of the translation endpoint, relative to the configured base URL.
pub const TRANSLATE_PATH: &str = "/translate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    /// Trimmed user input.
    pub text: String,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Response body. Both fields are optional so that any JSON object parses; the shape is judged
/// in [`TranslateResponse::into_outcome`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TranslateResponse {
    /// Map a parsed body to an outcome.
    ///
    /// A non-empty `error` wins regardless of status or of a `translation` also being present.
    /// A `translation` only counts on a 2xx status. Anything else returns `None` and the caller
    /// falls back to [`TranslationOutcome::transport_failure`].
    pub fn into_outcome(self, status_ok: bool) -> Option<TranslationOutcome> {
        if let Some(error) = self.error.filter(|error| !error.is_empty()) {
            return Some(TranslationOutcome::failure(error));
        }
        if !status_ok {
            return None;
        }
        self.translation.map(TranslationOutcome::success)
    }
}
