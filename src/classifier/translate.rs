//! Translation step applied before sentiment analysis.
//!
//! Translation is best-effort. A translator never returns an error: failures
//! are reported as [`TranslationOutcome::Untranslated`] and the caller
//! classifies the original text instead.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The text was translated.
    Translated(String),
    /// The text could not be translated; use the original.
    Untranslated {
        /// Why translation did not happen.
        reason: String,
    },
}

impl TranslationOutcome {
    /// Shorthand for an untranslated outcome.
    pub fn untranslated(reason: impl Into<String>) -> Self {
        Self::Untranslated {
            reason: reason.into(),
        }
    }

    /// Returns the translated text, or `original` when translation failed.
    #[must_use]
    pub fn text_or<'a>(&'a self, original: &'a str) -> &'a str {
        match self {
            Self::Translated(text) => text,
            Self::Untranslated { .. } => original,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Translated(_) => "translated",
            Self::Untranslated { .. } => "untranslated",
        }
    }
}

/// Translates text between languages.
pub trait Translator: Send + Sync {
    /// Translates `text` from `source` into `target` (ISO 639-1 codes).
    fn translate(&self, text: &str, source: &str, target: &str) -> TranslationOutcome;
}

/// Translator used when translation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, _text: &str, _source: &str, _target: &str) -> TranslationOutcome {
        TranslationOutcome::untranslated("translation disabled")
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for a LibreTranslate-compatible `POST /translate` endpoint.
pub struct HttpTranslator {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

impl HttpTranslator {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a translator for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}/translate", base_url.trim_end_matches('/')),
            api_key: None,
            client: build_http_client(Self::DEFAULT_TIMEOUT),
        }
    }

    /// Sets the API key sent with each request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Returns the full translation endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, text: &str, source: &str, target: &str) -> Result<String, String> {
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else {
                    "request"
                };
                format!("{error_kind} error: {e}")
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("service returned status {status}"));
        }

        let parsed: TranslateResponse = response
            .json()
            .map_err(|e| format!("invalid response body: {e}"))?;
        Ok(parsed.translated_text)
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> TranslationOutcome {
        let outcome = match self.request(text, source, target) {
            Ok(translated) => TranslationOutcome::Translated(translated),
            Err(reason) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    source_language = source,
                    target_language = target,
                    reason = %reason,
                    "Translation failed, classifying original text"
                );
                TranslationOutcome::Untranslated { reason }
            },
        };

        metrics::counter!(
            "translation_outcomes_total",
            "outcome" => outcome.label()
        )
        .increment(1);
        outcome
    }
}

fn build_http_client(timeout: Duration) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!("Failed to build translation HTTP client: {err}");
            reqwest::blocking::Client::new()
        })
}
