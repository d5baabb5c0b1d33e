//! Text classification.
//!
//! A [`Classifier`] turns raw text into a detected language and a trust score
//! in `[0, 1]`. The default [`LexiconClassifier`] runs three steps:
//!
//! 1. [`LanguageDetector`] picks an ISO 639-1 code
//! 2. A [`Translator`] converts non-target text (best-effort)
//! 3. [`SentimentAnalyzer`] scores the effective text
//!
//! Translation failure never fails classification; the original text is
//! scored instead and the fallback is reported in [`TranslationStatus`].

mod language;
mod lexicon;
mod sentiment;
mod translate;

pub use language::{DEFAULT_LANGUAGE, LanguageDetector};
pub use sentiment::{SentimentAnalyzer, SentimentReport, normalize_comparative};
pub use translate::{HttpTranslator, NoopTranslator, TranslationOutcome, Translator};

use crate::Result;
use serde::Serialize;

/// How the classified text relates to the submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Text was already in the target language.
    NotNeeded,
    /// Text was translated before scoring.
    Translated,
    /// Translation failed; the original text was scored.
    Fallback {
        /// Why translation did not happen.
        reason: String,
    },
}

/// Output of a classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Detected language (ISO 639-1).
    pub language: String,
    /// Normalized score in `[0, 1]`.
    pub trust_score: f64,
    /// Translation sub-step result.
    pub translation: TranslationStatus,
}

/// Classifies text into a language and trust score.
///
/// Implementations may block (remote models, translation services); callers
/// in async contexts should run them on a blocking thread.
pub trait Classifier: Send + Sync {
    /// Returns the classifier name for logs.
    fn name(&self) -> &'static str;

    /// Classifies `text`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Classification`] if no result can be produced.
    fn classify(&self, text: &str) -> Result<Classification>;
}

/// Lexicon sentiment classifier with an optional translation step.
pub struct LexiconClassifier<T: Translator = NoopTranslator> {
    detector: LanguageDetector,
    analyzer: SentimentAnalyzer,
    translator: T,
    target_language: String,
}

impl Default for LexiconClassifier<NoopTranslator> {
    fn default() -> Self {
        Self::new(NoopTranslator)
    }
}

impl<T: Translator> LexiconClassifier<T> {
    /// Creates a classifier that translates into English.
    #[must_use]
    pub fn new(translator: T) -> Self {
        Self {
            detector: LanguageDetector::new(),
            analyzer: SentimentAnalyzer::new(),
            translator,
            target_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Sets the language the lexicon is written in.
    #[must_use]
    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = language.into();
        self
    }
}

impl<T: Translator> Classifier for LexiconClassifier<T> {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    fn classify(&self, text: &str) -> Result<Classification> {
        let language = self.detector.detect(text);

        let (report, translation) = if language == self.target_language {
            (self.analyzer.analyze(text), TranslationStatus::NotNeeded)
        } else {
            let outcome = self
                .translator
                .translate(text, language, &self.target_language);
            let status = match &outcome {
                TranslationOutcome::Translated(_) => TranslationStatus::Translated,
                TranslationOutcome::Untranslated { reason } => TranslationStatus::Fallback {
                    reason: reason.clone(),
                },
            };
            (self.analyzer.analyze(outcome.text_or(text)), status)
        };

        tracing::debug!(
            language,
            score = report.score,
            comparative = report.comparative,
            "Classified text"
        );

        Ok(Classification {
            language: language.to_string(),
            trust_score: report.trust_score(),
            translation,
        })
    }
}
