//! Lexicon-based sentiment scoring.

use super::lexicon::{NEGATORS, WORD_VALENCES};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)] // Static pattern, verified by tests
    Regex::new(r"[\p{L}\p{N}']+").expect("static regex: token pattern")
});

static DEFAULT_VALENCES: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    WORD_VALENCES
        .iter()
        .map(|(word, valence)| (*word, i32::from(*valence)))
        .collect()
});

static DEFAULT_NEGATORS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATORS.iter().copied().collect());

/// Raw sentiment analysis of one text.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReport {
    /// Sum of token valences after negation.
    pub score: i32,
    /// `score` divided by the token count (0 for texts without tokens).
    pub comparative: f64,
    /// Number of tokens seen.
    pub tokens: usize,
    /// Tokens that carried a valence.
    pub scored_words: Vec<String>,
}

impl SentimentReport {
    /// Maps the comparative score onto `[0, 1]`.
    ///
    /// `(comparative + 1) / 2`, clamped: a comparative outside `[-1, 1]` is
    /// possible because single words carry valences up to ±5.
    #[must_use]
    pub fn trust_score(&self) -> f64 {
        normalize_comparative(self.comparative)
    }
}

/// Maps a comparative sentiment value onto `[0, 1]`.
///
/// Non-finite input maps to the neutral score 0.5.
#[must_use]
pub fn normalize_comparative(comparative: f64) -> f64 {
    if !comparative.is_finite() {
        return 0.5;
    }
    f64::midpoint(comparative, 1.0).clamp(0.0, 1.0)
}

/// AFINN-style sentiment analyzer.
///
/// Tokenises lowercase text into runs of letters, digits and apostrophes,
/// sums word valences and flips the valence of a word directly preceded by a
/// negator ("not good" scores like "bad").
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    overrides: HashMap<String, i32>,
}

impl SentimentAnalyzer {
    /// Creates an analyzer with the built-in lexicon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the valence of a word.
    #[must_use]
    pub fn with_word(mut self, word: &str, valence: i32) -> Self {
        self.overrides.insert(word.to_lowercase(), valence);
        self
    }

    fn valence(&self, token: &str) -> Option<i32> {
        self.overrides
            .get(token)
            .copied()
            .or_else(|| DEFAULT_VALENCES.get(token).copied())
    }

    /// Analyzes a text.
    #[must_use]
    pub fn analyze(&self, text: &str) -> SentimentReport {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str().trim_matches('\''))
            .filter(|t| !t.is_empty())
            .collect();

        let mut score = 0;
        let mut scored_words = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = self.valence(token) else {
                continue;
            };
            if i > 0 && DEFAULT_NEGATORS.contains(tokens[i - 1]) {
                valence = -valence;
            }
            score += valence;
            scored_words.push((*token).to_string());
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = tokens.len() as f64;
            f64::from(score) / count
        };

        SentimentReport {
            score,
            comparative,
            tokens: tokens.len(),
            scored_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_positive_text() {
        let report = SentimentAnalyzer::new().analyze("I love this");
        assert_eq!(report.score, 3);
        assert_eq!(report.tokens, 3);
        assert!((report.comparative - 1.0).abs() < f64::EPSILON);
        assert!((report.trust_score() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_text() {
        let report = SentimentAnalyzer::new().analyze("This is a terrible scam");
        assert_eq!(report.score, -5);
        assert!(report.trust_score() < 0.5);
    }

    #[test]
    fn test_negation_flips_valence() {
        let analyzer = SentimentAnalyzer::new();
        let plain = analyzer.analyze("this is good");
        let negated = analyzer.analyze("this is not good");
        assert_eq!(plain.score, 3);
        assert_eq!(negated.score, -3);

        let contraction = analyzer.analyze("I don't like it");
        assert_eq!(contraction.score, -2);
    }

    #[test]
    fn test_neutral_and_empty_texts() {
        let analyzer = SentimentAnalyzer::new();
        let neutral = analyzer.analyze("the table is brown");
        assert_eq!(neutral.score, 0);
        assert!((neutral.trust_score() - 0.5).abs() < f64::EPSILON);

        let symbols = analyzer.analyze("!!! ???");
        assert_eq!(symbols.tokens, 0);
        assert!((symbols.trust_score() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_case_insensitive() {
        let analyzer = SentimentAnalyzer::new();
        assert_eq!(
            analyzer.analyze("GREAT work").score,
            analyzer.analyze("great work").score
        );
    }

    #[test]
    fn test_overrides() {
        let analyzer = SentimentAnalyzer::new()
            .with_word("Rustacean", 4)
            .with_word("good", -1);
        let report = analyzer.analyze("a good rustacean");
        assert_eq!(report.score, 3);
        assert_eq!(report.scored_words, vec!["good", "rustacean"]);
    }

    #[test_case(0.0, 0.5 ; "neutral")]
    #[test_case(1.0, 1.0 ; "upper bound")]
    #[test_case(-1.0, 0.0 ; "lower bound")]
    #[test_case(5.0, 1.0 ; "clamped high")]
    #[test_case(-4.0, 0.0 ; "clamped low")]
    #[test_case(f64::NAN, 0.5 ; "not a number")]
    fn test_normalize_comparative(comparative: f64, expected: f64) {
        assert!((normalize_comparative(comparative) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_strong_word_stays_in_range() {
        let report = SentimentAnalyzer::new().analyze("outstanding");
        assert!((report.comparative - 5.0).abs() < f64::EPSILON);
        assert!((report.trust_score() - 1.0).abs() < f64::EPSILON);
    }
}
