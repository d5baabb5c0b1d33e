//! Property-based tests for content identity and scoring.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Content hashes are deterministic and well-formed
//! - Distinct texts get distinct hashes
//! - Trust scores always land in `[0, 1]`
//! - Submit followed by verify returns the submitted score

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use std::sync::Arc;
use trustscore::classifier::{LexiconClassifier, SentimentAnalyzer, normalize_comparative};
use trustscore::models::ScoreSource;
use trustscore::storage::{MemoryScoreCache, SqliteTrustStore};
use trustscore::{Classifier, ContentHasher, ResolutionPipeline};

proptest! {
    /// Property: hashing is a pure function of the input.
    #[test]
    fn prop_hash_is_deterministic(text in ".*") {
        let first = ContentHasher::hash(&text);
        let second = ContentHasher::hash(&text.clone());
        prop_assert_eq!(first, second);
    }

    /// Property: every hash is `0x` + 64 lowercase hex characters.
    #[test]
    fn prop_hash_is_well_formed(text in ".*") {
        let hash = ContentHasher::hash(&text);
        prop_assert_eq!(hash.as_str().len(), ContentHasher::HASH_LEN);
        prop_assert!(ContentHasher::is_well_formed(hash.as_str()));
    }

    /// Property: different texts produce different hashes.
    #[test]
    fn prop_distinct_texts_distinct_hashes(a in ".{0,64}", b in ".{0,64}") {
        prop_assume!(a != b);
        prop_assert_ne!(ContentHasher::hash(&a), ContentHasher::hash(&b));
    }

    /// Property: normalization maps any comparative into `[0, 1]`.
    #[test]
    fn prop_normalize_in_range(comparative in proptest::num::f64::ANY) {
        let score = normalize_comparative(comparative);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    /// Property: the lexicon classifier always yields an in-range score.
    #[test]
    fn prop_classifier_score_in_range(text in "\\PC{0,200}") {
        let classification = LexiconClassifier::default().classify(&text).unwrap();
        prop_assert!((0.0..=1.0).contains(&classification.trust_score));
        prop_assert!(!classification.language.is_empty());
    }

    /// Property: sentiment analysis is case-insensitive.
    #[test]
    fn prop_sentiment_ignores_case(text in "[a-zA-Z ]{0,80}") {
        let analyzer = SentimentAnalyzer::new();
        prop_assert_eq!(
            analyzer.analyze(&text).score,
            analyzer.analyze(&text.to_uppercase()).score
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: submit then verify returns the submitted score from cache.
    #[test]
    fn prop_submit_verify_roundtrip(text in "[a-zA-Z]{1,20}( [a-zA-Z]{1,20}){0,10}") {
        let pipeline = ResolutionPipeline::new(
            Arc::new(SqliteTrustStore::in_memory().unwrap()),
            Arc::new(MemoryScoreCache::default()),
            Arc::new(LexiconClassifier::default()),
        );

        let submitted = pipeline.submit(&text).unwrap();
        prop_assert_eq!(&submitted.content_hash, &ContentHasher::hash(&text));

        let verified = pipeline.verify(&submitted.content_hash).unwrap().unwrap();
        prop_assert_eq!(verified.source, ScoreSource::Cache);
        prop_assert!((verified.trust_score - submitted.trust_score).abs() < f64::EPSILON);
    }
}
