//! Language detection.
//!
//! Detection runs in two passes:
//! 1. Script ranges identify languages with a distinctive alphabet
//! 2. Latin-script text is scored against per-language stop words
//!
//! Codes are ISO 639-1. Text that cannot be attributed falls back to
//! [`DEFAULT_LANGUAGE`].

use std::collections::HashSet;

/// Language reported when nothing more specific can be determined.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Stop words per Latin-script language, in tie-breaking order.
const STOP_WORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "and", "is", "are", "was", "this", "that", "with", "for", "you", "i", "it",
            "of", "to", "in", "not", "have", "my", "we", "they", "be", "what", "very",
        ],
    ),
    (
        "es",
        &[
            "el", "la", "los", "las", "que", "es", "y", "en", "por", "con", "para", "una", "un",
            "esto", "muy", "pero", "yo", "me", "encanta", "está", "del", "mi", "no",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "et", "est", "une", "un", "des", "je", "tu", "il", "nous", "vous",
            "ce", "cette", "pas", "avec", "pour", "très", "du", "mais", "j'aime", "c'est",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "und", "ist", "nicht", "ich", "du", "wir", "ein", "eine", "mit",
            "für", "sehr", "auf", "zu", "es", "sie", "aber", "dem", "den",
        ],
    ),
    (
        "pt",
        &[
            "o", "os", "as", "que", "é", "e", "não", "com", "para", "uma", "um", "muito", "eu",
            "isto", "isso", "mas", "do", "da", "em", "você", "está",
        ],
    ),
    (
        "it",
        &[
            "il", "lo", "gli", "che", "è", "e", "non", "con", "per", "una", "uno", "molto", "io",
            "questo", "questa", "ma", "di", "del", "della", "sono", "mi",
        ],
    ),
    (
        "nl",
        &[
            "de", "het", "een", "en", "is", "niet", "ik", "jij", "wij", "met", "voor", "zeer",
            "maar", "dit", "dat", "van", "op", "zijn", "heel", "erg",
        ],
    ),
];

/// Script-range language detector with a stop-word pass for Latin text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    /// Creates a detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Detects the language of `text` and returns its ISO 639-1 code.
    #[must_use]
    pub fn detect(&self, text: &str) -> &'static str {
        Self::detect_script(text)
            .or_else(|| Self::detect_latin(text))
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Attributes text by distinctive script, checking kana before Han so that
    /// Japanese text mixing kanji and kana is not reported as Chinese.
    fn detect_script(text: &str) -> Option<&'static str> {
        let has = |pred: fn(char) -> bool| text.chars().any(pred);

        if has(is_kana) {
            Some("ja")
        } else if has(is_hangul) {
            Some("ko")
        } else if has(is_han) {
            Some("zh")
        } else if has(is_arabic) {
            Some("ar")
        } else if has(is_cyrillic) {
            Some("ru")
        } else if has(is_thai) {
            Some("th")
        } else if has(is_hebrew) {
            Some("he")
        } else if has(is_greek) {
            Some("el")
        } else if has(is_devanagari) {
            Some("hi")
        } else {
            None
        }
    }

    fn detect_latin(text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        let words: HashSet<&str> = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();

        let mut best: Option<(&'static str, usize)> = None;
        for &(code, stop_words) in STOP_WORDS {
            let hits = stop_words.iter().filter(|w| words.contains(*w)).count();
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((code, hits));
            }
        }

        best.map(|(code, _)| code)
    }
}

const fn is_kana(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' |  // Hiragana
        '\u{30A0}'..='\u{30FF}'    // Katakana
    )
}

const fn is_han(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |  // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |  // CJK Extension A
        '\u{20000}'..='\u{2A6DF}'  // CJK Extension B
    )
}

const fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7AF}' |  // Hangul Syllables
        '\u{1100}'..='\u{11FF}' |  // Hangul Jamo
        '\u{3130}'..='\u{318F}'    // Hangul Compatibility Jamo
    )
}

const fn is_arabic(c: char) -> bool {
    matches!(c, '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}')
}

const fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{052F}')
}

const fn is_thai(c: char) -> bool {
    matches!(c, '\u{0E00}'..='\u{0E7F}')
}

const fn is_hebrew(c: char) -> bool {
    matches!(c, '\u{0590}'..='\u{05FF}')
}

const fn is_greek(c: char) -> bool {
    matches!(c, '\u{0370}'..='\u{03FF}')
}

const fn is_devanagari(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}')
}
