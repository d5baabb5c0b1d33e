//! Content identity hashing.

use crate::models::ContentHash;
use sha3::{Digest, Keccak256};

/// Derives content identifiers from raw text.
///
/// The identifier is the Keccak-256 digest of the text's UTF-8 bytes rendered
/// as `0x`-prefixed lowercase hex (66 characters), the same form the
/// `blockchain_hash` column of a legacy `content.db` holds. The hasher applies
/// no normalization: `"Hello"` and `"hello "` are different content. Trimming
/// happens in the pipeline before hashing.
///
/// # Example
///
/// ```rust
/// use trustscore::services::ContentHasher;
///
/// let hash = ContentHasher::hash("I love this");
/// assert_eq!(hash.as_str().len(), 66);
/// assert!(hash.as_str().starts_with("0x"));
/// assert_eq!(hash, ContentHasher::hash("I love this"));
/// ```
pub struct ContentHasher;

impl ContentHasher {
    /// Length of a rendered content hash, including the `0x` prefix.
    pub const HASH_LEN: usize = 66;

    /// Computes the content hash of `text`.
    #[must_use]
    pub fn hash(text: &str) -> ContentHash {
        let mut hasher = Keccak256::new();
        hasher.update(text.as_bytes());
        ContentHash::new(format!("0x{}", hex::encode(hasher.finalize())))
    }

    /// Checks whether `candidate` has the shape of a content hash.
    ///
    /// Verification does not require this; a malformed hash simply resolves
    /// to not-found.
    #[must_use]
    pub fn is_well_formed(candidate: &str) -> bool {
        candidate.len() == Self::HASH_LEN
            && candidate.starts_with("0x")
            && candidate[2..]
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keccak_digest() {
        assert_eq!(
            ContentHasher::hash("").as_str(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            ContentHasher::hash("abc").as_str(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_no_normalization() {
        assert_ne!(ContentHasher::hash("Hello"), ContentHasher::hash("hello"));
        assert_ne!(ContentHasher::hash("hello"), ContentHasher::hash("hello "));
    }

    #[test]
    fn test_unicode_hashes_utf8_bytes() {
        let hash = ContentHasher::hash("これは良い");
        assert_eq!(hash.as_str().len(), ContentHasher::HASH_LEN);
        assert!(ContentHasher::is_well_formed(hash.as_str()));
    }

    #[test]
    fn test_is_well_formed() {
        let hash = ContentHasher::hash("I love this");
        assert!(ContentHasher::is_well_formed(hash.as_str()));
        assert!(!ContentHasher::is_well_formed("0x1234"));
        assert!(!ContentHasher::is_well_formed(&hash.as_str().to_uppercase()));
        assert!(!ContentHasher::is_well_formed(&hash.as_str()[2..]));
    }
}
