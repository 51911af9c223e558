//! Cache key derivation.

use sha2::{Digest, Sha256};

/// Length of a cache key in hex characters.
pub const KEY_LEN: usize = 32;

/// Derive the cache key for a (profession, topic) pair.
///
/// Both inputs are trimmed and lower-cased, joined as `profession:topic`,
/// hashed with SHA-256 and truncated to [`KEY_LEN`] hex characters.
pub fn cache_key(profession: &str, topic: &str) -> String {
    let combined = format!(
        "{}:{}",
        profession.trim().to_lowercase(),
        topic.trim().to_lowercase()
    );
    let digest = Sha256::digest(combined.as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(KEY_LEN);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        assert_eq!(
            cache_key("Engineer", "Rust"),
            cache_key("Engineer", "Rust")
        );
    }

    #[test]
    fn test_cache_key_normalizes_case_and_whitespace() {
        let k1 = cache_key("Software Engineer", "Quantum Computing");
        let k2 = cache_key("  software engineer\t", "\nQUANTUM computing  ");
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_cache_key_length_and_charset() {
        let key = cache_key("Doctor", "vaccines");
        assert_eq!(key.len(), KEY_LEN);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_cache_key_matches_sha256_prefix() {
        let full = hex::encode(Sha256::digest(b"a:b"));
        assert_eq!(&full[..KEY_LEN], cache_key(" A", "B "));
    }

    #[test]
    fn test_cache_key_distinct_pairs() {
        assert_ne!(cache_key("Doctor", "vaccines"), cache_key("Nurse", "vaccines"));
        assert_ne!(cache_key("Doctor", "vaccines"), cache_key("Doctor", "vaccine"));
        // Internal whitespace is significant.
        assert_ne!(cache_key("a b", "c"), cache_key("ab", "c"));
    }
}
