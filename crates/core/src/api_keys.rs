//! API key generation and hashing.
//!
//! Keys authenticate the REST surface. Only the SHA-256 digest is
//! persisted; the plaintext is returned to the creator exactly once. The
//! stored prefix lets an admin recognise a key in listings without the
//! plaintext ever being recoverable.

use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated key (alphanumeric characters).
pub const KEY_LENGTH: usize = 48;

/// Leading characters kept as the display prefix.
pub const KEY_PREFIX_LENGTH: usize = 8;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// A freshly generated key and its derived storage forms.
pub struct GeneratedApiKey {
    /// Shown to the creator once, never stored.
    pub plaintext: String,
    /// First [`KEY_PREFIX_LENGTH`] characters, stored for listings.
    pub prefix: String,
    /// SHA-256 hex digest of the plaintext, stored for lookups.
    pub hash: String,
}

impl GeneratedApiKey {
    fn from_plaintext(plaintext: String) -> Self {
        let prefix = extract_prefix(&plaintext).to_string();
        let hash = hash_api_key(&plaintext);
        Self {
            plaintext,
            prefix,
            hash,
        }
    }
}

/// Generate a random API key with its display prefix and storage hash.
pub fn generate_api_key() -> GeneratedApiKey {
    let plaintext: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect();
    GeneratedApiKey::from_plaintext(plaintext)
}

// ---------------------------------------------------------------------------
// Derivation helpers
// ---------------------------------------------------------------------------

/// SHA-256 hex digest of a key. Creation and authentication lookup must
/// compute this identically; both call here.
pub fn hash_api_key(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("{digest:x}")
}

/// The display prefix of a plaintext key.
pub fn extract_prefix(key: &str) -> &str {
    &key[..KEY_PREFIX_LENGTH.min(key.len())]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_have_the_documented_shape() {
        let key = generate_api_key();
        assert_eq!(key.plaintext.len(), KEY_LENGTH);
        assert!(key.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(key.prefix, key.plaintext[..KEY_PREFIX_LENGTH]);
    }

    #[test]
    fn hash_is_reproducible_from_the_plaintext() {
        let key = generate_api_key();
        assert_eq!(key.hash, hash_api_key(&key.plaintext));
        assert_eq!(key.hash.len(), 64);
    }

    #[test]
    fn hash_matches_the_sha256_test_vector() {
        assert_eq!(
            hash_api_key(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn two_generations_never_collide() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn derivation_is_deterministic_for_a_fixed_key() {
        let fixed = "k".repeat(KEY_LENGTH);
        let derived = GeneratedApiKey::from_plaintext(fixed.clone());
        assert_eq!(derived.prefix, "kkkkkkkk");
        assert_eq!(derived.hash, hash_api_key(&fixed));
    }

    #[test]
    fn prefix_of_a_short_key_is_the_whole_key() {
        assert_eq!(extract_prefix("abc"), "abc");
        assert_eq!(extract_prefix("abcdefghijkl"), "abcdefgh");
    }
}
