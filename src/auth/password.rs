//! Password Hashing
//! Mission: One-way, salted credential handling - plaintext never persists

use anyhow::{Context, Result};

/// Hash a plaintext password with bcrypt at the given cost factor.
///
/// bcrypt generates a fresh salt on every call, so hashing the same
/// plaintext twice yields different stored hashes.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plaintext, cost).context("Failed to hash password")
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// Malformed hashes verify as `false` rather than erroring - callers only
/// ever see "verified" or "not verified".
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::DEFAULT_COST;

    // Low cost keeps the test suite fast; production cost comes from config.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("s3cret!", TEST_COST).unwrap();
        assert_ne!(hash, "s3cret!");
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hash1 = hash_password("s3cret!", TEST_COST).unwrap();
        let hash2 = hash_password("s3cret!", TEST_COST).unwrap();

        assert_ne!(hash1, hash2); // fresh salt per call
        assert!(verify_password("s3cret!", &hash1));
        assert!(verify_password("s3cret!", &hash2));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("s3cret!", "not-a-bcrypt-hash"));
        assert!(!verify_password("s3cret!", ""));
    }

    #[test]
    fn test_default_cost_accepted() {
        let hash = hash_password("pw", DEFAULT_COST).unwrap();
        assert!(verify_password("pw", &hash));
    }
}
