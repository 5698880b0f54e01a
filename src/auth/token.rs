//! Bearer token verification.

use sha2::{Digest, Sha256};

/// Verifies presented credentials against the configured shared secret.
///
/// Stores only the SHA-256 digest of the expected token; verification
/// hashes the presented value and compares fixed-length digests, so the
/// comparison does not leak the token's matching prefix length.
#[derive(Clone)]
pub struct BearerTokenVerifier {
    expected: String,
}

impl BearerTokenVerifier {
    /// Create a verifier for the configured token.
    pub fn new(token: &str) -> Self {
        Self {
            expected: Self::hash_token(token),
        }
    }

    /// Hash a token for storage/comparison.
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether the presented credential matches the configured token.
    pub fn verify(&self, provided: &str) -> bool {
        Self::hash_token(provided) == self.expected
    }
}

impl std::fmt::Debug for BearerTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the digest
        f.debug_struct("BearerTokenVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_configured_token() {
        let verifier = BearerTokenVerifier::new("sk-test-token-12345");
        assert!(verifier.verify("sk-test-token-12345"));
    }

    #[test]
    fn test_rejects_other_tokens() {
        let verifier = BearerTokenVerifier::new("sk-test-token-12345");
        assert!(!verifier.verify("wrong-token"));
        assert!(!verifier.verify(""));
        assert!(!verifier.verify("sk-test-token-1234"));
        assert!(!verifier.verify("sk-test-token-123456"));
    }

    #[test]
    fn test_debug_does_not_leak() {
        let verifier = BearerTokenVerifier::new("sk-test-token-12345");
        let printed = format!("{verifier:?}");
        assert!(!printed.contains("sk-test-token"));
    }
}
