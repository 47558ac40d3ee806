//! PKCE (Proof Key for Code Exchange) implementation for OAuth 2.0
//!
//! Implements RFC 7636 for secure OAuth authorization without relying on a
//! client secret, as used by installed applications.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// PKCE challenge pair plus CSRF state for one authorization attempt.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Random string (43-128 chars, base64url encoded), kept secret until
    /// token exchange
    pub code_verifier: String,
    /// SHA256 hash of `code_verifier` (base64url encoded), sent in the
    /// authorization request
    pub code_challenge: String,
    /// Random CSRF protection token; must match between authorization
    /// request and callback
    pub state: String,
}

impl PkceChallenge {
    /// Generate a new challenge with cryptographically secure random values.
    pub fn generate() -> Self {
        let code_verifier = random_token();
        let code_challenge = compute_challenge(&code_verifier);
        Self { code_verifier, code_challenge, state: random_token() }
    }

    /// Challenge method (always "S256")
    pub fn challenge_method(&self) -> &'static str {
        "S256"
    }
}

/// 32 random bytes, base64url-encoded (43 chars, within the RFC 7636
/// 43-128 limit)
fn random_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// BASE64URL(SHA256(ASCII(code_verifier))) per RFC 7636
fn compute_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_length_within_rfc_limits() {
        let challenge = PkceChallenge::generate();
        assert!(challenge.code_verifier.len() >= 43);
        assert!(challenge.code_verifier.len() <= 128);
    }

    #[test]
    fn test_unique_challenges() {
        let a = PkceChallenge::generate();
        let b = PkceChallenge::generate();
        assert_ne!(a.code_verifier, b.code_verifier);
        assert_ne!(a.state, b.state);
    }

    #[test]
    fn test_challenge_is_deterministic_for_verifier() {
        let challenge = PkceChallenge::generate();
        assert_eq!(challenge.code_challenge, compute_challenge(&challenge.code_verifier));
    }

    #[test]
    fn test_base64url_encoding_has_no_padding() {
        let challenge = PkceChallenge::generate();
        for value in [&challenge.code_verifier, &challenge.code_challenge, &challenge.state] {
            assert!(!value.contains('='));
            assert!(!value.contains('+'));
            assert!(!value.contains('/'));
        }
    }
}
