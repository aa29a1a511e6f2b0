//! Signed session tokens.
//!
//! Tokens use the compact HS256 layout
//! `base64url(header).base64url(claims).base64url(signature)`, where the
//! signature is HMAC-SHA256 over the first two segments keyed by the server
//! secret. The same token works as a bearer credential and as the value of
//! the session cookie.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::domain::entities::User;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Email of the user the token was issued to.
    pub sub: String,
    pub user_id: i64,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("unsupported token algorithm")]
    UnsupportedAlgorithm,
    #[error("token has expired")]
    Expired,
}

/// Issues and verifies session tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct SessionTokens {
    secret: Vec<u8>,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `user` valid for the configured TTL from now.
    pub fn issue(&self, user: &User) -> String {
        self.issue_at(user, Utc::now().timestamp())
    }

    pub fn issue_at(&self, user: &User, now: i64) -> String {
        let claims = SessionClaims {
            sub: user.email.clone(),
            user_id: user.id,
            iat: now,
            exp: now + self.ttl.num_seconds(),
        };
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };

        // Serializing these plain structs cannot fail.
        let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap_or_default());
        let claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap_or_default());
        let signing_input = format!("{header}.{claims}");
        let signature = URL_SAFE_NO_PAD.encode(self.sign(signing_input.as_bytes()));

        format!("{signing_input}.{signature}")
    }

    /// Verifies signature, algorithm and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenError`] describing the first check that failed.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<SessionClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(claims), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = self.mac();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let header: Header = decode_segment(header)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm);
        }

        let claims: SessionClaims = decode_segment(claims)?;
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length")
    }

    fn sign(&self, input: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(input);
        mac.finalize().into_bytes().to_vec()
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn tokens() -> SessionTokens {
        SessionTokens::new("test-session-secret", Duration::minutes(60))
    }

    fn user() -> User {
        User {
            id: 7,
            email: "ana@example.com".to_string(),
            name: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let token = tokens().issue_at(&user(), NOW);
        let claims = tokens().verify_at(&token, NOW + 10).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "ana@example.com");
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 3600);
    }

    #[test]
    fn test_expired_token() {
        let token = tokens().issue_at(&user(), NOW);
        assert_eq!(
            tokens().verify_at(&token, NOW + 3600),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let token = tokens().issue_at(&user(), NOW);
        let other = SessionTokens::new("another-secret", Duration::minutes(60));
        assert_eq!(other.verify_at(&token, NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_claims() {
        let token = tokens().issue_at(&user(), NOW);
        let parts: Vec<&str> = token.split('.').collect();

        let forged = SessionClaims {
            sub: "admin@example.com".to_string(),
            user_id: 1,
            iat: NOW,
            exp: NOW + 999_999,
        };
        let forged = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let token = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(
            tokens().verify_at(&token, NOW),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "abc", "a.b", "a.b.c.d", "a.b.!!!"] {
            assert_eq!(
                tokens().verify_at(token, NOW),
                Err(TokenError::Malformed),
                "token {token:?}"
            );
        }
    }
}
