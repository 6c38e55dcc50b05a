use std::fmt;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Discriminates what a token may be used for.
///
/// The kind is part of the signed payload, so a confirmation-link token can
/// never be replayed as an access credential even though both are signed with
/// the same secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Asserts an authenticated session subject.
    Access,
    /// Proves control of an email address during registration.
    Confirm,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Confirm => write!(f, "confirm"),
        }
    }
}

/// Per-kind token lifetimes in minutes.
///
/// Injected into [`TokenCodec`] at construction; tests override with negative
/// values to force immediate expiry.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    pub access_minutes: i64,
    pub confirm_minutes: i64,
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self {
            access_minutes: 30,
            confirm_minutes: 24 * 60,
        }
    }
}

impl TokenTtl {
    fn minutes_for(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_minutes,
            TokenKind::Confirm => self.confirm_minutes,
        }
    }
}

/// Error type for token operations.
///
/// Each failure mode carries a distinct message so callers (and tests) can
/// tell a stale token apart from a forged one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token is missing a subject")]
    MissingSubject,

    #[error("invalid token type, expected {expected}")]
    TypeMismatch { expected: TokenKind },
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Optional on decode so an absent subject surfaces as `MissingSubject`
    /// rather than a parse failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: i64,
    #[serde(rename = "type")]
    kind: TokenKind,
}

/// Signs and verifies compact, self-contained, expiring tokens.
///
/// HS256 JWTs over a process-wide secret. Issuance and resolution are pure
/// in-memory computations; nothing is ever persisted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: TokenTtl,
}

impl TokenCodec {
    /// Create a codec over a shared secret and lifetime configuration.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], ttl: TokenTtl) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a signed token for `subject`, expiring after the configured
    /// lifetime for `kind`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, TokenError> {
        let expiry = Utc::now() + Duration::minutes(self.ttl.minutes_for(kind));
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: expiry.timestamp(),
            kind,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// Checks run in a fixed order for deterministic error reporting:
    /// signature, then expiry, then subject presence, then kind. An unsigned
    /// or garbled token cannot be trusted to contain a real expiry, so the
    /// signature comes first.
    ///
    /// # Errors
    /// * `Invalid` - Signature verification failed or payload cannot be parsed
    /// * `Expired` - Expiry timestamp has passed
    /// * `MissingSubject` - Payload has no subject claim
    /// * `TypeMismatch` - Token kind differs from `expected`
    pub fn resolve(&self, token: &str, expected: TokenKind) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Exact expiry; the default 60s leeway would mask short-lived tokens
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        let claims = token_data.claims;
        let subject = claims.sub.ok_or(TokenError::MissingSubject)?;

        if claims.kind != expected {
            return Err(TokenError::TypeMismatch { expected });
        }

        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, TokenTtl::default())
    }

    #[test]
    fn test_default_lifetimes() {
        let ttl = TokenTtl::default();
        assert_eq!(ttl.access_minutes, 30);
        assert_eq!(ttl.confirm_minutes, 1440);
    }

    #[test]
    fn test_issue_and_resolve_access_token() {
        let codec = codec();

        let token = codec
            .issue("test@email.net", TokenKind::Access)
            .expect("Failed to issue token");
        let subject = codec
            .resolve(&token, TokenKind::Access)
            .expect("Failed to resolve token");

        assert_eq!(subject, "test@email.net");
    }

    #[test]
    fn test_issue_and_resolve_confirm_token() {
        let codec = codec();

        let token = codec
            .issue("test@email.net", TokenKind::Confirm)
            .expect("Failed to issue token");
        let subject = codec
            .resolve(&token, TokenKind::Confirm)
            .expect("Failed to resolve token");

        assert_eq!(subject, "test@email.net");
    }

    #[test]
    fn test_resolve_wrong_kind() {
        let codec = codec();

        let access = codec.issue("test@email.net", TokenKind::Access).unwrap();
        let confirm = codec.issue("test@email.net", TokenKind::Confirm).unwrap();

        assert_eq!(
            codec.resolve(&access, TokenKind::Confirm),
            Err(TokenError::TypeMismatch {
                expected: TokenKind::Confirm
            })
        );
        assert_eq!(
            codec.resolve(&confirm, TokenKind::Access),
            Err(TokenError::TypeMismatch {
                expected: TokenKind::Access
            })
        );
    }

    #[test]
    fn test_resolve_expired_token() {
        let ttl = TokenTtl {
            access_minutes: -1,
            confirm_minutes: -1,
        };
        let codec = TokenCodec::new(SECRET, ttl);

        let token = codec.issue("test@email.net", TokenKind::Access).unwrap();
        let result = codec.resolve(&token, TokenKind::Access);

        assert_eq!(result, Err(TokenError::Expired));
        assert_eq!(result.unwrap_err().to_string(), "token has expired");
    }

    #[test]
    fn test_resolve_garbage_token() {
        let codec = codec();

        let result = codec.resolve("invalid token", TokenKind::Access);

        assert_eq!(result, Err(TokenError::Invalid));
        assert_eq!(result.unwrap_err().to_string(), "token is invalid");
    }

    #[test]
    fn test_resolve_with_wrong_secret() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!", TokenTtl::default());
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!", TokenTtl::default());

        let token = codec1.issue("test@email.net", TokenKind::Access).unwrap();

        assert_eq!(
            codec2.resolve(&token, TokenKind::Access),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_resolve_missing_subject() {
        let codec = codec();

        // Craft a well-signed token with no sub claim
        let claims = Claims {
            sub: None,
            exp: (Utc::now() + Duration::minutes(30)).timestamp(),
            kind: TokenKind::Access,
        };
        let token = encode(
            &Header::new(codec.algorithm),
            &claims,
            &codec.encoding_key,
        )
        .unwrap();

        let result = codec.resolve(&token, TokenKind::Access);

        assert_eq!(result, Err(TokenError::MissingSubject));
        assert_eq!(
            result.unwrap_err().to_string(),
            "token is missing a subject"
        );
    }

    #[test]
    fn test_expiry_checked_before_kind() {
        let ttl = TokenTtl {
            access_minutes: -1,
            confirm_minutes: -1,
        };
        let codec = TokenCodec::new(SECRET, ttl);

        // Expired and wrong kind: expiry wins
        let token = codec.issue("test@email.net", TokenKind::Confirm).unwrap();
        assert_eq!(
            codec.resolve(&token, TokenKind::Access),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_type_mismatch_message_names_expected_kind() {
        let codec = codec();

        let token = codec.issue("test@email.net", TokenKind::Access).unwrap();
        let err = codec.resolve(&token, TokenKind::Confirm).unwrap_err();

        assert_eq!(err.to_string(), "invalid token type, expected confirm");
    }
}
