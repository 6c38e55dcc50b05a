use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenKind;
use crate::token::TokenTtl;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Constructed once at process start from the shared signing secret and token
/// lifetimes, then shared across request handlers; all state is immutable
/// after construction so unsynchronized concurrent reads are safe.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error(transparent)]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `ttl` - Per-kind token lifetimes
    pub fn new(secret: &[u8], ttl: TokenTtl) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret, ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Issue an access token for an authenticated subject.
    ///
    /// # Errors
    /// * `TokenError` - Token encoding failed
    pub fn issue_access_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_codec.issue(subject, TokenKind::Access)
    }

    /// Issue an email-confirmation token for a freshly registered subject.
    ///
    /// # Errors
    /// * `TokenError` - Token encoding failed
    pub fn issue_confirm_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_codec.issue(subject, TokenKind::Confirm)
    }

    /// Validate a token of the expected kind and return its subject.
    ///
    /// # Errors
    /// * `TokenError` - Token is invalid, expired, subject-less, or of the
    ///   wrong kind
    pub fn resolve_subject(&self, token: &str, kind: TokenKind) -> Result<String, TokenError> {
        self.token_codec.resolve(token, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_full_authentication_flow() {
        let authenticator = Authenticator::new(SECRET, TokenTtl::default());

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        authenticator
            .verify_credentials(password, &hash)
            .expect("Authentication failed");

        let token = authenticator
            .issue_access_token("user@example.com")
            .expect("Failed to issue token");
        let subject = authenticator
            .resolve_subject(&token, TokenKind::Access)
            .expect("Token validation failed");

        assert_eq!(subject, "user@example.com");
    }

    #[test]
    fn test_verify_credentials_wrong_password() {
        let authenticator = Authenticator::new(SECRET, TokenTtl::default());

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_credentials("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_confirm_token_is_not_an_access_token() {
        let authenticator = Authenticator::new(SECRET, TokenTtl::default());

        let token = authenticator
            .issue_confirm_token("user@example.com")
            .expect("Failed to issue token");

        let result = authenticator.resolve_subject(&token, TokenKind::Access);
        assert!(matches!(
            result,
            Err(TokenError::TypeMismatch {
                expected: TokenKind::Access
            })
        ));
    }

    #[test]
    fn test_resolve_invalid_token() {
        let authenticator = Authenticator::new(SECRET, TokenTtl::default());

        let result = authenticator.resolve_subject("invalid.token.here", TokenKind::Access);
        assert!(matches!(result, Err(TokenError::Invalid)));
    }
}
