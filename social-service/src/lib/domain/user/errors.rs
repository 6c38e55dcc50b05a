use auth::AuthenticationError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user and authentication operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("a user with the email {0} already exists")]
    EmailAlreadyRegistered(String),

    /// Deliberately covers both an unknown email and a wrong password, so the
    /// login endpoint cannot be used to enumerate registered addresses.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email has not been confirmed")]
    UserNotConfirmed,

    /// Token was valid but its subject no longer resolves to a user.
    #[error("no user found for this token")]
    NoSuchUser,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => UserError::Password(e),
            AuthenticationError::TokenError(e) => UserError::Token(e),
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
