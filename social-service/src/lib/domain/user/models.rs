use std::fmt;
use std::str::FromStr;

use crate::user::errors::EmailError;

/// User aggregate entity.
///
/// The id is assigned by storage and immutable once created; `confirmed`
/// starts false and flips to true exactly once through the confirmation flow.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: EmailAddress,
    pub password_hash: String,
    pub confirmed: bool,
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user with a validated email.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by the service)
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Result of a successful registration.
///
/// Carries the unconfirmed user together with the confirmation token, so the
/// inbound layer can build the confirmation link. Delivering that link is an
/// external concern.
#[derive(Debug)]
pub struct PendingRegistration {
    pub user: User,
    pub confirmation_token: String,
}
