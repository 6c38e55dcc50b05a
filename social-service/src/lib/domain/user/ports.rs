use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PendingRegistration;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;

/// Port for registration, login, and token-based identity resolution.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new, unconfirmed user.
    ///
    /// # Returns
    /// The created user plus the confirmation token for the email link
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - A user with this email already exists
    /// * `DatabaseError` - Database operation failed
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<PendingRegistration, UserError>;

    /// Mark the user referenced by a confirmation token as confirmed.
    ///
    /// Idempotent: confirming an already-confirmed user is not an error.
    ///
    /// # Errors
    /// * `Token` - Token is invalid, expired, subject-less, or not a
    ///   confirmation token
    /// * `DatabaseError` - Database operation failed
    async fn confirm_email(&self, token: &str) -> Result<(), UserError>;

    /// Check credentials and the confirmation gate for a login attempt.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (identical on
    ///   purpose)
    /// * `UserNotConfirmed` - Password is correct but the email was never
    ///   confirmed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError>;

    /// Issue an access token for an already-authenticated email.
    ///
    /// # Errors
    /// * `Token` - Token encoding failed
    fn issue_access_token(&self, email: &str) -> Result<String, UserError>;

    /// Resolve the user behind a bearer access token.
    ///
    /// # Errors
    /// * `Token` - Token is invalid, expired, subject-less, or not an access
    ///   token
    /// * `NoSuchUser` - Token subject no longer resolves to a user
    /// * `DatabaseError` - Database operation failed
    async fn resolve_current_user(&self, token: &str) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user with `confirmed` defaulting to false.
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email unique constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Set the confirmed flag for the user with this email.
    ///
    /// A no-op when the user is already confirmed or absent.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn set_confirmed(&self, email: &str) -> Result<(), UserError>;
}
