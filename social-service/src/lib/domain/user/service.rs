use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenKind;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::PendingRegistration;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

/// Domain service for registration, confirmation, and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Stateless between calls; the authenticator carries the process-wide secret
/// and token lifetimes, both immutable after startup.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<PendingRegistration, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyRegistered(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;
        let user = self.repository.create(&command.email, &password_hash).await?;

        let confirmation_token = self.authenticator.issue_confirm_token(user.email.as_str())?;

        tracing::debug!(email = %user.email, "User registered, confirmation pending");

        Ok(PendingRegistration {
            user,
            confirmation_token,
        })
    }

    async fn confirm_email(&self, token: &str) -> Result<(), UserError> {
        let email = self
            .authenticator
            .resolve_subject(token, TokenKind::Confirm)?;

        // Re-setting true to true is fine, so a replayed link stays harmless
        self.repository.set_confirmed(&email).await?;

        tracing::debug!(email = %email, "User confirmed");

        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        tracing::debug!(email = %email, "Authenticating user");

        // Unknown email and wrong password collapse into the same error
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        self.authenticator
            .verify_credentials(password, &user.password_hash)?;

        if !user.confirmed {
            return Err(UserError::UserNotConfirmed);
        }

        Ok(user)
    }

    fn issue_access_token(&self, email: &str) -> Result<String, UserError> {
        tracing::debug!(email = %email, "Access token issued");

        Ok(self.authenticator.issue_access_token(email)?)
    }

    async fn resolve_current_user(&self, token: &str) -> Result<User, UserError> {
        let email = self.authenticator.resolve_subject(token, TokenKind::Access)?;

        self.repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::NoSuchUser)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use auth::TokenError;
    use auth::TokenTtl;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, email: &EmailAddress, password_hash: &str) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn set_confirmed(&self, email: &str) -> Result<(), UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, TokenTtl::default()))
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    fn user_with_password(address: &str, password: &str, confirmed: bool) -> User {
        User {
            id: 1,
            email: email(address),
            password_hash: authenticator().hash_password(password).unwrap(),
            confirmed,
        }
    }

    #[tokio::test]
    async fn test_register_new_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|email, password_hash| {
                email.as_str() == "a@x.com" && password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|email, password_hash| {
                Ok(User {
                    id: 1,
                    email: email.clone(),
                    password_hash: password_hash.to_string(),
                    confirmed: false,
                })
            });

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = RegisterUserCommand::new(email("a@x.com"), "pw".to_string());
        let pending = service.register(command).await.expect("register failed");

        assert!(!pending.user.confirmed);
        assert_eq!(pending.user.email.as_str(), "a@x.com");

        // The returned token is a confirmation token for that email
        let subject = authenticator()
            .resolve_subject(&pending.confirmation_token, TokenKind::Confirm)
            .expect("confirmation token did not resolve");
        assert_eq!(subject, "a@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(user_with_password("a@x.com", "pw", false))));

        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = RegisterUserCommand::new(email("a@x.com"), "pw".to_string());
        let result = service.register(command).await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyRegistered(_)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(Some(user_with_password("a@x.com", "pw", true))));

        let service = UserService::new(Arc::new(repository), authenticator());

        let user = service
            .authenticate("a@x.com", "pw")
            .await
            .expect("authentication failed");
        assert!(user.confirmed);
        assert_eq!(user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.authenticate("nobody@x.com", "pw").await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password_same_error_as_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(user_with_password("a@x.com", "pw", true))));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.authenticate("a@x.com", "wrong password").await;
        assert!(matches!(result.unwrap_err(), UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_unconfirmed_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(user_with_password("a@x.com", "pw", false))));

        let service = UserService::new(Arc::new(repository), authenticator());

        // Correct password is not enough without a confirmed email
        let result = service.authenticate("a@x.com", "pw").await;
        assert!(matches!(result.unwrap_err(), UserError::UserNotConfirmed));
    }

    #[tokio::test]
    async fn test_confirm_email_marks_user_confirmed() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_set_confirmed()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), authenticator());

        let token = authenticator().issue_confirm_token("a@x.com").unwrap();
        service.confirm_email(&token).await.expect("confirm failed");
    }

    #[tokio::test]
    async fn test_confirm_email_is_idempotent() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_set_confirmed()
            .withf(|email| email == "a@x.com")
            .times(2)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), authenticator());

        let token = authenticator().issue_confirm_token("a@x.com").unwrap();
        service.confirm_email(&token).await.expect("first confirm failed");
        service.confirm_email(&token).await.expect("second confirm failed");
    }

    #[tokio::test]
    async fn test_confirm_email_rejects_access_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_set_confirmed().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let token = authenticator().issue_access_token("a@x.com").unwrap();
        let result = service.confirm_email(&token).await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::Token(TokenError::TypeMismatch {
                expected: TokenKind::Confirm
            })
        ));
    }

    #[tokio::test]
    async fn test_confirm_email_rejects_expired_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_set_confirmed().times(0);

        let expired = Arc::new(Authenticator::new(
            SECRET,
            TokenTtl {
                access_minutes: -1,
                confirm_minutes: -1,
            },
        ));
        let token = expired.issue_confirm_token("a@x.com").unwrap();

        let service = UserService::new(Arc::new(repository), expired);

        let result = service.confirm_email(&token).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::Token(TokenError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_resolve_current_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(Some(user_with_password("a@x.com", "pw", true))));

        let service = UserService::new(Arc::new(repository), authenticator());

        let token = service.issue_access_token("a@x.com").unwrap();
        let user = service
            .resolve_current_user(&token)
            .await
            .expect("resolve failed");
        assert_eq!(user.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_resolve_current_user_deleted_after_issuance() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let token = service.issue_access_token("a@x.com").unwrap();
        let result = service.resolve_current_user(&token).await;
        assert!(matches!(result.unwrap_err(), UserError::NoSuchUser));
    }

    #[tokio::test]
    async fn test_resolve_current_user_never_accepts_confirm_token() {
        let mut repository = MockTestUserRepository::new();
        // Well-signed and unexpired, but wrong kind: no lookup may happen
        repository.expect_find_by_email().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let token = authenticator().issue_confirm_token("a@x.com").unwrap();
        let result = service.resolve_current_user(&token).await;

        assert!(matches!(
            result.unwrap_err(),
            UserError::Token(TokenError::TypeMismatch {
                expected: TokenKind::Access
            })
        ));
    }

    #[tokio::test]
    async fn test_resolve_current_user_garbage_token() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.resolve_current_user("garbage-string").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::Token(TokenError::Invalid)
        ));
    }

    /// In-memory repository for the full register -> confirm -> login flow.
    struct FakeUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl FakeUserRepository {
        fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepository {
        async fn create(
            &self,
            email: &EmailAddress,
            password_hash: &str,
        ) -> Result<User, UserError> {
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: users.len() as i64 + 1,
                email: email.clone(),
                password_hash: password_hash.to_string(),
                confirmed: false,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
        }

        async fn set_confirmed(&self, email: &str) -> Result<(), UserError> {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.email.as_str() == email) {
                user.confirmed = true;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_register_confirm_login_flow() {
        let service = UserService::new(Arc::new(FakeUserRepository::new()), authenticator());

        let command = RegisterUserCommand::new(email("a@x.com"), "pw".to_string());
        let pending = service.register(command).await.expect("register failed");

        // Login before confirmation is gated
        let result = service.authenticate("a@x.com", "pw").await;
        assert!(matches!(result.unwrap_err(), UserError::UserNotConfirmed));

        service
            .confirm_email(&pending.confirmation_token)
            .await
            .expect("confirm failed");

        let user = service
            .authenticate("a@x.com", "pw")
            .await
            .expect("login after confirmation failed");
        assert!(user.confirmed);

        // And the issued access token round-trips back to the same user
        let token = service.issue_access_token(user.email.as_str()).unwrap();
        let current = service.resolve_current_user(&token).await.unwrap();
        assert_eq!(current.id, user.id);
    }
}
