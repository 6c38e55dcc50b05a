//! Authentication core library
//!
//! Provides the credential and token primitives for the social backend:
//! - Password hashing (Argon2id)
//! - Signed, expiring tokens with a type tag (access vs. email confirmation)
//! - Authentication coordination
//!
//! Everything here is pure computation: no storage access, no I/O. Services
//! inject their own user lookup around these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenCodec, TokenKind, TokenTtl};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", TokenTtl::default());
//! let token = codec.issue("alice@example.com", TokenKind::Access).unwrap();
//! let subject = codec.resolve(&token, TokenKind::Access).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenKind, TokenTtl};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", TokenTtl::default());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! auth.verify_credentials("password123", &hash).unwrap();
//! let token = auth.issue_access_token("alice@example.com").unwrap();
//!
//! // Authenticated request: resolve the subject back out
//! let subject = auth.resolve_subject(&token, TokenKind::Access).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
pub use token::TokenTtl;
