//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the bookshelf service:
//! - Password hashing (Argon2id, tunable work factor)
//! - Session token issuance and verification (HS256 JWT)
//! - Authentication coordination with a single token lifetime
//!
//! The library knows nothing about users or storage. Callers look identities up
//! themselves and hand this crate plaintext, stored hashes and subject ids.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let issued = handler.issue("user123", Duration::hours(1)).unwrap();
//! let verified = handler.verify(&issued.token).unwrap();
//! assert_eq!(verified.subject, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let verified = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(verified.subject, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::InvalidReason;
pub use jwt::IssuedToken;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use jwt::VerifiedToken;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
