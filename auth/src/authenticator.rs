use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::jwt::IssuedToken;
use crate::jwt::JwtHandler;
use crate::jwt::TokenError;
use crate::jwt::VerifiedToken;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Every token it issues has the same lifetime, fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Instant the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for AuthenticationResult {
    fn from(issued: IssuedToken) -> Self {
        Self {
            access_token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of every issued token
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Replace the password hasher (e.g. with a tuned work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Replace the clock used for issuing and expiring tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.jwt_handler = self.jwt_handler.with_clock(clock);
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity the token is bound to
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?.into())
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `Fault` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<IssuedToken, TokenError> {
        self.jwt_handler.issue(subject, self.token_ttl)
    }

    /// Validate a token and return its identity.
    ///
    /// # Errors
    /// * `Invalid` - Malformed, badly signed, expired or subject-less token
    /// * `Fault` - Unexpected codec failure
    pub fn validate_token(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        self.jwt_handler.verify(token)
    }
}
