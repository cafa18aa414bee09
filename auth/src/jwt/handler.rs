use std::sync::Arc;

use chrono::DateTime;
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

use super::claims::Claims;
use super::errors::InvalidReason;
use super::errors::TokenError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// A freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by a token that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// JWT token handler for issuing and verifying session tokens.
///
/// Uses HS256 (HMAC with SHA-256). The secret is fixed at construction. Expiry
/// is checked against the handler's [`Clock`] rather than inside
/// `jsonwebtoken`, so time can be controlled by the caller.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sign a token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `Fault` - Expiry is not representable, or token encoding failed
    pub fn issue(&self, subject: impl ToString, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::Fault(format!("token lifetime {} overflows the clock", ttl))
        })?;
        let claims = Claims::for_subject(subject, now, expires_at);

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Fault(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the embedded identity.
    ///
    /// # Errors
    /// * `Invalid(Malformed)` - Not a decodable token
    /// * `Invalid(BadSignature)` - Signed with another key or algorithm
    /// * `Invalid(Expired)` - Expiry has been reached
    /// * `Invalid(MissingSubject)` - Valid token without a subject
    /// * `Fault` - Unexpected failure inside the codec
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| classify(e.kind()))?
            .claims;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(InvalidReason::Expired.into());
        }

        let subject = claims
            .subject()
            .ok_or(InvalidReason::MissingSubject)?
            .to_string();

        Ok(VerifiedToken {
            subject,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => InvalidReason::Expired.into(),
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            InvalidReason::BadSignature.into()
        }
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject => InvalidReason::Malformed.into(),
        other => TokenError::Fault(format!("{:?}", other)),
    }
}
