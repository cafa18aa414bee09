use thiserror::Error;

/// Why a token was rejected.
///
/// All of these are caused by the presented token itself, never by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token is expired")]
    Expired,

    #[error("token has no subject")]
    MissingSubject,
}

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is invalid: {0}")]
    Invalid(InvalidReason),

    #[error("Token processing failed: {0}")]
    Fault(String),
}

impl TokenError {
    /// Reason code for an expected rejection, `None` for a fault.
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            TokenError::Invalid(reason) => Some(*reason),
            TokenError::Fault(_) => None,
        }
    }
}

impl From<InvalidReason> for TokenError {
    fn from(reason: InvalidReason) -> Self {
        TokenError::Invalid(reason)
    }
}
