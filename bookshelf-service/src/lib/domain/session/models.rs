use auth::InvalidReason;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::models::UserProfile;

/// Identity attached to a request after the session check passes.
///
/// Lives for one request only and never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
}

impl From<UserProfile> for AuthenticatedUser {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
        }
    }
}

/// Why a request was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No authorization header, or no token after the scheme.
    MissingCredentials,
    /// The token was presented but is not acceptable.
    InvalidToken(InvalidReason),
    /// The codec failed in a way the client could not have caused.
    TokenFault(String),
    /// The token is fine but its subject no longer exists.
    UnknownSubject(UserId),
    /// The user directory could not be queried.
    DirectoryFault(String),
}

impl Rejection {
    /// Whether the server, not the caller, is at fault.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            Rejection::TokenFault(_) | Rejection::DirectoryFault(_)
        )
    }
}

/// Terminal result of the per-request session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Attached(AuthenticatedUser),
    Rejected(Rejection),
}

/// Token segment of a `<scheme> <token>` authorization value.
///
/// The scheme is discarded. Returns `None` when the header is absent or has no
/// token segment.
pub fn extract_bearer_token(authorization: Option<&str>) -> Option<&str> {
    let mut parts = authorization?.trim().splitn(2, char::is_whitespace);
    let _scheme = parts.next()?;
    let token = parts.next()?.trim();

    (!token.is_empty()).then_some(token)
}
