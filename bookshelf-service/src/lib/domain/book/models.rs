use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::book::errors::BookIdError;
use crate::domain::book::errors::BookTitleError;
use crate::domain::user::models::UserId;

/// Book unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    /// Generate a new random book ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book title value object.
///
/// Stored trimmed; must be non-empty and at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a new validated title.
    ///
    /// # Errors
    /// * `Empty` - Title is blank
    /// * `TooLong` - Title exceeds 200 characters
    pub fn new(title: String) -> Result<Self, BookTitleError> {
        let title = title.trim();
        let length = title.chars().count();
        if length == 0 {
            Err(BookTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(BookTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
