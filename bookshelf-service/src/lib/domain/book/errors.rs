use thiserror::Error;

use crate::domain::book::models::BookId;

/// Error type for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookTitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] BookTitleError),

    #[error("Book not found: {0}")]
    NotFound(BookId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
