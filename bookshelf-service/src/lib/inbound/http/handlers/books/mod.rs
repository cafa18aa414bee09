use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::book::models::Book;
use crate::domain::book::models::BookTitle;
use crate::inbound::http::handlers::ApiError;

pub mod create_book;
pub mod delete_book;
pub mod list_books;
pub mod update_book;

/// Body shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookRequest {
    title: String,
}

impl BookRequest {
    fn try_into_title(self) -> Result<BookTitle, ApiError> {
        BookTitle::new(self.title).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            created_by: book.created_by.to_string(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}
