use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::BookError;
use super::models::Book;
use super::models::BookId;
use super::models::BookTitle;
use super::ports::BookRepository;
use super::ports::BookServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of BookServicePort.
///
/// Generic over repository for testability.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    book_repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(book_repository: Arc<BR>) -> Self {
        Self { book_repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.book_repository.list_all().await
    }

    async fn create_book(&self, title: BookTitle, created_by: UserId) -> Result<Book, BookError> {
        let now = Utc::now();
        let book = Book {
            id: BookId::new(),
            title,
            created_by,
            created_at: now,
            updated_at: now,
        };

        let book = self.book_repository.create(book).await?;
        tracing::info!(book_id = %book.id, created_by = %book.created_by, "Book created");

        Ok(book)
    }

    async fn update_book(&self, id: BookId, title: BookTitle) -> Result<Book, BookError> {
        let mut book = self
            .book_repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))?;

        book.title = title;
        book.updated_at = Utc::now();

        self.book_repository.update(book).await
    }

    async fn delete_book(&self, id: BookId) -> Result<(), BookError> {
        self.book_repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id))?;

        self.book_repository.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");

        Ok(())
    }
}
