use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::user::models::UserId;

/// Port for book service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// All books, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Add a book on behalf of an authenticated user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, title: BookTitle, created_by: UserId) -> Result<Book, BookError>;

    /// Replace a book's title.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: BookId, title: BookTitle) -> Result<Book, BookError>;

    /// Remove a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: BookId) -> Result<(), BookError>;
}

/// Persistence operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Optional book (None if not found)
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;

    /// All books ordered by creation time, newest first.
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn delete(&self, id: BookId) -> Result<(), BookError>;
}
