use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::ports::BookRepository;
use crate::domain::user::models::UserId;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> BookError {
    BookError::DatabaseError(e.to_string())
}

fn book_from_row(row: &PgRow) -> Result<Book, BookError> {
    Ok(Book {
        id: BookId(row.try_get("id").map_err(database_error)?),
        title: BookTitle::new(row.try_get("title").map_err(database_error)?)?,
        created_by: UserId(row.try_get("created_by").map_err(database_error)?),
        created_at: row.try_get("created_at").map_err(database_error)?,
        updated_at: row.try_get("updated_at").map_err(database_error)?,
    })
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.created_by.0)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(book)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, created_by, created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(book_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, created_by, created_at, updated_at
            FROM books
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(book_from_row).collect()
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(book.id.0)
        .bind(book.title.as_str())
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id));
        }

        Ok(book)
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id));
        }

        Ok(())
    }
}
