use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::ports::BookRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// In-memory user directory for tests/dev.
///
/// Email uniqueness is checked under the write lock, so concurrent inserts of
/// the same address cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn count(&self) -> Result<u64, UserError> {
        Ok(self.users.read().await.len() as u64)
    }
}

/// In-memory book store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<HashMap<BookId, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let mut books: Vec<Book> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(books)
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.write().await;
        match books.get_mut(&book.id) {
            Some(existing) => {
                *existing = book.clone();
                Ok(book)
            }
            None => Err(BookError::NotFound(book.id)),
        }
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        self.books
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(BookError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::book::models::BookTitle;
    use crate::domain::user::models::UserName;

    fn user(address: &str) -> User {
        User {
            id: UserId::new(),
            name: UserName::new("A".to_string()).unwrap(),
            email: EmailAddress::new(address.to_string()).unwrap(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_on_insert() {
        let repository = InMemoryUserRepository::new();

        repository.create(user("a@x.com")).await.unwrap();
        let result = repository.create(user("A@X.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_inserts_admit_one() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(user("race@x.com")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_and_delete_user() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("a@x.com")).await.unwrap();

        let by_email = repository
            .find_by_email(&EmailAddress::new("a@x.com".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(created.id));

        repository.delete(&created.id).await.unwrap();
        assert!(repository.find_by_id(&created.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(&created.id).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_books_listed_newest_first() {
        let repository = InMemoryBookRepository::new();
        let now = Utc::now();
        let owner = UserId::new();

        for (offset, title) in [(2, "old"), (0, "new"), (1, "middle")] {
            let created_at = now - Duration::minutes(offset);
            repository
                .create(Book {
                    id: BookId::new(),
                    title: BookTitle::new(title.to_string()).unwrap(),
                    created_by: owner,
                    created_at,
                    updated_at: created_at,
                })
                .await
                .unwrap();
        }

        let titles: Vec<String> = repository
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title.as_str().to_string())
            .collect();

        assert_eq!(titles, vec!["new", "middle", "old"]);
    }
}
