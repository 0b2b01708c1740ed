use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::book_items::{Book, BookFilter, NewBook, UpdateBook};
use crate::domain::ids::{BookId, UserId};
use crate::domain::users::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, failing with [`RepositoryError::Conflict`] if the email
    /// is already registered.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
    async fn get(&self, id: UserId) -> Result<User, RepositoryError>;
    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError>;
}

/// Book persistence. Every operation is scoped to an owner, and the owner is
/// part of the statement's predicate rather than a check made afterwards.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, book: NewBook, owner: UserId) -> Result<Book, RepositoryError>;
    async fn list(&self, owner: UserId, filter: &BookFilter) -> Result<Vec<Book>, RepositoryError>;
    async fn get_owned(&self, id: BookId, owner: UserId) -> Result<Book, RepositoryError>;
    /// Returns the number of rows updated (0 or 1).
    async fn update_owned(
        &self,
        id: BookId,
        owner: UserId,
        changes: UpdateBook,
    ) -> Result<u64, RepositoryError>;
    /// Returns the number of rows deleted (0 or 1).
    async fn delete_owned(&self, id: BookId, owner: UserId) -> Result<u64, RepositoryError>;
    async fn categories(&self, owner: UserId) -> Result<Vec<String>, RepositoryError>;
}
