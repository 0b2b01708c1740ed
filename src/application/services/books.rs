use std::sync::Arc;

use tracing::{info, warn};

use crate::application::errors::AppError;
use crate::domain::RepositoryError;
use crate::domain::book_items::{Book, BookFilter, NewBook, UpdateBook};
use crate::domain::ids::{BookId, UserId};
use crate::domain::repositories::BookRepository;

/// Owner-scoped book operations. Every call takes the authenticated user's id
/// and never touches another user's rows.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_books(&self, owner: UserId, filter: BookFilter) -> Result<Vec<Book>, AppError> {
        Ok(self.books.list(owner, &filter).await?)
    }

    #[tracing::instrument(skip(self, new_book))]
    pub async fn add_book(&self, owner: UserId, new_book: NewBook) -> Result<Book, AppError> {
        let new_book = new_book.normalize();
        if let Some(field) = new_book.missing_field() {
            return Err(AppError::missing_field(field));
        }

        let book = self
            .books
            .insert(new_book, owner)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => {
                    warn!(user_id = %owner, "token names a user that does not exist");
                    AppError::InvalidToken
                }
                other => other.into(),
            })?;
        info!(book_id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_book(&self, owner: UserId, id: BookId) -> Result<Book, AppError> {
        Ok(self.books.get_owned(id, owner).await?)
    }

    #[tracing::instrument(skip(self, changes))]
    pub async fn update_book(
        &self,
        owner: UserId,
        id: BookId,
        changes: UpdateBook,
    ) -> Result<(), AppError> {
        let changes = changes.normalize();
        if let Some(field) = changes.missing_field() {
            return Err(AppError::missing_field(field));
        }
        if !changes.has_changes() {
            return Err(AppError::validation("no changes provided"));
        }

        match self.books.update_owned(id, owner, changes).await? {
            0 => Err(AppError::NotFound),
            _ => {
                info!(book_id = %id, "book updated");
                Ok(())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_book(&self, owner: UserId, id: BookId) -> Result<(), AppError> {
        match self.books.delete_owned(id, owner).await? {
            0 => Err(AppError::NotFound),
            _ => {
                info!(book_id = %id, "book deleted");
                Ok(())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_categories(&self, owner: UserId) -> Result<Vec<String>, AppError> {
        Ok(self.books.categories(owner).await?)
    }
}
