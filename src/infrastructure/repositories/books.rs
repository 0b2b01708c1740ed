use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, query, query_as, query_scalar};

use crate::domain::RepositoryError;
use crate::domain::book_items::{Book, BookFilter, NewBook, UpdateBook};
use crate::domain::ids::{BookId, UserId};
use crate::domain::repositories::BookRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::macros::push_update_field;

const BOOK_COLUMNS: &str = "id, owner_id, title, author, category, cover, created_at, updated_at";

#[derive(Clone)]
pub struct SqlBookRepository {
    pool: DatabasePool,
}

impl SqlBookRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: BookRecord) -> Book {
        Book {
            id: BookId::from(record.id),
            title: record.title,
            author: record.author,
            category: record.category,
            cover: record.cover,
            owner_id: UserId::from(record.owner_id),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn insert(&self, new_book: NewBook, owner: UserId) -> Result<Book, RepositoryError> {
        let now = Utc::now();

        let record = query_as::<_, BookRecord>(&format!(
            "INSERT INTO books (owner_id, title, author, category, cover, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {BOOK_COLUMNS}"
        ))
        .bind(i64::from(owner))
        .bind(&new_book.title)
        .bind(&new_book.author)
        .bind(&new_book.category)
        .bind(new_book.cover.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            // The owner must exist in `users`.
            if let sqlx::Error::Database(db_err) = &err
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::unexpected(err.to_string())
        })?;

        Ok(Self::into_domain(record))
    }

    async fn list(&self, owner: UserId, filter: &BookFilter) -> Result<Vec<Book>, RepositoryError> {
        let mut builder = QueryBuilder::new(format!("SELECT {BOOK_COLUMNS} FROM books WHERE owner_id = "));
        builder.push_bind(i64::from(owner));
        if let Some(category) = &filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category.clone());
        }
        builder.push(" ORDER BY id ASC");

        let records = builder
            .build_query_as::<BookRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        // SQLite's LOWER/LIKE only fold ASCII, so the search term is matched
        // here over the owner's rows instead.
        Ok(records
            .into_iter()
            .map(Self::into_domain)
            .filter(|book| filter.matches(&book.title, &book.author, &book.category))
            .collect())
    }

    async fn get_owned(&self, id: BookId, owner: UserId) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ? AND owner_id = ?"
        ))
        .bind(i64::from(id))
        .bind(i64::from(owner))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        record.map(Self::into_domain).ok_or(RepositoryError::NotFound)
    }

    async fn update_owned(
        &self,
        id: BookId,
        owner: UserId,
        changes: UpdateBook,
    ) -> Result<u64, RepositoryError> {
        let mut builder = QueryBuilder::new("UPDATE books SET ");
        let mut sep = false;

        push_update_field!(builder, sep, "title", changes.title);
        push_update_field!(builder, sep, "author", changes.author);
        push_update_field!(builder, sep, "category", changes.category);
        push_update_field!(builder, sep, "cover", changes.cover);

        if !sep {
            return Err(RepositoryError::unexpected(
                "No fields provided for update".to_string(),
            ));
        }

        builder.push(", updated_at = ");
        builder.push_bind(Utc::now());
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND owner_id = ");
        builder.push_bind(i64::from(owner));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_owned(&self, id: BookId, owner: UserId) -> Result<u64, RepositoryError> {
        let result = query("DELETE FROM books WHERE id = ? AND owner_id = ?")
            .bind(i64::from(id))
            .bind(i64::from(owner))
            .execute(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn categories(&self, owner: UserId) -> Result<Vec<String>, RepositoryError> {
        query_scalar::<_, String>(
            "SELECT DISTINCT category FROM books WHERE owner_id = ? ORDER BY category ASC",
        )
        .bind(i64::from(owner))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookRecord {
    id: i64,
    owner_id: i64,
    title: String,
    author: String,
    category: String,
    cover: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
