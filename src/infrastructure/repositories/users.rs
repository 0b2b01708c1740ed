use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::ids::UserId;
use crate::domain::repositories::UserRepository;
use crate::domain::users::{NewUser, User, normalize_email};
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlUserRepository {
    pool: DatabasePool,
}

impl SqlUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: UserRecord) -> User {
        User {
            id: UserId::from(record.id),
            email: record.email,
            password_hash: record.password_hash,
            name: record.name,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        // The unique index on `email` (COLLATE NOCASE) makes this an atomic
        // insert-if-absent: concurrent registrations cannot both succeed.
        let record = query_as::<_, UserRecord>(
            "INSERT INTO users (email, password_hash, name, created_at) VALUES (?, ?, ?, ?) \
             RETURNING id, email, password_hash, name, created_at",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.name.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err
                && db_err.is_unique_violation()
            {
                return RepositoryError::conflict("A user with this email already exists");
            }
            RepositoryError::unexpected(err.to_string())
        })?;

        Ok(Self::into_domain(record))
    }

    async fn get(&self, id: UserId) -> Result<User, RepositoryError> {
        let record = query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        record.map(Self::into_domain).ok_or(RepositoryError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let record = query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE email = ?",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        record.map(Self::into_domain).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    password_hash: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}
