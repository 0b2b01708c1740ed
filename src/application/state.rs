use std::sync::Arc;

use crate::application::services::{AuthService, BookService};
use crate::domain::repositories::{BookRepository, UserRepository};
use crate::infrastructure::auth::TokenSigner;
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::books::SqlBookRepository;
use crate::infrastructure::repositories::users::SqlUserRepository;

/// Settings that vary between production and test environments. Repos and
/// services are created from the database pool.
pub struct AppStateConfig {
    pub token_signer: TokenSigner,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub book_service: BookService,
}

impl AppState {
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let pool = database.clone_pool();

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqlUserRepository::new(pool.clone()));
        let book_repo: Arc<dyn BookRepository> = Arc::new(SqlBookRepository::new(pool));

        let auth_service = AuthService::new(user_repo, Arc::new(config.token_signer));
        let book_service = BookService::new(book_repo);

        Self {
            auth_service,
            book_service,
        }
    }
}
