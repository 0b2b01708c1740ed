use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::errors::AppError;
use crate::domain::RepositoryError;
use crate::domain::repositories::UserRepository;
use crate::domain::tokens::{AuthSession, TokenClaims};
use crate::domain::users::{NewUser, User};
use crate::infrastructure::auth::{TokenError, TokenSigner, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    signer: Arc<TokenSigner>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, signer: Arc<TokenSigner>) -> Self {
        Self { users, signer }
    }

    #[tracing::instrument(skip(self, password, name))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<AuthSession, AppError> {
        require("email", email)?;
        require("password", password)?;

        let password_hash = hash_blocking(password.to_string()).await?;
        let user = self
            .users
            .insert(NewUser::new(email, password_hash, name))
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict(_) => AppError::DuplicateEmail,
                other => AppError::from(other),
            })?;

        info!(user_id = %user.id, "user registered");
        self.session_for(&user)
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        require("email", email)?;
        require("password", password)?;

        let user = match self.users.get_by_email(email).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound) => {
                // Pay for one hash so an unknown email costs the same as a
                // wrong password.
                let _ = hash_blocking(password.to_string()).await;
                return Err(AppError::InvalidCredentials);
            }
            Err(err) => return Err(err.into()),
        };

        let password = password.to_string();
        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|err| AppError::unexpected(format!("password verification panicked: {err}")))?;

        if !verified {
            warn!(user_id = %user.id, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = %user.id, "user logged in");
        self.session_for(&user)
    }

    /// Check a bearer token's signature and expiry, returning its claims.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.signer.verify(token).map_err(|err| match err {
            TokenError::Expired => AppError::TokenExpired,
            TokenError::Invalid => AppError::InvalidToken,
            TokenError::Signing(message) => AppError::Unexpected(message),
        })
    }

    fn session_for(&self, user: &User) -> Result<AuthSession, AppError> {
        let public = user.to_public();
        let claims = self.signer.claims_for(&public, Utc::now());
        let token = self
            .signer
            .issue(&claims)
            .map_err(|err| AppError::unexpected(err.to_string()))?;
        Ok(AuthSession {
            token,
            user: public,
        })
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|err| AppError::unexpected(format!("password hashing panicked: {err}")))?
        .map_err(|err| AppError::unexpected(format!("failed to hash password: {err}")))
}
