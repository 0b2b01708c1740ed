use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use tracing::{Span, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::ids::UserId;

/// The caller behind a verified bearer token.
///
/// A request without a usable `Authorization: Bearer <token>` header is
/// rejected with 401; a token that is present but fails verification is
/// rejected with 403.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::MissingToken)?;

        let claims = state.auth_service.verify_token(token).map_err(|err| {
            warn!(error = %err, "bearer token rejected");
            err
        })?;

        let user = AuthenticatedUser {
            id: claims.user_id(),
            email: claims.email,
        };
        Span::current().record("user.id", tracing::field::display(&user.id));
        Ok(user)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = match parts.headers.get(header::AUTHORIZATION)?.to_str() {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "authorization header contains invalid characters");
            return None;
        }
    };
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
