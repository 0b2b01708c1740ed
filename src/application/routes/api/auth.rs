use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::application::errors::ApiError;
use crate::application::routes::support::JsonBody;
use crate::application::state::AppState;
use crate::domain::tokens::AuthSession;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RegisterSubmission {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LoginSubmission {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[tracing::instrument(skip(state, submission))]
pub(crate) async fn register(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<RegisterSubmission>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = state
        .auth_service
        .register(&submission.email, &submission.password, submission.name)
        .await?;
    Ok(Json(session))
}

#[tracing::instrument(skip(state, submission))]
pub(crate) async fn login(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<LoginSubmission>,
) -> Result<Json<AuthSession>, ApiError> {
    let session = state
        .auth_service
        .login(&submission.email, &submission.password)
        .await?;
    Ok(Json(session))
}
