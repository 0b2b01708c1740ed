use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::ApiError;
use crate::application::routes::support::{JsonBody, PathParam, QueryParams, deserialize_some};
use crate::application::state::AppState;
use crate::domain::book_items::{Book, BookFilter, NewBook, UpdateBook};
use crate::domain::ids::BookId;
use crate::domain::messages::MessageResponse;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BookListQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct NewBookSubmission {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    cover: Option<String>,
}

impl From<NewBookSubmission> for NewBook {
    fn from(submission: NewBookSubmission) -> Self {
        NewBook {
            title: submission.title,
            author: submission.author,
            category: submission.category,
            cover: submission.cover,
        }
    }
}

/// Patchable fields only; `id` and `owner_id` are rejected as unknown.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateBookSubmission {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    cover: Option<Option<String>>,
}

impl From<UpdateBookSubmission> for UpdateBook {
    fn from(submission: UpdateBookSubmission) -> Self {
        UpdateBook {
            title: submission.title,
            author: submission.author,
            category: submission.category,
            cover: submission.cover,
        }
    }
}

#[tracing::instrument(skip(state, auth_user), fields(user_id = %auth_user.id))]
pub(crate) async fn list_books(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    QueryParams(query): QueryParams<BookListQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let filter = BookFilter::new(query.search, query.category);
    let books = state.book_service.list_books(auth_user.id, filter).await?;
    Ok(Json(books))
}

#[tracing::instrument(skip(state, auth_user, submission), fields(user_id = %auth_user.id))]
pub(crate) async fn create_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    JsonBody(submission): JsonBody<NewBookSubmission>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = state
        .book_service
        .add_book(auth_user.id, submission.into())
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

#[tracing::instrument(skip(state, auth_user), fields(user_id = %auth_user.id))]
pub(crate) async fn get_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    PathParam(id): PathParam<BookId>,
) -> Result<Json<Book>, ApiError> {
    let book = state.book_service.get_book(auth_user.id, id).await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state, auth_user, submission), fields(user_id = %auth_user.id))]
pub(crate) async fn update_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    PathParam(id): PathParam<BookId>,
    JsonBody(submission): JsonBody<UpdateBookSubmission>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .book_service
        .update_book(auth_user.id, id, submission.into())
        .await?;
    Ok(Json(MessageResponse::new("Book updated")))
}

#[tracing::instrument(skip(state, auth_user), fields(user_id = %auth_user.id))]
pub(crate) async fn delete_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    PathParam(id): PathParam<BookId>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.book_service.delete_book(auth_user.id, id).await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}

#[tracing::instrument(skip(state, auth_user), fields(user_id = %auth_user.id))]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<Json<Vec<String>>, ApiError> {
    let categories = state.book_service.list_categories(auth_user.id).await?;
    Ok(Json(categories))
}
