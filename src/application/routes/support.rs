use axum::extract::{FromRequest, FromRequestParts, Json as JsonPayload, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::application::errors::{ApiError, AppError};

/// A JSON request body whose parse failures surface as `400` with the usual
/// error body instead of axum's plain-text rejections.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonPayload(payload) = JsonPayload::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!(error = %rejection.body_text(), "failed to parse JSON payload");
                ApiError::from(AppError::validation(rejection.body_text()))
            })?;
        Ok(Self(payload))
    }
}

/// Path parameters with JSON `400` rejections, e.g. for `/api/books/abc`.
#[derive(Debug)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!(error = %rejection.body_text(), "invalid path parameter");
                ApiError::from(AppError::validation(rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// Query string parameters with JSON `400` rejections.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                warn!(error = %rejection.body_text(), "invalid query string");
                ApiError::from(AppError::validation(rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// Deserialize a present field (including an explicit `null`) as `Some`, so
/// that `Option<Option<T>>` can tell "absent" from "cleared".
pub(crate) fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
