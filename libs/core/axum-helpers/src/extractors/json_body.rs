//! JSON extractor whose rejection is rendered in the standard error envelope.

use crate::errors::AppError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// Reads the body as JSON regardless of the declared content type.
///
/// An empty body decodes as `{}`, so payload fields come out missing rather
/// than the request being refused. A body that is not valid JSON becomes
/// [`AppError::MalformedJson`].
///
/// Field validation is left to the service layer, which owns the messages.
/// Handlers that must check the path first can take
/// `Result<JsonBody<T>, AppError>` and apply `?` after their own checks.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<CreateCategory>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T: DeserializeOwned> JsonBody<T> {
    /// Decode raw body bytes, treating blank input as `{}`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}".as_slice()
        } else {
            bytes
        };
        serde_json::from_slice(bytes)
            .map(JsonBody)
            .map_err(|e| AppError::MalformedJson(e.to_string()))
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedJson(e.body_text()))?;
        Self::from_bytes(&bytes)
    }
}
