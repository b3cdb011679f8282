pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error envelope returned for every failure.
///
/// - `code`: integer code for logs and monitoring (e.g., 1004)
/// - `error`: machine-readable identifier (e.g., "NOT_FOUND")
/// - `errors`: the messages, or a field-to-message map for validation failures
///
/// ```json
/// { "code": 1001, "error": "VALIDATION_ERROR", "errors": { "price": "Product price must be at least 1." } }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Error messages, or field errors keyed by field name
    #[schema(value_type = Object)]
    pub errors: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, errors: ErrorDetails) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            errors,
        }
    }

    /// Envelope holding a single message.
    pub fn message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, ErrorDetails::Messages(vec![message.into()]))
    }
}

/// Body of the `errors` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Messages(Vec<String>),
    Fields(BTreeMap<String, String>),
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("Validation error: {0:?}")]
    ValidationError(BTreeMap<String, String>),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedJson(_)
            | AppError::ValidationError(_)
            | AppError::InvalidIdentifier(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::MalformedJson(detail) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "Malformed JSON body: {}",
                    detail
                );
                ErrorResponse::message(ErrorCode::JsonExtraction, detail)
            }
            AppError::ValidationError(fields) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    fields
                );
                ErrorResponse::new(ErrorCode::ValidationError, ErrorDetails::Fields(fields))
            }
            AppError::InvalidIdentifier(msg) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidIdentifier.code(),
                    "Invalid identifier: {}",
                    msg
                );
                ErrorResponse::message(ErrorCode::InvalidIdentifier, msg)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(
                    error_code = ErrorCode::BadRequest.code(),
                    "Bad request: {}",
                    msg
                );
                ErrorResponse::message(ErrorCode::BadRequest, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                ErrorResponse::message(ErrorCode::NotFound, msg)
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    detail
                );
                ErrorResponse::message(ErrorCode::InternalError, messages::INTERNAL_ERROR)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                ErrorResponse::message(ErrorCode::ServiceUnavailable, msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = render(AppError::NotFound("Category does not exist.".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({
                "code": 1004,
                "error": "NOT_FOUND",
                "errors": ["Category does not exist."]
            })
        );
    }

    #[tokio::test]
    async fn test_validation_errors_are_keyed_by_field() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "price".to_string(),
            "Product price must be at least 1.".to_string(),
        );

        let (status, body) = render(AppError::ValidationError(fields)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["errors"]["price"], "Product price must be at least 1.");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) =
            render(AppError::InternalServerError("connection reset by peer".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errors"], json!(["Something went wrong."]));
        assert!(!body.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_bad_request_and_invalid_identifier_are_400() {
        let (status, body) = render(AppError::BadRequest("Missing ID.".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BAD_REQUEST");

        let (status, body) =
            render(AppError::InvalidIdentifier("Product ID is invalid.".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0], "Product ID is invalid.");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, body) = render(AppError::MalformedJson("EOF while parsing".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "JSON_EXTRACTION");
        assert_eq!(body["errors"][0], "EOF while parsing");
    }

    #[test]
    fn test_error_response_schema_is_an_object() {
        use utoipa::PartialSchema;

        let schema = serde_json::to_value(ErrorResponse::schema()).unwrap();
        assert_eq!(schema["properties"]["errors"]["type"], "object");
        assert!(schema["properties"]["code"].is_object());
    }

    #[tokio::test]
    async fn test_service_unavailable() {
        let (status, body) = render(AppError::ServiceUnavailable("mongodb".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], 1011);
    }
}
