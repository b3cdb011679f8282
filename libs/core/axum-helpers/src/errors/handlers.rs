use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse, messages};

/// Fallback for unknown routes, rendered in the standard envelope.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::message(
        ErrorCode::NotFound,
        messages::NOT_FOUND_ROUTE,
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::message(
        ErrorCode::MethodNotAllowed,
        messages::METHOD_NOT_ALLOWED,
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
