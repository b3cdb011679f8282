use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::Display;
use thiserror::Error;

use crate::models::FieldErrors;

/// The two record kinds, used to name the subject of an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Entity {
    Category,
    Product,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Missing ID.")]
    MissingId,

    #[error("{0} ID is invalid.")]
    InvalidId(Entity),

    #[error("{0} does not exist.")]
    NotFound(Entity),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("This category cannot be deleted because it has products attached.")]
    HasDependents,

    #[error("Missing parameter.")]
    MissingParameter,

    #[error("Missing parameter value.")]
    MissingParameterValue,

    #[error("Wrong parameter. The parameter must be title or category.")]
    UnrecognizedParameter,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidId(_) => AppError::InvalidIdentifier(err.to_string()),
            CatalogError::NotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::Validation(fields) => AppError::ValidationError(fields.to_map()),
            CatalogError::MissingId
            | CatalogError::HasDependents
            | CatalogError::MissingParameter
            | CatalogError::MissingParameterValue
            | CatalogError::UnrecognizedParameter => AppError::BadRequest(err.to_string()),
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
            CatalogError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;
    use axum::http::StatusCode;

    #[test]
    fn test_messages_name_the_entity() {
        assert_eq!(
            CatalogError::InvalidId(Entity::Category).to_string(),
            "Category ID is invalid."
        );
        assert_eq!(
            CatalogError::NotFound(Entity::Product).to_string(),
            "Product does not exist."
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CatalogError::MissingId, StatusCode::BAD_REQUEST),
            (
                CatalogError::InvalidId(Entity::Product),
                StatusCode::BAD_REQUEST,
            ),
            (
                CatalogError::NotFound(Entity::Category),
                StatusCode::NOT_FOUND,
            ),
            (CatalogError::HasDependents, StatusCode::BAD_REQUEST),
            (CatalogError::MissingParameter, StatusCode::BAD_REQUEST),
            (CatalogError::MissingParameterValue, StatusCode::BAD_REQUEST),
            (CatalogError::UnrecognizedParameter, StatusCode::BAD_REQUEST),
            (
                CatalogError::Database("socket closed".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.status(), status);
        }
    }

    #[test]
    fn test_validation_becomes_field_map() {
        let mut fields = FieldErrors::new();
        fields.insert(Field::Price, "Product price must be at least 1.");

        match AppError::from(CatalogError::Validation(fields)) {
            AppError::ValidationError(map) => {
                assert_eq!(
                    map.get("price").map(String::as_str),
                    Some("Product price must be at least 1.")
                );
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
