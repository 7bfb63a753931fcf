//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::data::DataError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Dataset could not be loaded or lacks what the view needs
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Data(e) if e.is_load_failure() => {
                (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE")
            }
            ApiError::Data(DataError::CountryNotFound(_)) => {
                (StatusCode::NOT_FOUND, "COUNTRY_NOT_FOUND")
            }
            ApiError::Data(_) => (StatusCode::UNPROCESSABLE_ENTITY, "DATA_QUALITY_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Data(DataError::NotFound {
                    path: PathBuf::from("x.csv"),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Data(DataError::AggregateMissing {
                    marker: "European Union".to_string(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Data(DataError::CountryNotFound("Atlantis".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
