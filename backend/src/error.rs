//! Error handling for the Warehouse Inventory Platform
//!
//! Every failure leaves the server as a JSON envelope with a stable code.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DomainError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Upload errors
    #[error("Missing required column in {file} file: {column}")]
    MissingColumn { file: String, column: String },

    #[error("{message}")]
    MissingColumns {
        message: String,
        columns_found: Vec<String>,
    },

    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),

    #[error("Upload error: {0}")]
    Upload(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns_found: Option<Vec<String>>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
            columns_found: None,
        }
    }

    fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NonPositiveCapacity(_) => AppError::Validation {
                field: "max_cartons".to_string(),
                message: "Capacity must be greater than 0".to_string(),
            },
            DomainError::EmptySku => AppError::Validation {
                field: "sku".to_string(),
                message,
            },
            DomainError::EmptyRackType => AppError::Validation {
                field: "rack_type".to_string(),
                message,
            },
            DomainError::EmptyLocationCode => AppError::Validation {
                field: "location_code".to_string(),
                message,
            },
            DomainError::MissingColumn { file, column } => AppError::MissingColumn { file, column },
            DomainError::MissingColumns { columns_found, .. } => AppError::MissingColumns {
                message,
                columns_found,
            },
            DomainError::EmptyData(_) | DomainError::ArithmeticOverflow(_) => {
                AppError::ValidationError(message)
            }
            DomainError::Csv(msg) => AppError::InvalidCsv(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|f| f.to_string())
            .unwrap_or_default();
        AppError::Validation {
            field,
            message: errors.to_string(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Upload(err.body_text())
    }
}

impl AppError {
    /// Pool exhaustion and connection failures mean the store is unreachable
    fn is_store_unavailable(err: &sqlx::Error) -> bool {
        matches!(
            err,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", message.clone()).with_field(field.clone()),
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("VALIDATION_ERROR", msg.clone()),
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::MissingColumn { column, .. } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("MISSING_COLUMN", self.to_string()).with_field(column.clone()),
            ),
            AppError::MissingColumns {
                message,
                columns_found,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    columns_found: Some(columns_found.clone()),
                    ..ErrorDetail::new("MISSING_COLUMNS", message.clone())
                },
            ),
            AppError::InvalidCsv(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("INVALID_CSV", format!("Invalid CSV: {}", msg)),
            ),
            AppError::Upload(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("UPLOAD_ERROR", msg.clone()),
            ),
            AppError::DatabaseError(err) if Self::is_store_unavailable(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new("DATA_STORE_UNAVAILABLE", "The data store is unavailable"),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred"),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred"),
            ),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_capacity_is_bad_request() {
        let err: AppError = DomainError::NonPositiveCapacity(0).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn arithmetic_overflow_is_bad_request() {
        let err: AppError = DomainError::ArithmeticOverflow("Reorder point for SKU A1".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn pool_timeout_is_service_unavailable() {
        let err = AppError::DatabaseError(sqlx::Error::PoolTimedOut);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn missing_row_is_internal_error() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
