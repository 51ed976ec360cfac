//! Domain errors raised by the pure warehouse rules

use thiserror::Error;

/// Errors produced while validating writes or normalizing uploaded files
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Capacity must be greater than 0 (got {0})")]
    NonPositiveCapacity(i64),

    #[error("SKU must not be empty")]
    EmptySku,

    #[error("Rack type must not be empty")]
    EmptyRackType,

    #[error("Location code must not be empty")]
    EmptyLocationCode,

    #[error("Missing required column in {file} file: {column}")]
    MissingColumn { file: String, column: String },

    #[error("CSV must contain {expected}")]
    MissingColumns {
        expected: String,
        columns_found: Vec<String>,
    },

    #[error("{0} data is empty")]
    EmptyData(String),

    #[error("Invalid CSV: {0}")]
    Csv(String),

    #[error("{0} is too large to compute")]
    ArithmeticOverflow(String),
}

impl From<csv::Error> for DomainError {
    fn from(err: csv::Error) -> Self {
        DomainError::Csv(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
