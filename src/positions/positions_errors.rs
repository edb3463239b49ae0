use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for position-related operations
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Insufficient holdings: {0}")]
    InsufficientHoldings(String),
}

impl From<DieselError> for PositionError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => PositionError::NotFound("Record not found".to_string()),
            _ => PositionError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for position operations
pub type Result<T> = std::result::Result<T, PositionError>;
