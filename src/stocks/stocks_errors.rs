use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for stock and quote operations
#[derive(Debug, Error)]
pub enum StockError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for StockError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => StockError::NotFound("Record not found".to_string()),
            _ => StockError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for stock operations
pub type Result<T> = std::result::Result<T, StockError>;
