use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for trade-ledger operations
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for TradeError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => TradeError::NotFound("Record not found".to_string()),
            _ => TradeError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for trade operations
pub type Result<T> = std::result::Result<T, TradeError>;
