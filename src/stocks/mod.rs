// Module declarations
pub(crate) mod stocks_errors;
pub(crate) mod stocks_model;
pub(crate) mod stocks_repository;
pub(crate) mod stocks_service;
pub(crate) mod stocks_traits;

// Re-export the public interface
pub use stocks_model::{NewStock, Quote, Stock, StockDB, StockPage, StockQuery, StockUpdate};
pub use stocks_repository::StockRepository;
pub use stocks_service::StockService;
pub use stocks_traits::{StockRepositoryTrait, StockServiceTrait};

// Re-export error types for convenience
pub use stocks_errors::{Result, StockError};
