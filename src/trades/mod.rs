// Module declarations
pub(crate) mod trades_constants;
pub(crate) mod trades_errors;
pub(crate) mod trades_model;
pub(crate) mod trades_repository;
pub(crate) mod trades_service;
pub(crate) mod trades_traits;

// Re-export the public interface
pub use trades_constants::*;
pub use trades_model::{
    NewTrade, Trade, TradeConfirmation, TradeDB, TradePage, TradeQuery, TradeRequest, TradeSide,
    TradeStatus, TradeView,
};
pub use trades_repository::TradeRepository;
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};

// Re-export error types for convenience
pub use trades_errors::{Result, TradeError};
