// Module declarations
pub(crate) mod positions_errors;
pub(crate) mod positions_model;
pub(crate) mod positions_repository;
pub(crate) mod positions_service;
pub(crate) mod positions_traits;

// Re-export the public interface
pub use positions_model::{Holding, PortfolioSummary, Position, PositionDB};
pub use positions_repository::PositionRepository;
pub use positions_service::PositionService;
pub use positions_traits::{PositionRepositoryTrait, PositionServiceTrait};

// Re-export error types for convenience
pub use positions_errors::{PositionError, Result};
