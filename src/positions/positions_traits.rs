use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::positions_model::{Holding, PortfolioSummary, Position};
use crate::errors::Result;

/// Trait defining the contract for Position repository operations.
pub trait PositionRepositoryTrait: Send + Sync {
    fn get_by_account_and_stock(&self, account_id: &str, stock_id: &str)
        -> super::Result<Position>;
    fn find_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        stock_id: &str,
    ) -> super::Result<Option<Position>>;
    fn list_for_account(&self, account_id: &str) -> super::Result<Vec<Position>>;
    fn list_holdings(&self, account_id: &str) -> super::Result<Vec<Holding>>;
    fn apply_buy_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
        price: f64,
    ) -> super::Result<Position>;
    fn apply_sell_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> super::Result<Option<Position>>;
}

/// Trait defining the contract for Position service operations.
#[async_trait]
pub trait PositionServiceTrait: Send + Sync {
    async fn apply_buy(
        &self,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
        price: f64,
    ) -> Result<Position>;
    async fn apply_sell(
        &self,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<Option<Position>>;
    fn get_position(&self, account_id: &str, stock_id: &str) -> Result<Position>;
    fn get_holdings(&self, account_id: &str) -> Result<Vec<Holding>>;
    fn get_portfolio_summary(&self, account_id: &str) -> Result<PortfolioSummary>;
}
