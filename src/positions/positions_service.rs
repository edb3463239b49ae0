use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::positions_model::{Holding, PortfolioSummary, Position};
use super::positions_repository::PositionRepository;
use super::positions_traits::{PositionRepositoryTrait, PositionServiceTrait};
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::Result;

/// Service tracking each account's per-stock holding aggregates
pub struct PositionService {
    pool: Arc<DbPool>,
    position_repository: Arc<dyn PositionRepositoryTrait>,
}

impl PositionService {
    /// Creates a new PositionService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            position_repository: Arc::new(PositionRepository::new(pool.clone())),
            pool,
        }
    }
}

#[async_trait]
impl PositionServiceTrait for PositionService {
    /// Folds a buy into the account's holding, in its own transaction
    async fn apply_buy(
        &self,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
        price: f64,
    ) -> Result<Position> {
        debug!(
            "Applying buy of {} x {} at {} for account {}",
            quantity, stock_id, price, account_id
        );
        self.pool.execute(|conn| {
            Ok(self.position_repository.apply_buy_in_transaction(
                conn, account_id, stock_id, quantity, price,
            )?)
        })
    }

    /// Folds a sell into the account's holding, in its own transaction.
    /// Returns `None` when the position was closed out entirely.
    async fn apply_sell(
        &self,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<Option<Position>> {
        debug!(
            "Applying sell of {} x {} for account {}",
            quantity, stock_id, account_id
        );
        self.pool.execute(|conn| {
            Ok(self
                .position_repository
                .apply_sell_in_transaction(conn, account_id, stock_id, quantity)?)
        })
    }

    /// Retrieves the position for an (account, stock) pair
    fn get_position(&self, account_id: &str, stock_id: &str) -> Result<Position> {
        Ok(self
            .position_repository
            .get_by_account_and_stock(account_id, stock_id)?)
    }

    /// Lists the account's holdings with current valuation
    fn get_holdings(&self, account_id: &str) -> Result<Vec<Holding>> {
        Ok(self.position_repository.list_holdings(account_id)?)
    }

    /// Sums the account's holdings into portfolio totals
    fn get_portfolio_summary(&self, account_id: &str) -> Result<PortfolioSummary> {
        let holdings = self.position_repository.list_holdings(account_id)?;
        Ok(PortfolioSummary::from_holdings(&holdings))
    }
}
