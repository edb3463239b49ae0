use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::trades_model::{
    NewTrade, Trade, TradeConfirmation, TradePage, TradeQuery, TradeRequest,
};
use crate::errors::Result;

/// Trait defining the contract for the trade-ledger repository.
pub trait TradeRepositoryTrait: Send + Sync {
    fn insert_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        new_trade: NewTrade,
    ) -> super::Result<Trade>;
    fn get_by_id(&self, trade_id: &str) -> super::Result<Trade>;
    fn list_for_account(
        &self,
        account_id: &str,
        query: &TradeQuery,
    ) -> super::Result<TradePage>;
    fn count_for_account(&self, account_id: &str) -> super::Result<i64>;
}

/// Trait defining the contract for the settlement service.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    async fn execute_trade(&self, request: TradeRequest) -> Result<TradeConfirmation>;
    fn get_trade(&self, trade_id: &str) -> Result<Trade>;
    fn get_account_trades(&self, account_id: &str, query: TradeQuery) -> Result<TradePage>;
}
