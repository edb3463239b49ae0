use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::trades_model::{
    NewTrade, Trade, TradeConfirmation, TradePage, TradeQuery, TradeRequest, TradeSide,
};
use super::trades_repository::TradeRepository;
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::accounts::{AccountRepository, AccountRepositoryTrait};
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::Result;
use crate::positions::{PositionRepository, PositionRepositoryTrait};
use crate::stocks::{StockRepository, StockRepositoryTrait};

/// Settlement engine: turns a buy/sell request into coordinated balance,
/// position, and ledger mutations.
///
/// All three writes happen inside one immediate database transaction, so a
/// settlement either commits in full or leaves no trace. Taking the write
/// lock before the balance read also serializes concurrent settlements
/// against the same account, so two buys can never both spend the same cash.
pub struct TradeService {
    pool: Arc<DbPool>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    stock_repository: Arc<dyn StockRepositoryTrait>,
    position_repository: Arc<dyn PositionRepositoryTrait>,
    trade_repository: Arc<dyn TradeRepositoryTrait>,
}

impl TradeService {
    /// Creates a new TradeService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            account_repository: Arc::new(AccountRepository::new(pool.clone())),
            stock_repository: Arc::new(StockRepository::new(pool.clone())),
            position_repository: Arc::new(PositionRepository::new(pool.clone())),
            trade_repository: Arc::new(TradeRepository::new(pool.clone())),
            pool,
        }
    }
}

#[async_trait]
impl TradeServiceTrait for TradeService {
    /// Settles a trade: reads the execution price, moves cash and holdings,
    /// and appends the ledger entry. Commits in full or not at all.
    async fn execute_trade(&self, request: TradeRequest) -> Result<TradeConfirmation> {
        request.validate()?;

        debug!(
            "Settling {} {} x {} for account {}",
            request.side,
            request.quantity,
            request.stock_id,
            request.account_id
        );

        self.pool.execute(|conn| {
            let stock = self
                .stock_repository
                .get_by_id_in_transaction(conn, &request.stock_id)?;
            let price = stock.current_price;
            let total_cost = request.quantity as f64 * price;

            let new_balance = match request.side {
                TradeSide::Buy => {
                    // Check-and-debit is a single step; a shortfall fails the
                    // whole settlement with InsufficientFunds.
                    let balance = self.account_repository.adjust_balance_in_transaction(
                        conn,
                        &request.account_id,
                        -total_cost,
                    )?;
                    self.position_repository.apply_buy_in_transaction(
                        conn,
                        &request.account_id,
                        &stock.id,
                        request.quantity,
                        price,
                    )?;
                    balance
                }
                TradeSide::Sell => {
                    // The holdings check lives in the position tracker; it
                    // fails with InsufficientHoldings before any cash moves.
                    self.position_repository.apply_sell_in_transaction(
                        conn,
                        &request.account_id,
                        &stock.id,
                        request.quantity,
                    )?;
                    self.account_repository.adjust_balance_in_transaction(
                        conn,
                        &request.account_id,
                        total_cost,
                    )?
                }
            };

            let trade = self.trade_repository.insert_in_transaction(
                conn,
                NewTrade {
                    account_id: request.account_id.clone(),
                    stock_id: stock.id.clone(),
                    side: request.side,
                    quantity: request.quantity,
                    price,
                },
            )?;

            Ok(TradeConfirmation { trade, new_balance })
        })
    }

    /// Retrieves a ledger entry by its ID
    fn get_trade(&self, trade_id: &str) -> Result<Trade> {
        Ok(self.trade_repository.get_by_id(trade_id)?)
    }

    /// Lists an account's trade history, newest first
    fn get_account_trades(&self, account_id: &str, query: TradeQuery) -> Result<TradePage> {
        Ok(self.trade_repository.list_for_account(account_id, &query)?)
    }
}
