use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::{stocks, trades};
use crate::stocks::{Stock, StockDB};
use crate::trades::{Result, TradeError};

use super::trades_model::{NewTrade, Trade, TradeDB, TradePage, TradeQuery, TradeView};
use super::trades_traits::TradeRepositoryTrait;

/// Repository for the append-only trade ledger
pub struct TradeRepository {
    pool: Arc<DbPool>,
}

impl TradeRepository {
    /// Creates a new TradeRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| TradeError::DatabaseError(e.to_string()))
    }
}

impl TradeRepositoryTrait for TradeRepository {
    /// Appends a ledger entry inside an open transaction. Entries are never
    /// updated or deleted afterwards.
    fn insert_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        new_trade: NewTrade,
    ) -> Result<Trade> {
        let trade_db: TradeDB = new_trade.into();

        diesel::insert_into(trades::table)
            .values(&trade_db)
            .execute(conn)?;

        Ok(trade_db.into())
    }

    /// Retrieves a ledger entry by its ID
    fn get_by_id(&self, trade_id: &str) -> Result<Trade> {
        let mut conn = self.connection()?;

        let trade = trades::table
            .find(trade_id)
            .first::<TradeDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    TradeError::NotFound(format!("Trade with id {} not found", trade_id))
                }
                _ => TradeError::DatabaseError(e.to_string()),
            })?;

        Ok(trade.into())
    }

    /// Lists an account's trade history, newest first, one page at a time,
    /// joined with each stock's symbol and name
    fn list_for_account(&self, account_id: &str, query: &TradeQuery) -> Result<TradePage> {
        let mut conn = self.connection()?;

        let total = self.count_for_account(account_id)?;

        let rows = trades::table
            .inner_join(stocks::table)
            .filter(trades::account_id.eq(account_id))
            .select((TradeDB::as_select(), StockDB::as_select()))
            .order(trades::executed_at.desc())
            .limit(query.limit())
            .offset(query.offset())
            .load::<(TradeDB, StockDB)>(&mut conn)
            .map_err(|e| TradeError::DatabaseError(e.to_string()))?;

        let trades = rows
            .into_iter()
            .map(|(trade_db, stock_db)| {
                let stock: Stock = stock_db.into();
                TradeView::from_parts(trade_db.into(), &stock)
            })
            .collect();

        Ok(TradePage {
            trades,
            total,
            total_pages: (total + query.limit() - 1) / query.limit(),
            current_page: query.page(),
        })
    }

    /// Counts an account's ledger entries
    fn count_for_account(&self, account_id: &str) -> Result<i64> {
        let mut conn = self.connection()?;

        let total = trades::table
            .filter(trades::account_id.eq(account_id))
            .count()
            .get_result(&mut conn)?;

        Ok(total)
    }
}
