use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::positions::{PositionError, Result};
use crate::schema::{positions, stocks};
use crate::stocks::{Stock, StockDB};

use super::positions_model::{Holding, Position, PositionDB};
use super::positions_traits::PositionRepositoryTrait;

/// Repository maintaining the per (account, stock) holding aggregates
pub struct PositionRepository {
    pool: Arc<DbPool>,
}

impl PositionRepository {
    /// Creates a new PositionRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| PositionError::DatabaseError(e.to_string()))
    }
}

impl PositionRepositoryTrait for PositionRepository {
    /// Retrieves the position for an (account, stock) pair
    fn get_by_account_and_stock(
        &self,
        account_id: &str,
        stock_id: &str,
    ) -> Result<Position> {
        let mut conn = self.connection()?;

        self.find_in_transaction(&mut conn, account_id, stock_id)?
            .ok_or_else(|| {
                PositionError::NotFound(format!(
                    "No position for account {} in stock {}",
                    account_id, stock_id
                ))
            })
    }

    /// Looks up a position using an existing connection; absence is not an
    /// error here because the settlement path creates on first buy
    fn find_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        stock_id: &str,
    ) -> Result<Option<Position>> {
        let position = positions::table
            .filter(positions::account_id.eq(account_id))
            .filter(positions::stock_id.eq(stock_id))
            .first::<PositionDB>(conn)
            .optional()
            .map_err(|e| PositionError::DatabaseError(e.to_string()))?;

        Ok(position.map(Position::from))
    }

    /// Lists all positions held by an account
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Position>> {
        let mut conn = self.connection()?;

        positions::table
            .filter(positions::account_id.eq(account_id))
            .load::<PositionDB>(&mut conn)
            .map_err(|e| PositionError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Position::from).collect())
    }

    /// Lists an account's positions joined with their stocks, with the
    /// valuation fields computed against the current quote
    fn list_holdings(&self, account_id: &str) -> Result<Vec<Holding>> {
        let mut conn = self.connection()?;

        let rows = positions::table
            .inner_join(stocks::table)
            .filter(positions::account_id.eq(account_id))
            .select((PositionDB::as_select(), StockDB::as_select()))
            .order(stocks::symbol.asc())
            .load::<(PositionDB, StockDB)>(&mut conn)
            .map_err(|e| PositionError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(position_db, stock_db)| {
                let stock: Stock = stock_db.into();
                Holding::from_parts(position_db.into(), &stock)
            })
            .collect())
    }

    /// Folds a buy into the holding inside an open transaction: creates the
    /// position on the first buy, otherwise accumulates the weighted average
    /// cost basis.
    fn apply_buy_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
        price: f64,
    ) -> Result<Position> {
        if quantity <= 0 {
            return Err(PositionError::InvalidData(
                "Buy quantity must be positive".to_string(),
            ));
        }

        let now = chrono::Utc::now().naive_utc();
        let cost = quantity as f64 * price;

        match self.find_in_transaction(conn, account_id, stock_id)? {
            Some(existing) => {
                let new_quantity = existing.quantity + quantity;
                let new_investment = existing.total_investment + cost;
                let new_average = new_investment / new_quantity as f64;

                diesel::update(positions::table.find(&existing.id))
                    .set((
                        positions::quantity.eq(new_quantity),
                        positions::average_price.eq(new_average),
                        positions::total_investment.eq(new_investment),
                        positions::updated_at.eq(now),
                    ))
                    .execute(conn)?;

                Ok(Position {
                    quantity: new_quantity,
                    average_price: new_average,
                    total_investment: new_investment,
                    updated_at: now,
                    ..existing
                })
            }
            None => {
                let position_db = PositionDB {
                    id: uuid::Uuid::new_v4().to_string(),
                    account_id: account_id.to_string(),
                    stock_id: stock_id.to_string(),
                    quantity,
                    average_price: price,
                    total_investment: cost,
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(positions::table)
                    .values(&position_db)
                    .execute(conn)?;

                Ok(position_db.into())
            }
        }
    }

    /// Folds a sell into the holding inside an open transaction. The average
    /// price is left unchanged; the invested amount is recomputed from the
    /// remaining quantity. A position that reaches exactly zero is deleted
    /// and `None` is returned.
    fn apply_sell_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        stock_id: &str,
        quantity: i64,
    ) -> Result<Option<Position>> {
        if quantity <= 0 {
            return Err(PositionError::InvalidData(
                "Sell quantity must be positive".to_string(),
            ));
        }

        let existing = self
            .find_in_transaction(conn, account_id, stock_id)?
            .ok_or_else(|| {
                PositionError::InsufficientHoldings(format!(
                    "No position for account {} in stock {}",
                    account_id, stock_id
                ))
            })?;

        if existing.quantity < quantity {
            return Err(PositionError::InsufficientHoldings(format!(
                "Holding {} shares, cannot sell {}",
                existing.quantity, quantity
            )));
        }

        let remaining = existing.quantity - quantity;

        if remaining == 0 {
            diesel::delete(positions::table.find(&existing.id)).execute(conn)?;
            return Ok(None);
        }

        let now = chrono::Utc::now().naive_utc();
        let new_investment = remaining as f64 * existing.average_price;

        diesel::update(positions::table.find(&existing.id))
            .set((
                positions::quantity.eq(remaining),
                positions::total_investment.eq(new_investment),
                positions::updated_at.eq(now),
            ))
            .execute(conn)?;

        Ok(Some(Position {
            quantity: remaining,
            total_investment: new_investment,
            updated_at: now,
            ..existing
        }))
    }
}
