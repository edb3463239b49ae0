use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::stocks;
use crate::stocks::{Result, StockError};

use super::stocks_model::{NewStock, Stock, StockDB, StockPage, StockQuery, StockUpdate};
use super::stocks_traits::StockRepositoryTrait;

/// Repository for managing stock data in the database
pub struct StockRepository {
    pool: Arc<DbPool>,
}

impl StockRepository {
    /// Creates a new StockRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| StockError::DatabaseError(e.to_string()))
    }
}

impl StockRepositoryTrait for StockRepository {
    /// Lists a new stock in the database
    fn create(&self, new_stock: NewStock) -> Result<Stock> {
        new_stock.validate()?;

        let mut stock_db: StockDB = new_stock.into();
        if stock_db.id.is_empty() {
            stock_db.id = uuid::Uuid::new_v4().to_string();
        }

        let mut conn = self.connection()?;

        diesel::insert_into(stocks::table)
            .values(&stock_db)
            .execute(&mut conn)?;

        Ok(stock_db.into())
    }

    /// Updates a stock's catalog fields (prices move through the price path)
    fn update(&self, stock_update: StockUpdate) -> Result<Stock> {
        stock_update.validate()?;
        let stock_id = stock_update.id.clone().unwrap_or_default();

        let mut conn = self.connection()?;

        let affected = diesel::update(stocks::table.find(&stock_id))
            .set((
                stocks::name.eq(&stock_update.name),
                stocks::sector.eq(&stock_update.sector),
                stocks::market_cap.eq(stock_update.market_cap),
                stocks::description.eq(&stock_update.description),
                stocks::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(StockError::NotFound(format!(
                "Stock with id {} not found",
                stock_id
            )));
        }

        self.get_by_id_in_transaction(&mut conn, &stock_id)
    }

    /// Deletes a stock by its ID and returns the number of deleted records
    fn delete(&self, stock_id: &str) -> Result<usize> {
        let mut conn = self.connection()?;

        let affected = diesel::delete(stocks::table.find(stock_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(StockError::NotFound(format!(
                "Stock with id {} not found",
                stock_id
            )));
        }

        Ok(affected)
    }

    /// Retrieves a stock by its ID
    fn get_by_id(&self, stock_id: &str) -> Result<Stock> {
        let mut conn = self.connection()?;
        self.get_by_id_in_transaction(&mut conn, stock_id)
    }

    /// Retrieves a stock using an existing connection
    fn get_by_id_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        stock_id: &str,
    ) -> Result<Stock> {
        let stock = stocks::table
            .find(stock_id)
            .first::<StockDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    StockError::NotFound(format!("Stock with id {} not found", stock_id))
                }
                _ => StockError::DatabaseError(e.to_string()),
            })?;

        Ok(stock.into())
    }

    /// Retrieves a stock by its symbol (case-insensitive)
    fn get_by_symbol(&self, symbol: &str) -> Result<Stock> {
        let normalized = symbol.trim().to_uppercase();
        let mut conn = self.connection()?;

        let stock = stocks::table
            .filter(stocks::symbol.eq(&normalized))
            .first::<StockDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    StockError::NotFound(format!("Stock with symbol {} not found", normalized))
                }
                _ => StockError::DatabaseError(e.to_string()),
            })?;

        Ok(stock.into())
    }

    /// Lists stocks matching the query, ordered by symbol, one page at a time
    fn list(&self, query: &StockQuery) -> Result<StockPage> {
        let mut conn = self.connection()?;

        let mut listing = stocks::table.into_boxed();
        let mut counting = stocks::table
            .select(diesel::dsl::count_star())
            .into_boxed();

        if let Some(term) = query.search.as_deref().filter(|t| !t.trim().is_empty()) {
            let pattern = format!("%{}%", term.trim());
            listing = listing.filter(
                stocks::symbol
                    .like(pattern.clone())
                    .or(stocks::name.like(pattern.clone())),
            );
            counting = counting.filter(
                stocks::symbol
                    .like(pattern.clone())
                    .or(stocks::name.like(pattern)),
            );
        }

        if let Some(sector) = query.sector.as_deref().filter(|s| !s.trim().is_empty()) {
            listing = listing.filter(stocks::sector.eq(sector.to_string()));
            counting = counting.filter(stocks::sector.eq(sector.to_string()));
        }

        let total: i64 = counting.first(&mut conn)?;

        let stocks = listing
            .order(stocks::symbol.asc())
            .limit(query.limit())
            .offset(query.offset())
            .load::<StockDB>(&mut conn)?
            .into_iter()
            .map(Stock::from)
            .collect();

        Ok(StockPage {
            stocks,
            total,
            total_pages: (total + query.limit() - 1) / query.limit(),
            current_page: query.page(),
        })
    }

    /// Lists the distinct market sectors
    fn list_sectors(&self) -> Result<Vec<String>> {
        let mut conn = self.connection()?;

        let sectors = stocks::table
            .select(stocks::sector)
            .distinct()
            .order(stocks::sector.asc())
            .load::<String>(&mut conn)?;

        Ok(sectors)
    }

    /// Persists the price fields of a stock inside an open transaction
    fn save_price_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        stock: &Stock,
    ) -> Result<()> {
        let affected = diesel::update(stocks::table.find(&stock.id))
            .set((
                stocks::current_price.eq(stock.current_price),
                stocks::high.eq(stock.high),
                stocks::low.eq(stock.low),
                stocks::last_updated.eq(stock.last_updated),
                stocks::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        if affected == 0 {
            return Err(StockError::NotFound(format!(
                "Stock with id {} not found",
                stock.id
            )));
        }

        Ok(())
    }
}
