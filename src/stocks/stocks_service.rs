use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::stocks_model::{NewStock, Quote, Stock, StockPage, StockQuery, StockUpdate};
use super::stocks_repository::StockRepository;
use super::stocks_traits::{StockRepositoryTrait, StockServiceTrait};
use crate::db::{DbPool, DbTransactionExecutor};
use crate::errors::Result;

/// Service for the stock catalog and current quotes
pub struct StockService {
    pool: Arc<DbPool>,
    stock_repository: Arc<dyn StockRepositoryTrait>,
}

impl StockService {
    /// Creates a new StockService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            stock_repository: Arc::new(StockRepository::new(pool.clone())),
            pool,
        }
    }
}

#[async_trait]
impl StockServiceTrait for StockService {
    /// Lists a new stock
    async fn create_stock(&self, new_stock: NewStock) -> Result<Stock> {
        debug!("Listing stock {}", new_stock.symbol);
        Ok(self.stock_repository.create(new_stock)?)
    }

    /// Updates a stock's catalog fields
    async fn update_stock(&self, stock_update: StockUpdate) -> Result<Stock> {
        Ok(self.stock_repository.update(stock_update)?)
    }

    /// Deletes a stock by its ID
    async fn delete_stock(&self, stock_id: &str) -> Result<()> {
        self.stock_repository.delete(stock_id)?;
        Ok(())
    }

    /// Applies a new price to a stock, recomputing the daily bounds and
    /// stamping the quote time. The read and write share one transaction so
    /// concurrent updates cannot lose a high/low widening.
    async fn update_price(&self, stock_id: &str, new_price: f64) -> Result<Stock> {
        let stock = self.pool.execute(|conn| {
            let mut stock = self
                .stock_repository
                .get_by_id_in_transaction(conn, stock_id)?;
            stock.apply_price(new_price)?;
            self.stock_repository
                .save_price_in_transaction(conn, &stock)?;
            Ok(stock)
        })?;

        debug!(
            "Updated price for {}: {} ({:+.2}%)",
            stock.symbol,
            stock.current_price,
            stock.change_percent()
        );

        Ok(stock)
    }

    /// Retrieves a stock by its ID
    fn get_stock(&self, stock_id: &str) -> Result<Stock> {
        Ok(self.stock_repository.get_by_id(stock_id)?)
    }

    /// Retrieves a stock by its symbol
    fn get_stock_by_symbol(&self, symbol: &str) -> Result<Stock> {
        Ok(self.stock_repository.get_by_symbol(symbol)?)
    }

    /// Returns a stock's current price
    fn get_price(&self, stock_id: &str) -> Result<f64> {
        Ok(self.stock_repository.get_by_id(stock_id)?.current_price)
    }

    /// Returns the current quote view for a stock
    fn get_quote(&self, stock_id: &str) -> Result<Quote> {
        Ok(self.stock_repository.get_by_id(stock_id)?.quote())
    }

    /// Lists stocks with optional search term and sector filter
    fn list_stocks(&self, query: StockQuery) -> Result<StockPage> {
        Ok(self.stock_repository.list(&query)?)
    }

    /// Lists the distinct market sectors
    fn list_sectors(&self) -> Result<Vec<String>> {
        Ok(self.stock_repository.list_sectors()?)
    }
}
