use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::stocks_model::{NewStock, Quote, Stock, StockPage, StockQuery, StockUpdate};
use crate::errors::Result;

/// Trait defining the contract for Stock repository operations.
pub trait StockRepositoryTrait: Send + Sync {
    fn create(&self, new_stock: NewStock) -> super::Result<Stock>;
    fn update(&self, stock_update: StockUpdate) -> super::Result<Stock>;
    fn delete(&self, stock_id: &str) -> super::Result<usize>;
    fn get_by_id(&self, stock_id: &str) -> super::Result<Stock>;
    fn get_by_id_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        stock_id: &str,
    ) -> super::Result<Stock>;
    fn get_by_symbol(&self, symbol: &str) -> super::Result<Stock>;
    fn list(&self, query: &StockQuery) -> super::Result<StockPage>;
    fn list_sectors(&self) -> super::Result<Vec<String>>;
    fn save_price_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        stock: &Stock,
    ) -> super::Result<()>;
}

/// Trait defining the contract for Stock service operations.
#[async_trait]
pub trait StockServiceTrait: Send + Sync {
    async fn create_stock(&self, new_stock: NewStock) -> Result<Stock>;
    async fn update_stock(&self, stock_update: StockUpdate) -> Result<Stock>;
    async fn delete_stock(&self, stock_id: &str) -> Result<()>;
    async fn update_price(&self, stock_id: &str, new_price: f64) -> Result<Stock>;
    fn get_stock(&self, stock_id: &str) -> Result<Stock>;
    fn get_stock_by_symbol(&self, symbol: &str) -> Result<Stock>;
    fn get_price(&self, stock_id: &str) -> Result<f64>;
    fn get_quote(&self, stock_id: &str) -> Result<Quote>;
    fn list_stocks(&self, query: StockQuery) -> Result<StockPage>;
    fn list_sectors(&self) -> Result<Vec<String>>;
}
