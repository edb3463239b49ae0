use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::stocks_errors::{Result, StockError};

/// Domain model representing a listed stock and its daily trading statistics.
///
/// `change` and `change_percent` are computed from the canonical stored
/// fields rather than persisted, so they can never go stale.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub current_price: f64,
    pub opening_price: f64,
    pub high: f64,
    pub low: f64,
    pub volume: i64,
    pub market_cap: f64,
    pub description: String,
    pub last_updated: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Stock {
    /// Absolute price change since the open
    pub fn change(&self) -> f64 {
        self.current_price - self.opening_price
    }

    /// Price change since the open as a percentage of the opening price
    pub fn change_percent(&self) -> f64 {
        if self.opening_price == 0.0 {
            return 0.0;
        }
        (self.change() / self.opening_price) * 100.0
    }

    /// Applies a new price, widening the daily high/low bounds so that
    /// `high >= max(current, opening)` and `low <= min(current, opening)`
    /// always hold, and stamps the quote time.
    pub fn apply_price(&mut self, new_price: f64) -> Result<()> {
        if !new_price.is_finite() || new_price < 0.0 {
            return Err(StockError::InvalidData(format!(
                "Price must be a non-negative number, got {}",
                new_price
            )));
        }

        self.current_price = new_price;
        if new_price > self.high {
            self.high = new_price;
        }
        if new_price < self.low {
            self.low = new_price;
        }
        self.last_updated = chrono::Utc::now().naive_utc();

        Ok(())
    }

    /// Current quote view with the derived change fields filled in
    pub fn quote(&self) -> Quote {
        Quote {
            symbol: self.symbol.clone(),
            current_price: self.current_price,
            opening_price: self.opening_price,
            high: self.high,
            low: self.low,
            volume: self.volume,
            change: self.change(),
            change_percent: self.change_percent(),
            last_updated: self.last_updated,
        }
    }
}

/// A stock's current price and daily trading statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub current_price: f64,
    pub opening_price: f64,
    pub high: f64,
    pub low: f64,
    pub volume: i64,
    pub change: f64,
    pub change_percent: f64,
    pub last_updated: NaiveDateTime,
}

/// Input model for listing a new stock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub current_price: f64,
    pub opening_price: f64,
    pub volume: i64,
    pub market_cap: f64,
    pub description: String,
}

impl NewStock {
    /// Validates the new stock data
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Stock symbol cannot be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Stock name cannot be empty".to_string(),
            ));
        }
        if self.sector.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Stock sector cannot be empty".to_string(),
            ));
        }
        for (field, value) in [
            ("currentPrice", self.current_price),
            ("openingPrice", self.opening_price),
            ("marketCap", self.market_cap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StockError::InvalidData(format!(
                    "{} must be a non-negative number",
                    field
                )));
            }
        }
        if self.volume < 0 {
            return Err(StockError::InvalidData(
                "Volume cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating a stock's catalog fields.
/// Prices only move through the price-update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockUpdate {
    pub id: Option<String>,
    pub name: String,
    pub sector: String,
    pub market_cap: f64,
    pub description: String,
}

impl StockUpdate {
    /// Validates the stock update data
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(StockError::InvalidData(
                "Stock ID is required for updates".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Stock name cannot be empty".to_string(),
            ));
        }
        if self.sector.trim().is_empty() {
            return Err(StockError::InvalidData(
                "Stock sector cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Filter and pagination parameters for listing stocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuery {
    pub search: Option<String>,
    pub sector: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl Default for StockQuery {
    fn default() -> Self {
        Self {
            search: None,
            sector: None,
            page: 1,
            limit: 20,
        }
    }
}

impl StockQuery {
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// One page of stock listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPage {
    pub stocks: Vec<Stock>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Database model for stocks
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StockDB {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub current_price: f64,
    pub opening_price: f64,
    pub high: f64,
    pub low: f64,
    pub volume: i64,
    pub market_cap: f64,
    pub description: String,
    pub last_updated: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<StockDB> for Stock {
    fn from(db: StockDB) -> Self {
        Self {
            id: db.id,
            symbol: db.symbol,
            name: db.name,
            sector: db.sector,
            current_price: db.current_price,
            opening_price: db.opening_price,
            high: db.high,
            low: db.low,
            volume: db.volume,
            market_cap: db.market_cap,
            description: db.description,
            last_updated: db.last_updated,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewStock> for StockDB {
    fn from(domain: NewStock) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            symbol: domain.symbol.trim().to_uppercase(),
            name: domain.name,
            sector: domain.sector,
            current_price: domain.current_price,
            opening_price: domain.opening_price,
            high: domain.current_price.max(domain.opening_price),
            low: domain.current_price.min(domain.opening_price),
            volume: domain.volume,
            market_cap: domain.market_cap,
            description: domain.description,
            last_updated: now,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Stock> for StockDB {
    fn from(domain: Stock) -> Self {
        Self {
            id: domain.id,
            symbol: domain.symbol,
            name: domain.name,
            sector: domain.sector,
            current_price: domain.current_price,
            opening_price: domain.opening_price,
            high: domain.high,
            low: domain.low,
            volume: domain.volume,
            market_cap: domain.market_cap,
            description: domain.description,
            last_updated: domain.last_updated,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(current: f64, opening: f64) -> Stock {
        Stock {
            id: "s1".to_string(),
            symbol: "ACME".to_string(),
            name: "Acme Corp".to_string(),
            sector: "Industrials".to_string(),
            current_price: current,
            opening_price: opening,
            high: current.max(opening),
            low: current.min(opening),
            ..Default::default()
        }
    }

    #[test]
    fn change_is_derived_from_opening_price() {
        let stock = stock(110.0, 100.0);
        assert_eq!(stock.change(), 10.0);
        assert_eq!(stock.change_percent(), 10.0);
    }

    #[test]
    fn change_percent_is_zero_when_opening_price_is_zero() {
        let stock = stock(5.0, 0.0);
        assert_eq!(stock.change_percent(), 0.0);
    }

    #[test]
    fn apply_price_widens_high() {
        let mut stock = stock(100.0, 100.0);
        stock.apply_price(120.0).unwrap();
        assert_eq!(stock.current_price, 120.0);
        assert_eq!(stock.high, 120.0);
        assert_eq!(stock.low, 100.0);
    }

    #[test]
    fn apply_price_widens_low() {
        let mut stock = stock(100.0, 100.0);
        stock.apply_price(80.0).unwrap();
        assert_eq!(stock.low, 80.0);
        assert_eq!(stock.high, 100.0);
    }

    #[test]
    fn apply_price_keeps_bounds_for_in_range_price() {
        let mut stock = stock(100.0, 100.0);
        stock.apply_price(120.0).unwrap();
        stock.apply_price(110.0).unwrap();
        assert_eq!(stock.high, 120.0);
        assert_eq!(stock.low, 100.0);
        // high >= max(current, opening), low <= min(current, opening)
        assert!(stock.high >= stock.current_price.max(stock.opening_price));
        assert!(stock.low <= stock.current_price.min(stock.opening_price));
    }

    #[test]
    fn apply_price_rejects_negative_price() {
        let mut stock = stock(100.0, 100.0);
        assert!(matches!(
            stock.apply_price(-1.0),
            Err(StockError::InvalidData(_))
        ));
    }

    #[test]
    fn quote_carries_derived_fields() {
        let mut stock = stock(100.0, 100.0);
        stock.apply_price(112.0).unwrap();
        let quote = stock.quote();
        assert_eq!(quote.change, 12.0);
        assert!((quote.change_percent - 12.0).abs() < 1e-9);
        assert_eq!(quote.high, 112.0);
    }

    #[test]
    fn new_stock_symbol_is_normalized_uppercase() {
        let db: StockDB = NewStock {
            id: None,
            symbol: " acme ".to_string(),
            name: "Acme Corp".to_string(),
            sector: "Industrials".to_string(),
            current_price: 10.0,
            opening_price: 12.0,
            volume: 0,
            market_cap: 0.0,
            description: String::new(),
        }
        .into();
        assert_eq!(db.symbol, "ACME");
        assert_eq!(db.high, 12.0);
        assert_eq!(db.low, 10.0);
    }
}
