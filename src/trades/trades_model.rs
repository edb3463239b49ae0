use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::trades_constants::*;
use crate::errors::{Error, ValidationError};
use crate::stocks::Stock;

/// Side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => TRADE_SIDE_BUY,
            TradeSide::Sell => TRADE_SIDE_SELL,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            TRADE_SIDE_BUY => Ok(TradeSide::Buy),
            TRADE_SIDE_SELL => Ok(TradeSide::Sell),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid trade side: {}",
                other
            )))),
        }
    }
}

/// Lifecycle status of a ledger entry. Settlement only ever writes COMPLETED;
/// the other states exist for imported or cancelled history rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Pending => TRADE_STATUS_PENDING,
            TradeStatus::Completed => TRADE_STATUS_COMPLETED,
            TradeStatus::Cancelled => TRADE_STATUS_CANCELLED,
        }
    }
}

impl From<&str> for TradeStatus {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            TRADE_STATUS_PENDING => TradeStatus::Pending,
            TRADE_STATUS_CANCELLED => TradeStatus::Cancelled,
            _ => TradeStatus::Completed,
        }
    }
}

/// Domain model for one immutable ledger entry. Rows are append-only and
/// never mutated after settlement; the total amount is derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub account_id: String,
    pub stock_id: String,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: f64,
    pub status: TradeStatus,
    pub executed_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Trade {
    /// Total amount exchanged: quantity times execution price
    pub fn total_amount(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// A settlement request: which account trades which stock, which way, how much
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub account_id: String,
    pub stock_id: String,
    pub side: TradeSide,
    pub quantity: i64,
}

impl TradeRequest {
    /// Validates the settlement request
    pub fn validate(&self) -> crate::errors::Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.stock_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "stockId".to_string(),
            )));
        }
        if self.quantity < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity must be a positive integer, got {}",
                self.quantity
            ))));
        }
        Ok(())
    }
}

/// Input model for appending a ledger entry
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub account_id: String,
    pub stock_id: String,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: f64,
}

/// Result of a settled trade: the ledger entry plus the account's new balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeConfirmation {
    pub trade: Trade,
    pub new_balance: f64,
}

/// A ledger entry joined with its stock's symbol and name for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeView {
    pub id: String,
    pub account_id: String,
    pub stock_id: String,
    pub symbol: String,
    pub stock_name: String,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: f64,
    pub total_amount: f64,
    pub status: TradeStatus,
    pub executed_at: NaiveDateTime,
}

impl TradeView {
    /// Builds the display view from a trade and its stock
    pub fn from_parts(trade: Trade, stock: &Stock) -> Self {
        Self {
            symbol: stock.symbol.clone(),
            stock_name: stock.name.clone(),
            total_amount: trade.total_amount(),
            id: trade.id,
            account_id: trade.account_id,
            stock_id: trade.stock_id,
            side: trade.side,
            quantity: trade.quantity,
            price: trade.price,
            status: trade.status,
            executed_at: trade.executed_at,
        }
    }
}

/// Pagination parameters for the trade history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeQuery {
    pub page: i64,
    pub limit: i64,
}

impl Default for TradeQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl TradeQuery {
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

/// One page of an account's trade history, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradePage {
    pub trades: Vec<TradeView>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Database model for trades
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: String,
    pub account_id: String,
    pub stock_id: String,
    pub side: String,
    pub quantity: i64,
    pub price: f64,
    pub status: String,
    pub executed_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<TradeDB> for Trade {
    fn from(db: TradeDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            stock_id: db.stock_id,
            // Rows are written from the typed enum; anything else would have
            // been rejected by the side check constraint.
            side: if db.side == TRADE_SIDE_SELL {
                TradeSide::Sell
            } else {
                TradeSide::Buy
            },
            quantity: db.quantity,
            price: db.price,
            status: TradeStatus::from(db.status.as_str()),
            executed_at: db.executed_at,
            created_at: db.created_at,
        }
    }
}

impl From<NewTrade> for TradeDB {
    fn from(domain: NewTrade) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: domain.account_id,
            stock_id: domain.stock_id,
            side: domain.side.as_str().to_string(),
            quantity: domain.quantity,
            price: domain.price,
            status: TradeStatus::Completed.as_str().to_string(),
            executed_at: now,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_case_insensitively() {
        assert_eq!(TradeSide::from_str("buy").unwrap(), TradeSide::Buy);
        assert_eq!(TradeSide::from_str("SELL").unwrap(), TradeSide::Sell);
        assert!(TradeSide::from_str("HOLD").is_err());
    }

    #[test]
    fn total_amount_is_quantity_times_price() {
        let trade = Trade {
            id: "t1".to_string(),
            account_id: "a1".to_string(),
            stock_id: "s1".to_string(),
            side: TradeSide::Buy,
            quantity: 50,
            price: 10.0,
            status: TradeStatus::Completed,
            executed_at: chrono::Utc::now().naive_utc(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        assert_eq!(trade.total_amount(), 500.0);
    }

    #[test]
    fn request_rejects_non_positive_quantity() {
        let request = TradeRequest {
            account_id: "a1".to_string(),
            stock_id: "s1".to_string(),
            side: TradeSide::Buy,
            quantity: 0,
        };
        assert!(matches!(
            request.validate(),
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn request_requires_account_and_stock() {
        let request = TradeRequest {
            account_id: "".to_string(),
            stock_id: "s1".to_string(),
            side: TradeSide::Sell,
            quantity: 1,
        };
        assert!(matches!(
            request.validate(),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }
}
