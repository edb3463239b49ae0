use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::stocks::Stock;

/// Domain model for an account's aggregated holding in one stock.
///
/// One row exists per (account, stock) pair while the quantity is positive;
/// the row is deleted when a sell brings the quantity to exactly zero.
/// Valuation fields are computed against a quote, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub account_id: String,
    pub stock_id: String,
    pub quantity: i64,
    pub average_price: f64,
    pub total_investment: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Position {
    /// Market value of the holding at the given price
    pub fn current_value(&self, price: f64) -> f64 {
        self.quantity as f64 * price
    }

    /// Unrealized profit or loss at the given price
    pub fn profit_loss(&self, price: f64) -> f64 {
        self.current_value(price) - self.total_investment
    }

    /// Unrealized profit or loss as a percentage of the amount invested
    pub fn profit_loss_percent(&self, price: f64) -> f64 {
        if self.total_investment == 0.0 {
            return 0.0;
        }
        (self.profit_loss(price) / self.total_investment) * 100.0
    }
}

/// A position joined with its stock's current quote for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub position: Position,
    pub symbol: String,
    pub stock_name: String,
    pub current_price: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percent: f64,
    pub today_pl: f64,
}

impl Holding {
    /// Builds the display view from a position and its stock
    pub fn from_parts(position: Position, stock: &Stock) -> Self {
        let price = stock.current_price;
        Self {
            symbol: stock.symbol.clone(),
            stock_name: stock.name.clone(),
            current_price: price,
            current_value: position.current_value(price),
            profit_loss: position.profit_loss(price),
            profit_loss_percent: position.profit_loss_percent(price),
            today_pl: position.quantity as f64 * stock.change(),
            position,
        }
    }
}

/// Aggregate totals over an account's holdings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_investment: f64,
    pub total_current_value: f64,
    pub total_profit_loss: f64,
    pub total_profit_loss_percent: f64,
}

impl PortfolioSummary {
    /// Sums a set of holdings into portfolio totals
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let total_investment: f64 = holdings
            .iter()
            .map(|h| h.position.total_investment)
            .sum();
        let total_current_value: f64 = holdings.iter().map(|h| h.current_value).sum();
        let total_profit_loss = total_current_value - total_investment;
        let total_profit_loss_percent = if total_investment > 0.0 {
            (total_profit_loss / total_investment) * 100.0
        } else {
            0.0
        };

        Self {
            total_investment,
            total_current_value,
            total_profit_loss,
            total_profit_loss_percent,
        }
    }
}

/// Database model for positions
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
#[diesel(table_name = crate::schema::positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionDB {
    pub id: String,
    pub account_id: String,
    pub stock_id: String,
    pub quantity: i64,
    pub average_price: f64,
    pub total_investment: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<PositionDB> for Position {
    fn from(db: PositionDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            stock_id: db.stock_id,
            quantity: db.quantity,
            average_price: db.average_price,
            total_investment: db.total_investment,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Position> for PositionDB {
    fn from(domain: Position) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            stock_id: domain.stock_id,
            quantity: domain.quantity,
            average_price: domain.average_price,
            total_investment: domain.total_investment,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(quantity: i64, average_price: f64) -> Position {
        Position {
            id: "p1".to_string(),
            account_id: "a1".to_string(),
            stock_id: "s1".to_string(),
            quantity,
            average_price,
            total_investment: quantity as f64 * average_price,
            ..Default::default()
        }
    }

    #[test]
    fn valuation_is_computed_against_the_given_price() {
        let position = position(50, 10.0);
        assert_eq!(position.current_value(12.0), 600.0);
        assert_eq!(position.profit_loss(12.0), 100.0);
        assert!((position.profit_loss_percent(12.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn profit_loss_percent_is_zero_without_investment() {
        let position = position(0, 0.0);
        assert_eq!(position.profit_loss_percent(10.0), 0.0);
    }

    #[test]
    fn summary_sums_holdings() {
        let stock_a = Stock {
            symbol: "AAA".to_string(),
            name: "A Corp".to_string(),
            current_price: 12.0,
            opening_price: 10.0,
            ..Default::default()
        };
        let stock_b = Stock {
            symbol: "BBB".to_string(),
            name: "B Corp".to_string(),
            current_price: 8.0,
            opening_price: 10.0,
            ..Default::default()
        };

        let holdings = vec![
            Holding::from_parts(position(10, 10.0), &stock_a),
            Holding::from_parts(position(5, 10.0), &stock_b),
        ];

        let summary = PortfolioSummary::from_holdings(&holdings);
        assert_eq!(summary.total_investment, 150.0);
        assert_eq!(summary.total_current_value, 160.0);
        assert_eq!(summary.total_profit_loss, 10.0);

        // today_pl follows the stock's change since the open
        assert_eq!(holdings[0].today_pl, 20.0);
        assert_eq!(holdings[1].today_pl, -10.0);
    }
}
