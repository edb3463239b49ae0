/// Trade sides
pub const TRADE_SIDE_BUY: &str = "BUY";
pub const TRADE_SIDE_SELL: &str = "SELL";

/// Trade statuses
pub const TRADE_STATUS_PENDING: &str = "PENDING";
pub const TRADE_STATUS_COMPLETED: &str = "COMPLETED";
pub const TRADE_STATUS_CANCELLED: &str = "CANCELLED";
