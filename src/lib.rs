pub mod db;

pub mod accounts;
pub mod positions;
pub mod stocks;
pub mod trades;

pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
