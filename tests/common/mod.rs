use std::sync::Arc;

use tempfile::TempDir;

use papertrade_core::accounts::{Account, AccountService, AccountServiceTrait, NewAccount};
use papertrade_core::db::{self, DbPool};
use papertrade_core::stocks::{NewStock, Stock, StockService, StockServiceTrait};

/// A fully migrated throwaway database. The temp directory is dropped with
/// the struct, which removes the database files.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    TestDb { pool, _dir: dir }
}

pub async fn seed_account(pool: &Arc<DbPool>, name: &str, balance: f64) -> Account {
    let service = AccountService::new(pool.clone());
    service
        .create_account(NewAccount {
            id: None,
            name: name.to_string(),
            currency: "USD".to_string(),
            balance,
            is_active: true,
        })
        .await
        .expect("Failed to seed account")
}

pub async fn seed_stock(pool: &Arc<DbPool>, symbol: &str, sector: &str, price: f64) -> Stock {
    let service = StockService::new(pool.clone());
    service
        .create_stock(NewStock {
            id: None,
            symbol: symbol.to_string(),
            name: format!("{} Inc.", symbol),
            sector: sector.to_string(),
            current_price: price,
            opening_price: price,
            volume: 0,
            market_cap: 0.0,
            description: String::new(),
        })
        .await
        .expect("Failed to seed stock")
}
