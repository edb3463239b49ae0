mod common;

use papertrade_core::errors::Error;
use papertrade_core::stocks::{
    NewStock, StockError, StockQuery, StockService, StockServiceTrait,
};

#[tokio::test]
async fn stock_is_found_by_symbol_case_insensitively() {
    let db = common::setup_db();
    common::seed_stock(&db.pool, "ACME", "Industrials", 10.0).await;

    let stocks = StockService::new(db.pool.clone());
    let stock = stocks.get_stock_by_symbol("acme").unwrap();
    assert_eq!(stock.symbol, "ACME");
}

#[tokio::test]
async fn duplicate_symbols_are_rejected() {
    let db = common::setup_db();
    common::seed_stock(&db.pool, "ACME", "Industrials", 10.0).await;

    let stocks = StockService::new(db.pool.clone());
    let result = stocks
        .create_stock(NewStock {
            id: None,
            symbol: "ACME".to_string(),
            name: "Acme Again".to_string(),
            sector: "Industrials".to_string(),
            current_price: 5.0,
            opening_price: 5.0,
            volume: 0,
            market_cap: 0.0,
            description: String::new(),
        })
        .await;

    assert!(matches!(
        result,
        Err(Error::Stock(StockError::DatabaseError(_)))
    ));
}

#[tokio::test]
async fn update_price_widens_bounds_and_recomputes_change() {
    let db = common::setup_db();
    let stock = common::seed_stock(&db.pool, "ACME", "Industrials", 100.0).await;

    let stocks = StockService::new(db.pool.clone());

    let updated = stocks.update_price(&stock.id, 112.0).await.unwrap();
    assert_eq!(updated.current_price, 112.0);
    assert_eq!(updated.high, 112.0);
    assert_eq!(updated.low, 100.0);
    assert!(updated.last_updated >= stock.last_updated);

    let quote = stocks.get_quote(&stock.id).unwrap();
    assert_eq!(quote.change, 12.0);
    assert!((quote.change_percent - 12.0).abs() < 1e-9);

    let dipped = stocks.update_price(&stock.id, 95.0).await.unwrap();
    assert_eq!(dipped.low, 95.0);
    assert_eq!(dipped.high, 112.0);
    assert_eq!(dipped.change(), -5.0);

    assert_eq!(stocks.get_price(&stock.id).unwrap(), 95.0);
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let db = common::setup_db();
    let stock = common::seed_stock(&db.pool, "ACME", "Industrials", 100.0).await;

    let stocks = StockService::new(db.pool.clone());
    let result = stocks.update_price(&stock.id, -1.0).await;
    assert!(matches!(
        result,
        Err(Error::Stock(StockError::InvalidData(_)))
    ));

    // Price is untouched after the rejected update
    assert_eq!(stocks.get_price(&stock.id).unwrap(), 100.0);
}

#[tokio::test]
async fn get_price_for_missing_stock_fails_not_found() {
    let db = common::setup_db();
    let stocks = StockService::new(db.pool.clone());
    assert!(matches!(
        stocks.get_price("missing"),
        Err(Error::Stock(StockError::NotFound(_)))
    ));
}

#[tokio::test]
async fn listing_supports_search_sector_and_pagination() {
    let db = common::setup_db();
    common::seed_stock(&db.pool, "ACME", "Industrials", 10.0).await;
    common::seed_stock(&db.pool, "BOLT", "Technology", 20.0).await;
    common::seed_stock(&db.pool, "BYTE", "Technology", 30.0).await;
    common::seed_stock(&db.pool, "CORE", "Technology", 40.0).await;

    let stocks = StockService::new(db.pool.clone());

    let tech = stocks
        .list_stocks(StockQuery {
            sector: Some("Technology".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(tech.total, 3);

    let paged = stocks
        .list_stocks(StockQuery {
            sector: Some("Technology".to_string()),
            page: 2,
            limit: 2,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(paged.stocks.len(), 1);
    assert_eq!(paged.total_pages, 2);
    assert_eq!(paged.current_page, 2);

    let searched = stocks
        .list_stocks(StockQuery {
            search: Some("BO".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(searched.total, 1);
    assert_eq!(searched.stocks[0].symbol, "BOLT");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_price_updates_keep_both_bounds() {
    let db = common::setup_db();
    let stock = common::seed_stock(&db.pool, "ACME", "Industrials", 100.0).await;

    // Each update reads and writes in one transaction, so neither widening
    // can be lost regardless of which commits first.
    let up = {
        let pool = db.pool.clone();
        let stock_id = stock.id.clone();
        tokio::spawn(async move { StockService::new(pool).update_price(&stock_id, 120.0).await })
    };
    let down = {
        let pool = db.pool.clone();
        let stock_id = stock.id.clone();
        tokio::spawn(async move { StockService::new(pool).update_price(&stock_id, 80.0).await })
    };

    up.await.unwrap().unwrap();
    down.await.unwrap().unwrap();

    let stocks = StockService::new(db.pool.clone());
    let refreshed = stocks.get_stock(&stock.id).unwrap();
    assert_eq!(refreshed.high, 120.0);
    assert_eq!(refreshed.low, 80.0);
}

#[tokio::test]
async fn sectors_are_listed_once_in_order() {
    let db = common::setup_db();
    common::seed_stock(&db.pool, "ACME", "Industrials", 10.0).await;
    common::seed_stock(&db.pool, "BOLT", "Technology", 20.0).await;
    common::seed_stock(&db.pool, "BYTE", "Technology", 30.0).await;

    let stocks = StockService::new(db.pool.clone());
    let sectors = stocks.list_sectors().unwrap();
    assert_eq!(sectors, vec!["Industrials", "Technology"]);
}
