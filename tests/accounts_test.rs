mod common;

use papertrade_core::accounts::{
    AccountError, AccountService, AccountServiceTrait, AccountUpdate, NewAccount,
};
use papertrade_core::errors::Error;

#[tokio::test]
async fn account_is_created_with_its_opening_balance() {
    let db = common::setup_db();
    let account = common::seed_account(&db.pool, "Trader", 1000.0).await;

    let accounts = AccountService::new(db.pool.clone());
    assert_eq!(accounts.get_balance(&account.id).unwrap(), 1000.0);

    let fetched = accounts.get_account(&account.id).unwrap();
    assert_eq!(fetched.name, "Trader");
    assert!(fetched.is_active);
}

#[tokio::test]
async fn negative_opening_balance_is_rejected() {
    let db = common::setup_db();
    let accounts = AccountService::new(db.pool.clone());

    let result = accounts
        .create_account(NewAccount {
            id: None,
            name: "Broke".to_string(),
            currency: "USD".to_string(),
            balance: -5.0,
            is_active: true,
        })
        .await;

    assert!(matches!(
        result,
        Err(Error::Account(AccountError::InvalidData(_)))
    ));
}

#[tokio::test]
async fn update_changes_name_but_not_balance() {
    let db = common::setup_db();
    let account = common::seed_account(&db.pool, "Trader", 1000.0).await;

    let accounts = AccountService::new(db.pool.clone());
    let updated = accounts
        .update_account(AccountUpdate {
            id: Some(account.id.clone()),
            name: "Renamed".to_string(),
            is_active: false,
        })
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert!(!updated.is_active);
    assert_eq!(updated.balance, 1000.0);
}

#[tokio::test]
async fn listing_filters_by_active_status() {
    let db = common::setup_db();
    let active = common::seed_account(&db.pool, "Active", 0.0).await;
    let dormant = common::seed_account(&db.pool, "Dormant", 0.0).await;

    let accounts = AccountService::new(db.pool.clone());
    accounts
        .update_account(AccountUpdate {
            id: Some(dormant.id.clone()),
            name: dormant.name.clone(),
            is_active: false,
        })
        .await
        .unwrap();

    let listed = accounts.get_active_accounts().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, active.id);

    assert_eq!(accounts.list_accounts(None).unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_a_missing_account_fails_not_found() {
    let db = common::setup_db();
    let accounts = AccountService::new(db.pool.clone());

    let result = accounts.delete_account("missing").await;
    assert!(matches!(
        result,
        Err(Error::Account(AccountError::NotFound(_)))
    ));
}
