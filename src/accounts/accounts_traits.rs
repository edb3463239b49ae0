use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
pub trait AccountRepositoryTrait: Send + Sync {
    fn create(&self, new_account: NewAccount) -> super::Result<Account>;
    fn update(&self, account_update: AccountUpdate) -> super::Result<Account>;
    fn delete(&self, account_id: &str) -> super::Result<usize>;
    fn get_by_id(&self, account_id: &str) -> super::Result<Account>;
    fn get_by_id_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
    ) -> super::Result<Account>;
    fn list(&self, is_active_filter: Option<bool>) -> super::Result<Vec<Account>>;
    fn adjust_balance_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        amount: f64,
    ) -> super::Result<f64>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;
    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;
    async fn delete_account(&self, account_id: &str) -> Result<()>;
    fn get_account(&self, account_id: &str) -> Result<Account>;
    fn get_balance(&self, account_id: &str) -> Result<f64>;
    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
    fn get_active_accounts(&self) -> Result<Vec<Account>>;
}
