use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_repository::AccountRepository;
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::db::DbPool;
use crate::errors::Result;

/// Service for managing trading accounts
pub struct AccountService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            account_repository: Arc::new(AccountRepository::new(pool)),
        }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    /// Creates a new account with its opening cash balance
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        debug!(
            "Creating account '{}' with opening balance {}",
            new_account.name, new_account.balance
        );
        Ok(self.account_repository.create(new_account)?)
    }

    /// Updates an existing account
    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        Ok(self.account_repository.update(account_update)?)
    }

    /// Deletes an account by its ID
    async fn delete_account(&self, account_id: &str) -> Result<()> {
        self.account_repository.delete(account_id)?;
        Ok(())
    }

    /// Retrieves an account by its ID
    fn get_account(&self, account_id: &str) -> Result<Account> {
        Ok(self.account_repository.get_by_id(account_id)?)
    }

    /// Returns an account's current cash balance
    fn get_balance(&self, account_id: &str) -> Result<f64> {
        Ok(self.account_repository.get_by_id(account_id)?.balance)
    }

    /// Lists accounts with optional filtering by active status
    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        Ok(self.account_repository.list(is_active_filter)?)
    }

    /// Lists only active accounts
    fn get_active_accounts(&self) -> Result<Vec<Account>> {
        self.list_accounts(Some(true))
    }
}
