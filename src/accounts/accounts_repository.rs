use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::accounts::{AccountError, Result};
use crate::db::{get_connection, DbPool};
use crate::schema::accounts;

use super::accounts_model::{Account, AccountDB, AccountUpdate, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn connection(&self) -> Result<crate::db::DbConnection> {
        get_connection(&self.pool).map_err(|e| AccountError::DatabaseError(e.to_string()))
    }
}

impl AccountRepositoryTrait for AccountRepository {
    /// Creates a new account in the database
    fn create(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        let mut account_db: AccountDB = new_account.into();
        if account_db.id.is_empty() {
            account_db.id = uuid::Uuid::new_v4().to_string();
        }

        let mut conn = self.connection()?;

        diesel::insert_into(accounts::table)
            .values(&account_db)
            .execute(&mut conn)?;

        Ok(account_db.into())
    }

    /// Updates an existing account (name and active flag only)
    fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;
        let account_id = account_update.id.clone().unwrap_or_default();

        let mut conn = self.connection()?;

        let affected = diesel::update(accounts::table.find(&account_id))
            .set((
                accounts::name.eq(&account_update.name),
                accounts::is_active.eq(account_update.is_active),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(AccountError::NotFound(format!(
                "Account with id {} not found",
                account_id
            )));
        }

        self.get_by_id_in_transaction(&mut conn, &account_id)
    }

    /// Retrieves an account by its ID
    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = self.connection()?;
        self.get_by_id_in_transaction(&mut conn, account_id)
    }

    /// Retrieves an account using an existing connection
    fn get_by_id_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
    ) -> Result<Account> {
        let account = accounts::table
            .find(account_id)
            .first::<AccountDB>(conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    AccountError::NotFound(format!("Account with id {} not found", account_id))
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;

        Ok(account.into())
    }

    /// Lists accounts in the database, optionally filtering by active status
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>> {
        let mut conn = self.connection()?;

        let mut query = accounts::table.into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(active));
        }

        query
            .order((accounts::is_active.desc(), accounts::name.asc()))
            .load::<AccountDB>(&mut conn)
            .map_err(|e| AccountError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Account::from).collect())
    }

    /// Deletes an account by its ID and returns the number of deleted records
    fn delete(&self, account_id: &str) -> Result<usize> {
        let mut conn = self.connection()?;

        let affected = diesel::delete(accounts::table.find(account_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(AccountError::NotFound(format!(
                "Account with id {} not found",
                account_id
            )));
        }

        Ok(affected)
    }

    /// Applies a signed cash adjustment to an account inside an open
    /// transaction and returns the new balance. A debit that would take the
    /// balance below zero fails with InsufficientFunds and nothing is written.
    fn adjust_balance_in_transaction(
        &self,
        conn: &mut SqliteConnection,
        account_id: &str,
        amount: f64,
    ) -> Result<f64> {
        let account = self.get_by_id_in_transaction(conn, account_id)?;

        let new_balance = account.balance + amount;
        if new_balance < 0.0 {
            return Err(AccountError::InsufficientFunds(format!(
                "Balance {:.2} is less than required {:.2}",
                account.balance, -amount
            )));
        }

        diesel::update(accounts::table.find(account_id))
            .set((
                accounts::balance.eq(new_balance),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(conn)?;

        Ok(new_balance)
    }
}
