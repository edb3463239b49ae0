use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::accounts_errors::{AccountError, Result};

/// Domain model representing a trading account and its cash balance
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub balance: f64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub currency: String,
    /// Opening cash balance
    pub balance: f64,
    pub is_active: bool,
}

impl NewAccount {
    /// Validates the new account data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Currency cannot be empty".to_string(),
            ));
        }
        if !self.balance.is_finite() || self.balance < 0.0 {
            return Err(AccountError::InvalidData(
                "Opening balance must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing account.
/// The cash balance is deliberately absent: it only moves through settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: Option<String>,
    pub name: String,
    pub is_active: bool,
}

impl AccountUpdate {
    /// Validates the account update data
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(AccountError::InvalidData(
                "Account ID is required for updates".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(AccountError::InvalidData(
                "Account name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Database model for accounts
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
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub balance: f64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            currency: db.currency,
            balance: db.balance,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            currency: domain.currency,
            balance: domain.balance,
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account() -> NewAccount {
        NewAccount {
            id: None,
            name: "Trading".to_string(),
            currency: "USD".to_string(),
            balance: 1000.0,
            is_active: true,
        }
    }

    #[test]
    fn validate_accepts_well_formed_account() {
        assert!(new_account().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut account = new_account();
        account.name = "   ".to_string();
        assert!(matches!(
            account.validate(),
            Err(AccountError::InvalidData(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_opening_balance() {
        let mut account = new_account();
        account.balance = -1.0;
        assert!(matches!(
            account.validate(),
            Err(AccountError::InvalidData(_))
        ));
    }
}
