use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::Account;

/// Errors from account storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn account_not_found(id: i64) -> Self {
        StoreError::NotFound(format!("account {} not found", id))
    }

    pub fn number_not_found(number: i64) -> Self {
        StoreError::NotFound(format!("account with number {} not found", number))
    }

    pub fn duplicate_number(number: i64) -> Self {
        StoreError::Conflict(format!("account number {} already exists", number))
    }
}

/// Account persistence capability.
///
/// Implementations: [`PostgresStore`](crate::database::PostgresStore) for
/// production and [`InMemoryStore`](crate::database::InMemoryStore) for tests
/// and demos. Both must agree on the NotFound/Conflict behavior below.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a new account and return it with generated fields filled in.
    /// A duplicate bank number is a `Conflict`.
    async fn create_account(&self, account: &Account) -> Result<Account, StoreError>;

    /// Remove an account. Deleting a missing id is `NotFound`.
    async fn delete_account(&self, id: i64) -> Result<(), StoreError>;

    /// Update names, balance and password hash. The bank number is never touched.
    async fn update_account(&self, account: &Account) -> Result<(), StoreError>;

    /// All accounts, in no particular order.
    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError>;

    async fn get_account_by_id(&self, id: i64) -> Result<Account, StoreError>;

    async fn get_account_by_number(&self, number: i64) -> Result<Account, StoreError>;

    /// Cheap liveness check used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;
}
