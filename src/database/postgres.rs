use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::Account;
use crate::database::store::{StoreError, Storage};

const CREATE_ACCOUNT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        id BIGSERIAL PRIMARY KEY,
        first_name VARCHAR(255) NOT NULL,
        last_name VARCHAR(255) NOT NULL,
        number BIGINT NOT NULL UNIQUE,
        encrypted_password TEXT NOT NULL,
        balance BIGINT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL
    )
"#;

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, number, encrypted_password, balance, created_at";

/// Postgres-backed account store
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Connected to account database");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the account table if it does not exist yet
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_ACCOUNT_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed account database pool");
    }
}

fn map_insert_error(err: sqlx::Error, number: i64) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::duplicate_number(number)
        }
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl Storage for PostgresStore {
    async fn create_account(&self, account: &Account) -> Result<Account, StoreError> {
        let query = format!(
            "INSERT INTO account (first_name, last_name, number, encrypted_password, balance, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.number)
            .bind(&account.encrypted_password)
            .bind(account.balance)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, account.number))
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::account_not_found(id));
        }
        Ok(())
    }

    async fn update_account(&self, account: &Account) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE account
             SET first_name = $2, last_name = $3, balance = $4, encrypted_password = $5
             WHERE id = $1",
        )
        .bind(account.id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.balance)
        .bind(&account.encrypted_password)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::account_not_found(account.id));
        }
        Ok(())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let query = format!("SELECT {} FROM account", ACCOUNT_COLUMNS);
        let accounts = sqlx::query_as::<_, Account>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, StoreError> {
        let query = format!("SELECT {} FROM account WHERE id = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::account_not_found(id))
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, StoreError> {
        let query = format!("SELECT {} FROM account WHERE number = $1", ACCOUNT_COLUMNS);
        sqlx::query_as::<_, Account>(&query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::number_not_found(number))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
