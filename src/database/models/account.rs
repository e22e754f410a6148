use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::password::{self, PasswordError};

/// Range bank numbers are drawn from at account creation.
const BANK_NUMBER_RANGE: std::ops::Range<i64> = 100_000..1_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Bank number. Assigned once at creation and used as the token subject.
    #[serde(rename = "bankNumber")]
    pub number: i64,
    #[serde(skip)]
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build an unsaved account: hashes the password and draws a bank number.
    /// `id` stays 0 until the store assigns one.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: &str,
    ) -> Result<Self, PasswordError> {
        let encrypted_password = password::hash_password(password)?;

        Ok(Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            number: rand::thread_rng().gen_range(BANK_NUMBER_RANGE),
            encrypted_password,
            balance: 0,
            created_at: Utc::now(),
        })
    }

    pub fn valid_password(&self, password: &str) -> bool {
        password::verify_password(password, &self.encrypted_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_hashes_password_and_draws_number() {
        let account = Account::new("John", "Doe", "secret").unwrap();

        assert_eq!(account.id, 0);
        assert_eq!(account.balance, 0);
        assert!(BANK_NUMBER_RANGE.contains(&account.number));
        assert_ne!(account.encrypted_password, "secret");
        assert!(account.valid_password("secret"));
        assert!(!account.valid_password("Secret"));
    }

    #[test]
    fn json_uses_camel_case_and_omits_password() {
        let account = Account::new("John", "Doe", "secret").unwrap();
        let value = serde_json::to_value(&account).unwrap();

        assert_eq!(value["firstName"], "John");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value["bankNumber"], account.number);
        assert!(value.get("number").is_none());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("encryptedPassword").is_none());
        assert!(value.get("encrypted_password").is_none());
        assert!(value.get("password").is_none());
    }
}
