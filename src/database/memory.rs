use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::models::Account;
use crate::database::store::{StoreError, Storage};

/// In-process account store with the same contract as the Postgres one.
/// Used by the test suites and by `--in-memory` demo runs.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Storage for InMemoryStore {
    async fn create_account(&self, account: &Account) -> Result<Account, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.accounts.values().any(|a| a.number == account.number) {
            return Err(StoreError::duplicate_number(account.number));
        }

        inner.next_id += 1;
        let stored = Account {
            id: inner.next_id,
            ..account.clone()
        };
        inner.accounts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_account(&self, id: i64) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::account_not_found(id))
    }

    async fn update_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .accounts
            .get_mut(&account.id)
            .ok_or_else(|| StoreError::account_not_found(account.id))?;

        stored.first_name = account.first_name.clone();
        stored.last_name = account.last_name.clone();
        stored.balance = account.balance;
        stored.encrypted_password = account.encrypted_password.clone();
        Ok(())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.inner.read().await.accounts.values().cloned().collect())
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, StoreError> {
        self.inner
            .read()
            .await
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::account_not_found(id))
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, StoreError> {
        self.inner
            .read()
            .await
            .accounts
            .values()
            .find(|a| a.number == number)
            .cloned()
            .ok_or_else(|| StoreError::number_not_found(number))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(first: &str) -> Account {
        Account::new(first, "Doe", "secret").unwrap()
    }

    #[tokio::test]
    async fn create_assigns_ids_and_returns_full_record() {
        let store = InMemoryStore::new();

        let first = store.create_account(&account("John")).await.unwrap();
        let second = store.create_account(&account("Jane")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.first_name, "John");
        assert_eq!(store.len().await, 2);
        assert_eq!(store.get_account_by_id(first.id).await.unwrap(), first);
    }

    #[tokio::test]
    async fn duplicate_number_is_a_conflict() {
        let store = InMemoryStore::new();
        let original = account("John");
        store.create_account(&original).await.unwrap();

        let clash = Account {
            first_name: "Jane".into(),
            ..original.clone()
        };
        let err = store.create_account(&clash).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn lookups_report_not_found() {
        let store = InMemoryStore::new();

        assert!(matches!(
            store.get_account_by_id(999).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_account_by_number(123_456).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn get_by_number_finds_the_account() {
        let store = InMemoryStore::new();
        let created = store.create_account(&account("John")).await.unwrap();

        let found = store.get_account_by_number(created.number).await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn delete_removes_and_missing_id_is_not_found() {
        let store = InMemoryStore::new();
        let created = store.create_account(&account("John")).await.unwrap();

        store.delete_account(created.id).await.unwrap();
        assert!(store.is_empty().await);

        let err = store.delete_account(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_changes_fields_but_keeps_number() {
        let store = InMemoryStore::new();
        let created = store.create_account(&account("John")).await.unwrap();

        let edited = Account {
            first_name: "Johnny".into(),
            balance: 500,
            number: created.number + 1,
            ..created.clone()
        };
        store.update_account(&edited).await.unwrap();

        let reloaded = store.get_account_by_id(created.id).await.unwrap();
        assert_eq!(reloaded.first_name, "Johnny");
        assert_eq!(reloaded.balance, 500);
        assert_eq!(reloaded.number, created.number);
    }

    #[tokio::test]
    async fn update_of_missing_account_is_not_found() {
        let store = InMemoryStore::new();
        let ghost = Account {
            id: 42,
            ..account("Ghost")
        };

        assert!(matches!(
            store.update_account(&ghost).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_returns_every_account() {
        let store = InMemoryStore::new();
        assert!(store.get_accounts().await.unwrap().is_empty());

        for name in ["A", "B", "C"] {
            store.create_account(&account(name)).await.unwrap();
        }

        let mut names: Vec<_> = store
            .get_accounts()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.first_name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
