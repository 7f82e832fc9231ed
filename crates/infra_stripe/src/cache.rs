//! The in-process read-through cache
//!
//! Successful sync calls unconditionally overwrite the cached entry for
//! the returned object, so subsequent reads within the same process
//! observe the update without another round trip. There is no eviction
//! and no TTL; an entry is only ever replaced by a newer sync or left
//! stale until the process exits.

use std::collections::HashMap;
use tokio::sync::RwLock;

use core_kernel::{AccountId, PersonId};
use domain_account::{ConnectedAccount, Person};

/// Cache of upstream account and person mirrors, keyed by object id
#[derive(Debug, Default)]
pub struct AccountCache {
    accounts: RwLock<HashMap<String, ConnectedAccount>>,
    persons: RwLock<HashMap<String, Person>>,
}

impl AccountCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account(&self, id: &AccountId) -> Option<ConnectedAccount> {
        self.accounts.read().await.get(id.as_str()).cloned()
    }

    pub async fn put_account(&self, account: ConnectedAccount) {
        self.accounts
            .write()
            .await
            .insert(account.id.as_str().to_string(), account);
    }

    pub async fn person(&self, id: &PersonId) -> Option<Person> {
        self.persons.read().await.get(id.as_str()).cloned()
    }

    pub async fn put_person(&self, person: Person) {
        self.persons
            .write()
            .await
            .insert(person.id.as_str().to_string(), person);
    }

    /// Number of cached accounts, for observability
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}
