//! Upstream sync with bounded retry
//!
//! Every mutating gateway call goes through this service. Transient
//! provider errors (rate limits, lock timeouts, idempotency collisions,
//! connection and generic API errors) are retried with exponential
//! backoff plus jitter up to the configured cap, after which
//! `upstream-unavailable` surfaces to the caller. Terminal errors are
//! re-attributed to the caller-facing vocabulary immediately.
//!
//! On success the returned object unconditionally overwrites its cache
//! entry.

use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use core_kernel::{AccountId, GatewayError, OnboardingError, PersonId, StripeConfig};
use domain_account::{ConnectedAccount, Person, StripeGateway};
use serde_json::Value;

use crate::cache::AccountCache;
use crate::reattribution::reattribute;

const BACKOFF_BASE_MS: u64 = 100;
const BACKOFF_CAP_MS: u64 = 5_000;
const JITTER_MS: u64 = 100;

fn backoff_delay(attempt: u32) -> Duration {
    let exp = BACKOFF_BASE_MS.saturating_mul(1u64 << attempt.min(10));
    let jitter = rand::thread_rng().gen_range(0..=JITTER_MS);
    Duration::from_millis(exp.min(BACKOFF_CAP_MS) + jitter)
}

/// Retrying gateway wrapper that keeps the cache coherent
pub struct SyncService<G> {
    gateway: Arc<G>,
    cache: Arc<AccountCache>,
    maximum_retries: u32,
}

impl<G: StripeGateway> SyncService<G> {
    pub fn new(gateway: Arc<G>, cache: Arc<AccountCache>, config: &StripeConfig) -> Self {
        Self {
            gateway,
            cache,
            maximum_retries: config.maximum_retries.max(1),
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn cache(&self) -> &Arc<AccountCache> {
        &self.cache
    }

    async fn retry<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, OnboardingError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    attempt += 1;
                    if attempt >= self.maximum_retries {
                        warn!(operation, attempts = attempt, "retry budget exhausted");
                        return Err(OnboardingError::UpstreamUnavailable);
                    }
                    let delay = backoff_delay(attempt);
                    debug!(operation, attempt, delay_ms = delay.as_millis() as u64, error = %err, "transient error, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    debug!(operation, error = %err, "terminal gateway error");
                    return Err(reattribute(err));
                }
            }
        }
    }

    /// Reads an account through the cache, fetching on a miss
    pub async fn load_account(&self, id: &AccountId) -> Result<ConnectedAccount, OnboardingError> {
        if let Some(account) = self.cache.account(id).await {
            return Ok(account);
        }
        let account = self
            .retry("retrieve_account", || self.gateway.retrieve_account(id))
            .await?;
        self.cache.put_account(account.clone()).await;
        Ok(account)
    }

    /// Forces a fresh fetch, bypassing (but updating) the cache
    pub async fn refresh_account(
        &self,
        id: &AccountId,
    ) -> Result<ConnectedAccount, OnboardingError> {
        let account = self
            .retry("retrieve_account", || self.gateway.retrieve_account(id))
            .await?;
        self.cache.put_account(account.clone()).await;
        Ok(account)
    }

    /// Applies a nested payload to the account and refreshes the cache
    pub async fn sync_account(
        &self,
        id: &AccountId,
        payload: Value,
    ) -> Result<ConnectedAccount, OnboardingError> {
        let account = self
            .retry("update_account", || {
                self.gateway.update_account(id, payload.clone())
            })
            .await?;
        self.cache.put_account(account.clone()).await;
        Ok(account)
    }

    /// Creates a person on the account
    pub async fn sync_new_person(
        &self,
        account: &AccountId,
        payload: Value,
    ) -> Result<Person, OnboardingError> {
        let person = self
            .retry("create_person", || {
                self.gateway.create_person(account, payload.clone())
            })
            .await?;
        self.cache.put_person(person.clone()).await;
        Ok(person)
    }

    /// Updates an existing person; shared by every person role
    pub async fn sync_person(
        &self,
        account: &AccountId,
        person: &PersonId,
        payload: Value,
    ) -> Result<Person, OnboardingError> {
        let person = self
            .retry("update_person", || {
                self.gateway.update_person(account, person, payload.clone())
            })
            .await?;
        self.cache.put_person(person.clone()).await;
        Ok(person)
    }

    pub async fn list_persons(
        &self,
        account: &AccountId,
    ) -> Result<Vec<Person>, OnboardingError> {
        self.retry("list_persons", || self.gateway.list_persons(account))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain_account::account::Requirements;
    use domain_account::{BusinessType, MockStripeGateway};
    use serde_json::json;
    use std::collections::HashMap;

    fn account(id: &str) -> ConnectedAccount {
        ConnectedAccount {
            id: AccountId::parse(id).unwrap(),
            business_type: BusinessType::Individual,
            country: "DE".into(),
            requirements: Requirements::default(),
            metadata: HashMap::new(),
            individual: None,
            company: None,
            external_accounts: Vec::new(),
            payouts_enabled: false,
            created: Utc::now(),
        }
    }

    fn service(gateway: MockStripeGateway, retries: u32) -> SyncService<MockStripeGateway> {
        let mut config = StripeConfig::for_tests();
        config.maximum_retries = retries;
        SyncService::new(Arc::new(gateway), Arc::new(AccountCache::new()), &config)
    }

    #[tokio::test]
    async fn transient_errors_are_retried_to_success() {
        let gateway = MockStripeGateway::new();
        gateway.insert_account(account("acct_r1")).await;
        gateway.push_failure(GatewayError::RateLimited).await;
        gateway.push_failure(GatewayError::LockTimeout).await;

        let sync = service(gateway, 5);
        let id = AccountId::parse("acct_r1").unwrap();
        let updated = sync.sync_account(&id, json!({})).await.unwrap();
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_upstream_unavailable() {
        let gateway = MockStripeGateway::new();
        gateway.insert_account(account("acct_r2")).await;
        gateway.push_failure(GatewayError::RateLimited).await;
        gateway.push_failure(GatewayError::RateLimited).await;
        gateway.push_failure(GatewayError::RateLimited).await;

        let sync = service(gateway, 2);
        let id = AccountId::parse("acct_r2").unwrap();
        let err = sync.sync_account(&id, json!({})).await.unwrap_err();
        assert_eq!(err, OnboardingError::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let gateway = MockStripeGateway::new();
        gateway.insert_account(account("acct_r3")).await;
        gateway
            .push_failure(GatewayError::invalid_request(
                Some("company[address][city]".into()),
                "required",
            ))
            .await;

        let sync = service(gateway, 5);
        let id = AccountId::parse("acct_r3").unwrap();
        let err = sync.sync_account(&id, json!({})).await.unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("address_city"));
    }

    #[tokio::test]
    async fn successful_sync_overwrites_the_cache() {
        let gateway = MockStripeGateway::new();
        gateway.insert_account(account("acct_r4")).await;

        let sync = service(gateway, 3);
        let id = AccountId::parse("acct_r4").unwrap();

        // Prime the cache, then sync a metadata change
        sync.load_account(&id).await.unwrap();
        sync.sync_account(&id, json!({"metadata": {"accountid": "dash-1"}}))
            .await
            .unwrap();

        let cached = sync.cache().account(&id).await.unwrap();
        assert_eq!(cached.metadata.get("accountid").map(String::as_str), Some("dash-1"));
    }

    #[tokio::test]
    async fn load_account_reads_through_the_cache() {
        let gateway = MockStripeGateway::new();
        gateway.insert_account(account("acct_r5")).await;

        let sync = service(gateway, 3);
        let id = AccountId::parse("acct_r5").unwrap();
        sync.load_account(&id).await.unwrap();

        // A queued failure is not observed because the cache serves the read
        sync.gateway().push_failure(GatewayError::RateLimited).await;
        assert!(sync.load_account(&id).await.is_ok());
    }

    #[test]
    fn backoff_grows_and_stays_capped() {
        let early = backoff_delay(1);
        assert!(early >= Duration::from_millis(200));
        let late = backoff_delay(30);
        assert!(late <= Duration::from_millis(BACKOFF_CAP_MS + JITTER_MS));
    }
}
