//! Gateway port for the Stripe API
//!
//! The domain talks to Stripe exclusively through this trait. The live
//! adapter lives in `infra_stripe`; the `mock` module here provides an
//! in-memory implementation for tests, including transient-failure
//! injection for exercising the retry layer.

use async_trait::async_trait;
use serde_json::Value;

use core_kernel::{AccountId, DomainPort, FileId, GatewayError, PersonId};

use crate::account::ConnectedAccount;
use crate::person::Person;

/// Upload purpose tag attached to every identity document
pub const IDENTITY_DOCUMENT_PURPOSE: &str = "identity_document";

/// Port over the Stripe account/person/file endpoints
#[async_trait]
pub trait StripeGateway: DomainPort {
    async fn retrieve_account(&self, id: &AccountId) -> Result<ConnectedAccount, GatewayError>;

    /// Applies a nested payload to the account (company, individual,
    /// business_profile, metadata, ...)
    async fn update_account(
        &self,
        id: &AccountId,
        payload: Value,
    ) -> Result<ConnectedAccount, GatewayError>;

    async fn create_person(
        &self,
        account: &AccountId,
        payload: Value,
    ) -> Result<Person, GatewayError>;

    async fn update_person(
        &self,
        account: &AccountId,
        person: &PersonId,
        payload: Value,
    ) -> Result<Person, GatewayError>;

    async fn list_persons(&self, account: &AccountId) -> Result<Vec<Person>, GatewayError>;

    /// Uploads a document and returns its opaque file token
    async fn upload_file(
        &self,
        filename: &str,
        content: Vec<u8>,
        purpose: &str,
    ) -> Result<FileId, GatewayError>;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::sync::{Mutex, RwLock};

    use crate::account::Requirements;
    use crate::person::Relationship;
    use chrono::Utc;

    /// In-memory gateway for tests
    ///
    /// Queued failures are returned, in order, by the next gateway calls
    /// before normal behavior resumes - enough to exercise the retry and
    /// re-attribution paths without a network.
    #[derive(Debug, Default)]
    pub struct MockStripeGateway {
        accounts: RwLock<HashMap<String, ConnectedAccount>>,
        persons: RwLock<HashMap<String, Vec<Person>>>,
        failures: Mutex<VecDeque<GatewayError>>,
        sequence: AtomicU64,
        payloads: Mutex<Vec<(String, Value)>>,
    }

    impl MockStripeGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn with_account(account: ConnectedAccount) -> Self {
            let gateway = Self::new();
            gateway.insert_account(account).await;
            gateway
        }

        pub async fn insert_account(&self, account: ConnectedAccount) {
            self.accounts
                .write()
                .await
                .insert(account.id.as_str().to_string(), account);
        }

        /// Queues an error to be returned by the next gateway call
        pub async fn push_failure(&self, error: GatewayError) {
            self.failures.lock().await.push_back(error);
        }

        /// Payloads recorded by update/create calls, oldest first
        pub async fn recorded_payloads(&self) -> Vec<(String, Value)> {
            self.payloads.lock().await.clone()
        }

        async fn take_failure(&self) -> Option<GatewayError> {
            self.failures.lock().await.pop_front()
        }

        fn next_id(&self, prefix: &str) -> String {
            let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
            format!("{prefix}{n}")
        }

        fn apply_metadata(account: &mut ConnectedAccount, payload: &Value) {
            let Some(metadata) = payload.get("metadata").and_then(Value::as_object) else {
                return;
            };
            for (key, value) in metadata {
                let value = value.as_str().unwrap_or_default();
                if value.is_empty() {
                    // Stripe clears a metadata key on empty string
                    account.metadata.remove(key);
                } else {
                    account.metadata.insert(key.clone(), value.to_string());
                }
            }
        }

        fn person_from_payload(
            &self,
            account: &AccountId,
            id: PersonId,
            payload: &Value,
        ) -> Person {
            let text = |key: &str| {
                payload
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            let relationship = payload
                .get("relationship")
                .cloned()
                .and_then(|v| serde_json::from_value::<Relationship>(v).ok())
                .unwrap_or_default();
            Person {
                id,
                account_id: account.clone(),
                first_name: text("first_name"),
                last_name: text("last_name"),
                relationship,
                requirements: Requirements::default(),
                created: Utc::now(),
            }
        }
    }

    impl DomainPort for MockStripeGateway {}

    #[async_trait]
    impl StripeGateway for MockStripeGateway {
        async fn retrieve_account(
            &self,
            id: &AccountId,
        ) -> Result<ConnectedAccount, GatewayError> {
            if let Some(err) = self.take_failure().await {
                return Err(err);
            }
            self.accounts
                .read()
                .await
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| GatewayError::not_found("account"))
        }

        async fn update_account(
            &self,
            id: &AccountId,
            payload: Value,
        ) -> Result<ConnectedAccount, GatewayError> {
            if let Some(err) = self.take_failure().await {
                return Err(err);
            }
            let mut accounts = self.accounts.write().await;
            let account = accounts
                .get_mut(id.as_str())
                .ok_or_else(|| GatewayError::not_found("account"))?;
            Self::apply_metadata(account, &payload);
            if let Some(individual) = payload.get("individual") {
                account.individual = Some(individual.clone());
            }
            if let Some(company) = payload.get("company") {
                account.company = Some(company.clone());
            }
            self.payloads
                .lock()
                .await
                .push((id.as_str().to_string(), payload));
            Ok(account.clone())
        }

        async fn create_person(
            &self,
            account: &AccountId,
            payload: Value,
        ) -> Result<Person, GatewayError> {
            if let Some(err) = self.take_failure().await {
                return Err(err);
            }
            if !self.accounts.read().await.contains_key(account.as_str()) {
                return Err(GatewayError::not_found("account"));
            }
            let id = PersonId::parse(self.next_id("person_"))
                .map_err(|_| GatewayError::api("mock id"))?;
            let person = self.person_from_payload(account, id, &payload);
            self.persons
                .write()
                .await
                .entry(account.as_str().to_string())
                .or_default()
                .push(person.clone());
            self.payloads
                .lock()
                .await
                .push((account.as_str().to_string(), payload));
            Ok(person)
        }

        async fn update_person(
            &self,
            account: &AccountId,
            person: &PersonId,
            payload: Value,
        ) -> Result<Person, GatewayError> {
            if let Some(err) = self.take_failure().await {
                return Err(err);
            }
            let mut persons = self.persons.write().await;
            let list = persons
                .get_mut(account.as_str())
                .ok_or_else(|| GatewayError::not_found("person"))?;
            let existing = list
                .iter_mut()
                .find(|p| &p.id == person)
                .ok_or_else(|| GatewayError::not_found("person"))?;
            if let Some(first) = payload.get("first_name").and_then(Value::as_str) {
                existing.first_name = Some(first.to_string());
            }
            if let Some(last) = payload.get("last_name").and_then(Value::as_str) {
                existing.last_name = Some(last.to_string());
            }
            self.payloads
                .lock()
                .await
                .push((person.as_str().to_string(), payload));
            Ok(existing.clone())
        }

        async fn list_persons(&self, account: &AccountId) -> Result<Vec<Person>, GatewayError> {
            if let Some(err) = self.take_failure().await {
                return Err(err);
            }
            Ok(self
                .persons
                .read()
                .await
                .get(account.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn upload_file(
            &self,
            _filename: &str,
            content: Vec<u8>,
            _purpose: &str,
        ) -> Result<FileId, GatewayError> {
            if let Some(err) = self.take_failure().await {
                return Err(err);
            }
            if content.is_empty() {
                return Err(GatewayError::invalid_request(None, "empty file"));
            }
            FileId::parse(self.next_id("file_")).map_err(|_| GatewayError::api("mock id"))
        }
    }
}
