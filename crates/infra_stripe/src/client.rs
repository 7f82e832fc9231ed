//! The live Stripe gateway adapter
//!
//! Implements the gateway port over HTTPS: bearer-authenticated,
//! form-encoded requests against a pinned API version, multipart uploads
//! for identity documents. Response and error payloads are translated
//! into the domain mirrors and the gateway error taxonomy.
//!
//! Nested payloads are encoded the way the Stripe API expects them,
//! with bracketed key paths: `{"company": {"address": {"city": "x"}}}`
//! posts as `company[address][city]=x`.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::multipart;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::instrument;

use core_kernel::{AccountId, DomainPort, FileId, GatewayError, PersonId, StripeConfig};
use domain_account::account::{ExternalAccount, Requirements};
use domain_account::person::Relationship;
use domain_account::{BusinessType, ConnectedAccount, Person, StripeGateway};

use crate::error::StripeErrorEnvelope;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";
pub const DEFAULT_FILES_BASE: &str = "https://files.stripe.com/v1";

/// Flattens a nested payload into Stripe's bracketed form keys
pub fn form_encode(payload: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    encode_value("", payload, &mut out);
    out
}

fn encode_value(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let child = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}[{key}]")
                };
                encode_value(&child, inner, out);
            }
        }
        Value::Array(items) => {
            for (index, inner) in items.iter().enumerate() {
                encode_value(&format!("{prefix}[{index}]"), inner, out);
            }
        }
        Value::Null => {}
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Bool(b) => out.push((prefix.to_string(), b.to_string())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
    }
}

#[derive(Debug, Deserialize)]
struct RequirementsResponse {
    #[serde(default)]
    currently_due: Vec<String>,
    #[serde(default)]
    eventually_due: Vec<String>,
    #[serde(default)]
    past_due: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExternalAccountResponse {
    id: String,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ExternalAccountList {
    #[serde(default)]
    data: Vec<ExternalAccountResponse>,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    id: String,
    #[serde(default)]
    business_type: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    requirements: Option<RequirementsResponse>,
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    individual: Option<Value>,
    #[serde(default)]
    company: Option<Value>,
    #[serde(default)]
    external_accounts: Option<ExternalAccountList>,
    #[serde(default)]
    payouts_enabled: bool,
    #[serde(default)]
    created: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PersonResponse {
    id: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    relationship: Option<Value>,
    #[serde(default)]
    requirements: Option<RequirementsResponse>,
    #[serde(default)]
    created: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PersonList {
    #[serde(default)]
    data: Vec<PersonResponse>,
}

#[derive(Debug, Deserialize)]
struct FileResponse {
    id: String,
}

fn timestamp(created: Option<i64>) -> DateTime<Utc> {
    created
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Utc::now)
}

fn requirements(response: Option<RequirementsResponse>) -> Requirements {
    response
        .map(|r| Requirements {
            currently_due: r.currently_due,
            eventually_due: r.eventually_due,
            past_due: r.past_due,
        })
        .unwrap_or_default()
}

impl AccountResponse {
    fn into_account(self) -> Result<ConnectedAccount, GatewayError> {
        let id = AccountId::parse(&self.id)
            .map_err(|_| GatewayError::api(format!("unexpected account id {}", self.id)))?;
        let business_type = match self.business_type.as_deref() {
            Some("company") => BusinessType::Company,
            _ => BusinessType::Individual,
        };
        Ok(ConnectedAccount {
            id,
            business_type,
            country: self.country.unwrap_or_default(),
            requirements: requirements(self.requirements),
            metadata: self.metadata,
            individual: self.individual,
            company: self.company,
            external_accounts: self
                .external_accounts
                .map(|list| {
                    list.data
                        .into_iter()
                        .map(|e| ExternalAccount {
                            id: e.id,
                            currency: e.currency,
                            country: e.country,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            payouts_enabled: self.payouts_enabled,
            created: timestamp(self.created),
        })
    }
}

impl PersonResponse {
    fn into_person(self, account: &AccountId) -> Result<Person, GatewayError> {
        let id = PersonId::parse(&self.id)
            .map_err(|_| GatewayError::api(format!("unexpected person id {}", self.id)))?;
        let relationship = self
            .relationship
            .and_then(|v| serde_json::from_value::<Relationship>(v).ok())
            .unwrap_or_default();
        Ok(Person {
            id,
            account_id: account.clone(),
            first_name: self.first_name,
            last_name: self.last_name,
            relationship,
            requirements: requirements(self.requirements),
            created: timestamp(self.created),
        })
    }
}

/// reqwest-backed implementation of the gateway port
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    config: StripeConfig,
    api_base: String,
    files_base: String,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self::with_base_urls(config, DEFAULT_API_BASE, DEFAULT_FILES_BASE)
    }

    /// Overrides the endpoint bases, for stub servers in tests
    pub fn with_base_urls(
        config: StripeConfig,
        api_base: impl Into<String>,
        files_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_base: api_base.into(),
            files_base: files_base.into(),
        }
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.config.secret_key)
            .header("Stripe-Version", &self.config.api_version)
    }

    async fn read<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::connection(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::connection(e.to_string()))?;
        if status.is_success() {
            return serde_json::from_slice(&bytes)
                .map_err(|e| GatewayError::api(format!("unparseable response: {e}")));
        }
        match serde_json::from_slice::<StripeErrorEnvelope>(&bytes) {
            Ok(envelope) => Err(envelope.error.into_gateway_error()),
            Err(_) => Err(GatewayError::api(format!("http status {status}"))),
        }
    }
}

impl DomainPort for StripeClient {}

#[async_trait]
impl StripeGateway for StripeClient {
    #[instrument(skip(self), fields(account = %id))]
    async fn retrieve_account(&self, id: &AccountId) -> Result<ConnectedAccount, GatewayError> {
        let url = format!("{}/accounts/{}", self.api_base, id);
        let response: AccountResponse = self.read(self.request(reqwest::Method::GET, url)).await?;
        response.into_account()
    }

    #[instrument(skip(self, payload), fields(account = %id))]
    async fn update_account(
        &self,
        id: &AccountId,
        payload: Value,
    ) -> Result<ConnectedAccount, GatewayError> {
        let url = format!("{}/accounts/{}", self.api_base, id);
        let form = form_encode(&payload);
        let response: AccountResponse = self
            .read(self.request(reqwest::Method::POST, url).form(&form))
            .await?;
        response.into_account()
    }

    #[instrument(skip(self, payload), fields(account = %account))]
    async fn create_person(
        &self,
        account: &AccountId,
        payload: Value,
    ) -> Result<Person, GatewayError> {
        let url = format!("{}/accounts/{}/persons", self.api_base, account);
        let form = form_encode(&payload);
        let response: PersonResponse = self
            .read(self.request(reqwest::Method::POST, url).form(&form))
            .await?;
        response.into_person(account)
    }

    #[instrument(skip(self, payload), fields(account = %account, person = %person))]
    async fn update_person(
        &self,
        account: &AccountId,
        person: &PersonId,
        payload: Value,
    ) -> Result<Person, GatewayError> {
        let url = format!("{}/accounts/{}/persons/{}", self.api_base, account, person);
        let form = form_encode(&payload);
        let response: PersonResponse = self
            .read(self.request(reqwest::Method::POST, url).form(&form))
            .await?;
        response.into_person(account)
    }

    #[instrument(skip(self), fields(account = %account))]
    async fn list_persons(&self, account: &AccountId) -> Result<Vec<Person>, GatewayError> {
        let url = format!("{}/accounts/{}/persons", self.api_base, account);
        let response: PersonList = self.read(self.request(reqwest::Method::GET, url)).await?;
        response
            .data
            .into_iter()
            .map(|p| p.into_person(account))
            .collect()
    }

    #[instrument(skip(self, content))]
    async fn upload_file(
        &self,
        filename: &str,
        content: Vec<u8>,
        purpose: &str,
    ) -> Result<FileId, GatewayError> {
        let url = format!("{}/files", self.files_base);
        let part = multipart::Part::bytes(content).file_name(filename.to_string());
        let form = multipart::Form::new()
            .text("purpose", purpose.to_string())
            .part("file", part);
        let response: FileResponse = self
            .read(self.request(reqwest::Method::POST, url).multipart(form))
            .await?;
        FileId::parse(&response.id)
            .map_err(|_| GatewayError::api(format!("unexpected file id {}", response.id)))
    }
}
