//! The onboarding service bundle
//!
//! One instance per process, constructed at startup with the Stripe
//! configuration and the gateway adapter, then injected into every
//! handler call. Holds the shared guards (id shape, ownership, business
//! type) and the payload assembly helpers.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use core_kernel::{AccountId, OnboardingError, StripeConfig};
use domain_account::{BusinessType, ConnectedAccount, PersonRole, Relationship, StripeGateway};
use domain_requirements::codec;
use domain_requirements::validator::FieldMap;
use infra_stripe::{AccountCache, SyncService};

/// Dependency bundle handed to every handler
pub struct OnboardingService<G> {
    config: StripeConfig,
    sync: SyncService<G>,
}

impl<G: StripeGateway> OnboardingService<G> {
    pub fn new(config: StripeConfig, gateway: Arc<G>, cache: Arc<AccountCache>) -> Self {
        let sync = SyncService::new(gateway, cache, &config);
        Self { config, sync }
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    pub fn sync(&self) -> &SyncService<G> {
        &self.sync
    }

    /// Parses the posted account id, loads the mirror through the cache,
    /// and rejects cross-account access
    pub async fn load_owned_account(
        &self,
        dashboard_account_id: &str,
        stripe_account_id: &str,
    ) -> Result<ConnectedAccount, OnboardingError> {
        let id = AccountId::parse(stripe_account_id)?;
        let account = self.sync.load_account(&id).await?;
        if !account.owned_by(dashboard_account_id) {
            debug!(account = %id, dashboard = dashboard_account_id, "cross-account access rejected");
            return Err(OnboardingError::InvalidAccount);
        }
        Ok(account)
    }
}

/// Rejects a handler invoked against the wrong business type
pub(crate) fn require_business_type(
    account: &ConnectedAccount,
    expected: BusinessType,
) -> Result<(), OnboardingError> {
    if account.business_type != expected {
        return Err(OnboardingError::InvalidStripeAccount);
    }
    Ok(())
}

fn nest_fields(fields: &FieldMap) -> Map<String, Value> {
    let mut acc = Map::new();
    for (field, value) in fields {
        if value.trim().is_empty() {
            continue;
        }
        codec::nest(field, Value::String(value.clone()), &mut acc);
    }
    acc
}

/// Builds the nested account-update payload from a resolved flat body
///
/// Individual fields gather under `individual`; for companies the shared
/// address/verification subtrees fold into the `company` object the
/// codec already produced for `company_`-prefixed scalars.
/// `business_profile` stays top-level in both cases.
pub(crate) fn account_payload(business_type: BusinessType, fields: &FieldMap) -> Value {
    let mut acc = nest_fields(fields);
    let mut payload = Map::new();
    let business_profile = acc.remove("business_profile");
    match business_type {
        BusinessType::Individual => {
            payload.insert("individual".to_string(), Value::Object(acc));
        }
        BusinessType::Company => {
            let mut company = match acc.remove("company") {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };
            for subtree in [
                "address",
                "address_kana",
                "address_kanji",
                "personal_address",
                "verification",
            ] {
                if let Some(sub) = acc.remove(subtree) {
                    company.insert(subtree.to_string(), sub);
                }
            }
            payload.insert("company".to_string(), Value::Object(company));
        }
    }
    if let Some(profile) = business_profile {
        payload.insert("business_profile".to_string(), profile);
    }
    Value::Object(payload)
}

/// Builds the nested person payload, attaching the relationship object
/// assembled from the posted flags
pub(crate) fn person_payload(role: PersonRole, fields: &FieldMap) -> Value {
    let mut acc = nest_fields(fields);
    let relationship = Relationship::from_form(role, fields);
    if let Ok(value) = serde_json::to_value(&relationship) {
        acc.insert("relationship".to_string(), value);
    }
    Value::Object(acc)
}

/// A metadata-only account payload; empty values clear their keys
pub(crate) fn metadata_payload(entries: &[(&str, String)]) -> Value {
    let mut metadata = Map::new();
    for (key, value) in entries {
        metadata.insert(key.to_string(), Value::String(value.clone()));
    }
    let mut payload = Map::new();
    payload.insert("metadata".to_string(), Value::Object(metadata));
    Value::Object(payload)
}
