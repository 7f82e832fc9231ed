//! The connected-account mirror
//!
//! A read-only, eventually-consistent copy of the upstream account
//! object. Requirement decisions made after the account exists must use
//! its `currently_due` array - the static country table is advisory and
//! only drives the UI before the first upstream round-trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use core_kernel::{AccountId, PersonId};
use domain_requirements::requirements as requirement_table;
use domain_requirements::RequirementRole;

/// Business type selected at account creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Individual,
    Company,
}

/// The upstream requirement arrays
///
/// `currently_due` is the authoritative list of dotted paths still
/// required now; `eventually_due` are required by a future deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub currently_due: Vec<String>,
    #[serde(default)]
    pub eventually_due: Vec<String>,
    #[serde(default)]
    pub past_due: Vec<String>,
}

impl Requirements {
    /// True once the upstream has cleared every outstanding requirement
    pub fn is_clear(&self) -> bool {
        self.currently_due.is_empty() && self.past_due.is_empty()
    }
}

/// An external bank account attached for payouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalAccount {
    pub id: String,
    pub currency: String,
    pub country: String,
}

/// Metadata key carrying the owning dashboard account id
pub const METADATA_ACCOUNT_KEY: &str = "accountid";

/// Cached mirror of a Stripe connected account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectedAccount {
    pub id: AccountId,
    pub business_type: BusinessType,
    /// ISO country code the account was registered in
    pub country: String,
    pub requirements: Requirements,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Upstream `individual` sub-object, verbatim
    #[serde(default)]
    pub individual: Option<Value>,
    /// Upstream `company` sub-object, verbatim
    #[serde(default)]
    pub company: Option<Value>,
    #[serde(default)]
    pub external_accounts: Vec<ExternalAccount>,
    #[serde(default)]
    pub payouts_enabled: bool,
    pub created: DateTime<Utc>,
}

impl ConnectedAccount {
    /// True when the mirror belongs to the given dashboard account
    pub fn owned_by(&self, dashboard_account_id: &str) -> bool {
        self.metadata
            .get(METADATA_ACCOUNT_KEY)
            .map(|v| v == dashboard_account_id)
            .unwrap_or(false)
    }

    /// True once at least one payout destination exists
    pub fn has_external_account(&self) -> bool {
        !self.external_accounts.is_empty()
    }

    /// The authoritative requirement paths scoped to an account-level role
    ///
    /// Filters `currently_due` down to the entries belonging to the role's
    /// entity. Before the first upstream round-trip (`currently_due`
    /// empty) the static country table is returned instead.
    pub fn requirements_for(&self, role: RequirementRole) -> Vec<String> {
        let due = &self.requirements.currently_due;
        if due.is_empty() {
            return requirement_table(&self.country, role)
                .map(|list| list.iter().map(|p| p.to_string()).collect())
                .unwrap_or_default();
        }
        let keep = |path: &String| match role {
            RequirementRole::Individual => {
                path.starts_with("individual.") || path.starts_with("business_profile.")
            }
            RequirementRole::Company => {
                path.starts_with("company.") || path.starts_with("business_profile.")
            }
            _ => false,
        };
        due.iter().filter(|p| keep(p)).cloned().collect()
    }

    /// The authoritative requirement paths scoped to a person
    pub fn requirements_for_person(&self, person: &PersonId, role: RequirementRole) -> Vec<String> {
        let due = &self.requirements.currently_due;
        let prefix = format!("{}.", person.as_str());
        let scoped: Vec<String> = due
            .iter()
            .filter(|p| p.starts_with(&prefix))
            .cloned()
            .collect();
        if scoped.is_empty() {
            return requirement_table(&self.country, role)
                .map(|list| list.iter().map(|p| p.to_string()).collect())
                .unwrap_or_default();
        }
        scoped
    }
}
