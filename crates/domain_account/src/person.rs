//! Persons attached to a company account
//!
//! Each role (representative, director, beneficial owner, account
//! opener) is realized upstream as a person object with its own
//! requirement array, scoped by the person id. Creation goes through a
//! role-specific call; once created, every role shares the same update
//! path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, PersonId};
use domain_requirements::validator::FieldMap;
use domain_requirements::RequirementRole;

use crate::account::Requirements;

/// Person roles on a company-type connected account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Representative,
    Director,
    Owner,
    AccountOpener,
}

impl PersonRole {
    /// The requirement-table role this person validates against
    pub fn requirement_role(self) -> RequirementRole {
        match self {
            PersonRole::Representative => RequirementRole::Representative,
            PersonRole::Director => RequirementRole::Director,
            PersonRole::Owner => RequirementRole::Owner,
            PersonRole::AccountOpener => RequirementRole::AccountOpener,
        }
    }

    /// The metadata key this role's registration draft is stored under
    pub fn draft_key(self) -> &'static str {
        match self {
            PersonRole::Representative => "registration_representative",
            PersonRole::Director => "registration_director",
            PersonRole::Owner => "registration_owner",
            PersonRole::AccountOpener => "registration_account_opener",
        }
    }

    /// The metadata key holding the created person's id
    pub fn person_key(self) -> &'static str {
        match self {
            PersonRole::Representative => "representative",
            PersonRole::Director => "director",
            PersonRole::Owner => "owner",
            PersonRole::AccountOpener => "account_opener",
        }
    }
}

/// The relationship flags describing a person's role on the account
///
/// Posted as optional flat fields (`relationship_title`,
/// `relationship_owner`, ...); the codec never nests them, so handlers
/// assemble this struct explicitly and attach it to the person payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub representative: bool,
    #[serde(default)]
    pub director: bool,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub executive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_ownership: Option<Decimal>,
}

impl Relationship {
    /// Assembles the relationship from the posted flags for a role
    pub fn from_form(role: PersonRole, body: &FieldMap) -> Self {
        let flag = |key: &str| {
            body.get(key)
                .map(|v| {
                    let v = v.trim();
                    !v.is_empty() && v != "false" && v != "0"
                })
                .unwrap_or(false)
        };
        Self {
            representative: role == PersonRole::Representative,
            director: role == PersonRole::Director || flag("relationship_director"),
            owner: role == PersonRole::Owner || flag("relationship_owner"),
            executive: role == PersonRole::AccountOpener || flag("relationship_executive"),
            title: body
                .get("relationship_title")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            percent_ownership: body
                .get("relationship_percent_ownership")
                .and_then(|v| v.trim().parse().ok()),
        }
    }
}

/// Mirror of an upstream person object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub account_id: AccountId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub relationship: Relationship,
    #[serde(default)]
    pub requirements: Requirements,
    pub created: DateTime<Utc>,
}

impl Person {
    /// True when first and last name both match, case-insensitively
    pub fn matches_name(&self, first: &str, last: &str) -> bool {
        let eq = |a: &Option<String>, b: &str| {
            a.as_deref()
                .map(|v| v.eq_ignore_ascii_case(b.trim()))
                .unwrap_or(false)
        };
        eq(&self.first_name, first) && eq(&self.last_name, last)
    }
}
