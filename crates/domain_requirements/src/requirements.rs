//! Per-country, per-role KYC requirement lists
//!
//! One declarative table: (country, role) -> ordered requirement paths.
//! Order is significant - the validator reports the first unmet entry, so
//! the lists below define the deterministic error order callers observe.
//!
//! The lists mirror what Stripe asks for before the first upstream
//! round-trip. After an account exists its `currently_due` array takes
//! over as the authoritative signal; these lists are never consulted for
//! persistence decisions once that array is available.

use crate::country_spec;
use serde::{Deserialize, Serialize};

/// The role a requirement list is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementRole {
    /// The account holder of an individual-type account
    Individual,
    /// The company object of a company-type account
    Company,
    /// The company representative person
    Representative,
    /// A company director person
    Director,
    /// A beneficial owner person
    Owner,
    /// The account opener person
    AccountOpener,
}

impl RequirementRole {
    /// True for roles realized as Stripe person objects
    pub fn is_person(self) -> bool {
        !matches!(self, RequirementRole::Individual | RequirementRole::Company)
    }
}

const INDIVIDUAL_DEFAULT: &[&str] = &[
    "individual.address.city",
    "individual.address.line1",
    "individual.address.postal_code",
    "individual.dob.day",
    "individual.dob.month",
    "individual.dob.year",
    "individual.first_name",
    "individual.last_name",
    "individual.phone",
];

const INDIVIDUAL_WITH_STATE: &[&str] = &[
    "individual.address.city",
    "individual.address.line1",
    "individual.address.postal_code",
    "individual.address.state",
    "individual.dob.day",
    "individual.dob.month",
    "individual.dob.year",
    "individual.first_name",
    "individual.last_name",
    "individual.phone",
];

const INDIVIDUAL_US: &[&str] = &[
    "individual.address.city",
    "individual.address.line1",
    "individual.address.postal_code",
    "individual.address.state",
    "individual.dob.day",
    "individual.dob.month",
    "individual.dob.year",
    "individual.first_name",
    "individual.last_name",
    "individual.phone",
    "individual.ssn_last_4",
];

const INDIVIDUAL_CA: &[&str] = &[
    "individual.address.city",
    "individual.address.line1",
    "individual.address.postal_code",
    "individual.address.state",
    "individual.dob.day",
    "individual.dob.month",
    "individual.dob.year",
    "individual.first_name",
    "individual.id_number",
    "individual.last_name",
    "individual.phone",
];

const INDIVIDUAL_WITH_ID_NUMBER: &[&str] = &[
    "individual.address.city",
    "individual.address.line1",
    "individual.address.postal_code",
    "individual.dob.day",
    "individual.dob.month",
    "individual.dob.year",
    "individual.first_name",
    "individual.id_number",
    "individual.last_name",
    "individual.phone",
];

const INDIVIDUAL_JP: &[&str] = &[
    "individual.address_kana.city",
    "individual.address_kana.line1",
    "individual.address_kana.postal_code",
    "individual.address_kana.state",
    "individual.address_kana.town",
    "individual.address_kanji.city",
    "individual.address_kanji.line1",
    "individual.address_kanji.postal_code",
    "individual.address_kanji.state",
    "individual.address_kanji.town",
    "individual.dob.day",
    "individual.dob.month",
    "individual.dob.year",
    "individual.first_name_kana",
    "individual.first_name_kanji",
    "individual.gender",
    "individual.last_name_kana",
    "individual.last_name_kanji",
    "individual.phone",
];

const COMPANY_DEFAULT: &[&str] = &[
    "business_profile.mcc",
    "business_profile.url",
    "company.address.city",
    "company.address.line1",
    "company.address.postal_code",
    "company.name",
    "company.phone",
    "company.tax_id",
];

const COMPANY_WITH_STATE: &[&str] = &[
    "business_profile.mcc",
    "business_profile.url",
    "company.address.city",
    "company.address.line1",
    "company.address.postal_code",
    "company.address.state",
    "company.name",
    "company.phone",
    "company.tax_id",
];

const COMPANY_JP: &[&str] = &[
    "business_profile.mcc",
    "business_profile.url",
    "company.address_kana.city",
    "company.address_kana.line1",
    "company.address_kana.postal_code",
    "company.address_kana.state",
    "company.address_kana.town",
    "company.address_kanji.city",
    "company.address_kanji.line1",
    "company.address_kanji.postal_code",
    "company.address_kanji.state",
    "company.address_kanji.town",
    "company.name_kana",
    "company.name_kanji",
    "company.phone",
    "company.tax_id",
];

const REPRESENTATIVE_DEFAULT: &[&str] = &[
    "address.city",
    "address.line1",
    "address.postal_code",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "phone",
    "relationship.title",
];

const REPRESENTATIVE_WITH_STATE: &[&str] = &[
    "address.city",
    "address.line1",
    "address.postal_code",
    "address.state",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "phone",
    "relationship.title",
];

const REPRESENTATIVE_US: &[&str] = &[
    "address.city",
    "address.line1",
    "address.postal_code",
    "address.state",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "phone",
    "relationship.title",
    "ssn_last_4",
];

const REPRESENTATIVE_JP: &[&str] = &[
    "address_kana.city",
    "address_kana.line1",
    "address_kana.postal_code",
    "address_kana.state",
    "address_kana.town",
    "address_kanji.city",
    "address_kanji.line1",
    "address_kanji.postal_code",
    "address_kanji.state",
    "address_kanji.town",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name_kana",
    "first_name_kanji",
    "gender",
    "last_name_kana",
    "last_name_kanji",
    "phone",
    "relationship.title",
];

const DIRECTOR_DEFAULT: &[&str] = &[
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "relationship.director",
    "relationship.title",
];

const DIRECTOR_JP: &[&str] = &[
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name_kana",
    "first_name_kanji",
    "last_name_kana",
    "last_name_kanji",
    "relationship.director",
    "relationship.title",
];

const OWNER_DEFAULT: &[&str] = &[
    "address.city",
    "address.line1",
    "address.postal_code",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "relationship.owner",
    "relationship.percent_ownership",
];

const OWNER_US: &[&str] = &[
    "address.city",
    "address.line1",
    "address.postal_code",
    "address.state",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "relationship.owner",
    "relationship.percent_ownership",
    "ssn_last_4",
];

const OWNER_JP: &[&str] = &[
    "address_kana.city",
    "address_kana.line1",
    "address_kana.postal_code",
    "address_kana.state",
    "address_kana.town",
    "address_kanji.city",
    "address_kanji.line1",
    "address_kanji.postal_code",
    "address_kanji.state",
    "address_kanji.town",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name_kana",
    "first_name_kanji",
    "last_name_kana",
    "last_name_kanji",
    "relationship.owner",
    "relationship.percent_ownership",
];

const ACCOUNT_OPENER_DEFAULT: &[&str] = &[
    "address.city",
    "address.line1",
    "address.postal_code",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name",
    "last_name",
    "phone",
    "relationship.executive",
    "relationship.title",
];

const ACCOUNT_OPENER_JP: &[&str] = &[
    "address_kana.city",
    "address_kana.line1",
    "address_kana.postal_code",
    "address_kana.state",
    "address_kana.town",
    "address_kanji.city",
    "address_kanji.line1",
    "address_kanji.postal_code",
    "address_kanji.state",
    "address_kanji.town",
    "dob.day",
    "dob.month",
    "dob.year",
    "email",
    "first_name_kana",
    "first_name_kanji",
    "gender",
    "last_name_kana",
    "last_name_kanji",
    "phone",
    "relationship.executive",
    "relationship.title",
];

/// The ordered requirement list for a (country, role) pair
///
/// `None` when the country is unsupported.
pub fn requirements(country: &str, role: RequirementRole) -> Option<&'static [&'static str]> {
    if !country_spec::is_supported(country) {
        return None;
    }
    let list = match role {
        RequirementRole::Individual => match country {
            "JP" => INDIVIDUAL_JP,
            "US" => INDIVIDUAL_US,
            "CA" => INDIVIDUAL_CA,
            "AU" => INDIVIDUAL_WITH_STATE,
            "HK" | "SG" => INDIVIDUAL_WITH_ID_NUMBER,
            _ => INDIVIDUAL_DEFAULT,
        },
        RequirementRole::Company => match country {
            "JP" => COMPANY_JP,
            "AU" | "CA" | "US" => COMPANY_WITH_STATE,
            _ => COMPANY_DEFAULT,
        },
        RequirementRole::Representative => match country {
            "JP" => REPRESENTATIVE_JP,
            "US" => REPRESENTATIVE_US,
            "AU" | "CA" => REPRESENTATIVE_WITH_STATE,
            _ => REPRESENTATIVE_DEFAULT,
        },
        RequirementRole::Director => match country {
            "JP" => DIRECTOR_JP,
            _ => DIRECTOR_DEFAULT,
        },
        RequirementRole::Owner => match country {
            "JP" => OWNER_JP,
            "US" => OWNER_US,
            _ => OWNER_DEFAULT,
        },
        RequirementRole::AccountOpener => match country {
            "JP" => ACCOUNT_OPENER_JP,
            _ => ACCOUNT_OPENER_DEFAULT,
        },
    };
    Some(list)
}

/// Every (country, role) list in the table, for exhaustive property tests
pub fn all_requirement_lists() -> Vec<(&'static str, RequirementRole, &'static [&'static str])> {
    const ROLES: &[RequirementRole] = &[
        RequirementRole::Individual,
        RequirementRole::Company,
        RequirementRole::Representative,
        RequirementRole::Director,
        RequirementRole::Owner,
        RequirementRole::AccountOpener,
    ];
    let mut out = Vec::new();
    for spec in country_spec::supported_countries() {
        for role in ROLES {
            if let Some(list) = requirements(spec.code, *role) {
                out.push((spec.code, *role, list));
            }
        }
    }
    out
}
