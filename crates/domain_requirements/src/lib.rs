//! Requirement-Driven KYC Field Mapping
//!
//! This crate is the reusable core of the onboarding system: given a
//! country's KYC requirement list and a submitted flat form body, it
//! decides which fields are satisfied, which field is the first violation,
//! and how flat form names translate into the nested object shape the
//! Stripe API expects.
//!
//! # Components
//!
//! - [`country_spec`]: static per-country data - currencies and
//!   administrative divisions - loaded once and never mutated
//! - [`requirements`]: one declarative (country x role) table of ordered
//!   requirement paths
//! - [`codec`]: bidirectional mapping between flat form field names
//!   (`address_kana_city`) and nested requirement paths (`address_kana.city`)
//! - [`validator`]: ordered, first-missing-wins requirement validation
//!   with the role exceptions and per-field format checks
//!
//! # Authoritative vs advisory requirements
//!
//! The static table here drives the UI optimistically before the first
//! upstream round-trip. Once a connected account exists, the account's
//! `currently_due` array is the authoritative requirement signal and is
//! what callers must feed into [`validator::validate_requirements`].

pub mod codec;
pub mod country_spec;
pub mod requirements;
pub mod validator;

pub use codec::{flatten, is_relationship_flag, nest, nested_path, FieldScope};
pub use country_spec::{country, division, is_supported, CountrySpec, Division};
pub use requirements::{requirements, RequirementRole};
pub use validator::{validate_requirements, FieldMap};
