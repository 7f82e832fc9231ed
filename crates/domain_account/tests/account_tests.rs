//! Cross-module tests for the connected-account domain

use chrono::Utc;
use std::collections::{HashMap, HashSet};

use core_kernel::{AccountId, OnboardingError};
use domain_account::submission::{ready_for_submission, COMPANY_DRAFT_KEY};
use domain_account::{
    BusinessType, ConnectedAccount, PersonRole, RegistrationDraft, StoredOwners,
};
use domain_account::account::{ExternalAccount, Requirements};
use domain_requirements::validator::FieldMap;

fn form(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn company_fields() -> FieldMap {
    form(&[
        ("business_profile_mcc", "5734"),
        ("business_profile_url", "https://example.de"),
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 1"),
        ("address_postal_code", "10117"),
        ("company_name", "Beispiel GmbH"),
        ("company_phone", "+4930123456"),
        ("company_tax_id", "DE123456789"),
    ])
}

fn representative_fields() -> FieldMap {
    form(&[
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 1"),
        ("address_postal_code", "10117"),
        ("dob_day", "2"),
        ("dob_month", "3"),
        ("dob_year", "1970"),
        ("email", "rep@example.de"),
        ("first_name", "Erika"),
        ("last_name", "Mustermann"),
        ("phone", "+4930123457"),
    ])
}

fn owner_fields(first: &str) -> FieldMap {
    form(&[
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 2"),
        ("address_postal_code", "10117"),
        ("dob_day", "4"),
        ("dob_month", "5"),
        ("dob_year", "1968"),
        ("email", "owner@example.de"),
        ("first_name", first),
        ("last_name", "Beispiel"),
    ])
}

fn company_account() -> ConnectedAccount {
    let mut metadata = HashMap::new();

    let mut company = RegistrationDraft::new();
    company.merge(&company_fields());
    company.store(&mut metadata, COMPANY_DRAFT_KEY).unwrap();

    let mut representative = RegistrationDraft::new();
    representative.merge(&representative_fields());
    representative
        .store(&mut metadata, PersonRole::Representative.draft_key())
        .unwrap();

    let mut owners = StoredOwners::default();
    owners.push(owner_fields("Hans")).unwrap();
    owners.store(&mut metadata).unwrap();

    ConnectedAccount {
        id: AccountId::parse("acct_company1").unwrap(),
        business_type: BusinessType::Company,
        country: "DE".into(),
        requirements: Requirements::default(),
        metadata,
        individual: None,
        company: None,
        external_accounts: vec![ExternalAccount {
            id: "ba_1".into(),
            currency: "eur".into(),
            country: "DE".into(),
        }],
        payouts_enabled: false,
        created: Utc::now(),
    }
}

#[test]
fn test_complete_company_registration_submits() {
    let account = company_account();
    assert!(ready_for_submission(&account, &HashSet::new()).is_ok());
}

#[test]
fn test_incomplete_owner_blocks_submission() {
    let mut account = company_account();
    let mut owners = StoredOwners::load(&account.metadata).unwrap();
    let mut incomplete = owner_fields("Greta");
    incomplete.remove("address_city");
    owners.push(incomplete).unwrap();
    owners.store(&mut account.metadata).unwrap();

    let err = ready_for_submission(&account, &HashSet::new()).unwrap_err();
    assert_eq!(err, OnboardingError::invalid_field("address_city"));
}

#[test]
fn test_missing_representative_draft_reports_its_first_field() {
    let mut account = company_account();
    account
        .metadata
        .remove(PersonRole::Representative.draft_key());

    let err = ready_for_submission(&account, &HashSet::new()).unwrap_err();
    assert_eq!(err, OnboardingError::invalid_field("address_city"));
}

#[test]
fn test_owner_cap_and_duplicates_enforced_before_validation() {
    let mut owners = StoredOwners::default();
    for first in ["A", "B", "C", "D"] {
        owners.push(owner_fields(first)).unwrap();
    }
    assert_eq!(
        owners.push(owner_fields("E")).unwrap_err(),
        OnboardingError::MaximumOwners
    );

    let mut owners = StoredOwners::default();
    owners.push(owner_fields("Hans")).unwrap();
    assert_eq!(
        owners.push(owner_fields("Hans")).unwrap_err(),
        OnboardingError::DuplicateName
    );
}
