//! The final-submission gate
//!
//! An account may be submitted once every role's requirement list is
//! satisfied by its stored draft and at least one external bank account
//! exists. The gate is a composition of the requirement validator over
//! the aggregate registration, not a separate algorithm.

use std::collections::HashSet;

use core_kernel::OnboardingError;
use domain_requirements::codec::FieldScope;
use domain_requirements::requirements as requirement_table;
use domain_requirements::validator::{validate_requirements, FieldMap};
use domain_requirements::RequirementRole;
use tracing::debug;

use crate::account::{BusinessType, ConnectedAccount};
use crate::draft::RegistrationDraft;
use crate::owners::StoredOwners;
use crate::person::PersonRole;

/// Metadata key for the individual registration draft
pub const INDIVIDUAL_DRAFT_KEY: &str = "registration_individual";

/// Metadata key for the company registration draft
pub const COMPANY_DRAFT_KEY: &str = "registration_company";

fn draft_fields(
    account: &ConnectedAccount,
    key: &str,
) -> Result<FieldMap, OnboardingError> {
    Ok(RegistrationDraft::load(&account.metadata, key)?
        .map(RegistrationDraft::into_fields)
        .unwrap_or_default())
}

fn check_role(
    account: &ConnectedAccount,
    role: RequirementRole,
    scope: FieldScope,
    body: &FieldMap,
    uploads: &HashSet<String>,
) -> Result<(), OnboardingError> {
    let requirements: Vec<String> = match role {
        RequirementRole::Individual | RequirementRole::Company => account.requirements_for(role),
        _ => requirement_table(&account.country, role)
            .map(|list| list.iter().map(|p| p.to_string()).collect())
            .unwrap_or_default(),
    };
    validate_requirements(&requirements, scope, &account.country, body, uploads, None)
}

/// Validates the aggregate registration ahead of the final upstream call
pub fn ready_for_submission(
    account: &ConnectedAccount,
    uploads: &HashSet<String>,
) -> Result<(), OnboardingError> {
    match account.business_type {
        BusinessType::Individual => {
            let body = draft_fields(account, INDIVIDUAL_DRAFT_KEY)?;
            check_role(
                account,
                RequirementRole::Individual,
                FieldScope::Individual,
                &body,
                uploads,
            )?;
        }
        BusinessType::Company => {
            let body = draft_fields(account, COMPANY_DRAFT_KEY)?;
            check_role(
                account,
                RequirementRole::Company,
                FieldScope::Company,
                &body,
                uploads,
            )?;

            let representative =
                draft_fields(account, PersonRole::Representative.draft_key())?;
            check_role(
                account,
                RequirementRole::Representative,
                FieldScope::Person,
                &representative,
                uploads,
            )?;

            for owner in StoredOwners::load(&account.metadata)?.owners() {
                check_role(
                    account,
                    RequirementRole::Owner,
                    FieldScope::Person,
                    owner,
                    uploads,
                )?;
            }

            // The account-opener draft only gates submission when started
            let opener = draft_fields(account, PersonRole::AccountOpener.draft_key())?;
            if !opener.is_empty() {
                check_role(
                    account,
                    RequirementRole::AccountOpener,
                    FieldScope::Person,
                    &opener,
                    uploads,
                )?;
            }
        }
    }

    if !account.has_external_account() {
        debug!(account = %account.id, "submission blocked: no payout destination");
        return Err(OnboardingError::invalid_field("external_account"));
    }
    Ok(())
}
