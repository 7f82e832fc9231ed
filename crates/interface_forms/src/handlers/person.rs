//! Shared person handling
//!
//! Creation goes through a role-specific call (see the representative,
//! director, and account-opener modules); every created person is then
//! updated through the single flow here, validated against the person's
//! authoritative requirement array once it exists.

use tracing::instrument;

use core_kernel::{OnboardingError, PersonId};
use domain_account::{
    BusinessType, ConnectedAccount, Person, PersonRole, RegistrationDraft, StripeGateway,
};
use domain_requirements::codec::FieldScope;
use domain_requirements::requirements as requirement_table;
use domain_requirements::validator::validate_requirements;
use infra_stripe::{resolve_uploads, UploadMap};

use crate::dto::{upload_field_names, FormBody};
use crate::service::{metadata_payload, person_payload, require_business_type, OnboardingService};

/// Creates the person for a role and records it in the account metadata
pub(crate) async fn create_for_role<G: StripeGateway>(
    service: &OnboardingService<G>,
    account: &ConnectedAccount,
    role: PersonRole,
    body: FormBody,
    uploads: UploadMap,
) -> Result<Person, OnboardingError> {
    let prior =
        RegistrationDraft::load(&account.metadata, role.draft_key())?.unwrap_or_default();
    let mut draft = prior.clone();
    draft.merge(body.fields());

    // No person exists yet, so the static table is the best signal
    let requirements = requirement_table(&account.country, role.requirement_role())
        .unwrap_or_default();
    validate_requirements(
        requirements,
        FieldScope::Person,
        &account.country,
        draft.fields(),
        &upload_field_names(&uploads),
        Some(prior.fields()),
    )?;

    resolve_uploads(service.sync().gateway().as_ref(), &uploads, draft.fields_mut()).await?;

    let payload = person_payload(role, draft.fields());
    let person = service.sync().sync_new_person(&account.id, payload).await?;

    let raw = serde_json::to_string(draft.fields()).map_err(|_| OnboardingError::Unknown)?;
    let bookkeeping = metadata_payload(&[
        (role.draft_key(), raw),
        (role.person_key(), person.id.as_str().to_string()),
    ]);
    service.sync().sync_account(&account.id, bookkeeping).await?;
    Ok(person)
}

/// Updates the person previously created for a role
#[instrument(skip(service, body, uploads), fields(account = stripe_account_id, role = ?role))]
pub async fn update<G: StripeGateway>(
    service: &OnboardingService<G>,
    dashboard_account_id: &str,
    stripe_account_id: &str,
    role: PersonRole,
    body: FormBody,
    uploads: UploadMap,
) -> Result<Person, OnboardingError> {
    let account = service
        .load_owned_account(dashboard_account_id, stripe_account_id)
        .await?;
    require_business_type(&account, BusinessType::Company)?;

    let person_id = account
        .metadata
        .get(role.person_key())
        .ok_or(OnboardingError::InvalidPerson)?;
    let person_id = PersonId::parse(person_id)?;

    let prior =
        RegistrationDraft::load(&account.metadata, role.draft_key())?.unwrap_or_default();
    let mut draft = prior.clone();
    draft.merge(body.fields());

    let requirements = account.requirements_for_person(&person_id, role.requirement_role());
    validate_requirements(
        &requirements,
        FieldScope::Person,
        &account.country,
        draft.fields(),
        &upload_field_names(&uploads),
        Some(prior.fields()),
    )?;

    resolve_uploads(service.sync().gateway().as_ref(), &uploads, draft.fields_mut()).await?;

    let payload = person_payload(role, draft.fields());
    let person = service
        .sync()
        .sync_person(&account.id, &person_id, payload)
        .await?;

    let raw = serde_json::to_string(draft.fields()).map_err(|_| OnboardingError::Unknown)?;
    let bookkeeping = metadata_payload(&[(role.draft_key(), raw)]);
    service.sync().sync_account(&account.id, bookkeeping).await?;
    Ok(person)
}
