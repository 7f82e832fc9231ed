//! Individual registration
//!
//! Partial submissions merge into the metadata-backed draft; the nested
//! `individual` object is only assembled and sent at final submission.

use tracing::instrument;

use core_kernel::OnboardingError;
use domain_account::submission::INDIVIDUAL_DRAFT_KEY;
use domain_account::{BusinessType, ConnectedAccount, RegistrationDraft, StripeGateway};
use domain_requirements::codec::FieldScope;
use domain_requirements::validator::validate_requirements;
use domain_requirements::RequirementRole;
use infra_stripe::{resolve_uploads, UploadMap};

use crate::dto::{upload_field_names, FormBody};
use crate::service::{metadata_payload, require_business_type, OnboardingService};

/// Creates or updates the individual registration draft
#[instrument(skip(service, body, uploads), fields(account = stripe_account_id))]
pub async fn update_registration<G: StripeGateway>(
    service: &OnboardingService<G>,
    dashboard_account_id: &str,
    stripe_account_id: &str,
    body: FormBody,
    uploads: UploadMap,
) -> Result<ConnectedAccount, OnboardingError> {
    let account = service
        .load_owned_account(dashboard_account_id, stripe_account_id)
        .await?;
    require_business_type(&account, BusinessType::Individual)?;

    let prior = RegistrationDraft::load(&account.metadata, INDIVIDUAL_DRAFT_KEY)?
        .unwrap_or_default();
    let mut draft = prior.clone();
    draft.merge(body.fields());

    let requirements = account.requirements_for(RequirementRole::Individual);
    validate_requirements(
        &requirements,
        FieldScope::Individual,
        &account.country,
        draft.fields(),
        &upload_field_names(&uploads),
        Some(prior.fields()),
    )?;

    resolve_uploads(service.sync().gateway().as_ref(), &uploads, draft.fields_mut()).await?;

    let raw = serde_json::to_string(draft.fields()).map_err(|_| OnboardingError::Unknown)?;
    let payload = metadata_payload(&[(INDIVIDUAL_DRAFT_KEY, raw)]);
    service.sync().sync_account(&account.id, payload).await
}
