//! Beneficial-owner registration
//!
//! Owners accumulate in the metadata-backed collection until final
//! submission, when each becomes an upstream person. The slot and
//! duplicate-name checks run before field validation and before any
//! upstream call.

use tracing::instrument;

use core_kernel::OnboardingError;
use domain_account::{BusinessType, ConnectedAccount, StoredOwners, StripeGateway};
use domain_requirements::codec::FieldScope;
use domain_requirements::requirements as requirement_table;
use domain_requirements::validator::validate_requirements;
use domain_requirements::RequirementRole;
use infra_stripe::{resolve_uploads, UploadMap};
use domain_account::owners::OWNERS_METADATA_KEY;

use crate::dto::{upload_field_names, FormBody};
use crate::service::{metadata_payload, require_business_type, OnboardingService};

/// Adds an additional beneficial owner to the stored collection
#[instrument(skip(service, body, uploads), fields(account = stripe_account_id))]
pub async fn add_owner<G: StripeGateway>(
    service: &OnboardingService<G>,
    dashboard_account_id: &str,
    stripe_account_id: &str,
    body: FormBody,
    uploads: UploadMap,
) -> Result<ConnectedAccount, OnboardingError> {
    let account = service
        .load_owned_account(dashboard_account_id, stripe_account_id)
        .await?;
    require_business_type(&account, BusinessType::Company)?;

    let mut owners = StoredOwners::load(&account.metadata)?;
    // The cap rejects before anything else, regardless of field validity
    owners.ensure_slot()?;
    owners.ensure_unique_name(body.fields())?;

    let mut fields = body.into_fields();
    let requirements =
        requirement_table(&account.country, RequirementRole::Owner).unwrap_or_default();
    validate_requirements(
        requirements,
        FieldScope::Person,
        &account.country,
        &fields,
        &upload_field_names(&uploads),
        None,
    )?;

    resolve_uploads(service.sync().gateway().as_ref(), &uploads, &mut fields).await?;

    owners.push(fields)?;
    let payload = metadata_payload(&[(OWNERS_METADATA_KEY, owners.to_json()?)]);
    service.sync().sync_account(&account.id, payload).await
}
