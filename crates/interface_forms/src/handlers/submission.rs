//! Final submission
//!
//! Re-validates the aggregate registration against a freshly fetched
//! mirror, translates every consumed draft into its nested upstream
//! object, creates the stored owners as persons, and clears the draft
//! metadata. After this call succeeds the drafts no longer exist
//! anywhere.

use tracing::{info, instrument};

use core_kernel::OnboardingError;
use domain_account::owners::OWNERS_METADATA_KEY;
use domain_account::submission::{
    ready_for_submission, COMPANY_DRAFT_KEY, INDIVIDUAL_DRAFT_KEY,
};
use domain_account::{
    BusinessType, ConnectedAccount, PersonRole, RegistrationDraft, StoredOwners, StripeGateway,
};
use infra_stripe::{resolve_uploads, UploadMap};
use serde_json::Value;

use crate::dto::upload_field_names;
use crate::service::{account_payload, person_payload, OnboardingService};

fn clear_entry(key: &str) -> (&str, String) {
    (key, String::new())
}

/// Submits the completed registration upstream
#[instrument(skip(service, uploads), fields(account = stripe_account_id))]
pub async fn submit_account<G: StripeGateway>(
    service: &OnboardingService<G>,
    dashboard_account_id: &str,
    stripe_account_id: &str,
    uploads: UploadMap,
) -> Result<ConnectedAccount, OnboardingError> {
    let account = service
        .load_owned_account(dashboard_account_id, stripe_account_id)
        .await?;
    // The gate runs against the authoritative mirror, not the cache
    let account = service.sync().refresh_account(&account.id).await?;

    ready_for_submission(&account, &upload_field_names(&uploads))?;

    let mut metadata = account.metadata.clone();
    let gateway = service.sync().gateway().clone();

    let payload = match account.business_type {
        BusinessType::Individual => {
            let mut draft = RegistrationDraft::consume(&mut metadata, INDIVIDUAL_DRAFT_KEY)?
                .unwrap_or_default();
            resolve_uploads(gateway.as_ref(), &uploads, draft.fields_mut()).await?;
            let mut payload = account_payload(BusinessType::Individual, draft.fields());
            merge_metadata(
                &mut payload,
                &[clear_entry(INDIVIDUAL_DRAFT_KEY)],
            );
            payload
        }
        BusinessType::Company => {
            let mut draft = RegistrationDraft::consume(&mut metadata, COMPANY_DRAFT_KEY)?
                .unwrap_or_default();
            resolve_uploads(gateway.as_ref(), &uploads, draft.fields_mut()).await?;

            // Stored owners become upstream persons now
            for owner in StoredOwners::load(&metadata)?.owners() {
                let person = person_payload(PersonRole::Owner, owner);
                service.sync().sync_new_person(&account.id, person).await?;
            }

            let mut payload = account_payload(BusinessType::Company, draft.fields());
            merge_metadata(
                &mut payload,
                &[
                    clear_entry(COMPANY_DRAFT_KEY),
                    clear_entry(OWNERS_METADATA_KEY),
                    clear_entry(PersonRole::Representative.draft_key()),
                    clear_entry(PersonRole::Director.draft_key()),
                    clear_entry(PersonRole::AccountOpener.draft_key()),
                ],
            );
            payload
        }
    };

    let updated = service.sync().sync_account(&account.id, payload).await?;
    info!(account = %updated.id, "registration submitted");
    Ok(updated)
}

fn merge_metadata(payload: &mut Value, entries: &[(&str, String)]) {
    let Value::Object(map) = payload else { return };
    let metadata = map
        .entry("metadata".to_string())
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    if let Value::Object(metadata) = metadata {
        for (key, value) in entries {
            metadata.insert(key.to_string(), Value::String(value.clone()));
        }
    }
}
