//! Account-opener registration

use tracing::instrument;

use core_kernel::OnboardingError;
use domain_account::{BusinessType, Person, PersonRole, StripeGateway};
use infra_stripe::UploadMap;

use crate::dto::FormBody;
use crate::handlers::person;
use crate::service::{require_business_type, OnboardingService};

/// Creates the account-opener person on a company account
#[instrument(skip(service, body, uploads), fields(account = stripe_account_id))]
pub async fn create<G: StripeGateway>(
    service: &OnboardingService<G>,
    dashboard_account_id: &str,
    stripe_account_id: &str,
    body: FormBody,
    uploads: UploadMap,
) -> Result<Person, OnboardingError> {
    let account = service
        .load_owned_account(dashboard_account_id, stripe_account_id)
        .await?;
    require_business_type(&account, BusinessType::Company)?;
    person::create_for_role(service, &account, PersonRole::AccountOpener, body, uploads).await
}

/// Updates the account opener through the shared person path
pub async fn update<G: StripeGateway>(
    service: &OnboardingService<G>,
    dashboard_account_id: &str,
    stripe_account_id: &str,
    body: FormBody,
    uploads: UploadMap,
) -> Result<Person, OnboardingError> {
    person::update(
        service,
        dashboard_account_id,
        stripe_account_id,
        PersonRole::AccountOpener,
        body,
        uploads,
    )
    .await
}
