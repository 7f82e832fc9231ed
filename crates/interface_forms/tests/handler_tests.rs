//! Handler tests against the in-memory gateway

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::{AccountId, OnboardingError, StripeConfig};
use domain_account::account::{ExternalAccount, Requirements, METADATA_ACCOUNT_KEY};
use domain_account::{BusinessType, ConnectedAccount, MockStripeGateway, PersonRole};
use infra_stripe::{AccountCache, UploadMap, UploadedFile};
use interface_forms::handlers::{company, individual, owner, person, representative, submission};
use interface_forms::{FormBody, OnboardingService};

const DASHBOARD: &str = "dash-1";

fn test_account(id: &str, business_type: BusinessType, country: &str) -> ConnectedAccount {
    let mut metadata = HashMap::new();
    metadata.insert(METADATA_ACCOUNT_KEY.to_string(), DASHBOARD.to_string());
    ConnectedAccount {
        id: AccountId::parse(id).unwrap(),
        business_type,
        country: country.into(),
        requirements: Requirements::default(),
        metadata,
        individual: None,
        company: None,
        external_accounts: vec![ExternalAccount {
            id: "ba_1".into(),
            currency: "eur".into(),
            country: country.into(),
        }],
        payouts_enabled: false,
        created: Utc::now(),
    }
}

async fn service_with(
    account: ConnectedAccount,
) -> OnboardingService<MockStripeGateway> {
    let gateway = Arc::new(MockStripeGateway::with_account(account).await);
    OnboardingService::new(
        StripeConfig::for_tests(),
        gateway,
        Arc::new(AccountCache::new()),
    )
}

fn german_individual_body() -> FormBody {
    FormBody::from_pairs(&[
        ("address_city", "Berlin"),
        ("address_line1", "123"),
        ("address_postal_code", "01067"),
        ("address_state", "BE"),
        ("dob_day", "1"),
        ("dob_month", "1"),
        ("dob_year", "1950"),
        ("first_name", "Max"),
        ("last_name", "Mustermann"),
        ("phone", "+4930123456"),
    ])
}

fn owner_body(first: &str, last: &str) -> FormBody {
    FormBody::from_pairs(&[
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 2"),
        ("address_postal_code", "10117"),
        ("dob_day", "4"),
        ("dob_month", "5"),
        ("dob_year", "1968"),
        ("email", "owner@example.de"),
        ("first_name", first),
        ("last_name", last),
    ])
}

#[tokio::test]
async fn test_individual_registration_saves_draft() {
    let service = service_with(test_account("acct_i1", BusinessType::Individual, "DE")).await;

    let updated = individual::update_registration(
        &service,
        DASHBOARD,
        "acct_i1",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap();

    let draft = updated.metadata.get("registration_individual").unwrap();
    assert!(draft.contains("\"address_city\":\"Berlin\""));
}

#[tokio::test]
async fn test_individual_registration_missing_city() {
    let service = service_with(test_account("acct_i2", BusinessType::Individual, "DE")).await;

    let mut fields = german_individual_body().into_fields();
    fields.remove("address_city");
    let err = individual::update_registration(
        &service,
        DASHBOARD,
        "acct_i2",
        FormBody::new(fields),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::invalid_field("address_city"));
}

#[tokio::test]
async fn test_partial_submissions_accumulate() {
    let service = service_with(test_account("acct_i3", BusinessType::Individual, "DE")).await;

    // First post is incomplete and fails, but a complete second post
    // merged over a stored draft succeeds
    let first = FormBody::from_pairs(&[("first_name", "Max"), ("last_name", "Mustermann")]);
    let err = individual::update_registration(
        &service,
        DASHBOARD,
        "acct_i3",
        first,
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert!(err.is_field_error());

    individual::update_registration(
        &service,
        DASHBOARD,
        "acct_i3",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap();

    // A later partial update keeps earlier fields satisfied
    let partial = FormBody::from_pairs(&[("phone", "+4930999999")]);
    let updated = individual::update_registration(
        &service,
        DASHBOARD,
        "acct_i3",
        partial,
        UploadMap::new(),
    )
    .await
    .unwrap();
    let draft = updated.metadata.get("registration_individual").unwrap();
    assert!(draft.contains("+4930999999"));
    assert!(draft.contains("Mustermann"));
}

#[tokio::test]
async fn test_wrong_business_type_rejected() {
    let service = service_with(test_account("acct_w1", BusinessType::Company, "DE")).await;
    let err = individual::update_registration(
        &service,
        DASHBOARD,
        "acct_w1",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::InvalidStripeAccount);
}

#[tokio::test]
async fn test_cross_account_access_rejected() {
    let service = service_with(test_account("acct_x1", BusinessType::Individual, "DE")).await;
    let err = individual::update_registration(
        &service,
        "someone-else",
        "acct_x1",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::InvalidAccount);
}

#[tokio::test]
async fn test_malformed_stripe_id_rejected_before_any_call() {
    let service = service_with(test_account("acct_x2", BusinessType::Individual, "DE")).await;
    let err = individual::update_registration(
        &service,
        DASHBOARD,
        "not-an-id",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::InvalidStripeId);
}

#[tokio::test]
async fn test_duplicate_owner_name_rejected_locally() {
    let service = service_with(test_account("acct_o1", BusinessType::Company, "DE")).await;

    owner::add_owner(
        &service,
        DASHBOARD,
        "acct_o1",
        owner_body("Jane", "Doe"),
        UploadMap::new(),
    )
    .await
    .unwrap();

    let err = owner::add_owner(
        &service,
        DASHBOARD,
        "acct_o1",
        owner_body("JANE", "doe"),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::DuplicateName);
}

#[tokio::test]
async fn test_fifth_owner_rejected_even_with_invalid_fields() {
    let service = service_with(test_account("acct_o2", BusinessType::Company, "DE")).await;

    for first in ["A", "B", "C", "D"] {
        owner::add_owner(
            &service,
            DASHBOARD,
            "acct_o2",
            owner_body(first, "Example"),
            UploadMap::new(),
        )
        .await
        .unwrap();
    }

    // The body is empty - the cap still wins
    let err = owner::add_owner(
        &service,
        DASHBOARD,
        "acct_o2",
        FormBody::default(),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::MaximumOwners);
}

#[tokio::test]
async fn test_representative_create_then_shared_update() {
    let service = service_with(test_account("acct_r1", BusinessType::Company, "DE")).await;

    let body = FormBody::from_pairs(&[
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
        ("relationship_title", "CEO"),
    ]);
    let created =
        representative::create(&service, DASHBOARD, "acct_r1", body, UploadMap::new())
            .await
            .unwrap();
    assert!(created.relationship.representative);
    assert_eq!(created.relationship.title.as_deref(), Some("CEO"));

    let update = FormBody::from_pairs(&[("first_name", "Erika-Marie")]);
    let updated = person::update(
        &service,
        DASHBOARD,
        "acct_r1",
        PersonRole::Representative,
        update,
        UploadMap::new(),
    )
    .await
    .unwrap();
    assert_eq!(created.id, updated.id);
    assert_eq!(updated.first_name.as_deref(), Some("Erika-Marie"));
}

#[tokio::test]
async fn test_person_update_without_creation_is_invalid_person() {
    let service = service_with(test_account("acct_r2", BusinessType::Company, "DE")).await;
    let err = person::update(
        &service,
        DASHBOARD,
        "acct_r2",
        PersonRole::Director,
        FormBody::default(),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, OnboardingError::InvalidPerson);
}

#[tokio::test]
async fn test_full_individual_submission_flow() {
    let service = service_with(test_account("acct_s1", BusinessType::Individual, "DE")).await;

    individual::update_registration(
        &service,
        DASHBOARD,
        "acct_s1",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap();

    let submitted =
        submission::submit_account(&service, DASHBOARD, "acct_s1", UploadMap::new())
            .await
            .unwrap();

    // The draft was consumed and the nested object went upstream
    assert!(!submitted.metadata.contains_key("registration_individual"));
    let individual = submitted.individual.as_ref().unwrap();
    assert_eq!(individual["address"]["city"], serde_json::json!("Berlin"));
    assert_eq!(individual["dob"]["day"], serde_json::json!("1"));
}

#[tokio::test]
async fn test_company_submission_creates_owner_persons() {
    let service = service_with(test_account("acct_s2", BusinessType::Company, "DE")).await;

    let company_body = FormBody::from_pairs(&[
        ("business_profile_mcc", "5734"),
        ("business_profile_product_description", "Handmade goods"),
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 1"),
        ("address_postal_code", "10117"),
        ("company_name", "Beispiel GmbH"),
        ("company_phone", "+4930123456"),
        ("company_tax_id", "DE123456789"),
    ]);
    company::update_registration(
        &service,
        DASHBOARD,
        "acct_s2",
        company_body,
        UploadMap::new(),
    )
    .await
    .unwrap();

    let rep_body = FormBody::from_pairs(&[
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
    ]);
    representative::create(&service, DASHBOARD, "acct_s2", rep_body, UploadMap::new())
        .await
        .unwrap();

    owner::add_owner(
        &service,
        DASHBOARD,
        "acct_s2",
        owner_body("Hans", "Beispiel"),
        UploadMap::new(),
    )
    .await
    .unwrap();

    let submitted =
        submission::submit_account(&service, DASHBOARD, "acct_s2", UploadMap::new())
            .await
            .unwrap();
    assert!(!submitted.metadata.contains_key("registration_company"));
    assert!(!submitted.metadata.contains_key("registration_owners"));
    assert_eq!(submitted.company.as_ref().unwrap()["name"], serde_json::json!("Beispiel GmbH"));

    // The stored owner became an upstream person
    let persons = service
        .sync()
        .list_persons(&AccountId::parse("acct_s2").unwrap())
        .await
        .unwrap();
    assert!(persons
        .iter()
        .any(|p| p.relationship.owner && p.first_name.as_deref() == Some("Hans")));
}

#[tokio::test]
async fn test_submission_blocked_without_bank_account() {
    let mut account = test_account("acct_s3", BusinessType::Individual, "DE");
    account.external_accounts.clear();
    let service = service_with(account).await;

    individual::update_registration(
        &service,
        DASHBOARD,
        "acct_s3",
        german_individual_body(),
        UploadMap::new(),
    )
    .await
    .unwrap();

    let err = submission::submit_account(&service, DASHBOARD, "acct_s3", UploadMap::new())
        .await
        .unwrap_err();
    assert_eq!(err, OnboardingError::invalid_field("external_account"));
}

#[tokio::test]
async fn test_document_upload_resolves_into_draft() {
    let mut account = test_account("acct_u1", BusinessType::Individual, "DE");
    account.requirements.currently_due = vec![
        "individual.first_name".to_string(),
        "individual.verification.document.front".to_string(),
    ];
    let service = service_with(account).await;

    // Without the upload, the document requirement is the first failure
    // after first_name is satisfied
    let body = FormBody::from_pairs(&[("first_name", "Max")]);
    let err = individual::update_registration(
        &service,
        DASHBOARD,
        "acct_u1",
        body.clone(),
        UploadMap::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        OnboardingError::invalid_field("verification_document_front")
    );

    let uploads: UploadMap = [(
        "verification_document_front".to_string(),
        UploadedFile { name: "passport.png".into(), content: vec![1u8; 64] },
    )]
    .into();
    let updated =
        individual::update_registration(&service, DASHBOARD, "acct_u1", body, uploads)
            .await
            .unwrap();
    let draft = updated.metadata.get("registration_individual").unwrap();
    assert!(draft.contains("file_"));
}
