//! Requirement validation
//!
//! Walks a requirement list in order and reports the first unmet entry as
//! `invalid-<flatFieldName>`. The list order therefore defines the error
//! order callers observe; it must not be re-sorted here.
//!
//! Rules, in evaluation order:
//!
//! 1. Format checks run first over whatever is present in the body -
//!    a malformed value is reported before any missing one.
//! 2. Always-optional paths are skipped: address `line2`, the
//!    relationship flags, and additional-document entries.
//! 3. `business_profile.url` and `business_profile.product_description`
//!    satisfy each other; when both are absent the reported field is the
//!    URL variant.
//! 4. Verification-document paths are satisfied by the upload set (or an
//!    already-persisted value on update flows), never by the body map.
//! 5. Everything else must be present and non-blank in the body or in the
//!    persisted values.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use core_kernel::OnboardingError;

use crate::codec::{self, FieldScope};
use crate::country_spec;

/// Flat field name -> submitted value
pub type FieldMap = HashMap<String, String>;

const RELATIONSHIP_PATHS: &[&str] = &[
    "relationship.title",
    "relationship.executive",
    "relationship.director",
    "relationship.owner",
    "relationship.percent_ownership",
];

fn is_always_optional(relative: &str) -> bool {
    relative.ends_with(".line2")
        || RELATIONSHIP_PATHS.contains(&relative)
        || relative.contains("additional_document")
}

fn present(map: &FieldMap, flat: &str) -> bool {
    map.get(flat).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn present_anywhere(body: &FieldMap, existing: Option<&FieldMap>, flat: &str) -> bool {
    present(body, flat) || existing.map(|e| present(e, flat)).unwrap_or(false)
}

/// Validates a requirement list against a submitted form
///
/// `requirements` is either a static table entry or the account's
/// authoritative `currently_due` array. `uploads` holds the field names
/// with a pending uploaded document; `existing` holds already-persisted
/// values consulted on update flows.
pub fn validate_requirements(
    requirements: &[impl AsRef<str>],
    scope: FieldScope,
    country: &str,
    body: &FieldMap,
    uploads: &HashSet<String>,
    existing: Option<&FieldMap>,
) -> Result<(), OnboardingError> {
    validate_formats(country, body)?;

    for path in requirements {
        let relative = codec::relative_path(path.as_ref(), scope);
        if is_always_optional(&relative) {
            continue;
        }
        let flat = relative.replace('.', "_");

        if codec::is_document_path(&relative) {
            if document_satisfied(&flat, uploads, existing) {
                continue;
            }
            debug!(field = %flat, "verification document missing");
            return Err(OnboardingError::invalid_field(flat));
        }

        if relative == "business_profile.url" || relative == "business_profile.product_description" {
            if present_anywhere(body, existing, "business_profile_url")
                || present_anywhere(body, existing, "business_profile_product_description")
            {
                continue;
            }
            // The URL variant is always the reported field when both are absent
            return Err(OnboardingError::invalid_field("business_profile_url"));
        }

        if !present_anywhere(body, existing, &flat) {
            debug!(field = %flat, "required field missing");
            return Err(OnboardingError::invalid_field(flat));
        }
    }
    Ok(())
}

fn document_satisfied(flat: &str, uploads: &HashSet<String>, existing: Option<&FieldMap>) -> bool {
    if uploads.contains(flat) {
        return true;
    }
    // A bare `verification.document` entry is satisfied by its front side
    let front = format!("{flat}_front");
    if uploads.contains(&front) {
        return true;
    }
    existing
        .map(|e| present(e, flat) || present(e, &front))
        .unwrap_or(false)
}

/// Format checks applied to whatever is present, independent of the
/// requirement list
fn validate_formats(country: &str, body: &FieldMap) -> Result<(), OnboardingError> {
    validate_dob(body)?;
    validate_percent_ownership(body)?;
    validate_countries(body)?;
    validate_states(country, body)?;
    Ok(())
}

fn validate_dob(body: &FieldMap) -> Result<(), OnboardingError> {
    let components = ["dob_day", "dob_month", "dob_year"];
    if !components.iter().any(|c| present(body, c)) {
        return Ok(());
    }
    // One component present requires all three
    for component in components {
        if !present(body, component) {
            return Err(OnboardingError::invalid_field(component));
        }
    }
    let parse = |field: &str| -> Result<i32, OnboardingError> {
        body[field]
            .trim()
            .parse()
            .map_err(|_| OnboardingError::invalid_field(field))
    };
    let day = parse("dob_day")?;
    if !(1..=31).contains(&day) {
        return Err(OnboardingError::invalid_field("dob_day"));
    }
    let month = parse("dob_month")?;
    if !(1..=12).contains(&month) {
        return Err(OnboardingError::invalid_field("dob_month"));
    }
    let year = parse("dob_year")?;
    let latest = Utc::now().year() - 18;
    if !(1900..=latest).contains(&year) {
        return Err(OnboardingError::invalid_field("dob_year"));
    }
    Ok(())
}

fn validate_percent_ownership(body: &FieldMap) -> Result<(), OnboardingError> {
    let field = "relationship_percent_ownership";
    if !present(body, field) {
        return Ok(());
    }
    let percent: Decimal = body[field]
        .trim()
        .parse()
        .map_err(|_| OnboardingError::invalid_field(field))?;
    if percent < Decimal::ZERO || percent > Decimal::from(100) {
        return Err(OnboardingError::invalid_field(field));
    }
    Ok(())
}

fn validate_countries(body: &FieldMap) -> Result<(), OnboardingError> {
    for field in ["address_country", "personal_address_country", "country"] {
        if present(body, field) && !country_spec::is_supported(body[field].trim()) {
            return Err(OnboardingError::invalid_field(field));
        }
    }
    Ok(())
}

fn validate_states(country: &str, body: &FieldMap) -> Result<(), OnboardingError> {
    let pairs = [
        ("address_state", "address_country"),
        ("personal_address_state", "personal_address_country"),
    ];
    for (state_field, country_field) in pairs {
        if !present(body, state_field) {
            continue;
        }
        // A posted country overrides the account's country
        let effective = body
            .get(country_field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(country);
        let Some(spec) = country_spec::country(effective) else {
            continue;
        };
        if spec.divisions.is_empty() {
            continue;
        }
        if country_spec::division(effective, body[state_field].trim()).is_none() {
            return Err(OnboardingError::invalid_field(state_field));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{requirements, RequirementRole};

    fn body(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn german_individual_body() -> FieldMap {
        body(&[
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

    #[test]
    fn german_individual_body_passes() {
        let list = requirements("DE", RequirementRole::Individual).unwrap();
        let result = validate_requirements(
            list,
            FieldScope::Individual,
            "DE",
            &german_individual_body(),
            &HashSet::new(),
            None,
        );
        assert!(result.is_ok(), "unexpected: {result:?}");
    }

    #[test]
    fn missing_city_reports_invalid_address_city() {
        let list = requirements("DE", RequirementRole::Individual).unwrap();
        let mut form = german_individual_body();
        form.remove("address_city");
        let err = validate_requirements(
            list,
            FieldScope::Individual,
            "DE",
            &form,
            &HashSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("address_city"));
    }

    #[test]
    fn first_missing_field_wins() {
        let list = ["individual.first_name", "individual.last_name"];
        let err = validate_requirements(
            &list,
            FieldScope::Individual,
            "DE",
            &FieldMap::new(),
            &HashSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("first_name"));

        // Satisfying the first moves the report to the second
        let form = body(&[("first_name", "Max")]);
        let err = validate_requirements(
            &list,
            FieldScope::Individual,
            "DE",
            &form,
            &HashSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("last_name"));
    }

    #[test]
    fn blank_values_do_not_satisfy_requirements() {
        let list = ["individual.first_name"];
        let form = body(&[("first_name", "   ")]);
        let err = validate_requirements(
            &list,
            FieldScope::Individual,
            "DE",
            &form,
            &HashSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("first_name"));
    }

    #[test]
    fn product_description_satisfies_url_requirement() {
        let list = ["business_profile.url"];
        let form = body(&[("business_profile_product_description", "Handmade goods")]);
        assert!(validate_requirements(
            &list,
            FieldScope::Company,
            "DE",
            &form,
            &HashSet::new(),
            None,
        )
        .is_ok());
    }

    #[test]
    fn missing_both_url_and_description_reports_the_url_variant() {
        for listed in [
            "business_profile.url",
            "business_profile.product_description",
        ] {
            let err = validate_requirements(
                &[listed],
                FieldScope::Company,
                "DE",
                &FieldMap::new(),
                &HashSet::new(),
                None,
            )
            .unwrap_err();
            assert_eq!(err, OnboardingError::invalid_field("business_profile_url"));
        }
    }

    #[test]
    fn exception_fields_are_never_required() {
        let list = [
            "address.line2",
            "address_kanji.line2",
            "relationship.title",
            "relationship.executive",
            "relationship.director",
            "relationship.owner",
            "relationship.percent_ownership",
            "verification.additional_document.front",
        ];
        assert!(validate_requirements(
            &list,
            FieldScope::Person,
            "DE",
            &FieldMap::new(),
            &HashSet::new(),
            None,
        )
        .is_ok());
    }

    #[test]
    fn documents_check_the_upload_set_not_the_body() {
        let list = ["verification.document.front"];
        // A body value does not satisfy a document requirement
        let form = body(&[("verification_document_front", "file_123")]);
        let err = validate_requirements(
            &list,
            FieldScope::Person,
            "DE",
            &form,
            &HashSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            OnboardingError::invalid_field("verification_document_front")
        );

        let uploads: HashSet<String> = ["verification_document_front".to_string()].into();
        assert!(validate_requirements(
            &list,
            FieldScope::Person,
            "DE",
            &FieldMap::new(),
            &uploads,
            None,
        )
        .is_ok());
    }

    #[test]
    fn persisted_document_satisfies_update_flow() {
        let list = ["verification.document.front"];
        let existing = body(&[("verification_document_front", "file_persisted")]);
        assert!(validate_requirements(
            &list,
            FieldScope::Person,
            "DE",
            &FieldMap::new(),
            &HashSet::new(),
            Some(&existing),
        )
        .is_ok());
    }

    #[test]
    fn japan_representative_missing_kanji_postal_code() {
        let list = requirements("JP", RequirementRole::Representative).unwrap();
        let mut form = body(&[
            ("address_kana_city", "ｼﾌﾞﾔ"),
            ("address_kana_line1", "27-15"),
            ("address_kana_postal_code", "1500001"),
            ("address_kana_state", "13"),
            ("address_kana_town", "ｼﾞﾝｸﾞｳﾏｴ 3-"),
            ("address_kanji_city", "渋谷区"),
            ("address_kanji_line1", "２７－１５"),
            ("address_kanji_postal_code", "1500001"),
            ("address_kanji_state", "13"),
            ("address_kanji_town", "神宮前 ３丁目"),
            ("dob_day", "1"),
            ("dob_month", "1"),
            ("dob_year", "1950"),
            ("email", "rep@example.com"),
            ("first_name_kana", "ﾄｳｷﾖｳﾄ"),
            ("first_name_kanji", "東京都"),
            ("gender", "female"),
            ("last_name_kana", "ﾄｳｷﾖｳﾄ"),
            ("last_name_kanji", "東京都"),
            ("phone", "+81112345678"),
        ]);
        assert!(validate_requirements(
            list,
            FieldScope::Person,
            "JP",
            &form,
            &HashSet::new(),
            None,
        )
        .is_ok());

        form.remove("address_kanji_postal_code");
        let err = validate_requirements(
            list,
            FieldScope::Person,
            "JP",
            &form,
            &HashSet::new(),
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            OnboardingError::invalid_field("address_kanji_postal_code")
        );
    }

    #[test]
    fn dob_components_validated_as_a_unit() {
        let form = body(&[("dob_day", "1")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("dob_month"));

        let form = body(&[("dob_day", "32"), ("dob_month", "1"), ("dob_year", "1980")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("dob_day"));

        let form = body(&[("dob_day", "1"), ("dob_month", "13"), ("dob_year", "1980")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("dob_month"));
    }

    #[test]
    fn dob_year_enforces_minimum_age() {
        let underage = (Utc::now().year() - 17).to_string();
        let form = body(&[("dob_day", "1"), ("dob_month", "1"), ("dob_year", &underage)]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("dob_year"));

        let form = body(&[("dob_day", "1"), ("dob_month", "1"), ("dob_year", "1899")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("dob_year"));
    }

    #[test]
    fn percent_ownership_bounds() {
        for (value, ok) in [("0", true), ("100", true), ("42.5", true), ("101", false), ("-1", false), ("abc", false)] {
            let form = body(&[("relationship_percent_ownership", value)]);
            assert_eq!(
                validate_formats("DE", &form).is_ok(),
                ok,
                "value {value:?}"
            );
        }
    }

    #[test]
    fn state_validated_against_division_table() {
        let form = body(&[("address_state", "BE")]);
        assert!(validate_formats("DE", &form).is_ok());

        let form = body(&[("address_state", "ZZ")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("address_state"));
    }

    #[test]
    fn posted_country_overrides_account_country_for_states() {
        // BE is a German division but not an Australian one
        let form = body(&[("address_state", "BE"), ("address_country", "AU")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("address_state"));
    }

    #[test]
    fn countries_without_division_data_accept_any_state() {
        let form = body(&[("address_state", "Greater London")]);
        assert!(validate_formats("GB", &form).is_ok());
    }

    #[test]
    fn unknown_country_code_rejected() {
        let form = body(&[("address_country", "ZZ")]);
        let err = validate_formats("DE", &form).unwrap_err();
        assert_eq!(err, OnboardingError::invalid_field("address_country"));
    }
}
