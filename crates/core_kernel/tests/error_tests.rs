//! Integration tests for the error vocabulary
//!
//! The rendered strings are the observable contract between this system
//! and its UI callers; these tests pin every one of them.

use core_kernel::OnboardingError;

#[test]
fn test_full_wire_vocabulary() {
    let cases = [
        (OnboardingError::invalid_field("dob_day"), "invalid-dob_day"),
        (OnboardingError::InvalidStripeId, "invalid-stripeid"),
        (OnboardingError::InvalidAccount, "invalid-account"),
        (OnboardingError::InvalidStripeAccount, "invalid-stripe-account"),
        (OnboardingError::InvalidPerson, "invalid-person"),
        (OnboardingError::InvalidToken, "invalid-token"),
        (OnboardingError::DuplicateName, "duplicate-name"),
        (OnboardingError::MaximumOwners, "maximum-owners"),
        (OnboardingError::UpstreamUnavailable, "upstream-unavailable"),
        (OnboardingError::Unknown, "unknown-error"),
    ];
    for (err, wire) in cases {
        assert_eq!(err.to_string(), wire);
        assert_eq!(err.message_key(), wire);
    }
}

#[test]
fn test_field_discrimination_is_structural() {
    // Callers must never need to prefix-match strings to find the field
    let err = OnboardingError::invalid_field("business_profile_url");
    match &err {
        OnboardingError::InvalidField { field } => assert_eq!(field, "business_profile_url"),
        other => panic!("unexpected variant: {other:?}"),
    }
}
