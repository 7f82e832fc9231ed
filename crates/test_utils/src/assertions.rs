//! Assertion helpers for the error vocabulary

use core_kernel::OnboardingError;

/// Asserts an error is `invalid-<field>` for exactly the given field
pub fn assert_field_error(result: Result<impl std::fmt::Debug, OnboardingError>, field: &str) {
    match result {
        Err(OnboardingError::InvalidField { field: actual }) => {
            assert_eq!(actual, field, "wrong field attributed");
        }
        other => panic!("expected invalid-{field}, got {other:?}"),
    }
}

/// Asserts an error renders exactly the given wire string
pub fn assert_wire_string(error: &OnboardingError, expected: &str) {
    assert_eq!(error.to_string(), expected);
}
