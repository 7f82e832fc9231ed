//! Error-to-message mapping
//!
//! The UI renders one message template per error wire string; the
//! mapping is the identity over [`OnboardingError::message_key`]. This
//! module exists so the boundary contract has a single named seam the
//! host framework calls, and so the contract is pinned by tests in one
//! place.

use core_kernel::OnboardingError;

/// The UI message template key for an error
pub fn message_key(error: &OnboardingError) -> String {
    error.message_key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_key_on_the_flat_field_name() {
        assert_eq!(
            message_key(&OnboardingError::invalid_field("address_kanji_postal_code")),
            "invalid-address_kanji_postal_code"
        );
    }

    #[test]
    fn sentinels_key_on_their_wire_strings() {
        assert_eq!(message_key(&OnboardingError::MaximumOwners), "maximum-owners");
        assert_eq!(message_key(&OnboardingError::Unknown), "unknown-error");
    }
}
