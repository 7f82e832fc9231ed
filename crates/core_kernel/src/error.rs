//! The error vocabulary surfaced to UI/API callers
//!
//! Every error leaving this system renders as one of a fixed set of wire
//! strings (`invalid-<field>`, `duplicate-name`, `maximum-owners`, ...).
//! The UI maps each string 1:1 onto a message template of the same name,
//! so the `Display` output here is a compatibility contract.
//!
//! Internally errors carry a structured kind and, for field errors, the
//! flat form-field name. Callers discriminate on the variant, never on
//! string prefixes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the onboarding system
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OnboardingError {
    /// A required form field is missing or its value failed validation.
    /// Carries the flat form-field name (e.g. `address_city`).
    #[error("invalid-{field}")]
    InvalidField { field: String },

    /// A Stripe object id failed prefix validation
    #[error("invalid-stripeid")]
    InvalidStripeId,

    /// The dashboard account does not exist or is not accessible
    #[error("invalid-account")]
    InvalidAccount,

    /// The connected account exists but is the wrong business type or
    /// belongs to another dashboard account
    #[error("invalid-stripe-account")]
    InvalidStripeAccount,

    /// The person id does not exist on the connected account
    #[error("invalid-person")]
    InvalidPerson,

    /// A file token or upload reference is malformed
    #[error("invalid-token")]
    InvalidToken,

    /// A second beneficial owner with an identical first+last name
    #[error("duplicate-name")]
    DuplicateName,

    /// The connected account already holds the maximum number of
    /// additional owners
    #[error("maximum-owners")]
    MaximumOwners,

    /// The retry budget against the Stripe API was exhausted
    #[error("upstream-unavailable")]
    UpstreamUnavailable,

    /// An unrecognized upstream failure
    #[error("unknown-error")]
    Unknown,
}

impl OnboardingError {
    /// Creates a field error from a flat form-field name
    pub fn invalid_field(field: impl Into<String>) -> Self {
        OnboardingError::InvalidField { field: field.into() }
    }

    /// The flat form-field name, for field errors
    pub fn field(&self) -> Option<&str> {
        match self {
            OnboardingError::InvalidField { field } => Some(field),
            _ => None,
        }
    }

    /// True for errors the UI attributes to a specific form field
    pub fn is_field_error(&self) -> bool {
        matches!(self, OnboardingError::InvalidField { .. })
    }

    /// The wire string for this error, identical to its UI message key
    pub fn message_key(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_render_flat_field_name() {
        let err = OnboardingError::invalid_field("address_city");
        assert_eq!(err.to_string(), "invalid-address_city");
        assert_eq!(err.field(), Some("address_city"));
        assert!(err.is_field_error());
    }

    #[test]
    fn sentinel_kinds_render_fixed_strings() {
        assert_eq!(OnboardingError::InvalidStripeId.to_string(), "invalid-stripeid");
        assert_eq!(
            OnboardingError::InvalidStripeAccount.to_string(),
            "invalid-stripe-account"
        );
        assert_eq!(OnboardingError::DuplicateName.to_string(), "duplicate-name");
        assert_eq!(OnboardingError::MaximumOwners.to_string(), "maximum-owners");
        assert_eq!(
            OnboardingError::UpstreamUnavailable.to_string(),
            "upstream-unavailable"
        );
        assert_eq!(OnboardingError::Unknown.to_string(), "unknown-error");
    }

    #[test]
    fn sentinel_kinds_carry_no_field() {
        assert_eq!(OnboardingError::InvalidAccount.field(), None);
        assert!(!OnboardingError::InvalidAccount.is_field_error());
    }
}
