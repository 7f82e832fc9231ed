//! Opaque identifiers for Stripe-owned objects
//!
//! Stripe mints the ids for connected accounts, persons, and uploaded
//! files; this system never generates them. Newtype wrappers validate the
//! well-known id prefix on parse so a malformed id is rejected before any
//! upstream call is made.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::OnboardingError;

macro_rules! define_stripe_id {
    ($name:ident, $prefix:literal, $err:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validates the raw id string against the expected prefix
            pub fn parse(raw: impl AsRef<str>) -> Result<Self, OnboardingError> {
                let raw = raw.as_ref().trim();
                if raw.len() > $prefix.len() && raw.starts_with($prefix) {
                    Ok(Self(raw.to_string()))
                } else {
                    Err($err)
                }
            }

            /// Returns the raw id string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The id prefix Stripe uses for this object type
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = OnboardingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_stripe_id!(AccountId, "acct_", OnboardingError::InvalidStripeId);
define_stripe_id!(PersonId, "person_", OnboardingError::InvalidPerson);
define_stripe_id!(FileId, "file_", OnboardingError::InvalidToken);

/// Identifier for a locally generated registration draft
///
/// Drafts never round-trip through Stripe, so unlike the opaque ids above
/// they are minted here as UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(Uuid);

impl DraftId {
    /// Creates a new random draft identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_accepts_prefixed_id() {
        let id = AccountId::parse("acct_1032D82eZvKYlo2C").unwrap();
        assert_eq!(id.as_str(), "acct_1032D82eZvKYlo2C");
        assert_eq!(AccountId::prefix(), "acct_");
    }

    #[test]
    fn account_id_rejects_wrong_prefix() {
        assert_eq!(
            AccountId::parse("person_123").unwrap_err(),
            OnboardingError::InvalidStripeId
        );
        assert_eq!(
            AccountId::parse("").unwrap_err(),
            OnboardingError::InvalidStripeId
        );
        // A bare prefix with no suffix is not an id
        assert_eq!(
            AccountId::parse("acct_").unwrap_err(),
            OnboardingError::InvalidStripeId
        );
    }

    #[test]
    fn person_id_error_kind_is_invalid_person() {
        assert_eq!(
            PersonId::parse("acct_1234").unwrap_err(),
            OnboardingError::InvalidPerson
        );
    }

    #[test]
    fn file_id_error_kind_is_invalid_token() {
        assert_eq!(
            FileId::parse("upload-1").unwrap_err(),
            OnboardingError::InvalidToken
        );
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        let id: PersonId = "person_abc123".parse().unwrap();
        assert_eq!(id.to_string(), "person_abc123");
    }

    #[test]
    fn draft_id_display_carries_prefix() {
        let id = DraftId::new();
        assert!(id.to_string().starts_with("draft-"));
    }
}
