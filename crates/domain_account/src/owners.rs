//! Beneficial-owner collection rules
//!
//! Additional owners accumulate as drafts in the account metadata until
//! final submission. Two rules apply before any field validation or
//! upstream call: the collection is capped, and a second owner may not
//! reuse an existing owner's full name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::OnboardingError;
use domain_requirements::validator::FieldMap;

/// Maximum number of additional owners on one account
pub const MAXIMUM_OWNERS: usize = 4;

/// Metadata key the owner collection is stored under
pub const OWNERS_METADATA_KEY: &str = "registration_owners";

/// The stored additional owners of a company account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredOwners {
    owners: Vec<FieldMap>,
}

impl StoredOwners {
    /// Loads the collection from account metadata
    pub fn load(metadata: &HashMap<String, String>) -> Result<Self, OnboardingError> {
        match metadata.get(OWNERS_METADATA_KEY) {
            None => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw)
                .map(|owners| Self { owners })
                .map_err(|_| OnboardingError::Unknown),
        }
    }

    /// The collection as its metadata JSON value
    pub fn to_json(&self) -> Result<String, OnboardingError> {
        serde_json::to_string(&self.owners).map_err(|_| OnboardingError::Unknown)
    }

    /// Serializes the collection back into account metadata
    pub fn store(&self, metadata: &mut HashMap<String, String>) -> Result<(), OnboardingError> {
        metadata.insert(OWNERS_METADATA_KEY.to_string(), self.to_json()?);
        Ok(())
    }

    /// Rejects a fifth owner regardless of field validity
    pub fn ensure_slot(&self) -> Result<(), OnboardingError> {
        if self.owners.len() >= MAXIMUM_OWNERS {
            return Err(OnboardingError::MaximumOwners);
        }
        Ok(())
    }

    /// Rejects a second owner with an identical first+last name
    pub fn ensure_unique_name(&self, body: &FieldMap) -> Result<(), OnboardingError> {
        let name = |map: &FieldMap, key: &str| {
            map.get(key).map(|v| v.trim().to_lowercase()).unwrap_or_default()
        };
        let first = name(body, "first_name");
        let last = name(body, "last_name");
        if first.is_empty() && last.is_empty() {
            return Ok(());
        }
        let duplicate = self.owners.iter().any(|owner| {
            name(owner, "first_name") == first && name(owner, "last_name") == last
        });
        if duplicate {
            return Err(OnboardingError::DuplicateName);
        }
        Ok(())
    }

    /// Appends an owner draft after the slot and name checks pass
    pub fn push(&mut self, fields: FieldMap) -> Result<(), OnboardingError> {
        self.ensure_slot()?;
        self.ensure_unique_name(&fields)?;
        self.owners.push(fields);
        Ok(())
    }

    pub fn owners(&self) -> &[FieldMap] {
        &self.owners
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
