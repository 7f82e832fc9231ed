//! Registration drafts
//!
//! A draft is the client-local representation of one role's in-progress
//! submission: a flat field map serialized as JSON into the connected
//! account's metadata. It is created on the first partial submission,
//! merged on every subsequent one, and consumed (erased) when the role
//! is finally submitted upstream.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::OnboardingError;
use domain_requirements::validator::FieldMap;

/// One role's in-progress registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    fields: FieldMap,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the draft stored under `key`, if any
    ///
    /// Metadata values are written exclusively by [`store`](Self::store),
    /// so unparseable JSON means the metadata was corrupted out-of-band.
    pub fn load(
        metadata: &HashMap<String, String>,
        key: &str,
    ) -> Result<Option<Self>, OnboardingError> {
        match metadata.get(key) {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(|fields| Some(Self { fields }))
                .map_err(|_| OnboardingError::Unknown),
        }
    }

    /// Merges a partial submission into the draft
    ///
    /// Non-blank values overwrite; blank values are ignored rather than
    /// clearing, matching how repeated partial form posts behave.
    pub fn merge(&mut self, body: &FieldMap) {
        for (field, value) in body {
            if !value.trim().is_empty() {
                self.fields.insert(field.clone(), value.clone());
            }
        }
    }

    /// Serializes the draft into the metadata map under `key`
    pub fn store(
        &self,
        metadata: &mut HashMap<String, String>,
        key: &str,
    ) -> Result<(), OnboardingError> {
        let raw = serde_json::to_string(&self.fields).map_err(|_| OnboardingError::Unknown)?;
        metadata.insert(key.to_string(), raw);
        Ok(())
    }

    /// Removes and returns the draft stored under `key`
    ///
    /// Called at final submission, after which the draft no longer
    /// exists anywhere.
    pub fn consume(
        metadata: &mut HashMap<String, String>,
        key: &str,
    ) -> Result<Option<Self>, OnboardingError> {
        let draft = Self::load(metadata, key)?;
        metadata.remove(key);
        Ok(draft)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Mutable access for in-place substitutions (resolved file tokens)
    pub fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    pub fn into_fields(self) -> FieldMap {
        self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
