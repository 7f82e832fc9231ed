//! Boundary data transfer objects
//!
//! The host framework hands over submitted forms as flat field-name to
//! value maps and uploads as field-name to file maps. `FormBody` wraps
//! the former with the trim/presence semantics the handlers rely on.

use std::collections::HashSet;

use domain_requirements::validator::FieldMap;
use infra_stripe::UploadMap;

/// A submitted flat form body
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    fields: FieldMap,
}

impl FormBody {
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Convenience constructor for tests and fixtures
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// The trimmed value of a field, when present and non-blank
    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn is_present(&self, field: &str) -> bool {
        self.value(field).is_some()
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn into_fields(self) -> FieldMap {
        self.fields
    }
}

impl From<FieldMap> for FormBody {
    fn from(fields: FieldMap) -> Self {
        Self::new(fields)
    }
}

/// The field names carrying an upload, as the validator consumes them
pub fn upload_field_names(uploads: &UploadMap) -> HashSet<String> {
    uploads.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_read_as_absent() {
        let body = FormBody::from_pairs(&[("first_name", "  "), ("last_name", "Doe")]);
        assert!(!body.is_present("first_name"));
        assert_eq!(body.value("last_name"), Some("Doe"));
        assert!(body.value("missing").is_none());
    }
}
