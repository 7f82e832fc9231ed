//! Property-based test data generators

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;

use domain_requirements::validator::FieldMap;

use crate::fixtures::de_owner_body;

/// Strategy over plausible form field values
pub fn arb_field_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \\-\\.]{1,40}"
}

/// Strategy selecting one field name out of a fixed list
pub fn arb_field_from(fields: &'static [&'static str]) -> impl Strategy<Value = &'static str> {
    (0..fields.len()).prop_map(move |i| fields[i])
}

/// An owner body with a randomized, realistic name
pub fn random_owner_body() -> FieldMap {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    de_owner_body(&first, &last)
}
