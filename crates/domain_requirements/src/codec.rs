//! Field name codec
//!
//! Requirement paths are dotted (`individual.address_kana.city`); form
//! fields are flat, underscore-joined (`address_kana_city`). Flattening is
//! a straight join, but the reverse direction is ambiguous: both the
//! nested keys and the leaf names may themselves contain underscores
//! (`address_kana` vs `first_name_kana`). Segmentation therefore runs a
//! greedy longest-match against the fixed vocabulary of compound segments
//! Stripe uses, so `address_kana_city` nests as `address_kana.city` while
//! `first_name_kana` stays a single leaf.

use serde_json::{Map, Value};

/// The entity a requirement path is scoped to
///
/// Requirement arrays prefix their paths differently per entity:
/// `individual.dob.day` for individual accounts, `company.address.city`
/// for companies, `<personid>.dob.day` for persons. Form field names are
/// entity-relative, so each scope strips its own prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    Individual,
    Company,
    Person,
}

/// Compound path segments, longest first
///
/// Every entry is atomic: its internal underscores never mark a nesting
/// boundary. Longest-first ordering makes the greedy match deterministic
/// (`first_name_kana` wins over `first_name`).
const COMPOUND_SEGMENTS: &[&str] = &[
    "additional_document",
    "registration_number",
    "product_description",
    "percent_ownership",
    "business_profile",
    "personal_address",
    "first_name_kanji",
    "first_name_kana",
    "last_name_kanji",
    "last_name_kana",
    "address_kanji",
    "address_kana",
    "postal_code",
    "first_name",
    "ssn_last_4",
    "last_name",
    "name_kanji",
    "name_kana",
    "id_number",
    "tax_id",
    "vat_id",
];

/// Relationship flags posted alongside person fields
///
/// These are never recursed into the nested payload accumulator; the
/// person handlers assemble the `relationship` object from them
/// explicitly. They are also optional regardless of requirement-list
/// membership.
pub const RELATIONSHIP_FLAGS: &[&str] = &[
    "relationship_title",
    "relationship_executive",
    "relationship_director",
    "relationship_owner",
    "relationship_percent_ownership",
];

/// True for the flat names of the relationship flags
pub fn is_relationship_flag(flat: &str) -> bool {
    RELATIONSHIP_FLAGS.contains(&flat)
}

/// Company subtrees whose form fields drop the `company_` prefix
///
/// The address and verification partials are shared across every
/// registration page, so their field names are unprefixed; company
/// scalars (`company_tax_id`, `company_name`) keep the prefix.
const COMPANY_SHARED_SUBTREES: &[&str] = &[
    "address",
    "address_kana",
    "address_kanji",
    "personal_address",
    "verification",
];

/// Strips the scope prefix from a requirement path, yielding the
/// entity-relative dotted path
pub fn relative_path(path: &str, scope: FieldScope) -> String {
    match scope {
        FieldScope::Individual => path
            .strip_prefix("individual.")
            .unwrap_or(path)
            .to_string(),
        FieldScope::Person => match path.split_once('.') {
            Some((head, rest)) if head.starts_with("person_") || head == "person" => {
                rest.to_string()
            }
            _ => path.to_string(),
        },
        FieldScope::Company => match path.strip_prefix("company.") {
            Some(rest) => {
                let head = rest.split('.').next().unwrap_or(rest);
                if COMPANY_SHARED_SUBTREES.contains(&head) {
                    rest.to_string()
                } else {
                    path.to_string()
                }
            }
            None => path.to_string(),
        },
    }
}

/// Converts a requirement path into its flat form field name
pub fn flatten(path: &str, scope: FieldScope) -> String {
    relative_path(path, scope).replace('.', "_")
}

/// Splits a flat field name into its nested path segments
pub fn segments(flat: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = flat;
    while !rest.is_empty() {
        let token = COMPOUND_SEGMENTS
            .iter()
            .find(|t| {
                rest == **t || (rest.starts_with(**t) && rest.as_bytes().get(t.len()) == Some(&b'_'))
            })
            .copied()
            .unwrap_or_else(|| match rest.find('_') {
                Some(idx) => &rest[..idx],
                None => rest,
            });
        out.push(token);
        rest = rest
            .get(token.len() + 1..)
            .unwrap_or("");
    }
    out
}

/// The dotted path a flat field name corresponds to
pub fn nested_path(flat: &str) -> String {
    segments(flat).join(".")
}

/// Inserts `value` at the nested location named by `flat` in the payload
/// accumulator
///
/// Returns `false` without touching the accumulator for relationship
/// flags, which the person handlers assemble separately.
pub fn nest(flat: &str, value: Value, acc: &mut Map<String, Value>) -> bool {
    if is_relationship_flag(flat) {
        return false;
    }
    let segs = segments(flat);
    if segs.is_empty() {
        return false;
    }
    let mut node = acc;
    for seg in &segs[..segs.len() - 1] {
        let entry = node
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            // A scalar landed on an intermediate key; the object wins
            *entry = Value::Object(Map::new());
        }
        let Value::Object(map) = entry else { unreachable!() };
        node = map;
    }
    node.insert(segs[segs.len() - 1].to_string(), value);
    true
}

/// Reads the value back out of an accumulator along a flat field name
pub fn read_nested<'a>(flat: &str, acc: &'a Map<String, Value>) -> Option<&'a Value> {
    let segs = segments(flat);
    let (leaf, dirs) = segs.split_last()?;
    let mut node = acc;
    for seg in dirs {
        node = node.get(*seg)?.as_object()?;
    }
    node.get(*leaf)
}

/// True for entity-relative paths satisfied by an uploaded document
/// rather than a literal body value
pub fn is_document_path(relative: &str) -> bool {
    relative == "verification"
        || relative.starts_with("verification.")
}
