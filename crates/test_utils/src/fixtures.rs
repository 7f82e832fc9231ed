//! Country-specific sample payloads
//!
//! Each fixture is a known-good submission for its (country, role)
//! requirement list; tests knock individual fields out to provoke
//! specific failures.

use domain_requirements::validator::FieldMap;

fn map(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A complete German individual registration
pub fn de_individual_body() -> FieldMap {
    map(&[
        ("address_city", "Berlin"),
        ("address_line1", "123"),
        ("address_postal_code", "01067"),
        ("address_state", "BE"),
        ("dob_day", "1"),
        ("dob_month", "1"),
        ("dob_year", "1950"),
        ("first_name", "Max"),
        ("last_name", "Mustermann"),
        ("phone", "+4930123456"),
    ])
}

/// A complete US individual registration
pub fn us_individual_body() -> FieldMap {
    map(&[
        ("address_city", "New York"),
        ("address_line1", "285 Fulton St"),
        ("address_postal_code", "10007"),
        ("address_state", "NY"),
        ("dob_day", "1"),
        ("dob_month", "1"),
        ("dob_year", "1950"),
        ("first_name", "Jane"),
        ("last_name", "Doe"),
        ("phone", "+12125551234"),
        ("ssn_last_4", "0000"),
    ])
}

/// A complete German company registration
pub fn de_company_body() -> FieldMap {
    map(&[
        ("business_profile_mcc", "5734"),
        ("business_profile_url", "https://beispiel.de"),
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 1"),
        ("address_postal_code", "10117"),
        ("company_name", "Beispiel GmbH"),
        ("company_phone", "+4930123456"),
        ("company_tax_id", "DE123456789"),
    ])
}

/// A complete German company-representative submission
pub fn de_representative_body() -> FieldMap {
    map(&[
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 1"),
        ("address_postal_code", "10117"),
        ("dob_day", "2"),
        ("dob_month", "3"),
        ("dob_year", "1970"),
        ("email", "rep@beispiel.de"),
        ("first_name", "Erika"),
        ("last_name", "Mustermann"),
        ("phone", "+4930123457"),
        ("relationship_title", "CEO"),
    ])
}

/// A complete Japanese company-representative submission, with the kana
/// and kanji address variants
pub fn jp_representative_body() -> FieldMap {
    map(&[
        ("address_kana_city", "ｼﾌﾞﾔ"),
        ("address_kana_line1", "27-15"),
        ("address_kana_postal_code", "1500001"),
        ("address_kana_state", "13"),
        ("address_kana_town", "ｼﾞﾝｸﾞｳﾏｴ 3-"),
        ("address_kanji_city", "渋谷区"),
        ("address_kanji_line1", "２７－１５"),
        ("address_kanji_postal_code", "1500001"),
        ("address_kanji_state", "13"),
        ("address_kanji_town", "神宮前 ３丁目"),
        ("dob_day", "1"),
        ("dob_month", "1"),
        ("dob_year", "1950"),
        ("email", "rep@example.jp"),
        ("first_name_kana", "ﾄｳｷﾖｳﾄ"),
        ("first_name_kanji", "東京都"),
        ("gender", "female"),
        ("last_name_kana", "ﾄｳｷﾖｳﾄ"),
        ("last_name_kanji", "東京都"),
        ("phone", "+81112345678"),
    ])
}

/// A complete German beneficial-owner submission
pub fn de_owner_body(first_name: &str, last_name: &str) -> FieldMap {
    let mut body = map(&[
        ("address_city", "Berlin"),
        ("address_line1", "Unter den Linden 2"),
        ("address_postal_code", "10117"),
        ("dob_day", "4"),
        ("dob_month", "5"),
        ("dob_year", "1968"),
        ("email", "owner@beispiel.de"),
    ]);
    body.insert("first_name".to_string(), first_name.to_string());
    body.insert("last_name".to_string(), last_name.to_string());
    body
}
