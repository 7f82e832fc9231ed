//! Upstream error re-attribution
//!
//! Stripe validation failures name the offending attribute as a
//! bracket path (`company[address][city]`). The form layer needs the
//! originating flat field name, so the known company prefixes are
//! rewritten into the `invalid-<field>` vocabulary:
//!
//! | Param                         | Error                         |
//! |-------------------------------|-------------------------------|
//! | `company[address][city]`      | `invalid-address_city`        |
//! | `company[personal_address][X]`| `invalid-personal_address_X`  |
//! | `company[address_kana][X]`    | `invalid-address_kana_X`      |
//! | `company[address_kanji][X]`   | `invalid-address_kanji_X`     |
//! | `company[X]`                  | `invalid-company_X`           |
//!
//! Anything unrecognized degrades to `unknown-error`.

use tracing::warn;

use core_kernel::{GatewayError, OnboardingError};

/// Splits `company[address][city]` into `["company", "address", "city"]`
///
/// Returns `None` for strings that are not well-formed bracket paths.
fn bracket_segments(param: &str) -> Option<Vec<&str>> {
    let open = param.find('[')?;
    let head = &param[..open];
    if head.is_empty() {
        return None;
    }
    let mut segments = vec![head];
    let mut rest = &param[open..];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        if close == 0 {
            return None;
        }
        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some(segments)
}

/// Rewrites a raw bracket-path param into the flat error vocabulary
pub fn reattribute_param(param: &str) -> OnboardingError {
    let Some(segments) = bracket_segments(param) else {
        warn!(param, "unrecognized error param shape");
        return OnboardingError::Unknown;
    };
    if segments[0] != "company" {
        warn!(param, "error param outside the known company prefixes");
        return OnboardingError::Unknown;
    }
    match segments.as_slice() {
        ["company", subtree @ ("address" | "personal_address" | "address_kana"
        | "address_kanji"), rest @ ..]
            if !rest.is_empty() =>
        {
            let mut field = subtree.to_string();
            for segment in rest {
                field.push('_');
                field.push_str(segment);
            }
            OnboardingError::invalid_field(field)
        }
        ["company", rest @ ..] if !rest.is_empty() => {
            let mut field = "company".to_string();
            for segment in rest {
                field.push('_');
                field.push_str(segment);
            }
            OnboardingError::invalid_field(field)
        }
        _ => OnboardingError::Unknown,
    }
}

/// Maps a terminal gateway error onto the caller-facing vocabulary
///
/// Validation failures carrying a recognized bracket param are
/// re-attributed to their form field; missing upstream objects surface
/// the matching sentinel; everything else collapses to `unknown-error`.
pub fn reattribute(error: GatewayError) -> OnboardingError {
    match error {
        GatewayError::InvalidRequest { param: Some(param), .. } => reattribute_param(&param),
        GatewayError::NotFound { entity } => {
            if entity.contains("person") {
                OnboardingError::InvalidPerson
            } else {
                OnboardingError::InvalidStripeAccount
            }
        }
        other => {
            warn!(error = %other, "unmapped gateway error");
            OnboardingError::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_company_prefixes_rewrite_to_flat_fields() {
        let cases = [
            ("company[address][city]", "invalid-address_city"),
            ("company[address][line1]", "invalid-address_line1"),
            (
                "company[personal_address][postal_code]",
                "invalid-personal_address_postal_code",
            ),
            ("company[address_kana][line1]", "invalid-address_kana_line1"),
            (
                "company[address_kanji][town]",
                "invalid-address_kanji_town",
            ),
            ("company[tax_id]", "invalid-company_tax_id"),
            ("company[name]", "invalid-company_name"),
        ];
        for (param, expected) in cases {
            assert_eq!(reattribute_param(param).to_string(), expected, "{param}");
        }
    }

    #[test]
    fn unrecognized_shapes_degrade_to_unknown() {
        for param in [
            "individual[address][city]",
            "company",
            "company[]",
            "not brackets",
            "[address][city]",
        ] {
            assert_eq!(reattribute_param(param), OnboardingError::Unknown, "{param}");
        }
    }

    #[test]
    fn missing_objects_map_to_sentinels() {
        assert_eq!(
            reattribute(GatewayError::not_found("person")),
            OnboardingError::InvalidPerson
        );
        assert_eq!(
            reattribute(GatewayError::not_found("account")),
            OnboardingError::InvalidStripeAccount
        );
    }

    #[test]
    fn other_terminal_errors_collapse_to_unknown() {
        assert_eq!(
            reattribute(GatewayError::Unauthorized { message: "bad key".into() }),
            OnboardingError::Unknown
        );
        assert_eq!(
            reattribute(GatewayError::invalid_request(None, "no param")),
            OnboardingError::Unknown
        );
    }
}
