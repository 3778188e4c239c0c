//! HTML boolean-attribute parsing.
//!
//! Presence of an attribute means `true` regardless of its text, except for
//! the explicit spellings `false` and `0`. The truth table is deliberately
//! permissive and must not be tightened: widgets rely on arbitrary text
//! (`disabled="disabled"`, `open="yes"`) reading as `true`.
//!
//! | Input | Result |
//! |-------|--------|
//! | `None` (attribute absent) | `false` |
//! | `""` | `true` |
//! | `"false"`, `"FALSE"`, `" 0 "` | `false` |
//! | anything else | `true` |

/// Parse an attribute value as a boolean.
#[must_use]
pub fn parse_boolean(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    if value.is_empty() {
        return true;
    }
    let normalized = value.trim().to_ascii_lowercase();
    !(normalized == "false" || normalized == "0")
}

/// Whether `value` is one of the literal boolean spellings
/// (`true`, `false`, `1`, `0`; case-insensitive, trimmed).
///
/// Absent and empty values are not boolean strings.
#[must_use]
pub fn is_boolean_string(value: Option<&str>) -> bool {
    match value {
        None | Some("") => false,
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "false" | "1" | "0"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_is_false() {
        assert!(!parse_boolean(None));
    }

    #[test]
    fn empty_is_true() {
        assert!(parse_boolean(Some("")));
    }

    #[test]
    fn explicit_false_spellings() {
        assert!(!parse_boolean(Some("false")));
        assert!(!parse_boolean(Some("FALSE")));
        assert!(!parse_boolean(Some("False")));
        assert!(!parse_boolean(Some("0")));
        assert!(!parse_boolean(Some("  false ")));
    }

    #[test]
    fn everything_else_is_true() {
        assert!(parse_boolean(Some("true")));
        assert!(parse_boolean(Some("1")));
        assert!(parse_boolean(Some("yes")));
        assert!(parse_boolean(Some("disabled")));
        assert!(parse_boolean(Some("no")));
    }

    #[test]
    fn boolean_string_recognition() {
        assert!(is_boolean_string(Some("true")));
        assert!(is_boolean_string(Some(" FALSE")));
        assert!(is_boolean_string(Some("1")));
        assert!(is_boolean_string(Some("0")));
        assert!(!is_boolean_string(Some("custom")));
        assert!(!is_boolean_string(Some("")));
        assert!(!is_boolean_string(None));
    }

    proptest! {
        #[test]
        fn only_false_and_zero_are_false(s in "[a-zA-Z0-9 ]{1,12}") {
            let normalized = s.trim().to_ascii_lowercase();
            let expected = !(normalized == "false" || normalized == "0");
            prop_assert_eq!(parse_boolean(Some(&s)), expected);
        }
    }
}
