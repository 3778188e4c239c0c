//! Conversion between external attribute spelling and internal field names.
//!
//! Markup attributes are kebab-case (`max-length`); fields are camelCase
//! (`maxLength`). Only a lowercase letter followed by an uppercase letter
//! starts a new kebab segment, so `value2X` stays `value2x`.

/// `maxLength` → `max-length`.
#[must_use]
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = ch.is_ascii_lowercase();
        out.push(ch.to_ascii_lowercase());
    }
    out
}

/// `max-length` → `maxLength`.
///
/// A hyphen not followed by a lowercase ASCII letter is kept as-is.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '-' {
            if let Some(next) = chars.peek().copied().filter(char::is_ascii_lowercase) {
                out.push(next.to_ascii_uppercase());
                chars.next();
                continue;
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_basic() {
        assert_eq!(to_kebab_case("maxLength"), "max-length");
        assert_eq!(to_kebab_case("value"), "value");
        assert_eq!(to_kebab_case("notSearchableYet"), "not-searchable-yet");
    }

    #[test]
    fn kebab_leaves_digit_boundaries() {
        assert_eq!(to_kebab_case("value2X"), "value2x");
    }

    #[test]
    fn camel_basic() {
        assert_eq!(to_camel_case("max-length"), "maxLength");
        assert_eq!(to_camel_case("value"), "value");
        assert_eq!(to_camel_case("not-searchable-yet"), "notSearchableYet");
    }

    #[test]
    fn camel_keeps_odd_hyphens() {
        assert_eq!(to_camel_case("trailing-"), "trailing-");
        assert_eq!(to_camel_case("x-1"), "x-1");
    }

    #[test]
    fn round_trip_for_simple_names() {
        for name in ["checked", "maxLength", "placeholderText", "emitOnInput"] {
            assert_eq!(to_camel_case(&to_kebab_case(name)), name);
        }
    }
}
