//! Field value → markup attribute text.

use std::borrow::Cow;

use elementa_core::{HostElement, Value, to_kebab_case};

/// Attribute text for `value`, `None` meaning the attribute is removed.
///
/// Booleans follow presence semantics, composites serialize to JSON.
#[must_use]
pub fn attribute_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(Cow::Borrowed("")),
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(Cow::Owned(value.to_string()))
        }
    }
}

/// Write field `name` to its kebab-case attribute on `host`.
pub fn reflect<H: HostElement>(host: &mut H, name: &str, value: &Value) {
    let attribute = to_kebab_case(name);
    match attribute_text(value) {
        Some(text) if host.attribute(&attribute) != Some(text.as_ref()) => {
            host.set_attribute(&attribute, &text);
        }
        Some(_) => {}
        None if host.has_attribute(&attribute) => host.remove_attribute(&attribute),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elementa_core::MemoryElement;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn text_forms() {
        assert_eq!(attribute_text(&json!(true)).as_deref(), Some(""));
        assert_eq!(attribute_text(&json!(false)), None);
        assert_eq!(attribute_text(&Value::Null), None);
        assert_eq!(attribute_text(&json!("md")).as_deref(), Some("md"));
        assert_eq!(attribute_text(&json!(3)).as_deref(), Some("3"));
        assert_eq!(attribute_text(&json!([1, 2])).as_deref(), Some("[1,2]"));
    }

    #[test]
    fn reflect_uses_kebab_case() {
        let mut host = MemoryElement::new("x-el");
        reflect(&mut host, "maxItems", &json!(5));
        assert_eq!(host.attribute("max-items"), Some("5"));

        reflect(&mut host, "allowClear", &json!(true));
        assert_eq!(host.attribute("allow-clear"), Some(""));
        reflect(&mut host, "allowClear", &json!(false));
        assert!(!host.has_attribute("allow-clear"));
    }

    proptest! {
        #[test]
        fn string_values_reflect_verbatim(text in "[ -~]{0,16}") {
            let mut host = MemoryElement::new("x-el");
            reflect(&mut host, "label", &json!(text.clone()));
            prop_assert_eq!(host.attribute("label"), Some(text.as_str()));
        }

        #[test]
        fn boolean_reflection_is_presence(flag in any::<bool>()) {
            let mut host = MemoryElement::new("x-el");
            reflect(&mut host, "open", &json!(flag));
            prop_assert_eq!(host.has_attribute("open"), flag);
        }
    }
}
