//! Change records and the notification payloads derived from them.

use core::fmt;

use serde::Serialize;
use serde_json::Value;

/// Where a field mutation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Declarative markup attribute (always string or absent).
    Attribute,
    /// Imperative field assignment by a host application.
    Field,
    /// State transition initiated by the widget itself.
    Internal,
}

impl Origin {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attribute => "attribute",
            Self::Field => "field",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful field update.
///
/// Produced only when the coerced value differs (structurally, for
/// composites) from the stored one. `old_value` is [`Value::Null`] when the
/// field had no value before.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub name: String,
    pub old_value: Value,
    pub new_value: Value,
    pub origin: Origin,
}

impl ChangeRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, old_value: Value, new_value: Value, origin: Origin) -> Self {
        Self {
            name: name.into(),
            old_value,
            new_value,
            origin,
        }
    }

    /// Notification detail for this change.
    #[must_use]
    pub fn detail(&self) -> FieldChangeDetail<'_> {
        FieldChangeDetail {
            property: &self.name,
            old_value: &self.old_value,
            new_value: &self.new_value,
        }
    }
}

/// `{ property, oldValue, newValue }` payload of a field-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChangeDetail<'a> {
    pub property: &'a str,
    pub old_value: &'a Value,
    pub new_value: &'a Value,
}

impl FieldChangeDetail<'_> {
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "property": self.property,
            "oldValue": self.old_value,
            "newValue": self.new_value,
        })
    }
}

/// Payload shape used by native-feeling form controls
/// (`{ value, checked?, formValue?, originalEvent? }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormControlDetail {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_event: Option<String>,
}

impl FormControlDetail {
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    #[must_use]
    pub fn form_value(mut self, form_value: impl Into<Value>) -> Self {
        self.form_value = Some(form_value.into());
        self
    }

    /// Name of the user-interaction event that caused this notification.
    #[must_use]
    pub fn original_event(mut self, event: impl Into<String>) -> Self {
        self.original_event = Some(event.into());
        self
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        // Only strings, bools and `Value`s inside; serialization is infallible.
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn origin_names() {
        assert_eq!(Origin::Attribute.to_string(), "attribute");
        assert_eq!(Origin::Field.as_str(), "field");
        assert_eq!(Origin::Internal.as_str(), "internal");
    }

    #[test]
    fn detail_uses_camel_case_keys() {
        let change = ChangeRecord::new("checked", json!(false), json!(true), Origin::Field);
        assert_eq!(
            change.detail().to_value(),
            json!({ "property": "checked", "oldValue": false, "newValue": true })
        );
    }

    #[test]
    fn change_record_serializes_origin() {
        let change = ChangeRecord::new("size", Value::Null, json!("md"), Origin::Attribute);
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            json!({ "name": "size", "oldValue": null, "newValue": "md", "origin": "attribute" })
        );
    }

    #[test]
    fn form_control_detail_skips_absent_parts() {
        let detail = FormControlDetail::new("a").checked(true);
        assert_eq!(detail.to_value(), json!({ "value": "a", "checked": true }));

        let detail = FormControlDetail::new(json!(["x", "y"]))
            .form_value("x,y")
            .original_event("click");
        assert_eq!(
            detail.to_value(),
            json!({ "value": ["x", "y"], "formValue": "x,y", "originalEvent": "click" })
        );
    }
}
