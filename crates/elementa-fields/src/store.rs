//! Per-instance field values.
//!
//! [`FieldStore`] is the only place a widget's field values change. Every
//! write goes through [`FieldStore::try_update`] (or its logging wrapper
//! [`FieldStore::update`]): configuration lookup, coercion, validation,
//! change detection, then storage.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown field | Name not in schema | Warning logged, update dropped |
//! | Invalid value | Validator rejects coerced value | Warning logged, prior value kept |
//! | Malformed composite | Unparsable JSON text | Warning logged, fallback composite stored |
//!
//! Defaults are coerced when the schema is built, so writing a field's
//! default back is a no-op like any other equal write.

use std::sync::Arc;

use ahash::AHashMap;
use elementa_core::{ChangeRecord, Origin, Value};

use crate::coerce::coerce;
use crate::config::{FieldConfig, FieldEffects};
use crate::error::FieldError;
use crate::schema::FieldSchema;

/// Validated, change-detecting storage for one widget instance.
#[derive(Debug, Clone)]
pub struct FieldStore {
    schema: Arc<FieldSchema>,
    values: AHashMap<String, Value>,
}

impl FieldStore {
    /// Create a store holding every configured default.
    ///
    /// Fields without a default stay absent until first written.
    #[must_use]
    pub fn new(schema: Arc<FieldSchema>) -> Self {
        let values = schema
            .iter()
            .filter_map(|(name, config)| {
                config
                    .default_value()
                    .map(|v| (name.to_owned(), v.clone()))
            })
            .collect();
        Self { schema, values }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<FieldSchema> {
        &self.schema
    }

    #[must_use]
    pub fn config(&self, name: &str) -> Option<&FieldConfig> {
        self.schema.get(name)
    }

    /// Update `name` from `raw`, reporting rejections to the caller.
    ///
    /// Returns `Ok(None)` when the coerced value equals the stored one.
    pub fn try_update(
        &mut self,
        name: &str,
        raw: &Value,
        origin: Origin,
    ) -> Result<Option<ChangeRecord>, FieldError> {
        let config = self
            .schema
            .get(name)
            .ok_or_else(|| FieldError::UnknownField(name.to_owned()))?;

        let coerced = coerce(name, config, raw);

        if !config.accepts(&coerced) {
            return Err(FieldError::InvalidValue {
                field: name.to_owned(),
                value: coerced,
            });
        }

        // Value's PartialEq is structural, so composites compare deeply.
        let old = self.values.get(name);
        if old == Some(&coerced) || (old.is_none() && coerced.is_null()) {
            return Ok(None);
        }

        let old_value = self
            .values
            .insert(name.to_owned(), coerced.clone())
            .unwrap_or(Value::Null);

        tracing::trace!(field = name, %origin, "field updated");
        Ok(Some(ChangeRecord::new(name, old_value, coerced, origin)))
    }

    /// Update `name` from `raw`. Rejections are logged and dropped.
    pub fn update(
        &mut self,
        name: &str,
        raw: impl Into<Value>,
        origin: Origin,
    ) -> Option<ChangeRecord> {
        let raw = raw.into();
        match self.try_update(name, &raw, origin) {
            Ok(change) => change,
            Err(err) => {
                tracing::warn!(field = name, %origin, error = %err, "field update dropped");
                None
            }
        }
    }

    /// Resolve alias attribute `attribute` to its target field.
    ///
    /// Present attributes (any non-null `raw`) assign the alias's fixed value
    /// to the aliased field with origin [`Origin::Attribute`]. Removing an
    /// alias attribute (`raw` null) does not revert the aliased field.
    /// Returns `None` when no field declares the alias or nothing changed.
    pub fn resolve_alias(&mut self, attribute: &str, raw: &Value) -> Option<ChangeRecord> {
        let (field, fixed) = self.schema.alias_target(attribute)?;
        if raw.is_null() {
            tracing::trace!(attribute, field, "alias attribute removed");
            return None;
        }
        let (field, fixed) = (field.to_owned(), fixed.clone());
        self.update(&field, fixed, Origin::Attribute)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Snapshot of all present values.
    #[must_use]
    pub fn get_all(&self) -> serde_json::Map<String, Value> {
        self.schema
            .names()
            .filter_map(|name| self.values.get(name).map(|v| (name.to_owned(), v.clone())))
            .collect()
    }

    /// String value of `name`, if it holds a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Boolean value of `name`; absent or non-boolean reads as `false`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    fn has_effect(&self, name: &str, effect: FieldEffects) -> bool {
        self.schema
            .get(name)
            .is_some_and(|c| c.effects().contains(effect))
    }

    /// Changes to `name` re-render the widget.
    #[must_use]
    pub fn is_render_trigger(&self, name: &str) -> bool {
        self.has_effect(name, FieldEffects::RENDER)
    }

    /// Changes to `name` recompute the native form value.
    #[must_use]
    pub fn is_form_value_field(&self, name: &str) -> bool {
        self.has_effect(name, FieldEffects::FORM_VALUE)
    }

    /// Changes to `name` dispatch a field-change notification.
    #[must_use]
    pub fn emits_change_event(&self, name: &str) -> bool {
        self.has_effect(name, FieldEffects::EMIT_CHANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn store() -> FieldStore {
        let schema = FieldSchema::builder()
            .field(
                "checked",
                FieldConfig::boolean()
                    .renders()
                    .form_value()
                    .emits_change()
                    .default(false),
            )
            .field("value", FieldConfig::string().default("on"))
            .field(
                "size",
                FieldConfig::string().renders().default("md").one_of(&["sm", "md", "lg"]),
            )
            .field(
                "searchable",
                FieldConfig::boolean().default(true).alias("not-searchable", false),
            )
            .field("count", FieldConfig::number().default(0))
            .field("filters", FieldConfig::object().default(json!({})))
            .field("label", FieldConfig::string())
            .build();
        FieldStore::new(Arc::new(schema))
    }

    #[test]
    fn defaults_are_loaded() {
        let s = store();
        assert_eq!(s.get("checked"), Some(&json!(false)));
        assert_eq!(s.get_str("value"), Some("on"));
        assert_eq!(s.get("label"), None);
        assert_eq!(
            s.get_all().keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["checked", "count", "filters", "searchable", "size", "value"]
        );
    }

    #[test]
    fn update_produces_change_record() {
        let mut s = store();
        let change = s.update("checked", "", Origin::Attribute).unwrap();
        assert_eq!(
            change,
            ChangeRecord::new("checked", json!(false), json!(true), Origin::Attribute)
        );
        assert!(s.get_bool("checked"));
    }

    #[test]
    fn second_identical_update_is_noop() {
        let mut s = store();
        assert!(s.update("count", "3", Origin::Attribute).is_some());
        assert!(s.update("count", 3, Origin::Field).is_none());
        assert!(s.update("count", "3.0", Origin::Attribute).is_none());
    }

    #[test]
    fn boolean_round_trip() {
        let mut s = store();
        s.update("checked", "", Origin::Attribute);
        assert_eq!(s.get("checked"), Some(&json!(true)));
        s.update("checked", "false", Origin::Attribute);
        assert_eq!(s.get("checked"), Some(&json!(false)));
        s.update("checked", "yes", Origin::Attribute);
        s.update("checked", Value::Null, Origin::Attribute);
        assert_eq!(s.get("checked"), Some(&json!(false)));
    }

    #[traced_test]
    #[test]
    fn unknown_field_is_dropped_and_logged() {
        let mut s = store();
        let before = s.get_all();
        assert!(s.update("doesNotExist", 1, Origin::Field).is_none());
        assert_eq!(s.get_all(), before);
        assert!(logs_contain("unknown field: doesNotExist"));
    }

    #[test]
    fn unknown_field_error_is_reported_by_try_update() {
        let mut s = store();
        assert_eq!(
            s.try_update("nope", &json!(1), Origin::Field),
            Err(FieldError::UnknownField("nope".into()))
        );
    }

    #[traced_test]
    #[test]
    fn invalid_value_keeps_prior_value() {
        let mut s = store();
        s.update("size", "lg", Origin::Attribute);
        assert!(s.update("size", "huge", Origin::Attribute).is_none());
        assert_eq!(s.get_str("size"), Some("lg"));
        assert!(logs_contain("invalid value for size"));
    }

    #[test]
    fn deep_equal_composite_is_noop() {
        let mut s = store();
        assert!(s.update("filters", json!({ "a": 1 }), Origin::Field).is_some());
        assert!(s.update("filters", json!({ "a": 1 }), Origin::Field).is_none());
        assert!(s.update("filters", r#"{"a": 1}"#, Origin::Attribute).is_none());
        assert!(s.update("filters", json!({ "a": 2 }), Origin::Field).is_some());
    }

    #[test]
    fn first_write_reports_null_old_value() {
        let mut s = store();
        let change = s.update("label", "Name", Origin::Field).unwrap();
        assert_eq!(change.old_value, Value::Null);
        assert_eq!(change.new_value, json!("Name"));
    }

    #[test]
    fn null_write_to_absent_field_is_noop() {
        let mut s = store();
        assert!(s.update("label", Value::Null, Origin::Attribute).is_none());
        assert_eq!(s.get("label"), None);
    }

    #[test]
    fn alias_equivalent_to_direct_update() {
        let mut via_alias = store();
        let mut direct = store();

        let a = via_alias.resolve_alias("not-searchable", &json!(""));
        let d = direct.update("searchable", false, Origin::Attribute);

        assert_eq!(a, d);
        assert_eq!(via_alias.get("searchable"), direct.get("searchable"));
        assert_eq!(via_alias.get("searchable"), Some(&json!(false)));
    }

    #[test]
    fn alias_removal_and_unknown_alias() {
        let mut s = store();
        assert!(s.resolve_alias("not-searchable", &Value::Null).is_none());
        assert!(s.get_bool("searchable"));
        assert!(s.resolve_alias("not-a-thing", &json!("")).is_none());
    }

    #[test]
    fn effect_predicates() {
        let s = store();
        assert!(s.is_render_trigger("checked"));
        assert!(s.is_form_value_field("checked"));
        assert!(s.emits_change_event("checked"));
        assert!(s.is_render_trigger("size"));
        assert!(!s.is_form_value_field("size"));
        assert!(!s.emits_change_event("value"));
        assert!(!s.is_render_trigger("doesNotExist"));
    }

    #[test]
    fn writing_the_default_back_is_noop() {
        let schema = FieldSchema::builder()
            .field("count", FieldConfig::number().renders().default(7.0))
            .field("ratio", FieldConfig::number().default(0.5))
            .field("options", FieldConfig::array().default(json!([1.0, { "x": 2.0 }])))
            .build();
        let mut s = FieldStore::new(Arc::new(schema));

        assert_eq!(s.update("count", "7", Origin::Attribute), None);
        assert_eq!(s.update("count", 7, Origin::Field), None);
        assert_eq!(s.update("count", 7.0, Origin::Field), None);
        assert_eq!(s.update("ratio", "0.5", Origin::Attribute), None);
        assert_eq!(s.update("options", r#"[1, {"x": 2}]"#, Origin::Attribute), None);
        assert_eq!(s.update("options", json!([1, { "x": 2.0 }]), Origin::Field), None);
    }

    #[test]
    fn integral_floats_inside_composites_compare_equal() {
        let mut s = store();
        assert!(s.update("filters", json!({ "a": 1 }), Origin::Field).is_some());
        assert_eq!(s.update("filters", r#"{"a": 1.0}"#, Origin::Attribute), None);
        assert_eq!(s.get("filters"), Some(&json!({ "a": 1 })));
    }

    proptest! {
        #[test]
        fn nested_integral_floats_suppress(
            key in "[a-z]{1,5}",
            items in prop::collection::vec(-100_000i32..100_000, 0..5),
        ) {
            let mut s = store();
            let ints = json!({ key.clone(): { "items": items.clone() } });
            let floats: Vec<f64> = items.iter().map(|&i| f64::from(i)).collect();
            let text = format!(
                r#"{{"{key}": {{"items": [{}]}}}}"#,
                items.iter().map(|i| format!("{i}.0")).collect::<Vec<_>>().join(", ")
            );

            s.update("filters", ints, Origin::Field);
            prop_assert!(s.update("filters", text, Origin::Attribute).is_none());
            let float_value = json!({ key: { "items": floats } });
            prop_assert!(s
                .update("filters", float_value, Origin::Field)
                .is_none());
        }

        #[test]
        fn repeated_update_yields_one_record(text in "[a-z0-9]{0,8}") {
            let mut s = store();
            let first = s.update("label", text.as_str(), Origin::Attribute);
            let second = s.update("label", text.as_str(), Origin::Attribute);
            prop_assert!(first.is_some());
            prop_assert!(second.is_none());
        }

        #[test]
        fn numbers_from_text_or_value_agree(n in -1_000_000i64..1_000_000) {
            let mut a = store();
            let mut b = store();
            a.update("count", n.to_string(), Origin::Attribute);
            b.update("count", n, Origin::Field);
            prop_assert_eq!(a.get("count"), b.get("count"));
        }

        #[test]
        fn structurally_equal_objects_suppress(k in "[a-z]{1,5}", v in any::<i32>()) {
            let mut s = store();
            let first = json!({ k.clone(): v });
            let second = json!({ k: v });
            prop_assert!(s.update("filters", first, Origin::Field).is_some());
            prop_assert!(s.update("filters", second, Origin::Field).is_none());
        }
    }
}
