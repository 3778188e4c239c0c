//! Per-field configuration.
//!
//! A [`FieldConfig`] is immutable once its widget type is defined and is
//! shared by every instance of that type, so custom functions are
//! `Send + Sync` and reference-counted.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use elementa_core::Value;
use serde::Deserialize;

/// Custom coercion, replacing the kind-based rules entirely.
pub type CoerceFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Custom validation predicate, applied after coercion.
pub type ValidateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Data type a field's raw input is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Boolean,
    Number,
    Object,
    Array,
}

impl FieldKind {
    /// Object or array.
    #[inline]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Empty value of a composite kind (`{}` or `[]`), `None` otherwise.
    #[must_use]
    pub fn empty_composite(self) -> Option<Value> {
        match self {
            Self::Object => Some(Value::Object(serde_json::Map::new())),
            Self::Array => Some(Value::Array(Vec::new())),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Side effects a change to the field triggers in the lifecycle pipeline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldEffects: u8 {
        /// Re-render the widget (once per batch).
        const RENDER = 0b001;
        /// Recompute and push the native form value.
        const FORM_VALUE = 0b010;
        /// Dispatch a field-change notification.
        const EMIT_CHANGE = 0b100;
    }
}

/// Configuration of one declared field.
#[derive(Clone)]
pub struct FieldConfig {
    kind: FieldKind,
    effects: FieldEffects,
    default: Option<Value>,
    coerce: Option<CoerceFn>,
    validate: Option<ValidateFn>,
    /// `(attribute name, fixed value)` pairs that resolve to this field.
    aliases: Vec<(String, Value)>,
}

impl FieldConfig {
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            effects: FieldEffects::empty(),
            default: None,
            coerce: None,
            validate: None,
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    #[must_use]
    pub fn object() -> Self {
        Self::new(FieldKind::Object)
    }

    #[must_use]
    pub fn array() -> Self {
        Self::new(FieldKind::Array)
    }

    // --- Builders ---

    /// Changes to this field re-render the widget.
    #[must_use]
    pub fn renders(mut self) -> Self {
        self.effects |= FieldEffects::RENDER;
        self
    }

    /// Changes to this field recompute the native form value.
    #[must_use]
    pub fn form_value(mut self) -> Self {
        self.effects |= FieldEffects::FORM_VALUE;
        self
    }

    /// Changes to this field dispatch a field-change notification.
    #[must_use]
    pub fn emits_change(mut self) -> Self {
        self.effects |= FieldEffects::EMIT_CHANGE;
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: FieldEffects) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn coerce(mut self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.coerce = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn validate(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Some(Arc::new(f));
        self
    }

    /// Accept only values equal to one of `allowed` (strings).
    #[must_use]
    pub fn one_of(self, allowed: &[&str]) -> Self {
        let allowed: Vec<String> = allowed.iter().map(|s| (*s).to_owned()).collect();
        self.validate(move |v| v.as_str().is_some_and(|s| allowed.iter().any(|a| a == s)))
    }

    /// Setting markup attribute `attribute` assigns `value` to this field.
    #[must_use]
    pub fn alias(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.aliases.push((attribute.into(), value.into()));
        self
    }

    // --- Accessors ---

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[inline]
    pub fn effects(&self) -> FieldEffects {
        self.effects
    }

    /// Replace the default with its coerced form when the schema is built.
    pub(crate) fn set_default(&mut self, value: Value) {
        self.default = Some(value);
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn custom_coerce(&self) -> Option<&CoerceFn> {
        self.coerce.as_ref()
    }

    /// Run the custom validator; fields without one accept everything.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        self.validate.as_ref().is_none_or(|f| f(value))
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.aliases.iter().map(|(a, v)| (a.as_str(), v))
    }

    /// Fixed value for alias attribute `attribute`, if this field declares it.
    #[must_use]
    pub fn alias_value(&self, attribute: &str) -> Option<&Value> {
        self.aliases
            .iter()
            .find(|(a, _)| a == attribute)
            .map(|(_, v)| v)
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("kind", &self.kind)
            .field("effects", &self.effects)
            .field("default", &self.default)
            .field("coerce", &self.coerce.is_some())
            .field("validate", &self.validate.is_some())
            .field("aliases", &self.aliases)
            .finish()
    }
}
