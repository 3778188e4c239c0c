//! The field table of one widget type.
//!
//! # Invariants
//!
//! 1. Field names are unique; declaration order is preserved.
//! 2. An alias attribute resolves to at most one field.
//! 3. A schema is never mutated after [`FieldSchemaBuilder::build`].
//! 4. Stored defaults are already coerced and pass validation.

use std::collections::BTreeMap;

use ahash::AHashMap;
use elementa_core::{Value, to_kebab_case};
use serde::Deserialize;

use crate::coerce::coerce;
use crate::config::{FieldConfig, FieldEffects, FieldKind};
use crate::error::SchemaError;

/// Immutable, ordered set of field configurations.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    fields: Vec<(String, FieldConfig)>,
    index: AHashMap<String, usize>,
    /// alias attribute → field index
    aliases: AHashMap<String, usize>,
}

impl FieldSchema {
    #[must_use]
    pub fn builder() -> FieldSchemaBuilder {
        FieldSchemaBuilder::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldConfig> {
        self.index.get(name).map(|&i| &self.fields[i].1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.fields.iter().map(|(n, c)| (n.as_str(), c))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field and fixed value an alias attribute resolves to.
    #[must_use]
    pub fn alias_target(&self, attribute: &str) -> Option<(&str, &Value)> {
        let &i = self.aliases.get(attribute)?;
        let (name, config) = &self.fields[i];
        config.alias_value(attribute).map(|v| (name.as_str(), v))
    }

    #[must_use]
    pub fn is_alias(&self, attribute: &str) -> bool {
        self.aliases.contains_key(attribute)
    }

    /// Markup attributes to observe: every field in kebab-case, then every
    /// alias attribute, in declaration order.
    #[must_use]
    pub fn observed_attributes(&self) -> Vec<String> {
        let mut out: Vec<String> = self.names().map(to_kebab_case).collect();
        for (_, config) in &self.fields {
            out.extend(config.aliases().map(|(a, _)| a.to_owned()));
        }
        out
    }

    /// Load a schema from a JSON object of field descriptors.
    ///
    /// ```
    /// use elementa_fields::{FieldKind, FieldSchema};
    ///
    /// let schema = FieldSchema::from_json(r#"{
    ///     "checked": { "kind": "boolean", "render": true, "formValue": true,
    ///                  "emitChange": true, "default": false },
    ///     "searchable": { "kind": "boolean", "default": true,
    ///                     "aliases": { "not-searchable": false } }
    /// }"#).unwrap();
    ///
    /// assert_eq!(schema.get("checked").map(|c| c.kind()), Some(FieldKind::Boolean));
    /// assert_eq!(schema.alias_target("not-searchable").map(|(f, _)| f), Some("searchable"));
    /// ```
    ///
    /// JSON objects carry no reliable order, so fields are declared in
    /// lexicographic name order.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let descriptors: BTreeMap<String, FieldDescriptor> = serde_json::from_str(text)?;
        descriptors
            .into_iter()
            .try_fold(Self::builder(), |b, (name, d)| b.try_field(name, d.into_config()))?
            .try_build()
    }
}

/// Declarative (data-only) form of a [`FieldConfig`].
///
/// Custom coercion and validation are code-only and cannot be described.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    #[serde(default)]
    pub render: bool,
    #[serde(default)]
    pub form_value: bool,
    #[serde(default)]
    pub emit_change: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Value>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn into_config(self) -> FieldConfig {
        let mut effects = FieldEffects::empty();
        effects.set(FieldEffects::RENDER, self.render);
        effects.set(FieldEffects::FORM_VALUE, self.form_value);
        effects.set(FieldEffects::EMIT_CHANGE, self.emit_change);

        let mut config = FieldConfig::new(self.kind).with_effects(effects);
        if let Some(default) = self.default {
            config = config.default(default);
        }
        for (attribute, value) in self.aliases {
            config = config.alias(attribute, value);
        }
        config
    }
}

/// Builder for [`FieldSchema`].
#[derive(Debug, Default)]
pub struct FieldSchemaBuilder {
    fields: Vec<(String, FieldConfig)>,
}

impl FieldSchemaBuilder {
    /// Declare a field.
    ///
    /// # Panics
    ///
    /// Panics if `name` was already declared. Schemas are written by widget
    /// authors at type definition; use [`try_field`](Self::try_field) for
    /// schemas built from external input.
    #[must_use]
    pub fn field(self, name: impl Into<String>, config: FieldConfig) -> Self {
        let name = name.into();
        match self.try_field(name.clone(), config) {
            Ok(b) => b,
            Err(_) => panic!("field '{name}' declared twice"),
        }
    }

    pub fn try_field(
        mut self,
        name: impl Into<String>,
        config: FieldConfig,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if self.fields.iter().any(|(n, _)| *n == name) {
            return Err(SchemaError::DuplicateField(name));
        }
        self.fields.push((name, config));
        Ok(self)
    }

    /// Finish the schema.
    ///
    /// # Panics
    ///
    /// Panics if two fields claim the same alias attribute or a default fails
    /// validation.
    #[must_use]
    pub fn build(self) -> FieldSchema {
        match self.try_build() {
            Ok(schema) => schema,
            Err(err) => panic!("invalid field schema: {err}"),
        }
    }

    /// Finish the schema, coercing every default through its field's rules.
    ///
    /// A default the field's validator rejects is an error.
    pub fn try_build(mut self) -> Result<FieldSchema, SchemaError> {
        for (name, config) in &mut self.fields {
            let Some(raw) = config.default_value() else {
                continue;
            };
            let value = coerce(name, config, raw);
            if !config.accepts(&value) {
                return Err(SchemaError::InvalidDefault {
                    field: name.clone(),
                    value: value.to_string(),
                });
            }
            config.set_default(value);
        }

        let mut index = AHashMap::with_capacity(self.fields.len());
        let mut aliases = AHashMap::new();
        for (i, (name, config)) in self.fields.iter().enumerate() {
            index.insert(name.clone(), i);
            for (attribute, _) in config.aliases() {
                if aliases.insert(attribute.to_owned(), i).is_some() {
                    return Err(SchemaError::DuplicateAlias {
                        attribute: attribute.to_owned(),
                        field: name.clone(),
                    });
                }
            }
        }
        Ok(FieldSchema {
            fields: self.fields,
            index,
            aliases,
        })
    }
}
