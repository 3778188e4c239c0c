//! Kind-based coercion of raw field input.
//!
//! Raw input is either markup text (`Value::String`, or `Value::Null` for an
//! absent attribute) or a typed value assigned from code. Both go through the
//! same rules so a field ends up identical regardless of origin.
//!
//! | Kind | Rule |
//! |------|------|
//! | custom | the configured function, nothing else |
//! | boolean | null → false; text per [`parse_boolean`]; numbers: non-zero; composites: true |
//! | (others) null | configured default, else null |
//! | number | numbers pass; text trimmed, `""` → 0, parsed as float; bool → 1/0; else default or 0 |
//! | string | text passes; numbers/bools display form; composites as JSON text |
//! | object/array | text parsed as JSON (malformed → default or empty); others pass |

use elementa_core::{Value, parse_boolean};

use crate::config::{FieldConfig, FieldKind};
use crate::error::FieldError;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Coerce `raw` for field `name`. Never fails: malformed composite text is
/// logged and replaced by the fallback composite.
#[must_use]
pub fn coerce(name: &str, config: &FieldConfig, raw: &Value) -> Value {
    if let Some(custom) = config.custom_coerce() {
        return custom(raw);
    }

    if config.kind() == FieldKind::Boolean {
        return Value::Bool(truthy(raw));
    }

    if raw.is_null() {
        return config.default_value().cloned().unwrap_or(Value::Null);
    }

    match config.kind() {
        FieldKind::Number => coerce_number(raw).unwrap_or_else(|| {
            config
                .default_value()
                .filter(|d| d.is_number())
                .cloned()
                .unwrap_or_else(|| Value::from(0))
        }),
        FieldKind::String => coerce_string(raw),
        FieldKind::Object | FieldKind::Array => {
            let mut value = match raw {
                Value::String(text) => parse_composite(name, text).unwrap_or_else(|err| {
                    tracing::warn!(field = name, error = %err, "malformed composite, using fallback");
                    config
                        .default_value()
                        .filter(|d| d.is_array() || d.is_object())
                        .cloned()
                        .or_else(|| config.kind().empty_composite())
                        .unwrap_or(Value::Null)
                }),
                other => other.clone(),
            };
            normalize_numbers(&mut value);
            value
        }
        FieldKind::Boolean => Value::Bool(truthy(raw)),
    }
}

/// Apply [`normalize_number`] to every float inside `value`, so `{"a":1}` and
/// `{"a":1.0}` compare equal.
pub fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            if let Some(normalized) = n.as_f64().filter(|_| n.is_f64()).and_then(normalize_number) {
                *value = normalized;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}

/// Boolean interpretation of a raw value.
#[must_use]
pub fn truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => parse_boolean(Some(s)),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric interpretation, `None` when the input is not a finite number.
#[must_use]
pub fn coerce_number(raw: &Value) -> Option<Value> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    normalize_number(parsed)
}

/// Store integral floats as integers so `5`, `5.0` and `"5"` compare equal.
#[must_use]
pub fn normalize_number(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // Exact: |n| ≤ 2^53 and integral.
        #[allow(clippy::cast_possible_truncation)]
        return Some(Value::from(n as i64));
    }
    serde_json::Number::from_f64(n).map(Value::Number)
}

/// Text interpretation of a non-null raw value.
#[must_use]
pub fn coerce_string(raw: &Value) -> Value {
    match raw {
        Value::String(_) => raw.clone(),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Null => Value::Null,
        Value::Array(_) | Value::Object(_) => Value::String(raw.to_string()),
    }
}

/// Parse JSON-shaped attribute text.
pub fn parse_composite(name: &str, text: &str) -> Result<Value, FieldError> {
    serde_json::from_str(text).map_err(|err| FieldError::MalformedComposite {
        field: name.to_owned(),
        text: text.to_owned(),
        reason: err.to_string(),
    })
}
