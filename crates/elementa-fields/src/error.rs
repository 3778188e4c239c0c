//! Field-store and schema errors.

use std::fmt;

use elementa_core::Value;

/// Reason a field update was rejected.
///
/// Returned by [`FieldStore::try_update`](crate::FieldStore::try_update);
/// [`FieldStore::update`](crate::FieldStore::update) logs it instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The name is not declared in the widget's schema.
    UnknownField(String),
    /// The coerced value failed the field's validator.
    InvalidValue { field: String, value: Value },
    /// Composite attribute text is not valid JSON. Recovered by falling back
    /// to the field's default (or empty) composite; never rejects an update.
    MalformedComposite {
        field: String,
        text: String,
        reason: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown field: {name}"),
            Self::InvalidValue { field, value } => {
                write!(f, "invalid value for {field}: {value}")
            }
            Self::MalformedComposite {
                field,
                text,
                reason,
            } => write!(f, "failed to parse {field} from {text:?}: {reason}"),
        }
    }
}

impl std::error::Error for FieldError {}

/// Errors from building or loading a [`FieldSchema`](crate::FieldSchema).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The descriptor text could not be parsed.
    Parse(String),
    /// The same field name was declared twice.
    DuplicateField(String),
    /// Two fields claim the same alias attribute.
    DuplicateAlias { attribute: String, field: String },
    /// A default value fails its field's validator. `value` is the coerced
    /// default as JSON text.
    InvalidDefault { field: String, value: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "schema parse error: {msg}"),
            Self::DuplicateField(name) => write!(f, "duplicate field '{name}'"),
            Self::DuplicateAlias { attribute, field } => {
                write!(f, "alias attribute '{attribute}' on '{field}' is already claimed")
            }
            Self::InvalidDefault { field, value } => {
                write!(f, "default {value} of '{field}' fails validation")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
