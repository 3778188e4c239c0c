#![forbid(unsafe_code)]

//! Field storage for Elementa widgets.
//!
//! - [`FieldConfig`]: declarative per-field configuration (kind, coercion,
//!   validation, aliases, effect flags).
//! - [`FieldSchema`]: the immutable configuration table of one widget type.
//! - [`SchemaRegistry`]: process-wide, write-once table of schemas keyed by
//!   widget type name.
//! - [`FieldStore`]: per-instance values with a single update entry point that
//!   produces [`ChangeRecord`]s.
//!
//! # Invariants
//!
//! 1. Every value in a [`FieldStore`] has passed coercion and validation for
//!    its field's configuration.
//! 2. An update that coerces to a value equal to the stored one (structurally
//!    for composites) is a no-op and produces no record.
//! 3. Unknown fields, invalid values and malformed composite text never
//!    surface to the caller of [`FieldStore::update`]; they are logged.
//!
//! [`ChangeRecord`]: elementa_core::ChangeRecord

pub mod coerce;
pub mod config;
pub mod error;
pub mod registry;
pub mod schema;
pub mod store;

pub use config::{CoerceFn, FieldConfig, FieldEffects, FieldKind, ValidateFn};
pub use error::{FieldError, SchemaError};
pub use registry::SchemaRegistry;
pub use schema::{FieldDescriptor, FieldSchema, FieldSchemaBuilder};
pub use store::FieldStore;
