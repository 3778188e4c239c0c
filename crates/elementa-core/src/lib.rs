#![forbid(unsafe_code)]

//! Core contract shared by every Elementa widget kernel.
//!
//! This crate provides:
//! - [`Value`] and [`ChangeRecord`] for dynamically typed field state
//! - [`HostElement`] and [`FormInternals`], the seam to the embedding document
//! - [`MemoryElement`], a deterministic headless host
//! - Markup conventions: [`parse_boolean`], [`to_kebab_case`], [`to_camel_case`]

pub mod boolean;
pub mod case;
pub mod change;
pub mod error;
pub mod host;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod memory;

pub use boolean::{is_boolean_string, parse_boolean};
pub use case::{to_camel_case, to_kebab_case};
pub use change::{ChangeRecord, FieldChangeDetail, FormControlDetail, Origin};
pub use error::{HookError, HookResult};
pub use host::{
    DocumentId, ElementEvent, FormId, FormInternals, FormValue, HostElement, LifecycleState,
};
pub use memory::{MemoryElement, MemoryFormInternals};

/// Dynamically typed field value (strings from markup, typed values from code).
pub use serde_json::Value;
