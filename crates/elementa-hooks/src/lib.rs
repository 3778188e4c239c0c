#![forbid(unsafe_code)]

//! Hook-based definition kernel for Elementa widgets.
//!
//! Widgets that do not need the full lifecycle controller can be
//! described as a flat [`HookTable`] of optional callbacks and registered
//! under a tag in a [`DefinitionRegistry`]. Instances ([`HookElement`]) get:
//!
//! - a per-instance field map with a field hook on every write
//! - attribute ↔ field synchronization for form controls, guarded against
//!   re-entrant loops
//! - native form lifecycle defaults (reset, ancestor disable, state restore)
//!
//! Hook tables hold `Rc` closures: definitions and elements live on one
//! thread, the one that owns the document.
//!
//! # Example
//!
//! ```
//! use elementa_core::MemoryElement;
//! use elementa_hooks::{DefinitionRegistry, HookTable};
//!
//! let mut registry = DefinitionRegistry::<MemoryElement>::new();
//! registry.define(
//!     "ty-input",
//!     HookTable::<MemoryElement>::new()
//!         .observe(["value", "disabled"])
//!         .form_participant()
//!         .on_render(|el| {
//!             let value = el.value().unwrap_or_default().to_owned();
//!             el.set_shadow_content(&value);
//!             Ok(())
//!         }),
//! )?;
//!
//! let host = MemoryElement::new("ty-input").with_attribute("value", "a");
//! let mut input = registry.create("ty-input", host)?;
//! input.attach()?;
//! input.set_field("value", "b")?;
//! input.form_reset()?;
//! assert_eq!(input.value(), Some("a"));
//! # Ok::<(), elementa_hooks::KernelError>(())
//! ```

pub mod element;
pub mod error;
pub mod form;
pub mod registry;
pub mod table;

pub use element::{FORM_CONTROL_FIELDS, FORM_SYNCED_ATTRIBUTES, HookElement, InitialFormState};
pub use error::KernelError;
pub use form::CHANGE_EVENT;
pub use registry::{Definition, DefinitionRegistry, validate_tag};
pub use table::{
    AttributeHook, DisabledHook, FieldHook, HookTable, LifecycleHook, ReparentHook, RestoreHook,
    RestoreReason,
};
