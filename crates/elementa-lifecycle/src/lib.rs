#![forbid(unsafe_code)]

//! Lifecycle controller for Elementa widgets.
//!
//! A widget type implements [`Widget`]; [`Component`] binds an instance to a
//! [`HostElement`](elementa_core::HostElement) and runs every field change,
//! whatever its origin, through one ordered pipeline.
//!
//! # Example
//!
//! ```
//! use elementa_core::{HookResult, HostElement, MemoryElement};
//! use elementa_fields::{FieldConfig, FieldSchema};
//! use elementa_lifecycle::{Component, Widget, WidgetContext};
//!
//! #[derive(Default)]
//! struct Badge;
//!
//! impl Widget for Badge {
//!     const TAG: &'static str = "doc-badge";
//!
//!     fn fields() -> FieldSchema {
//!         FieldSchema::builder()
//!             .field("count", FieldConfig::number().renders().default(0))
//!             .build()
//!     }
//!
//!     fn render<H: HostElement>(&mut self, cx: &mut WidgetContext<'_, H>) -> HookResult {
//!         let count = cx.fields().get_f64("count").unwrap_or(0.0);
//!         cx.set_shadow_content(&format!("<b>{count}</b>"));
//!         Ok(())
//!     }
//! }
//!
//! let mut badge = Component::new(Badge, MemoryElement::new("doc-badge"))?;
//! badge.attach()?;
//! badge.attribute_changed("count", None, Some("3"))?;
//! assert_eq!(badge.host().shadow_content(), Some("<b>3</b>"));
//! assert_eq!(badge.render_count(), 2);
//! # Ok::<(), elementa_lifecycle::LifecycleError>(())
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod reflect;
pub mod widget;

pub use component::Component;
pub use config::{DEFAULT_CHANGE_EVENT, INPUT_CHANGE_EVENT, LifecycleConfig};
pub use error::LifecycleError;
pub use widget::{Widget, WidgetContext};
