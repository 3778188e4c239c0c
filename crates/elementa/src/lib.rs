#![forbid(unsafe_code)]

//! Elementa public facade and prelude.
//!
//! Elementa keeps an embeddable UI element's fields consistent across three
//! sources of mutation (markup attributes, imperative writes made before or
//! after attachment, and the widget's own state transitions) and turns each
//! accepted change into renders, native form values and change notifications.
//!
//! Two kernels implement the same contract:
//!
//! - [`lifecycle`]: a [`Widget`](lifecycle::Widget) trait driven by
//!   [`Component`](lifecycle::Component), backed by a typed
//!   [`FieldStore`](fields::FieldStore).
//! - [`hooks`]: flat [`HookTable`](hooks::HookTable)s of callbacks, for
//!   widgets with simpler needs.
//!
//! Both talk to the document through [`HostElement`](core::HostElement);
//! [`MemoryElement`](core::MemoryElement) is the headless implementation.

pub use elementa_core as core;
pub use elementa_fields as fields;
pub use elementa_hooks as hooks;
pub use elementa_lifecycle as lifecycle;

pub use elementa_core::{ChangeRecord, HookError, HookResult, HostElement, Origin, Value};

/// Everything a widget author usually needs.
pub mod prelude {
    pub use elementa_core::{
        ChangeRecord, DocumentId, ElementEvent, FieldChangeDetail, FormControlDetail, FormId,
        FormInternals, FormValue, HookError, HookResult, HostElement, LifecycleState,
        MemoryElement, Origin, Value,
    };
    pub use elementa_fields::{FieldConfig, FieldKind, FieldSchema, FieldStore, SchemaRegistry};
    pub use elementa_hooks::{
        DefinitionRegistry, HookElement, HookTable, KernelError, RestoreReason,
    };
    pub use elementa_lifecycle::{Component, LifecycleConfig, LifecycleError, Widget, WidgetContext};
}
