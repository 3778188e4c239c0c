//! The widget side of the lifecycle contract.
//!
//! A concrete widget implements [`Widget`]: it declares its fields once per
//! type and supplies hooks that the [`Component`](crate::Component) calls in
//! a fixed order. Hooks never mutate fields directly; they read the store
//! through [`WidgetContext`] and act on the host element.

use elementa_core::{
    ChangeRecord, ElementEvent, FormValue, HookResult, HostElement, LifecycleState, Value,
};
use elementa_fields::{FieldSchema, FieldStore};

use crate::config::LifecycleConfig;

/// What a hook sees while it runs.
pub struct WidgetContext<'a, H: HostElement> {
    fields: &'a FieldStore,
    host: &'a mut H,
    state: LifecycleState,
}

impl<'a, H: HostElement> WidgetContext<'a, H> {
    pub(crate) fn new(fields: &'a FieldStore, host: &'a mut H, state: LifecycleState) -> Self {
        Self {
            fields,
            host,
            state,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &FieldStore {
        self.fields
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Replace the widget's isolated subtree.
    pub fn set_shadow_content(&mut self, content: &str) {
        self.host.set_shadow_content(content);
    }

    pub fn dispatch(&mut self, event: ElementEvent) {
        self.host.dispatch_event(event);
    }
}

/// A widget type driven by the lifecycle controller.
///
/// Only [`TAG`](Self::TAG), [`fields`](Self::fields) and
/// [`render`](Self::render) are required.
pub trait Widget {
    /// Tag name; also the key of this type's schema in the schema registry.
    const TAG: &'static str;

    /// Field declarations. Called once per process, when the first instance
    /// is constructed.
    fn fields() -> FieldSchema;

    fn config() -> LifecycleConfig {
        LifecycleConfig::default()
    }

    /// Draw into the isolated subtree. Must be idempotent.
    fn render<H: HostElement>(&mut self, cx: &mut WidgetContext<'_, H>) -> HookResult;

    /// Recompute derived state from a batch of changes, before anything is
    /// drawn.
    fn fields_changed<H: HostElement>(
        &mut self,
        _changes: &[ChangeRecord],
        _cx: &mut WidgetContext<'_, H>,
    ) -> HookResult {
        Ok(())
    }

    fn on_attach<H: HostElement>(&mut self, _cx: &mut WidgetContext<'_, H>) -> HookResult {
        Ok(())
    }

    fn on_detach<H: HostElement>(&mut self, _cx: &mut WidgetContext<'_, H>) -> HookResult {
        Ok(())
    }

    /// Value submitted with the owning form. Defaults to the `value` field as
    /// text; `None` clears the submission.
    fn form_value(&self, fields: &FieldStore) -> Option<FormValue> {
        match fields.get("value")? {
            Value::Null => None,
            Value::String(s) => Some(FormValue::Text(s.clone())),
            other => Some(FormValue::Text(other.to_string())),
        }
    }
}
