//! Orchestration of one widget instance.
//!
//! [`Component`] owns a widget, its host element and its [`FieldStore`], and
//! turns every accepted field change into the same ordered effects:
//!
//! 1. `fields_changed` hook with the whole batch
//! 2. form value push, if any changed field syncs the form value
//! 3. one render, if any changed field triggers render and the instance is
//!    attached
//! 4. one change notification per changed field that emits one
//!
//! # State machine
//!
//! `Constructed → Attached ⇄ Detached`; [`Component::dispose`] consumes the
//! instance. Attribute changes and field writes are accepted in every state.
//! Renders only happen while attached; render-triggering changes made while
//! not attached are remembered and drawn on the next attach.

use std::sync::Arc;

use elementa_core::{
    ChangeRecord, ElementEvent, FormId, HostElement, LifecycleState, Origin, Value, to_camel_case,
};
use elementa_fields::{FieldSchema, FieldStore, SchemaRegistry};

use crate::config::LifecycleConfig;
use crate::error::LifecycleError;
use crate::reflect::reflect;
use crate::widget::{Widget, WidgetContext};

/// A widget bound to a host element.
pub struct Component<W: Widget, H: HostElement> {
    widget: W,
    host: H,
    fields: FieldStore,
    config: LifecycleConfig,
    state: LifecycleState,
    renders: u64,
    /// A render-triggering change arrived while not attached.
    stale: bool,
}

impl<W: Widget, H: HostElement> Component<W, H> {
    /// Bind `widget` to `host`, using the process-wide schema registry.
    pub fn new(widget: W, host: H) -> Result<Self, LifecycleError> {
        Self::new_in(SchemaRegistry::global(), widget, host)
    }

    /// Bind `widget` to `host`, resolving the schema in `registry`.
    ///
    /// Establishes form participation and the isolated subtree, then replays
    /// observed attributes already present in markup.
    pub fn new_in(registry: &SchemaRegistry, widget: W, mut host: H) -> Result<Self, LifecycleError> {
        let schema = registry.get_or_define(W::TAG, W::fields);
        let config = W::config();
        if config.collides_with_input_event() {
            tracing::warn!(
                widget = W::TAG,
                event = %config.change_event,
                "field-change event name collides with the input change event"
            );
        }
        host.attach_internals();
        host.ensure_shadow_root();

        let mut component = Self {
            widget,
            host,
            fields: FieldStore::new(schema),
            config,
            state: LifecycleState::Constructed,
            renders: 0,
            stale: true,
        };
        tracing::debug!(widget = W::TAG, "component constructed");
        component.replay_markup()?;
        Ok(component)
    }

    /// Deliver attributes written before the type was defined.
    fn replay_markup(&mut self) -> Result<(), LifecycleError> {
        let present: Vec<(String, String)> = self
            .fields
            .schema()
            .observed_attributes()
            .into_iter()
            .filter_map(|name| {
                let value = self.host.attribute(&name)?.to_owned();
                Some((name, value))
            })
            .collect();
        for (name, value) in present {
            self.attribute_changed(&name, None, Some(&value))?;
        }
        Ok(())
    }

    /// Attributes the embedding runtime should report through
    /// [`attribute_changed`](Self::attribute_changed).
    #[must_use]
    pub fn observed_attributes(&self) -> Vec<String> {
        self.fields.schema().observed_attributes()
    }

    /// The element joined a document.
    ///
    /// Captures values assigned on the raw element before the kernel took
    /// over, replays them as one field-origin batch, runs `on_attach`, then
    /// renders once if nothing has been drawn yet (or something changed since
    /// the last draw).
    pub fn attach(&mut self) -> Result<(), LifecycleError> {
        if self.state.is_attached() {
            return Ok(());
        }

        let schema: Arc<FieldSchema> = Arc::clone(self.fields.schema());
        let captured: Vec<(String, Value)> = schema
            .names()
            .filter_map(|name| {
                self.host
                    .take_own_property(name)
                    .map(|value| (name.to_owned(), value))
            })
            .collect();
        if !captured.is_empty() {
            tracing::debug!(widget = W::TAG, count = captured.len(), "pending fields captured");
        }
        let changes = captured
            .into_iter()
            .filter_map(|(name, value)| self.fields.update(&name, value, Origin::Field))
            .collect();
        self.process(changes)?;

        self.state = LifecycleState::Attached;
        tracing::debug!(widget = W::TAG, "attached");
        let mut cx = WidgetContext::new(&self.fields, &mut self.host, self.state);
        self.widget
            .on_attach(&mut cx)
            .map_err(LifecycleError::hook("on_attach"))?;

        if self.stale {
            self.render()?;
        }
        Ok(())
    }

    /// The element left its document.
    pub fn detach(&mut self) -> Result<(), LifecycleError> {
        if !self.state.is_attached() {
            return Ok(());
        }
        self.state = LifecycleState::Detached;
        tracing::debug!(widget = W::TAG, "detached");
        let mut cx = WidgetContext::new(&self.fields, &mut self.host, self.state);
        self.widget
            .on_detach(&mut cx)
            .map_err(LifecycleError::hook("on_detach"))
    }

    /// Release the instance, returning its host element.
    pub fn dispose(self) -> H {
        tracing::debug!(widget = W::TAG, state = %self.state, "disposed");
        self.host
    }

    /// An observed markup attribute changed. `None` means absent.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), LifecycleError> {
        if old == new {
            return Ok(());
        }
        let raw = new.map_or(Value::Null, Value::from);
        let change = if self.fields.schema().is_alias(name) {
            self.fields.resolve_alias(name, &raw)
        } else {
            self.fields.update(&to_camel_case(name), raw, Origin::Attribute)
        };
        self.process(change.into_iter().collect())
    }

    /// Imperative write from the host application.
    ///
    /// Returns whether the field changed.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<bool, LifecycleError> {
        self.write(name, value.into(), Origin::Field)
    }

    /// State transition made by the widget itself (e.g. a user toggled it).
    pub fn set_internal(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<bool, LifecycleError> {
        self.write(name, value.into(), Origin::Internal)
    }

    fn write(&mut self, name: &str, value: Value, origin: Origin) -> Result<bool, LifecycleError> {
        match self.fields.update(name, value, origin) {
            Some(change) => self.process(vec![change]).map(|()| true),
            None => Ok(false),
        }
    }

    /// Several imperative writes processed as one batch: at most one render.
    pub fn set_fields<I, K, V>(&mut self, values: I) -> Result<usize, LifecycleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let changes: Vec<ChangeRecord> = values
            .into_iter()
            .filter_map(|(name, value)| self.fields.update(name.as_ref(), value, Origin::Field))
            .collect();
        let count = changes.len();
        self.process(changes).map(|()| count)
    }

    /// Run the ordered effect pipeline over one batch.
    fn process(&mut self, changes: Vec<ChangeRecord>) -> Result<(), LifecycleError> {
        if changes.is_empty() {
            return Ok(());
        }
        let span = tracing::debug_span!("field_batch", widget = W::TAG, changes = changes.len());
        let _guard = span.enter();

        if self.config.reflect_attributes {
            for change in changes.iter().filter(|c| c.origin != Origin::Attribute) {
                reflect(&mut self.host, &change.name, &change.new_value);
            }
        }

        let mut cx = WidgetContext::new(&self.fields, &mut self.host, self.state);
        self.widget
            .fields_changed(&changes, &mut cx)
            .map_err(LifecycleError::hook("fields_changed"))?;

        if changes.iter().any(|c| self.fields.is_form_value_field(&c.name)) {
            self.sync_form_value();
        }

        if changes.iter().any(|c| self.fields.is_render_trigger(&c.name)) {
            if self.state.is_attached() {
                self.render()?;
            } else {
                self.stale = true;
            }
        }

        for change in changes.iter().filter(|c| self.fields.emits_change_event(&c.name)) {
            let event = ElementEvent::new(
                self.config.change_event.as_str(),
                change.detail().to_value(),
            )
            .bubbles(self.config.bubbles)
            .composed(self.config.composed);
            self.host.dispatch_event(event);
        }
        Ok(())
    }

    /// Push the widget's current form value to the form participation API.
    pub fn sync_form_value(&mut self) {
        let value = self.widget.form_value(&self.fields);
        if let Some(internals) = self.host.internals_mut() {
            internals.set_form_value(value);
        }
    }

    /// Render now, regardless of state.
    pub fn render(&mut self) -> Result<(), LifecycleError> {
        let mut cx = WidgetContext::new(&self.fields, &mut self.host, self.state);
        self.widget
            .render(&mut cx)
            .map_err(LifecycleError::hook("render"))?;
        self.renders += 1;
        self.stale = false;
        tracing::trace!(widget = W::TAG, renders = self.renders, "rendered");
        Ok(())
    }

    /// Render if attached; otherwise remember to render on attach.
    ///
    /// For widgets whose own (non-field) state changed.
    pub fn request_render(&mut self) -> Result<bool, LifecycleError> {
        if self.state.is_attached() {
            self.render().map(|()| true)
        } else {
            self.stale = true;
            Ok(false)
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Number of completed renders.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    #[must_use]
    pub fn has_rendered(&self) -> bool {
        self.renders > 0
    }

    /// Owning form, read from the form participation API.
    #[must_use]
    pub fn form(&self) -> Option<FormId> {
        self.host.internals().and_then(|i| i.form())
    }

    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Mutable widget access for handling its own interaction events.
    /// Field changes still go through [`set_internal`](Self::set_internal).
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<W: Widget + std::fmt::Debug, H: HostElement + std::fmt::Debug> std::fmt::Debug
    for Component<W, H>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("tag", &W::TAG)
            .field("state", &self.state)
            .field("fields", &self.fields.get_all())
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}
