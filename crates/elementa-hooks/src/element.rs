//! One hook-defined element instance.
//!
//! Fields declared in the [`HookTable`](crate::HookTable) are stored in a
//! per-instance map; writing one calls the field hook. For form participants
//! the form control fields (`name`, `type`, `disabled`, `required`) are kept
//! in sync with their attributes in both directions, and `value` follows its
//! attribute. While an attribute is being copied into its field, that one
//! control is marked as syncing so the field write does not echo back to the
//! attribute. Other controls written by hooks during the sync still reflect.

use std::rc::Rc;

use ahash::AHashMap;
use elementa_core::{DocumentId, ElementEvent, HostElement, LifecycleState, Value};

use crate::error::KernelError;
use crate::registry::Definition;

/// Form control fields mirrored to attributes.
pub const FORM_CONTROL_FIELDS: [&str; 4] = ["name", "type", "disabled", "required"];

/// Attributes synchronized into fields for form participants.
pub const FORM_SYNCED_ATTRIBUTES: [&str; 5] = ["name", "type", "disabled", "required", "value"];

/// Form state captured at first attachment, restored on form reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialFormState {
    pub value: String,
    pub disabled: bool,
    pub input_type: String,
    pub placeholder: String,
}

impl InitialFormState {
    fn capture<H: HostElement>(host: &H) -> Self {
        let text = |name: &str| host.attribute(name).unwrap_or_default().to_owned();
        Self {
            value: text("value"),
            disabled: host.has_attribute("disabled"),
            input_type: text("type"),
            placeholder: text("placeholder"),
        }
    }
}

pub(crate) fn is_boolean_control(name: &str) -> bool {
    matches!(name, "disabled" | "required")
}

/// Truthiness of an assigned value when it drives presence of a boolean
/// attribute.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A live element driven by a [`Definition`].
pub struct HookElement<H> {
    pub(crate) definition: Rc<Definition<H>>,
    pub(crate) host: H,
    fields: AHashMap<String, Value>,
    state: LifecycleState,
    /// Control whose attribute is being copied into its field.
    pub(crate) syncing: Option<String>,
    pub(crate) initial_form_state: Option<InitialFormState>,
}

impl<H: HostElement> HookElement<H> {
    /// Construct, run the construct hook, then replay observed attributes
    /// already present in markup.
    pub(crate) fn create(definition: Rc<Definition<H>>, mut host: H) -> Result<Self, KernelError> {
        if definition.hooks().is_form_participant() {
            host.attach_internals();
        }
        let mut element = Self {
            definition,
            host,
            fields: AHashMap::new(),
            state: LifecycleState::Constructed,
            syncing: None,
            initial_form_state: None,
        };

        let definition = Rc::clone(&element.definition);
        tracing::debug!(tag = definition.tag(), "element constructed");
        if let Some(hook) = &definition.hooks().construct {
            hook(&mut element).map_err(KernelError::hook("construct"))?;
        }

        let present: Vec<(String, String)> = definition
            .hooks()
            .observed()
            .iter()
            .filter_map(|name| Some((name.clone(), element.host.attribute(name)?.to_owned())))
            .collect();
        for (name, value) in present {
            element.attribute_changed(&name, None, Some(&value))?;
        }
        Ok(element)
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        self.definition.tag()
    }

    #[must_use]
    pub fn definition(&self) -> &Rc<Definition<H>> {
        &self.definition
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn is_form_participant(&self) -> bool {
        self.definition.hooks().is_form_participant()
    }

    /// The element joined a document.
    ///
    /// Form participants capture their initial form state the first time.
    pub fn attach(&mut self) -> Result<(), KernelError> {
        if self.state.is_attached() {
            return Ok(());
        }
        self.state = LifecycleState::Attached;
        if self.is_form_participant() && self.initial_form_state.is_none() {
            self.initial_form_state = Some(InitialFormState::capture(&self.host));
        }
        tracing::debug!(tag = self.tag(), "attached");
        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().attach {
            hook(self).map_err(KernelError::hook("attach"))?;
        }
        Ok(())
    }

    pub fn detach(&mut self) -> Result<(), KernelError> {
        if !self.state.is_attached() {
            return Ok(());
        }
        self.state = LifecycleState::Detached;
        tracing::debug!(tag = self.tag(), "detached");
        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().detach {
            hook(self).map_err(KernelError::hook("detach"))?;
        }
        Ok(())
    }

    /// The element moved from document `old` to document `new`.
    pub fn reparent(&mut self, old: DocumentId, new: DocumentId) -> Result<(), KernelError> {
        tracing::debug!(tag = self.tag(), old = old.id(), new = new.id(), "reparented");
        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().reparent {
            hook(self, old, new).map_err(KernelError::hook("reparent"))?;
        }
        Ok(())
    }

    /// An observed attribute changed. `None` means absent.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old: Option<&str>,
        new: Option<&str>,
    ) -> Result<(), KernelError> {
        if old == new {
            return Ok(());
        }

        if self.is_form_participant()
            && FORM_SYNCED_ATTRIBUTES.contains(&name)
            && !self.is_syncing(name)
        {
            let value = if is_boolean_control(name) {
                Value::Bool(new.is_some())
            } else {
                new.map_or(Value::Null, Value::from)
            };
            let previous = self.syncing.replace(name.to_owned());
            let synced = self.set_field(name, value);
            self.syncing = previous;
            synced?;
        }

        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().attribute_changed {
            hook(self, name, old, new).map_err(KernelError::hook("attribute_changed"))?;
        }
        Ok(())
    }

    fn is_syncing(&self, name: &str) -> bool {
        self.syncing.as_deref() == Some(name)
    }

    fn is_declared(&self, name: &str) -> bool {
        let hooks = self.definition.hooks();
        hooks.declared_fields().iter().any(|f| f == name)
            || (hooks.is_form_participant() && FORM_SYNCED_ATTRIBUTES.contains(&name))
    }

    /// Write a declared field and call the field hook.
    ///
    /// Returns `Ok(false)` without calling the hook when the value is
    /// unchanged or the field is not declared (logged).
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<bool, KernelError> {
        let value = value.into();
        if !self.is_declared(name) {
            tracing::warn!(tag = self.tag(), field = name, "write to undeclared field dropped");
            return Ok(false);
        }
        let old = self.fields.get(name).cloned().unwrap_or(Value::Null);
        if old == value {
            return Ok(false);
        }
        self.fields.insert(name.to_owned(), value.clone());

        if !self.is_syncing(name)
            && self.is_form_participant()
            && FORM_CONTROL_FIELDS.contains(&name)
        {
            self.reflect_control(name, &value);
        }

        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().field_changed {
            hook(self, name, &old, &value).map_err(KernelError::hook("field_changed"))?;
        }
        Ok(true)
    }

    /// Keep a form control attribute in step with its field.
    fn reflect_control(&mut self, name: &str, value: &Value) {
        let text = if is_boolean_control(name) {
            truthy(value).then(String::new)
        } else {
            match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        };
        match text {
            Some(text) => self.host.set_attribute(name, &text),
            None => self.host.remove_attribute(name),
        }
    }

    /// Write several fields in order, one field hook call per changed key.
    pub fn set_fields<I, K, V>(&mut self, values: I) -> Result<usize, KernelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut changed = 0;
        for (name, value) in values {
            if self.set_field(name.as_ref(), value)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All fields written so far.
    #[must_use]
    pub fn fields(&self) -> &AHashMap<String, Value> {
        &self.fields
    }

    /// Call the render hook. Returns `false` if the widget has none.
    pub fn render(&mut self) -> Result<bool, KernelError> {
        let definition = Rc::clone(&self.definition);
        match &definition.hooks().render {
            Some(hook) => {
                hook(self).map_err(KernelError::hook("render"))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the isolated subtree's content.
    pub fn set_shadow_content(&mut self, content: &str) {
        self.host.set_shadow_content(content);
    }

    pub fn dispatch(&mut self, event: ElementEvent) {
        self.host.dispatch_event(event);
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Release the instance, returning its host element.
    pub fn dispose(self) -> H {
        tracing::debug!(tag = self.tag(), state = %self.state, "disposed");
        self.host
    }
}

impl<H: HostElement + std::fmt::Debug> std::fmt::Debug for HookElement<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookElement")
            .field("tag", &self.tag())
            .field("state", &self.state)
            .field("fields", &self.fields)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}
