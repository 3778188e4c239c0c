//! Form control accessors and the native form lifecycle.
//!
//! | Callback | Custom hook | Default |
//! |----------|-------------|---------|
//! | reset | `form_reset` | restore initial value, disabled, type and placeholder; push value; render; `change` with `reason: "form-reset"` |
//! | ancestor disabled | `form_disabled_changed` | set `disabled`; render |
//! | state restore | `form_state_restore` | non-empty string state becomes `value`; push value; render |

use std::rc::Rc;

use elementa_core::{ElementEvent, FormControlDetail, FormId, FormValue, HostElement, Value};
use serde_json::json;

use crate::element::{HookElement, InitialFormState, truthy};
use crate::error::KernelError;
use crate::table::RestoreReason;

/// Name of the notification dispatched by form controls.
pub const CHANGE_EVENT: &str = "change";

impl<H: HostElement> HookElement<H> {
    /// A form control string: the field if written, else the attribute.
    fn control_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(value) => value.as_str(),
            None => self.host.attribute(name),
        }
    }

    /// A form control boolean: the field if written, else attribute presence.
    fn control_flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(value) => truthy(value),
            None => self.host.has_attribute(name),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.control_text("name")
    }

    pub fn set_name(&mut self, name: Option<&str>) -> Result<bool, KernelError> {
        self.set_field("name", name.map_or(Value::Null, Value::from))
    }

    /// The `type` control.
    #[must_use]
    pub fn input_type(&self) -> Option<&str> {
        self.control_text("type")
    }

    pub fn set_input_type(&mut self, input_type: Option<&str>) -> Result<bool, KernelError> {
        self.set_field("type", input_type.map_or(Value::Null, Value::from))
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.control_flag("disabled")
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Result<bool, KernelError> {
        self.set_field("disabled", disabled)
    }

    #[must_use]
    pub fn required(&self) -> bool {
        self.control_flag("required")
    }

    pub fn set_required(&mut self, required: bool) -> Result<bool, KernelError> {
        self.set_field("required", required)
    }

    /// The `value` field as text.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.get("value").and_then(Value::as_str)
    }

    /// Owning form, read from the form participation API.
    #[must_use]
    pub fn form(&self) -> Option<FormId> {
        self.host.internals().and_then(|i| i.form())
    }

    /// Push a value to the form participation API.
    pub fn set_form_value(&mut self, value: Option<FormValue>) {
        if let Some(internals) = self.host.internals_mut() {
            internals.set_form_value(value);
        }
    }

    #[must_use]
    pub fn initial_form_state(&self) -> Option<&InitialFormState> {
        self.initial_form_state.as_ref()
    }

    /// Dispatch a bubbling, composed `change` with a form control payload.
    pub fn dispatch_change(&mut self, detail: &FormControlDetail) {
        let event = ElementEvent::new(CHANGE_EVENT, detail.to_value())
            .bubbles(true)
            .composed(true);
        self.host.dispatch_event(event);
    }

    /// The owning form was reset.
    pub fn form_reset(&mut self) -> Result<(), KernelError> {
        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().form_reset {
            return hook(self).map_err(KernelError::hook("form_reset"));
        }

        let initial = self.initial_form_state.clone().unwrap_or_default();
        tracing::debug!(tag = self.tag(), value = %initial.value, "form reset");

        self.set_field("value", initial.value.as_str())?;
        self.restore_attribute("value", &initial.value);
        self.set_disabled(initial.disabled)?;
        if initial.disabled {
            self.host.set_attribute("disabled", "");
        } else {
            self.host.remove_attribute("disabled");
        }
        let input_type = (!initial.input_type.is_empty()).then_some(initial.input_type.as_str());
        if self.get("type").is_some() || input_type.is_some() {
            self.set_input_type(input_type)?;
        }
        self.restore_attribute("type", &initial.input_type);
        self.restore_attribute("placeholder", &initial.placeholder);

        self.set_form_value(Some(FormValue::Text(initial.value.clone())));
        self.render()?;

        let event = ElementEvent::new(
            CHANGE_EVENT,
            json!({ "value": initial.value, "reason": "form-reset" }),
        )
        .bubbles(true);
        self.host.dispatch_event(event);
        Ok(())
    }

    fn restore_attribute(&mut self, name: &str, text: &str) {
        if text.is_empty() {
            self.host.remove_attribute(name);
        } else {
            self.host.set_attribute(name, text);
        }
    }

    /// An ancestor fieldset or form changed disabled state.
    pub fn form_disabled_changed(&mut self, disabled: bool) -> Result<(), KernelError> {
        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().form_disabled_changed {
            return hook(self, disabled).map_err(KernelError::hook("form_disabled_changed"));
        }
        self.set_disabled(disabled)?;
        self.render()?;
        Ok(())
    }

    /// The browser restored form state (history navigation or autofill).
    pub fn form_state_restore(
        &mut self,
        state: &Value,
        reason: RestoreReason,
    ) -> Result<(), KernelError> {
        let definition = Rc::clone(&self.definition);
        if let Some(hook) = &definition.hooks().form_state_restore {
            return hook(self, state, reason).map_err(KernelError::hook("form_state_restore"));
        }
        let Some(text) = state.as_str().filter(|s| !s.is_empty()) else {
            tracing::debug!(tag = self.tag(), %reason, "non-text form state not restored");
            return Ok(());
        };
        let text = text.to_owned();
        self.set_field("value", text.as_str())?;
        self.set_form_value(Some(FormValue::Text(text)));
        self.render()?;
        Ok(())
    }
}
