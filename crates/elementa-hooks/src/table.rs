//! Flat callback tables describing a widget type.
//!
//! Every hook is optional. Hooks receive the [`HookElement`] itself, so they
//! can read and write fields, touch the host element and re-render.

use std::fmt;
use std::rc::Rc;

use elementa_core::{DocumentId, HookResult, Value};

use crate::element::HookElement;

pub type LifecycleHook<H> = Rc<dyn Fn(&mut HookElement<H>) -> HookResult>;
pub type ReparentHook<H> = Rc<dyn Fn(&mut HookElement<H>, DocumentId, DocumentId) -> HookResult>;
pub type AttributeHook<H> =
    Rc<dyn Fn(&mut HookElement<H>, &str, Option<&str>, Option<&str>) -> HookResult>;
pub type FieldHook<H> = Rc<dyn Fn(&mut HookElement<H>, &str, &Value, &Value) -> HookResult>;
pub type DisabledHook<H> = Rc<dyn Fn(&mut HookElement<H>, bool) -> HookResult>;
pub type RestoreHook<H> = Rc<dyn Fn(&mut HookElement<H>, &Value, RestoreReason) -> HookResult>;

/// Why the browser is restoring form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestoreReason {
    /// Session history navigation (back/forward).
    Restore,
    /// Autofill.
    Autocomplete,
}

impl RestoreReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restore => "restore",
            Self::Autocomplete => "autocomplete",
        }
    }
}

impl fmt::Display for RestoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed attributes, declared fields, form participation and hooks of one
/// widget type.
///
/// ```
/// use elementa_core::MemoryElement;
/// use elementa_hooks::HookTable;
///
/// let table = HookTable::<MemoryElement>::new()
///     .observe(["open", "placement"])
///     .fields(["open", "placement"])
///     .on_field_changed(|el, name, _old, new| {
///         tracing::debug!(name, %new, "field changed");
///         el.render()?;
///         Ok(())
///     });
/// assert_eq!(table.observed(), ["open", "placement"]);
/// ```
pub struct HookTable<H> {
    pub(crate) observed: Vec<String>,
    pub(crate) fields: Vec<String>,
    pub(crate) form_participant: bool,
    pub(crate) construct: Option<LifecycleHook<H>>,
    pub(crate) attach: Option<LifecycleHook<H>>,
    pub(crate) detach: Option<LifecycleHook<H>>,
    pub(crate) reparent: Option<ReparentHook<H>>,
    pub(crate) attribute_changed: Option<AttributeHook<H>>,
    pub(crate) field_changed: Option<FieldHook<H>>,
    pub(crate) render: Option<LifecycleHook<H>>,
    pub(crate) form_reset: Option<LifecycleHook<H>>,
    pub(crate) form_disabled_changed: Option<DisabledHook<H>>,
    pub(crate) form_state_restore: Option<RestoreHook<H>>,
}

impl<H> Default for HookTable<H> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            fields: Vec::new(),
            form_participant: false,
            construct: None,
            attach: None,
            detach: None,
            reparent: None,
            attribute_changed: None,
            field_changed: None,
            render: None,
            form_reset: None,
            form_disabled_changed: None,
            form_state_restore: None,
        }
    }
}

impl<H> HookTable<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup attributes delivered to the attribute hook.
    #[must_use]
    pub fn observe<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.observed.extend(attributes.into_iter().map(Into::into));
        self
    }

    /// Keys that get an accessor pair on every instance.
    #[must_use]
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Participate in native form submission, reset and restore.
    #[must_use]
    pub fn form_participant(mut self) -> Self {
        self.form_participant = true;
        self
    }

    #[must_use]
    pub fn on_construct(mut self, f: impl Fn(&mut HookElement<H>) -> HookResult + 'static) -> Self {
        self.construct = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_attach(mut self, f: impl Fn(&mut HookElement<H>) -> HookResult + 'static) -> Self {
        self.attach = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_detach(mut self, f: impl Fn(&mut HookElement<H>) -> HookResult + 'static) -> Self {
        self.detach = Some(Rc::new(f));
        self
    }

    /// Element moved to another document: `(element, old, new)`.
    #[must_use]
    pub fn on_reparent(
        mut self,
        f: impl Fn(&mut HookElement<H>, DocumentId, DocumentId) -> HookResult + 'static,
    ) -> Self {
        self.reparent = Some(Rc::new(f));
        self
    }

    /// Observed attribute changed: `(element, name, old, new)`.
    #[must_use]
    pub fn on_attribute_changed(
        mut self,
        f: impl Fn(&mut HookElement<H>, &str, Option<&str>, Option<&str>) -> HookResult + 'static,
    ) -> Self {
        self.attribute_changed = Some(Rc::new(f));
        self
    }

    /// Field written: `(element, name, old, new)`.
    #[must_use]
    pub fn on_field_changed(
        mut self,
        f: impl Fn(&mut HookElement<H>, &str, &Value, &Value) -> HookResult + 'static,
    ) -> Self {
        self.field_changed = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_render(mut self, f: impl Fn(&mut HookElement<H>) -> HookResult + 'static) -> Self {
        self.render = Some(Rc::new(f));
        self
    }

    /// Replaces the default form reset.
    #[must_use]
    pub fn on_form_reset(mut self, f: impl Fn(&mut HookElement<H>) -> HookResult + 'static) -> Self {
        self.form_reset = Some(Rc::new(f));
        self
    }

    /// Replaces the default reaction to an ancestor form's disabled state.
    #[must_use]
    pub fn on_form_disabled_changed(
        mut self,
        f: impl Fn(&mut HookElement<H>, bool) -> HookResult + 'static,
    ) -> Self {
        self.form_disabled_changed = Some(Rc::new(f));
        self
    }

    /// Replaces the default form state restoration.
    #[must_use]
    pub fn on_form_state_restore(
        mut self,
        f: impl Fn(&mut HookElement<H>, &Value, RestoreReason) -> HookResult + 'static,
    ) -> Self {
        self.form_state_restore = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    #[must_use]
    pub fn declared_fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn is_form_participant(&self) -> bool {
        self.form_participant
    }

    #[must_use]
    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<H> fmt::Debug for HookTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: Vec<&str> = [
            ("construct", self.construct.is_some()),
            ("attach", self.attach.is_some()),
            ("detach", self.detach.is_some()),
            ("reparent", self.reparent.is_some()),
            ("attribute_changed", self.attribute_changed.is_some()),
            ("field_changed", self.field_changed.is_some()),
            ("render", self.render.is_some()),
            ("form_reset", self.form_reset.is_some()),
            ("form_disabled_changed", self.form_disabled_changed.is_some()),
            ("form_state_restore", self.form_state_restore.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        f.debug_struct("HookTable")
            .field("observed", &self.observed)
            .field("fields", &self.fields)
            .field("form_participant", &self.form_participant)
            .field("hooks", &hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elementa_core::MemoryElement;

    #[test]
    fn builder_collects_declarations() {
        let table = HookTable::<MemoryElement>::new()
            .observe(["open"])
            .observe(vec![String::from("label")])
            .fields(["open"])
            .form_participant()
            .on_render(|_| Ok(()));
        assert_eq!(table.observed(), ["open", "label"]);
        assert_eq!(table.declared_fields(), ["open"]);
        assert!(table.is_form_participant());
        assert!(table.has_render());
    }

    #[test]
    fn debug_lists_present_hooks() {
        let table = HookTable::<MemoryElement>::new()
            .on_attach(|_| Ok(()))
            .on_form_reset(|_| Ok(()));
        let text = format!("{table:?}");
        assert!(text.contains(r#"hooks: ["attach", "form_reset"]"#));
    }

    #[test]
    fn restore_reason_names() {
        assert_eq!(RestoreReason::Restore.to_string(), "restore");
        assert_eq!(RestoreReason::Autocomplete.as_str(), "autocomplete");
    }
}
