//! Deterministic in-memory host element.
//!
//! [`MemoryElement`] records everything a kernel does to it (attribute
//! writes, dispatched events, form values, shadow content) so that embedders
//! without a browser, and tests, can drive and observe a widget.
//!
//! It does not deliver attribute-change notifications back to the kernel;
//! callers do that explicitly, the way a document's reaction queue would.

use ahash::AHashMap;
use serde_json::Value;

use crate::host::{DocumentId, ElementEvent, FormId, FormInternals, FormValue, HostElement};

/// Recorded form participation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFormInternals {
    value: Option<FormValue>,
    form: Option<FormId>,
    writes: usize,
}

impl MemoryFormInternals {
    /// Last value pushed with `set_form_value`.
    #[must_use]
    pub fn value(&self) -> Option<&FormValue> {
        self.value.as_ref()
    }

    /// Number of `set_form_value` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl FormInternals for MemoryFormInternals {
    fn set_form_value(&mut self, value: Option<FormValue>) {
        self.value = value;
        self.writes += 1;
    }

    fn form(&self) -> Option<FormId> {
        self.form
    }
}

/// Headless [`HostElement`].
#[derive(Debug, Clone)]
pub struct MemoryElement {
    tag: String,
    /// Attributes in insertion order.
    attributes: Vec<(String, String)>,
    own_properties: AHashMap<String, Value>,
    events: Vec<ElementEvent>,
    shadow: Option<String>,
    internals: Option<MemoryFormInternals>,
    pending_form: Option<FormId>,
    document: DocumentId,
}

impl MemoryElement {
    /// Create a detached element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            own_properties: AHashMap::new(),
            events: Vec::new(),
            shadow: None,
            internals: None,
            pending_form: None,
            document: DocumentId::MAIN,
        }
    }

    /// Builder form of [`HostElement::set_attribute`] (parser-written markup).
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Place the element inside a form.
    #[must_use]
    pub fn in_form(mut self, form: FormId) -> Self {
        self.pending_form = Some(form);
        if let Some(internals) = &mut self.internals {
            internals.form = Some(form);
        }
        self
    }

    /// Assign a value directly on the element object, shadowing the kernel's
    /// accessor until the kernel captures it on attachment.
    pub fn set_own_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.own_properties.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn own_property(&self, name: &str) -> Option<&Value> {
        self.own_properties.get(name)
    }

    /// Attribute names in insertion order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(n, _)| n.as_str())
    }

    /// All events dispatched so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ElementEvent] {
        &self.events
    }

    /// Events dispatched under `name`.
    pub fn events_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ElementEvent> {
        self.events.iter().filter(move |e| e.name == name)
    }

    /// Drain recorded events.
    pub fn take_events(&mut self) -> Vec<ElementEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn shadow_content(&self) -> Option<&str> {
        self.shadow.as_deref()
    }

    #[must_use]
    pub fn form_internals(&self) -> Option<&MemoryFormInternals> {
        self.internals.as_ref()
    }

    /// Move the element to another document.
    pub fn set_document(&mut self, document: DocumentId) {
        self.document = document;
    }
}

impl HostElement for MemoryElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    fn take_own_property(&mut self, name: &str) -> Option<Value> {
        self.own_properties.remove(name)
    }

    fn dispatch_event(&mut self, event: ElementEvent) {
        tracing::trace!(tag = %self.tag, event = %event.name, "dispatch");
        self.events.push(event);
    }

    fn has_shadow_root(&self) -> bool {
        self.shadow.is_some()
    }

    fn ensure_shadow_root(&mut self) -> bool {
        if self.shadow.is_some() {
            return false;
        }
        self.shadow = Some(String::new());
        true
    }

    fn set_shadow_content(&mut self, content: &str) {
        let shadow = self.shadow.get_or_insert_with(String::new);
        shadow.clear();
        shadow.push_str(content);
    }

    fn attach_internals(&mut self) {
        if self.internals.is_none() {
            self.internals = Some(MemoryFormInternals {
                form: self.pending_form,
                ..MemoryFormInternals::default()
            });
        }
    }

    fn internals(&self) -> Option<&dyn FormInternals> {
        self.internals.as_ref().map(|i| i as &dyn FormInternals)
    }

    fn internals_mut(&mut self) -> Option<&mut dyn FormInternals> {
        self.internals
            .as_mut()
            .map(|i| i as &mut dyn FormInternals)
    }

    fn document(&self) -> DocumentId {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_keep_insertion_order() {
        let mut el = MemoryElement::new("x-field")
            .with_attribute("b", "2")
            .with_attribute("a", "1");
        el.set_attribute("b", "3");
        assert_eq!(el.attribute_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(el.attribute("b"), Some("3"));

        el.remove_attribute("b");
        assert!(!el.has_attribute("b"));
        assert_eq!(el.attribute("a"), Some("1"));
    }

    #[test]
    fn tag_is_lowercased() {
        assert_eq!(MemoryElement::new("X-Field").tag_name(), "x-field");
    }

    #[test]
    fn own_properties_are_taken_once() {
        let mut el = MemoryElement::new("x-field");
        el.set_own_property("value", "early");
        assert_eq!(el.own_property("value"), Some(&json!("early")));
        assert_eq!(el.take_own_property("value"), Some(json!("early")));
        assert_eq!(el.take_own_property("value"), None);
    }

    #[test]
    fn shadow_root_created_once() {
        let mut el = MemoryElement::new("x-field");
        assert!(!el.has_shadow_root());
        assert!(el.ensure_shadow_root());
        assert!(!el.ensure_shadow_root());
        el.set_shadow_content("<slot></slot>");
        assert_eq!(el.shadow_content(), Some("<slot></slot>"));
    }

    #[test]
    fn internals_record_writes_and_form() {
        let mut el = MemoryElement::new("x-field").in_form(FormId(7));
        assert!(el.internals().is_none());

        el.attach_internals();
        el.attach_internals();
        if let Some(internals) = el.internals_mut() {
            internals.set_form_value(Some(FormValue::from("v")));
        }
        let internals = el.form_internals().expect("internals attached");
        assert_eq!(internals.value(), Some(&FormValue::from("v")));
        assert_eq!(internals.writes(), 1);
        assert_eq!(el.internals().and_then(|i| i.form()), Some(FormId(7)));
    }

    #[test]
    fn events_are_recorded_and_drained() {
        let mut el = MemoryElement::new("x-field");
        el.dispatch_event(ElementEvent::new("a", json!(1)));
        el.dispatch_event(ElementEvent::new("b", json!(2)));
        el.dispatch_event(ElementEvent::new("a", json!(3)));
        assert_eq!(el.events_named("a").count(), 2);
        assert_eq!(el.take_events().len(), 3);
        assert!(el.events().is_empty());
    }
}
