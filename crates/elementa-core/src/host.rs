//! The seam between a widget kernel and the document that hosts it.
//!
//! A kernel never owns the element it drives. It reads and writes markup
//! attributes, dispatches notifications, and pushes form values through the
//! [`HostElement`] trait; the embedding runtime (a browser binding, a test
//! harness, [`MemoryElement`](crate::MemoryElement)) implements it.
//!
//! # Invariants
//!
//! - Writes made through the trait do not re-enter the kernel. Delivering
//!   attribute-change notifications back to the kernel is the embedding
//!   runtime's job.
//! - `take_own_property` is destructive: a value is returned at most once.

use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

/// Global counter for document identities.
static DOCUMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of the document an element currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// The document elements start in.
    pub const MAIN: Self = Self(0);

    /// Allocate a fresh document identity.
    #[must_use]
    pub fn next() -> Self {
        Self(DOCUMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Identity of an owning `<form>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(pub u64);

/// Value contributed to a surrounding form on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Single text value submitted under the element's name.
    Text(String),
    /// Multiple `(name, value)` entries, e.g. a multi-select.
    Entries(Vec<(String, String)>),
}

impl FormValue {
    /// Text of a single-valued submission, `None` for entry lists.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Entries(_) => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Notification dispatched on a host element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementEvent {
    pub name: String,
    pub detail: Value,
    pub bubbles: bool,
    pub composed: bool,
}

impl ElementEvent {
    /// A non-bubbling, non-composed event.
    #[must_use]
    pub fn new(name: impl Into<String>, detail: Value) -> Self {
        Self {
            name: name.into(),
            detail,
            bubbles: false,
            composed: false,
        }
    }

    #[must_use]
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Whether the event crosses shadow-root boundaries.
    #[must_use]
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }
}

/// Per-instance lifecycle state.
///
/// `Constructed → Attached ⇄ Detached`. Disposal is terminal and expressed by
/// consuming the instance, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Constructed,
    Attached,
    Detached,
}

impl LifecycleState {
    #[inline]
    pub const fn is_attached(self) -> bool {
        matches!(self, Self::Attached)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constructed => "constructed",
            Self::Attached => "attached",
            Self::Detached => "detached",
        })
    }
}

/// Native form participation API of one element.
///
/// The kernel writes through it and reads ambient state; it never owns the
/// lifecycle of the form itself.
pub trait FormInternals {
    /// Set (or clear, with `None`) the value submitted with the owning form.
    fn set_form_value(&mut self, value: Option<FormValue>);

    /// Owning form, if the element is inside one.
    fn form(&self) -> Option<FormId>;
}

/// Element the kernel is attached to.
pub trait HostElement {
    /// Lowercase tag name.
    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    fn set_attribute(&mut self, name: &str, value: &str);

    fn remove_attribute(&mut self, name: &str);

    /// Remove and return a value a host application assigned directly on the
    /// element object before the kernel took over (the pending snapshot).
    fn take_own_property(&mut self, name: &str) -> Option<Value>;

    fn dispatch_event(&mut self, event: ElementEvent);

    fn has_shadow_root(&self) -> bool;

    /// Create the isolated visual subtree if it does not exist yet.
    /// Returns `true` if one was created.
    fn ensure_shadow_root(&mut self) -> bool;

    /// Replace the isolated subtree's content. Creates the subtree if needed.
    fn set_shadow_content(&mut self, content: &str);

    /// Establish native form participation. Idempotent.
    fn attach_internals(&mut self);

    fn internals(&self) -> Option<&dyn FormInternals>;

    fn internals_mut(&mut self) -> Option<&mut dyn FormInternals>;

    /// Document the element currently belongs to.
    fn document(&self) -> DocumentId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ids_are_unique() {
        let a = DocumentId::next();
        let b = DocumentId::next();
        assert_ne!(a, b);
        assert_ne!(a, DocumentId::MAIN);
        assert!(b.id() > a.id());
    }

    #[test]
    fn event_builder() {
        let event = ElementEvent::new("prop:change", Value::Null)
            .bubbles(true)
            .composed(true);
        assert!(event.bubbles);
        assert!(event.composed);
        assert_eq!(event.name, "prop:change");
    }

    #[test]
    fn lifecycle_state_display() {
        assert_eq!(LifecycleState::default(), LifecycleState::Constructed);
        assert_eq!(LifecycleState::Detached.to_string(), "detached");
        assert!(LifecycleState::Attached.is_attached());
        assert!(!LifecycleState::Constructed.is_attached());
    }

    #[test]
    fn form_value_text() {
        assert_eq!(FormValue::from("on").as_text(), Some("on"));
        assert_eq!(FormValue::Entries(vec![]).as_text(), None);
    }
}
