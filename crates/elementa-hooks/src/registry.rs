//! Tag → definition registry.
//!
//! Like a document's custom element registry, a tag is defined once. Later
//! definitions of the same tag are ignored with a warning and the existing
//! definition is returned.

use std::rc::Rc;

use ahash::AHashMap;
use elementa_core::HostElement;

use crate::element::HookElement;
use crate::error::KernelError;
use crate::table::HookTable;

/// A registered widget type.
#[derive(Debug)]
pub struct Definition<H> {
    tag: String,
    hooks: HookTable<H>,
}

impl<H> Definition<H> {
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn hooks(&self) -> &HookTable<H> {
        &self.hooks
    }

    /// Attributes the embedding runtime reports to instances.
    #[must_use]
    pub fn observed_attributes(&self) -> &[String] {
        self.hooks.observed()
    }
}

/// Check `tag` is a valid custom element name: lowercase ASCII, starts with
/// a letter, contains a hyphen.
pub fn validate_tag(tag: &str) -> Result<(), KernelError> {
    let starts_with_letter = tag.starts_with(|c: char| c.is_ascii_lowercase());
    let charset_ok = tag
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'));
    if starts_with_letter && charset_ok && tag.contains('-') {
        Ok(())
    } else {
        Err(KernelError::InvalidTag(tag.to_owned()))
    }
}

/// Definitions for one host type.
#[derive(Debug)]
pub struct DefinitionRegistry<H> {
    definitions: AHashMap<String, Rc<Definition<H>>>,
}

impl<H> Default for DefinitionRegistry<H> {
    fn default() -> Self {
        Self {
            definitions: AHashMap::new(),
        }
    }
}

impl<H: HostElement> DefinitionRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hooks` under `tag`.
    ///
    /// Re-defining a tag keeps the first definition.
    pub fn define(
        &mut self,
        tag: &str,
        hooks: HookTable<H>,
    ) -> Result<Rc<Definition<H>>, KernelError> {
        validate_tag(tag)?;
        if let Some(existing) = self.definitions.get(tag) {
            tracing::warn!(tag, "element already defined, skipping re-registration");
            return Ok(Rc::clone(existing));
        }
        let definition = Rc::new(Definition {
            tag: tag.to_owned(),
            hooks,
        });
        self.definitions.insert(tag.to_owned(), Rc::clone(&definition));
        tracing::debug!(tag, form = definition.hooks.is_form_participant(), "element defined");
        Ok(definition)
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Rc<Definition<H>>> {
        self.definitions.get(tag)
    }

    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.definitions.contains_key(tag)
    }

    /// Create an instance of `tag` bound to `host`.
    pub fn create(&self, tag: &str, host: H) -> Result<HookElement<H>, KernelError> {
        let definition = self
            .definitions
            .get(tag)
            .ok_or_else(|| KernelError::Undefined(tag.to_owned()))?;
        HookElement::create(Rc::clone(definition), host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elementa_core::MemoryElement;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    proptest! {
        #[test]
        fn hyphenated_lowercase_names_are_valid(tag in "[a-z][a-z0-9._]{0,6}-[a-z0-9._-]{0,6}") {
            prop_assert!(validate_tag(&tag).is_ok());
        }

        #[test]
        fn names_without_hyphen_are_rejected(tag in "[a-z][a-z0-9._]{0,10}") {
            prop_assert!(validate_tag(&tag).is_err());
        }
    }

    #[test]
    fn tag_rules() {
        assert!(validate_tag("ty-button").is_ok());
        assert!(validate_tag("x-a1.b_c").is_ok());
        assert!(matches!(validate_tag("button"), Err(KernelError::InvalidTag(_))));
        assert!(validate_tag("Ty-button").is_err());
        assert!(validate_tag("1-x").is_err());
        assert!(validate_tag("").is_err());
    }

    #[traced_test]
    #[test]
    fn redefinition_keeps_first() {
        let mut registry = DefinitionRegistry::<MemoryElement>::new();
        let first = registry
            .define("ty-tag", HookTable::new().observe(["a"]))
            .unwrap();
        let second = registry
            .define("ty-tag", HookTable::new().observe(["b"]))
            .unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(second.observed_attributes(), ["a"]);
        assert!(logs_contain("already defined"));
    }

    #[test]
    fn create_requires_definition() {
        let registry = DefinitionRegistry::<MemoryElement>::new();
        let err = registry
            .create("ty-missing", MemoryElement::new("ty-missing"))
            .unwrap_err();
        assert!(matches!(err, KernelError::Undefined(tag) if tag == "ty-missing"));
        assert!(!registry.is_defined("ty-missing"));
    }

    #[test]
    fn form_participants_get_internals() {
        let mut registry = DefinitionRegistry::new();
        registry
            .define("ty-input", HookTable::new().form_participant())
            .unwrap();
        registry.define("ty-icon", HookTable::new()).unwrap();

        let input = registry.create("ty-input", MemoryElement::new("ty-input")).unwrap();
        let icon = registry.create("ty-icon", MemoryElement::new("ty-icon")).unwrap();
        assert!(input.host().form_internals().is_some());
        assert!(icon.host().form_internals().is_none());
        assert_eq!(registry.get("ty-icon").map(|d| d.tag()), Some("ty-icon"));
    }
}
