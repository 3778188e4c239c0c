//! Per-widget-type pipeline settings.

use serde::Deserialize;

/// Event name used for field-change notifications unless overridden.
pub const DEFAULT_CHANGE_EVENT: &str = "prop:change";

/// User-interaction event dispatched by form controls. Field-change
/// notifications must not reuse it.
pub const INPUT_CHANGE_EVENT: &str = "change";

/// Knobs for the change pipeline of one widget type.
///
/// The defaults match what most widgets want: a `prop:change` notification
/// that bubbles out of the shadow tree, and imperative writes reflected to
/// markup.
///
/// ```
/// use elementa_lifecycle::LifecycleConfig;
///
/// let config = LifecycleConfig::default().change_event("x:change").reflect_attributes(false);
/// assert_eq!(config.change_event, "x:change");
/// assert!(config.bubbles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Name of the field-change notification. Must differ from any
    /// user-interaction event the widget dispatches itself (e.g. `change`).
    pub change_event: String,
    /// Write field/internal-origin changes back to markup attributes.
    pub reflect_attributes: bool,
    pub bubbles: bool,
    pub composed: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            change_event: DEFAULT_CHANGE_EVENT.to_owned(),
            reflect_attributes: true,
            bubbles: true,
            composed: true,
        }
    }
}

impl LifecycleConfig {
    #[must_use]
    pub fn change_event(mut self, name: impl Into<String>) -> Self {
        self.change_event = name.into();
        self
    }

    #[must_use]
    pub fn reflect_attributes(mut self, reflect: bool) -> Self {
        self.reflect_attributes = reflect;
        self
    }

    #[must_use]
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    #[must_use]
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Whether [`change_event`](Self::change_event) reuses the
    /// user-interaction [`INPUT_CHANGE_EVENT`].
    #[must_use]
    pub fn collides_with_input_event(&self) -> bool {
        self.change_event == INPUT_CHANGE_EVENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LifecycleConfig::default();
        assert_eq!(config.change_event, "prop:change");
        assert!(config.reflect_attributes);
        assert!(config.bubbles && config.composed);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LifecycleConfig =
            serde_json::from_str(r#"{ "changeEvent": "tab:change", "composed": false }"#).unwrap();
        assert_eq!(config.change_event, "tab:change");
        assert!(!config.composed);
        assert!(config.bubbles);
        assert!(config.reflect_attributes);
    }

    #[test]
    fn input_event_collision() {
        assert!(!LifecycleConfig::default().collides_with_input_event());
        assert!(LifecycleConfig::default().change_event("change").collides_with_input_event());
        assert!(!LifecycleConfig::default().change_event("changed").collides_with_input_event());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(serde_json::from_str::<LifecycleConfig>(r#"{ "render": true }"#).is_err());
    }
}
