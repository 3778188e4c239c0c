//! Lifecycle errors.

use std::error::Error;
use std::fmt;

use elementa_core::HookError;

/// A widget hook failed.
///
/// Hook failures are authoring bugs: the controller never swallows them.
/// The failing call returns immediately and later pipeline steps for that
/// batch do not run.
#[derive(Debug)]
pub enum LifecycleError {
    Hook {
        /// Hook name, e.g. `"render"` or `"fields_changed"`.
        hook: &'static str,
        source: HookError,
    },
}

impl LifecycleError {
    pub(crate) fn hook(hook: &'static str) -> impl FnOnce(HookError) -> Self {
        move |source| Self::Hook { hook, source }
    }

    /// Name of the hook that failed.
    #[must_use]
    pub fn hook_name(&self) -> &'static str {
        match self {
            Self::Hook { hook, .. } => hook,
        }
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hook { hook, source } => write!(f, "{hook} hook failed: {source}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hook { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_hook() {
        let err = LifecycleError::hook("render")(HookError::new("no template"));
        assert_eq!(err.to_string(), "render hook failed: no template");
        assert_eq!(err.hook_name(), "render");
        assert!(err.source().is_some());
    }
}
