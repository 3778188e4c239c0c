//! Definition kernel errors.

use std::error::Error;
use std::fmt;

use elementa_core::HookError;

/// Errors from defining, creating or driving a hook-defined element.
#[derive(Debug)]
pub enum KernelError {
    /// The tag is not a valid custom element name.
    InvalidTag(String),
    /// No definition is registered for the tag.
    Undefined(String),
    /// A widget-authored hook failed. Never swallowed.
    Hook {
        hook: &'static str,
        source: HookError,
    },
}

impl KernelError {
    pub(crate) fn hook(hook: &'static str) -> impl FnOnce(HookError) -> Self {
        move |source| Self::Hook { hook, source }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTag(tag) => write!(f, "invalid custom element name: {tag:?}"),
            Self::Undefined(tag) => write!(f, "no definition for <{tag}>"),
            Self::Hook { hook, source } => write!(f, "{hook} hook failed: {source}"),
        }
    }
}

impl Error for KernelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hook { source, .. } => Some(source),
            Self::InvalidTag(_) | Self::Undefined(_) => None,
        }
    }
}

/// Lets a hook call back into its element with `?`.
impl From<KernelError> for HookError {
    fn from(err: KernelError) -> Self {
        Self::with_source(err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            KernelError::InvalidTag("Button".into()).to_string(),
            "invalid custom element name: \"Button\""
        );
        assert_eq!(
            KernelError::Undefined("ty-x".into()).to_string(),
            "no definition for <ty-x>"
        );
        let err = KernelError::hook("form_reset")(HookError::new("boom"));
        assert_eq!(err.to_string(), "form_reset hook failed: boom");
        assert!(err.source().is_some());
    }
}
