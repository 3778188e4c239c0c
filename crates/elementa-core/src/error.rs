//! Failures raised by widget-authored hooks.
//!
//! Hook failures are programming defects in a widget. The kernels never
//! swallow them: every hook returns [`HookResult`] and the error travels
//! back to whoever drove the lifecycle transition.

use std::error::Error;
use std::fmt;

/// Result type returned by every widget hook.
pub type HookResult<T = ()> = Result<T, HookError>;

/// Error raised inside a widget hook.
#[derive(Debug)]
pub struct HookError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl HookError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error, keeping it reachable through [`Error::source`].
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for HookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source("payload serialization failed", err)
    }
}
