//! Error causes carrying a stack trace
//!
//! Callers that want a stack trace appended to a message pass a
//! [`StackTraced`] value to the `*_with_cause` emit operations.

use std::backtrace::Backtrace;
use std::fmt;

/// An error exposing a code and a multi-line stack trace
pub trait StackTraced {
    fn code(&self) -> &str;

    fn stack_trace(&self) -> String;
}

/// Error value that records a backtrace where it was created.
///
/// # Example
///
/// ```
/// use adapter_logger::core::{StackTraced, TracedError};
///
/// let err = TracedError::new("E_DB_TIMEOUT", "query took too long");
/// assert_eq!(err.code(), "E_DB_TIMEOUT");
/// assert!(err.stack_trace().starts_with("E_DB_TIMEOUT: query took too long"));
/// ```
#[derive(Debug)]
pub struct TracedError {
    code: String,
    message: String,
    trace: Backtrace,
}

impl TracedError {
    /// Create an error, force-capturing the current backtrace
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            trace: Backtrace::force_capture(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for TracedError {}

impl StackTraced for TracedError {
    fn code(&self) -> &str {
        &self.code
    }

    fn stack_trace(&self) -> String {
        format!("{}\n{}", self, self.trace)
    }
}

/// Adapts a plain error and an explicit trace into a [`StackTraced`] cause.
pub struct WithTrace<'a> {
    pub code: &'a str,
    pub trace: &'a dyn fmt::Display,
}

impl StackTraced for WithTrace<'_> {
    fn code(&self) -> &str {
        self.code
    }

    fn stack_trace(&self) -> String {
        self.trace.to_string()
    }
}
