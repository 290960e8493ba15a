//! Adapter activation policy and the diagnostic side-channel
//!
//! The activation policy decides what happens to an adapter whose `init`
//! fails. The diagnostic hook receives failures that never reach the emitting
//! caller, such as adapter write errors during dispatch.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What `set_adapter` does with an adapter whose initialization failed
///
/// # Example
///
/// ```
/// use adapter_logger::ActivationPolicy;
///
/// assert_eq!(ActivationPolicy::default(), ActivationPolicy::Lenient);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationPolicy {
    /// Keep the adapter active and return the init error.
    ///
    /// The adapter may be partially functional; a returned `AdapterInit`
    /// error does not mean it was rolled back.
    #[default]
    Lenient,

    /// Shut the adapter down, discard it and return the init error
    Strict,
}

impl fmt::Display for ActivationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationPolicy::Lenient => write!(f, "lenient"),
            ActivationPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Receiver for errors reported off the caller's path
pub type DiagnosticHook = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Default hook: print to stderr
pub fn stderr_diagnostics() -> DiagnosticHook {
    Arc::new(|err: &LoggerError| match err {
        LoggerError::DispatchWrite { .. } => {
            eprintln!("[LOGGER ERROR] unable to write message: {}", err)
        }
        _ => eprintln!("[LOGGER WARNING] {}", err),
    })
}
