//! Adapter implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "console")]
pub use console::ConsoleAdapter;
#[cfg(feature = "file")]
pub use file::{FileAdapter, FileConfig};

use crate::core::{AdapterRegistry, LoggerError, Result, Severity};

/// Register every adapter compiled into this crate with `registry`
pub fn register_builtins(registry: &AdapterRegistry) {
    #[cfg(feature = "console")]
    registry.register(console::ADAPTER_NAME, || Box::new(ConsoleAdapter::new()));
    #[cfg(feature = "file")]
    registry.register(file::ADAPTER_NAME, || Box::new(FileAdapter::new()));
    let _ = registry;
}

/// Map a numeric adapter level (`0` = Error … `3` = Debug) to a severity
#[allow(dead_code)]
pub(crate) fn parse_level(component: &str, level: u8) -> Result<Severity> {
    Severity::from_u8(level).ok_or_else(|| {
        LoggerError::config(component, format!("level {} is out of range 0..=3", level))
    })
}
