//! Adapter trait for log output destinations

use super::{error::Result, severity::Severity};

/// An output sink the dispatch worker fans messages out to.
///
/// The logger calls `init` once right after construction, `write` for every
/// dispatched message, `flush` on demand, and `shutdown` exactly once after a
/// final flush. No `write` follows `shutdown`.
pub trait Adapter: Send + Sync {
    /// Configure the adapter from an adapter-specific JSON string.
    ///
    /// An empty string selects the adapter defaults.
    fn init(&mut self, config: &str) -> Result<()>;

    fn write(&mut self, text: &str, severity: Severity) -> Result<()>;

    /// Force buffered output to durable storage
    fn flush(&mut self) -> Result<()>;

    /// Release resources held by the adapter
    fn shutdown(&mut self);

    fn name(&self) -> &str;
}
