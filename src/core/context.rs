//! Application context owning the default logger
//!
//! `LoggerContext` holds the logger that convenience calls go to. It can be
//! created per application (or per test) with [`LoggerContext::new`] and torn
//! down with [`LoggerContext::shutdown`]; the crate-level free functions use
//! one lazily created process-wide context.

use super::cause::StackTraced;
use super::error::Result;
use super::logger::{Logger, DEFAULT_QUEUE_CAPACITY};
use super::severity::Severity;
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Caller depth of the default logger owned by a context
pub const DEFAULT_CONTEXT_CALLER_DEPTH: usize = 4;

static GLOBAL: OnceLock<LoggerContext> = OnceLock::new();

pub struct LoggerContext {
    current: RwLock<Arc<Logger>>,
}

impl LoggerContext {
    /// Context with a console logger: capacity 1024, caller depth 4
    pub fn new() -> Self {
        Self::with_logger(
            Logger::builder()
                .queue_capacity(DEFAULT_QUEUE_CAPACITY)
                .caller_depth(DEFAULT_CONTEXT_CALLER_DEPTH)
                .build(),
        )
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self {
            current: RwLock::new(Arc::new(logger)),
        }
    }

    /// The process-wide context, created on first use
    pub fn global() -> &'static LoggerContext {
        GLOBAL.get_or_init(LoggerContext::new)
    }

    /// Handle to the current default logger
    pub fn logger(&self) -> Arc<Logger> {
        Arc::clone(&self.current.read())
    }

    /// Install `logger` as the default and close the previous one.
    ///
    /// Messages already queued on the previous logger are delivered before
    /// this returns.
    pub fn replace(&self, logger: Logger) {
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(logger));
        previous.close();
    }

    /// Replace the default with a file-backed logger writing to `path`
    pub fn set_file_logger(&self, path: impl AsRef<Path>) {
        self.replace(Logger::new_file_backed(path));
    }

    pub fn set_level(&self, severity: Severity) {
        self.logger().set_level(severity);
    }

    #[track_caller]
    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.logger().error(args);
    }

    #[track_caller]
    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.logger().warn(args);
    }

    #[track_caller]
    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.logger().info(args);
    }

    #[track_caller]
    pub fn debug(&self, args: &[&dyn fmt::Display]) {
        self.logger().debug(args);
    }

    #[track_caller]
    pub fn error_with_cause(&self, args: &[&dyn fmt::Display], cause: &dyn StackTraced) {
        self.logger().error_with_cause(args, cause);
    }

    #[track_caller]
    pub fn pretty<T: Serialize + ?Sized>(&self, message: &str, value: &T) {
        self.logger().pretty(message, value);
    }

    pub fn flush(&self) -> Result<()> {
        self.logger().flush()
    }

    /// Close the default logger, draining its queue.
    ///
    /// Later calls through this context are dropped with a diagnostic.
    pub fn shutdown(&self) {
        self.logger().close();
    }
}

impl Default for LoggerContext {
    fn default() -> Self {
        Self::new()
    }
}
