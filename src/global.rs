//! Process-wide convenience functions
//!
//! Thin wrappers over [`LoggerContext::global`]. The default logger writes to
//! the console at `Debug` with a queue of 1024 messages. Call [`shutdown`]
//! before the process exits so queued messages reach their adapters.
//!
//! ```no_run
//! use adapter_logger::{global, Severity};
//!
//! global::set_file_logger("logs/app.log");
//! global::set_logger_level(Severity::Info);
//! global::info(&[&"service", &"started"]);
//! global::shutdown();
//! ```

use crate::core::{Logger, LoggerContext, Result, Severity, StackTraced};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Current process-wide default logger
pub fn logger() -> Arc<Logger> {
    LoggerContext::global().logger()
}

#[track_caller]
pub fn error(args: &[&dyn fmt::Display]) {
    LoggerContext::global().error(args);
}

#[track_caller]
pub fn warn(args: &[&dyn fmt::Display]) {
    LoggerContext::global().warn(args);
}

#[track_caller]
pub fn info(args: &[&dyn fmt::Display]) {
    LoggerContext::global().info(args);
}

#[track_caller]
pub fn debug(args: &[&dyn fmt::Display]) {
    LoggerContext::global().debug(args);
}

#[track_caller]
pub fn error_with_cause(args: &[&dyn fmt::Display], cause: &dyn StackTraced) {
    LoggerContext::global().error_with_cause(args, cause);
}

#[track_caller]
pub fn pretty<T: Serialize + ?Sized>(message: &str, value: &T) {
    LoggerContext::global().pretty(message, value);
}

/// Replace the default logger with a file-backed one writing to `path`.
///
/// The previous default is closed after its queued messages are delivered.
pub fn set_file_logger(path: impl AsRef<Path>) {
    LoggerContext::global().set_file_logger(path);
}

pub fn set_logger_level(severity: Severity) {
    LoggerContext::global().set_level(severity);
}

pub fn flush() -> Result<()> {
    LoggerContext::global().flush()
}

/// Close the default logger, delivering everything still queued
pub fn shutdown() {
    LoggerContext::global().shutdown();
}
