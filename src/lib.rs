//! # Adapter Logger
//!
//! A leveled, asynchronous logging library with pluggable output adapters.
//!
//! ## Features
//!
//! - **Non-blocking emit**: messages are rendered on the caller's thread and
//!   handed to a single dispatch worker through a bounded queue
//! - **Pluggable adapters**: console and rotating file built in, custom ones
//!   registered by name
//! - **Caller annotation**: `[file.rs:42]` prefixes from `#[track_caller]`
//!   or an injected resolver
//! - **Clean shutdown**: `close` drains the queue, then flushes and shuts down
//!   every adapter
//!
//! ```
//! use adapter_logger::prelude::*;
//!
//! let logger = Logger::builder().default_console(false).build();
//! logger.set_level(Severity::Info);
//! logger.info(&[&"user", &42, &"logged in"]);
//! logger.debug(&[&"filtered out"]);
//! logger.close();
//! ```

pub mod adapters;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::adapters::ConsoleAdapter;
    #[cfg(feature = "file")]
    pub use crate::adapters::{FileAdapter, FileConfig};
    pub use crate::core::{
        register, ActivationPolicy, Adapter, AdapterRegistry, CallSite, CallerResolver, Logger,
        LoggerBuilder, LoggerConfig, LoggerContext, LoggerError, LoggerMetrics, Result, Severity,
        StackTraced, TracedError,
    };
}

#[cfg(feature = "console")]
pub use adapters::ConsoleAdapter;
#[cfg(feature = "file")]
pub use adapters::{FileAdapter, FileConfig};
pub use core::{
    register, ActivationPolicy, Adapter, AdapterConstructor, AdapterRegistry, AdapterSpec,
    CallSite, CallerResolver, DiagnosticHook, Logger, LoggerBuilder, LoggerConfig, LoggerContext,
    LoggerError, LoggerMetrics, Message, Result, Severity, StackTraced, TrackedCallerResolver,
    TracedError, WithTrace, DEFAULT_CALLER_DEPTH, DEFAULT_QUEUE_CAPACITY,
};
