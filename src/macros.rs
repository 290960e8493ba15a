//! Logging macros for ergonomic emission.
//!
//! Each argument only has to implement `Display`; arguments are joined with a
//! single space, so these behave like the `Logger::error`/`warn`/`info`/`debug`
//! methods without building the `&[&dyn Display]` slice by hand.
//!
//! # Examples
//!
//! ```
//! use adapter_logger::prelude::*;
//! use adapter_logger::info;
//!
//! let logger = Logger::builder().default_console(false).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // Several arguments
//! let port = 8080;
//! info!(logger, "listening on port", port);
//! logger.close();
//! ```

/// Emit a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use adapter_logger::prelude::*;
/// # let logger = Logger::builder().default_console(false).build();
/// use adapter_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code:", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr $(, $arg:expr)* $(,)?) => {
        $logger.emit($severity, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

/// Emit an error-level message.
///
/// # Examples
///
/// ```
/// # use adapter_logger::prelude::*;
/// # let logger = Logger::builder().default_console(false).build();
/// use adapter_logger::error;
/// error!(logger, "Connection failed");
/// error!(logger, "Failed after", 3, "attempts");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Error $(, $arg)*)
    };
}

/// Emit a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Warn $(, $arg)*)
    };
}

/// Emit an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Info $(, $arg)*)
    };
}

/// Emit a debug-level message.
///
/// # Examples
///
/// ```
/// # use adapter_logger::prelude::*;
/// # let logger = Logger::builder().default_console(false).build();
/// use adapter_logger::debug;
/// debug!(logger, "Counter value:", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Debug $(, $arg)*)
    };
}
