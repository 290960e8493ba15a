//! Core logger types and traits

pub mod activation_policy;
pub mod adapter;
pub mod caller;
pub mod cause;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod registry;
pub mod render;
pub mod severity;

pub use activation_policy::{ActivationPolicy, DiagnosticHook};
pub use adapter::Adapter;
pub use caller::{CallSite, CallerResolver, TrackedCallerResolver};
pub use cause::{StackTraced, TracedError, WithTrace};
pub use config::{AdapterSpec, LoggerConfig};
pub use context::LoggerContext;
pub use error::{LoggerError, Result};
pub use logger::{Logger, LoggerBuilder, DEFAULT_CALLER_DEPTH, DEFAULT_QUEUE_CAPACITY};
pub use message::Message;
pub use metrics::LoggerMetrics;
pub use registry::{register, AdapterConstructor, AdapterRegistry};
pub use severity::Severity;
