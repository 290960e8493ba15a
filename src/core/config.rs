//! Serializable logger configuration
//!
//! Lets an application describe its logger in JSON instead of wiring a
//! builder by hand:
//!
//! ```
//! use adapter_logger::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "queue_capacity": 512,
//!     "level": "Info",
//!     "adapters": [
//!         { "name": "file", "config": { "filename": "logs/app.log", "maxdays": 3 } }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.queue_capacity, 512);
//! assert_eq!(config.adapters[0].config_string(), r#"{"filename":"logs/app.log","maxdays":3}"#);
//! ```

use super::activation_policy::ActivationPolicy;
use super::error::{LoggerError, Result};
use super::logger::{DEFAULT_CALLER_DEPTH, DEFAULT_QUEUE_CAPACITY};
use super::severity::Severity;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub queue_capacity: usize,
    pub level: Severity,
    pub caller_depth: usize,
    pub caller_annotation: bool,
    pub activation: ActivationPolicy,
    /// Attach the `console` adapter before the listed adapters
    pub default_console: bool,
    pub adapters: Vec<AdapterSpec>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            level: Severity::Debug,
            caller_depth: DEFAULT_CALLER_DEPTH,
            caller_annotation: true,
            activation: ActivationPolicy::Lenient,
            default_console: true,
            adapters: Vec::new(),
        }
    }
}

/// One adapter to activate: registry name plus its adapter-specific config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterSpec {
    pub name: String,
    #[serde(default)]
    pub config: serde_json::Value,
}

impl AdapterSpec {
    /// The config string handed to `Adapter::init`.
    ///
    /// `null` becomes the empty string, a JSON string is passed through
    /// verbatim, anything else is re-serialized compactly.
    pub fn config_string(&self) -> String {
        match &self.config {
            serde_json::Value::Null => String::new(),
            serde_json::Value::String(raw) => raw.clone(),
            other => other.to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "read logger config",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&json)
    }

    /// Reject adapter entries without a name
    pub fn validate(&self) -> Result<()> {
        if let Some(idx) = self.adapters.iter().position(|a| a.name.is_empty()) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("adapter #{} has an empty name", idx),
            ));
        }
        Ok(())
    }
}
