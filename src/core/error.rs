//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Adapter name not found in the registry or among the active adapters
    #[error("unknown adapter {name:?} (forgotten register?)")]
    UnknownAdapter { name: String },

    /// Adapter initialization failed
    #[error("adapter '{name}' failed to initialize: {source}")]
    AdapterInit {
        name: String,
        #[source]
        source: Box<LoggerError>,
    },

    /// Adapter write failed during dispatch
    #[error("adapter '{name}' failed to write message: {message}")]
    DispatchWrite { name: String, message: String },

    /// Logger already closed
    #[error("Logger already closed")]
    LoggerClosed,

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File adapter error with path
    #[error("File adapter error for '{path}': {message}")]
    FileAdapterError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    pub fn unknown_adapter(name: impl Into<String>) -> Self {
        LoggerError::UnknownAdapter { name: name.into() }
    }

    /// Wrap an initialization failure of adapter `name`
    pub fn adapter_init(name: impl Into<String>, source: LoggerError) -> Self {
        LoggerError::AdapterInit {
            name: name.into(),
            source: Box::new(source),
        }
    }

    pub fn dispatch_write(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DispatchWrite {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn file_adapter(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAdapterError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this is an initialization failure whose adapter may still be active
    pub fn is_adapter_init(&self) -> bool {
        matches!(self, LoggerError::AdapterInit { .. })
    }
}
