//! Queued message structure

use super::severity::Severity;
use serde::{Deserialize, Serialize};

/// A rendered log message waiting in the dispatch queue.
///
/// Messages are immutable once built; the queue slot owns them until the
/// dispatch worker (or `close()`) takes them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    severity: Severity,
    text: String,
}

impl Message {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}
