//! Severity definitions
//!
//! Levels increase toward verbosity: `Error` is the most severe and has the
//! smallest numeric value, `Debug` the least severe and the largest.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Severity {
    Error = 0,
    Warn = 1,
    Info = 2,
    #[default]
    Debug = 3,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 4] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warn => "Warn",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
        }
    }

    /// Bracketed tag that prefixes every rendered message, e.g. `[Warn]`
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Error => "[Error]",
            Severity::Warn => "[Warn]",
            Severity::Info => "[Info]",
            Severity::Debug => "[Debug]",
        }
    }

    /// Whether a message of this severity passes a `threshold`.
    ///
    /// A message passes when it is at least as severe as the threshold.
    #[inline]
    pub fn passes(self, threshold: Severity) -> bool {
        self <= threshold
    }

    /// Map the numeric level used in adapter configs (`0..=3`).
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Severity::Error),
            1 => Some(Severity::Warn),
            2 => Some(Severity::Info),
            3 => Some(Severity::Debug),
            _ => None,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Error => Red,
            Severity::Warn => Yellow,
            Severity::Info => Green,
            Severity::Debug => Blue,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}
