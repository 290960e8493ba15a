//! Console adapter implementation

use super::parse_level;
use crate::core::{Adapter, LoggerError, Result, Severity};
use chrono::Local;
use colored::Colorize;
use serde::Deserialize;
use std::io::{self, Write};

/// Registry name of the console adapter
pub const ADAPTER_NAME: &str = "console";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConsoleConfig {
    level: u8,
    colorful: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            level: Severity::Debug as u8,
            colorful: true,
        }
    }
}

/// Writes messages to stdout; `Error` messages go to stderr.
///
/// Config: `{"level": 0..=3, "colorful": bool}`, both optional.
pub struct ConsoleAdapter {
    level: Severity,
    use_colors: bool,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            level: Severity::Debug,
            use_colors: true,
        }
    }

    fn format_line(&self, text: &str, severity: Severity) -> String {
        let line = format!("{} {}", Local::now().format(TIMESTAMP_FORMAT), text);
        if self.use_colors {
            line.color(severity.color_code()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for ConsoleAdapter {
    fn init(&mut self, config: &str) -> Result<()> {
        let config: ConsoleConfig = if config.trim().is_empty() {
            ConsoleConfig::default()
        } else {
            serde_json::from_str(config).map_err(|e| {
                LoggerError::config(ADAPTER_NAME, format!("invalid JSON config: {}", e))
            })?
        };

        self.level = parse_level(ADAPTER_NAME, config.level)?;
        self.use_colors = config.colorful;
        Ok(())
    }

    fn write(&mut self, text: &str, severity: Severity) -> Result<()> {
        if !severity.passes(self.level) {
            return Ok(());
        }

        let line = self.format_line(text, severity);
        match severity {
            Severity::Error => writeln!(io::stderr().lock(), "{}", line)?,
            _ => writeln!(io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }

    fn shutdown(&mut self) {}

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}
