//! File adapter with line, size and daily rotation
//!
//! Messages are appended to `filename` as `YYYY/MM/DD HH:MM:SS <text>` lines.
//! When rotation is enabled and the current file reaches `maxlines`,
//! `maxsize` or a new calendar day, it is renamed to
//! `<stem>.<YYYY-MM-DD>.<NNN>.<ext>` (gzip-compressed when `compress` is set)
//! and a fresh file is opened. Rotated files older than `maxdays` are removed.

use super::parse_level;
use crate::core::{Adapter, LoggerError, Result, Severity};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Registry name of the file adapter
pub const ADAPTER_NAME: &str = "file";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const MAX_ROTATIONS_PER_DAY: u32 = 999;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Configuration accepted by [`FileAdapter::init`]
///
/// # Examples
///
/// ```
/// use adapter_logger::adapters::FileConfig;
///
/// let config: FileConfig = serde_json::from_str(r#"{"filename":"app.log","maxdays":3}"#).unwrap();
/// assert_eq!(config.maxdays, 3);
/// assert!(config.rotate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub filename: String,
    /// Rotate once the file holds this many lines (0 disables)
    pub maxlines: u64,
    /// Rotate once the file reaches this many bytes (0 disables)
    pub maxsize: u64,
    /// Rotate when the calendar day changes
    pub daily: bool,
    /// Age in days after which rotated files are deleted
    pub maxdays: u64,
    pub rotate: bool,
    pub level: u8,
    pub compress: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            filename: String::new(),
            maxlines: 1_000_000,
            maxsize: 256 * 1024 * 1024,
            daily: true,
            maxdays: 7,
            rotate: true,
            level: Severity::Debug as u8,
            compress: false,
        }
    }
}

pub struct FileAdapter {
    config: FileConfig,
    path: PathBuf,
    level: Severity,
    writer: Option<BufWriter<File>>,
    current_lines: u64,
    current_size: u64,
    /// Day the current file was opened (or last modified, for existing files)
    opened_on: NaiveDate,
}

impl FileAdapter {
    pub fn new() -> Self {
        Self {
            config: FileConfig::default(),
            path: PathBuf::new(),
            level: Severity::Debug,
            writer: None,
            current_lines: 0,
            current_size: 0,
            opened_on: Local::now().date_naive(),
        }
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_lines(&self) -> u64 {
        self.current_lines
    }

    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    fn open(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.adapter_error(format!("Failed to open: {}", e)))?;

        let metadata = file
            .metadata()
            .map_err(|e| self.adapter_error(format!("Cannot access file metadata: {}", e)))?;

        self.current_size = metadata.len();
        self.current_lines = if self.current_size > 0 {
            count_lines(&self.path)?
        } else {
            0
        };
        self.opened_on = metadata
            .modified()
            .map(|t| chrono::DateTime::<Local>::from(t).date_naive())
            .unwrap_or_else(|_| Local::now().date_naive());
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn should_rotate(&self, today: NaiveDate) -> bool {
        if !self.config.rotate {
            return false;
        }
        (self.config.maxlines > 0 && self.current_lines >= self.config.maxlines)
            || (self.config.maxsize > 0 && self.current_size >= self.config.maxsize)
            || (self.config.daily && today != self.opened_on)
    }

    /// Move the current file aside, open a fresh one and prune old backups
    fn rotate(&mut self) -> Result<()> {
        let backup = self.next_backup_path()?;

        if let Some(writer) = self.writer.as_mut() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }
        self.writer = None;

        let renamed = fs::rename(&self.path, &backup).map_err(|e| {
            self.rotation_error(format!("Failed to rotate current log file: {}", e))
        });

        // The file has to be reopened even when the rename failed
        self.open()?;
        renamed?;

        if self.config.compress {
            compress_file(&backup)?;
        }

        self.delete_old();
        Ok(())
    }

    /// First unused `<stem>.<date>.<NNN>.<ext>` name for the open day
    fn next_backup_path(&self) -> Result<PathBuf> {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app");
        let ext = self.path.extension().and_then(|s| s.to_str());
        let date = self.opened_on.format("%Y-%m-%d");

        for seq in 1..=MAX_ROTATIONS_PER_DAY {
            let name = match ext {
                Some(ext) => format!("{}.{}.{:03}.{}", stem, date, seq, ext),
                None => format!("{}.{}.{:03}", stem, date, seq),
            };
            let candidate = self.path.with_file_name(name);
            if !candidate.exists() && !gz_path(&candidate).exists() {
                return Ok(candidate);
            }
        }

        Err(self.rotation_error(format!(
            "more than {} rotations on {}",
            MAX_ROTATIONS_PER_DAY, date
        )))
    }

    /// Remove rotated files older than `maxdays`
    fn delete_old(&self) {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let stem = match self.path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return,
        };
        let ext = self.path.extension().and_then(|s| s.to_str());

        // A retention window past the epoch keeps everything
        let cutoff = match self
            .config
            .maxdays
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|secs| SystemTime::now().checked_sub(Duration::from_secs(secs)))
        {
            Some(cutoff) => cutoff,
            None => return,
        };

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("[WARN] Cannot scan {} for old logs: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            if !name.to_str().is_some_and(|n| is_backup_name(n, stem, ext)) {
                continue;
            }
            let path = entry.path();

            let expired = entry
                .metadata()
                .and_then(|m| m.modified())
                .is_ok_and(|modified| modified < cutoff);
            if expired && entry.file_type().is_ok_and(|t| t.is_file()) {
                if let Err(e) = fs::remove_file(&path) {
                    eprintln!("[WARN] Failed to remove old log {}: {}", path.display(), e);
                }
            }
        }
    }

    fn adapter_error(&self, message: String) -> LoggerError {
        LoggerError::file_adapter(self.path.display().to_string(), message)
    }

    fn rotation_error(&self, message: String) -> LoggerError {
        LoggerError::file_rotation(self.path.display().to_string(), message)
    }
}

impl Default for FileAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for FileAdapter {
    fn init(&mut self, config: &str) -> Result<()> {
        let config: FileConfig = if config.trim().is_empty() {
            FileConfig::default()
        } else {
            serde_json::from_str(config).map_err(|e| {
                LoggerError::config(ADAPTER_NAME, format!("invalid JSON config: {}", e))
            })?
        };

        if config.filename.is_empty() {
            return Err(LoggerError::config(ADAPTER_NAME, "filename must not be empty"));
        }

        self.level = parse_level(ADAPTER_NAME, config.level)?;
        self.path = PathBuf::from(&config.filename);
        self.config = config;
        self.open()
    }

    fn write(&mut self, text: &str, severity: Severity) -> Result<()> {
        if !severity.passes(self.level) {
            return Ok(());
        }

        let now = Local::now();
        if self.should_rotate(now.date_naive()) {
            if let Err(e) = self.rotate() {
                eprintln!("[WARN] Log rotation failed: {}. Continuing with current file.", e);
                if self.writer.is_none() {
                    if let Err(reopen_err) = self.open() {
                        eprintln!(
                            "[ERROR] Failed to reopen log file after rotation failure: {}",
                            reopen_err
                        );
                        return Err(e);
                    }
                }
                // Prevent a rotation attempt on every following write
                self.current_lines = 0;
                self.current_size = 0;
                self.opened_on = now.date_naive();
            }
        }

        let line = format!("{} {}\n", now.format(TIMESTAMP_FORMAT), text);
        if let Some(ref mut writer) = self.writer {
            writer.write_all(line.as_bytes()).map_err(|e| {
                LoggerError::file_adapter(
                    self.path.display().to_string(),
                    format!("Failed to write log entry: {}", e),
                )
            })?;
        } else {
            return Err(self.adapter_error("file is not open".to_string()));
        }

        self.current_size += line.len() as u64;
        self.current_lines += 1 + text.matches('\n').count() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_adapter(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                eprintln!("[WARN] Failed to flush {} on shutdown: {}", self.path.display(), e);
            }
        }
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}

impl Drop for FileAdapter {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

fn count_lines(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(|e| {
        LoggerError::io_operation("count log lines", format!("Failed to open {}", path.display()), e)
    })?;
    let mut count = 0;
    for chunk in BufReader::new(file).split(b'\n') {
        chunk?;
        count += 1;
    }
    Ok(count)
}

/// Whether `name` is `<stem>.<YYYY-MM-DD>.<NNN>[.<ext>][.gz]`
fn is_backup_name(name: &str, stem: &str, ext: Option<&str>) -> bool {
    let rest = match name.strip_prefix(stem).and_then(|r| r.strip_prefix('.')) {
        Some(rest) => rest,
        None => return false,
    };
    let (date, rest) = match (rest.get(..10), rest.get(10..)) {
        (Some(date), Some(rest)) => (date, rest),
        _ => return false,
    };
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return false;
    }
    let rest = match rest.strip_prefix('.') {
        Some(rest) => rest,
        None => return false,
    };
    let (seq, suffix) = match (rest.get(..3), rest.get(3..)) {
        (Some(seq), Some(suffix)) => (seq, suffix),
        _ => return false,
    };
    if !seq.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let suffix = suffix.strip_suffix(".gz").unwrap_or(suffix);
    match ext {
        Some(ext) => suffix.is_empty() || suffix.strip_prefix('.') == Some(ext),
        None => suffix.is_empty(),
    }
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Gzip `path` into `<path>.gz`, removing the original only on success
fn compress_file(path: &Path) -> Result<()> {
    let gz = gz_path(path);
    let mut temp = gz.clone().into_os_string();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    let result = (|| -> std::io::Result<()> {
        let mut reader = BufReader::with_capacity(64 * 1024, File::open(path)?);
        let output = BufWriter::with_capacity(64 * 1024, File::create(&temp)?);
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());

        let mut buffer = vec![0u8; 64 * 1024];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            encoder.write_all(&buffer[..bytes_read])?;
        }
        encoder.finish()?.flush()?;
        fs::rename(&temp, &gz)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }
    Ok(())
}
