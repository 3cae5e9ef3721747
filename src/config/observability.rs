//! `[logging]` section: filter level, in-memory panel buffer, rolling files

use serde::Deserialize;
use std::path::PathBuf;

/// Entries kept for the logs panel when the file doesn't say
pub const DEFAULT_BUFFER_ENTRIES: usize = 1000;

/// When the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    /// Unknown names fall back to daily rather than failing the config.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive for the `courtside` target
    pub level: String,
    /// Capacity of the logs panel ring buffer
    pub buffer_entries: usize,
    /// Also write JSON lines to `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, e.g. `courtside.2025-05-28`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            buffer_entries: DEFAULT_BUFFER_ENTRIES,
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

/// `[logging]` as written in the file; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub buffer_entries: Option<usize>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let Some(file) = file else {
            return Self::default();
        };
        let defaults = Self::default();
        Self {
            level: file.level.unwrap_or(defaults.level),
            // A zero-sized buffer would hide every entry
            buffer_entries: file
                .buffer_entries
                .filter(|n| *n > 0)
                .unwrap_or(defaults.buffer_entries),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.map_or(defaults.file_dir, PathBuf::from),
            file_rotation: file
                .file_rotation
                .as_deref()
                .map_or(defaults.file_rotation, LogRotation::parse),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}
