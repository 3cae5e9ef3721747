//! Application configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/courtside/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod features;
mod layout;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use features::{Features, FileFeatures};
pub use layout::{FileLayout, LayoutConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig, DEFAULT_BUFFER_ENTRIES};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_THEME: &str = "Court Dark";
pub const DEFAULT_ROUTE: &str = "/sessions";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "Court Dark", "Court Light", "Terminal"
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Route shown when the TUI starts
    pub start_route: String,

    /// Breakpoint and redraw settings
    pub layout: LayoutConfig,

    /// Feature flags for optional panels
    pub features: Features,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            use_theme_background: true,
            start_route: DEFAULT_ROUTE.to_string(),
            layout: LayoutConfig::default(),
            features: Features::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub start_route: Option<String>,

    /// Optional [layout] section
    pub layout: Option<FileLayout>,

    /// Optional [features] section
    pub features: Option<FileFeatures>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/courtside/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("courtside").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        // Config is optional; a read-only home just means no template
        let _ = Self::write_default(&path);
    }

    /// Overwrite `path` with the default template.
    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, Self::default().to_toml())
            .with_context(|| format!("writing {}", path.display()))
    }

    /// Read and parse a config file. A missing file is `Ok(None)`.
    pub(crate) fn read_file_config(path: &Path) -> anyhow::Result<Option<FileConfig>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let parsed = toml::from_str(&contents)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Ok(Some(parsed))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Load file config if it exists
    ///
    /// Exits with status 1 if the file exists but cannot be parsed. A broken
    /// config fails fast instead of silently falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match Self::read_file_config(&path) {
            Ok(file) => file.unwrap_or_default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Failed to load configuration file           ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {:#}\n", e);
                eprintln!("  Tip: Check for:\n");
                eprintln!("    - Missing quotes around string values");
                eprintln!("    - Invalid boolean values (use true/false)");
                eprintln!("    - Typos in section names\n");
                eprintln!("  To reset, run `courtside config --reset`.\n");
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with environment lookups.
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Theme: env > file > default
        let theme = env("COURTSIDE_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Use theme background: file > default
        let use_theme_background = file.use_theme_background.unwrap_or(true);

        // Start route: env > file > default
        let start_route = env("COURTSIDE_ROUTE")
            .or(file.start_route)
            .unwrap_or_else(|| DEFAULT_ROUTE.to_string());

        // Compact threshold: env > file > default
        let compact_override = env("COURTSIDE_COMPACT_BELOW").and_then(|v| v.trim().parse().ok());
        let mut layout = LayoutConfig::from_file(file.layout);
        if let Some(compact_below) = compact_override {
            layout.compact_below = compact_below;
        }

        Self {
            theme,
            use_theme_background,
            start_route,
            layout,
            features: Features::from_file(file.features),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
