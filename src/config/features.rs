//! Feature flags configuration
//!
//! Feature flags for optional panels (opt-out: default enabled).

use serde::Deserialize;

/// Feature flags for optional panels (opt-out: default enabled)
#[derive(Debug, Clone)]
pub struct Features {
    /// Logs panel: `L` toggles the captured tracing output
    pub logs_panel: bool,

    /// Clipboard: `y` copies the selected record as JSON
    pub clipboard: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            logs_panel: true,
            clipboard: true,
        }
    }
}

/// Feature flags as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFeatures {
    pub logs_panel: Option<bool>,
    pub clipboard: Option<bool>,
}

impl Features {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFeatures>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            logs_panel: file.logs_panel.unwrap_or(true),
            clipboard: file.clipboard.unwrap_or(true),
        }
    }
}
