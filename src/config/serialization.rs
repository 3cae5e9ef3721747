//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote a string for TOML; Debug escaping matches TOML basic strings for
/// the characters that appear in names and paths.
fn quoted(value: &str) -> String {
    format!("{:?}", value)
}

impl Config {
    /// Render the config as a commented TOML file.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# courtside configuration

# Theme: Court Dark, Court Light, Terminal
theme = {theme}

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Route shown at startup: /sessions, /students, /sessions/new, ...
start_route = {route}

[layout]
# Below this terminal width lists render as cards
compact_below = {compact_below}
# Redraw tick in milliseconds
tick_ms = {tick_ms}

# Feature flags
[features]
logs_panel = {logs_panel}
clipboard = {clipboard}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# Entries kept for the logs panel
buffer_entries = {log_buffer_entries}
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            use_bg = self.use_theme_background,
            route = quoted(&self.start_route),
            compact_below = self.layout.compact_below,
            tick_ms = self.layout.tick_ms,
            logs_panel = self.features.logs_panel,
            clipboard = self.features.clipboard,
            log_level = quoted(&self.logging.level),
            log_buffer_entries = self.logging.buffer_entries,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
