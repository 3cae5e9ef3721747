//! Layout configuration: breakpoint threshold and redraw tick.

use serde::Deserialize;

/// Below this many columns, lists render as cards.
pub const DEFAULT_COMPACT_BELOW: u16 = 100;

/// Layout configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Terminal width under which the compact (card) layout is used
    pub compact_below: u16,
    /// Redraw tick in milliseconds
    pub tick_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_below: DEFAULT_COMPACT_BELOW,
            tick_ms: 250,
        }
    }
}

/// Layout settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLayout {
    pub compact_below: Option<u16>,
    pub tick_ms: Option<u64>,
}

impl LayoutConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLayout>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            compact_below: file.compact_below.unwrap_or(defaults.compact_below),
            // A zero tick would spin the event loop
            tick_ms: file.tick_ms.filter(|ms| *ms > 0).unwrap_or(defaults.tick_ms),
        }
    }
}
