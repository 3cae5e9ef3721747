// TOML theme format parser
//
// Each theme explicitly defines its UI chrome colors and one color per
// enumeration tone.
//
// Format version: 1

use ratatui::style::Color;
use serde::Deserialize;

/// Root structure for TOML theme files
#[derive(Debug, Clone, Deserialize)]
pub struct TomlTheme {
    pub meta: ThemeMeta,
    pub ui: UiColors,
    pub tones: ToneColors,
}

/// Theme metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeMeta {
    pub name: String,
    /// Format version the file was written for
    #[serde(default = "current_version")]
    pub version: u32,
}

/// Newest format this build reads
pub const FORMAT_VERSION: u32 = 1;

fn current_version() -> u32 {
    FORMAT_VERSION
}

/// Base UI chrome colors
#[derive(Debug, Clone, Deserialize)]
pub struct UiColors {
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub border_focused: String,
    pub title: String,
    pub status_bar: String,
    pub selection_bg: String,
    pub selection_fg: String,
    /// Optional muted/secondary text color (falls back to border)
    pub muted: Option<String>,
    pub error: String,
    pub success: String,
    /// Optional border style: "plain", "rounded", "double", "thick" (default: plain)
    pub border_type: Option<String>,
}

/// Tag colors, one per tone
#[derive(Debug, Clone, Deserialize)]
pub struct ToneColors {
    pub gray: String,
    pub blue: String,
    pub green: String,
    pub yellow: String,
    pub pink: String,
    pub purple: String,
    pub cyan: String,
    pub orange: String,
}

impl TomlTheme {
    /// Parse a TOML theme from string
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Parse a color string to ratatui Color
    /// Supports:
    /// - Hex format: #RRGGBB
    /// - ANSI format: ansi:0-15, ansi:fg, ansi:bg (for terminal-native colors)
    ///
    /// Anything else is white, so a typo stays visible instead of vanishing.
    pub fn parse_color(value: &str) -> Color {
        if let Some(ansi) = value.strip_prefix("ansi:") {
            if ansi == "fg" || ansi == "bg" {
                return Color::Reset;
            }
            return ansi
                .parse::<usize>()
                .ok()
                .and_then(|index| ANSI_PALETTE.get(index).copied())
                .unwrap_or(Color::White);
        }

        let hex = value.trim_start_matches('#');
        match (hex.len(), u32::from_str_radix(hex, 16)) {
            (6, Ok(rgb)) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
            _ => Color::White,
        }
    }
}

/// The 16 terminal palette slots, in `ansi:N` order
const ANSI_PALETTE: [Color; 16] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::Gray,
];
