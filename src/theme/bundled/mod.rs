//! Bundled TOML themes (compiled into binary, extracted on first run)
//!
//! These themes are written to ~/.config/courtside/themes/ on first run.
//! Users can then modify them freely.

mod court_dark;
mod court_light;
mod terminal_ansi;

pub use court_dark::THEME as COURT_DARK;
pub use court_light::THEME as COURT_LIGHT;
pub use terminal_ansi::THEME as TERMINAL_ANSI;

/// Bundled theme: name and TOML content
pub struct BundledTheme {
    pub filename: &'static str,
    pub content: &'static str,
}

/// All bundled themes
pub const BUNDLED_THEMES: &[BundledTheme] = &[
    BundledTheme {
        filename: "Court_Dark.toml",
        content: COURT_DARK,
    },
    BundledTheme {
        filename: "Court_Light.toml",
        content: COURT_LIGHT,
    },
    BundledTheme {
        filename: "Terminal.toml",
        content: TERMINAL_ANSI,
    },
];

/// Display names of the bundled themes
pub fn list_bundled_themes() -> Vec<&'static str> {
    BUNDLED_THEMES
        .iter()
        .map(|t| t.filename.trim_end_matches(".toml"))
        .collect()
}
