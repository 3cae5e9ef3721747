// Theme system for the TUI
//
// Theme loading priority:
// 1. External TOML themes from ~/.config/courtside/themes/*.toml
// 2. Bundled themes (compiled in, extracted on first run)
// 3. Fallback to hardcoded default

mod bundled;
mod toml_format;

pub use toml_format::TomlTheme;
use toml_format::FORMAT_VERSION;

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::path::PathBuf;

use crate::model::Tone;

/// Theme configuration options
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            use_theme_background: true,
        }
    }
}

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── UI Element Colors ───────────────────────────────────
    pub status_bar: Color,
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    pub muted: Color,
    pub border_type: BorderType,

    /// Tag colors indexed by `Tone::ALL` order
    tones: [Color; 8],
}

impl Theme {
    /// Load theme by name with default configuration
    pub fn by_name(name: &str) -> Self {
        Self::by_name_with_config(name, &ThemeConfig::default())
    }

    /// Load theme by name with custom configuration
    pub fn by_name_with_config(name: &str, config: &ThemeConfig) -> Self {
        if let Some(theme) = Self::load_toml(name, config) {
            return theme;
        }
        tracing::warn!(theme = %name, "Unknown theme, using fallback");
        Self::hardcoded_default(config)
    }

    /// Load from TOML theme file or bundled theme
    fn load_toml(name: &str, config: &ThemeConfig) -> Option<Self> {
        let normalized = name.replace(' ', "_");

        // External files first, so users can override bundled palettes
        if let Some(dir) = Self::themes_dir() {
            for stem in [name, normalized.as_str()] {
                let path = dir.join(format!("{}.toml", stem));
                let Ok(contents) = std::fs::read_to_string(&path) else {
                    continue;
                };
                match TomlTheme::parse(&contents) {
                    Ok(toml_theme) => {
                        if toml_theme.meta.version > FORMAT_VERSION {
                            tracing::warn!(
                                path = %path.display(),
                                version = toml_theme.meta.version,
                                "Theme written for a newer format; unknown keys are ignored"
                            );
                        }
                        return Some(Self::from_toml(toml_theme, config));
                    }
                    Err(e) => tracing::warn!(path = %path.display(), "Invalid theme file: {}", e),
                }
            }
        }

        let filename = format!("{}.toml", normalized);
        bundled::BUNDLED_THEMES
            .iter()
            .find(|t| t.filename.eq_ignore_ascii_case(&filename))
            .and_then(|t| TomlTheme::parse(t.content).ok())
            .map(|toml_theme| Self::from_toml(toml_theme, config))
    }

    /// Get themes directory path
    fn themes_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("courtside").join("themes"))
    }

    /// Parse border type string to BorderType enum
    fn parse_border_type(value: Option<&str>) -> BorderType {
        match value {
            Some("rounded") => BorderType::Rounded,
            Some("double") => BorderType::Double,
            Some("thick") => BorderType::Thick,
            _ => BorderType::Plain,
        }
    }

    /// Create theme from native TOML format
    fn from_toml(toml: TomlTheme, config: &ThemeConfig) -> Self {
        let parse = TomlTheme::parse_color;

        let background = if config.use_theme_background {
            parse(&toml.ui.background)
        } else {
            Color::Reset
        };
        let tones = &toml.tones;

        Self {
            name: toml.meta.name.clone(),

            status_bar: parse(&toml.ui.status_bar),
            title: parse(&toml.ui.title),
            border: parse(&toml.ui.border),
            highlight: parse(&toml.ui.border_focused),
            error: parse(&toml.ui.error),
            success: parse(&toml.ui.success),

            background,
            foreground: parse(&toml.ui.foreground),
            selection: parse(&toml.ui.selection_bg),
            selection_fg: parse(&toml.ui.selection_fg),

            muted: toml
                .ui
                .muted
                .as_deref()
                .map(parse)
                .unwrap_or_else(|| parse(&toml.ui.border)),
            border_type: Self::parse_border_type(toml.ui.border_type.as_deref()),

            tones: [
                parse(&tones.gray),
                parse(&tones.blue),
                parse(&tones.green),
                parse(&tones.yellow),
                parse(&tones.pink),
                parse(&tones.purple),
                parse(&tones.cyan),
                parse(&tones.orange),
            ],
        }
    }

    /// Hardcoded fallback when no themes can be loaded
    fn hardcoded_default(config: &ThemeConfig) -> Self {
        let background = if config.use_theme_background {
            Color::Rgb(31, 36, 40)
        } else {
            Color::Reset
        };

        Self {
            name: "Court Dark (Fallback)".to_string(),
            status_bar: Color::Rgb(168, 179, 189),
            title: Color::Rgb(224, 164, 88),
            border: Color::Rgb(59, 68, 76),
            highlight: Color::Rgb(224, 164, 88),
            error: Color::Rgb(224, 108, 117),
            success: Color::Rgb(152, 195, 121),
            background,
            foreground: Color::Rgb(216, 222, 228),
            selection: Color::Rgb(47, 58, 68),
            selection_fg: Color::Rgb(242, 245, 247),
            muted: Color::Rgb(125, 138, 150),
            border_type: BorderType::Plain,
            tones: [
                Color::Gray,
                Color::Blue,
                Color::Green,
                Color::Yellow,
                Color::LightMagenta,
                Color::Magenta,
                Color::Cyan,
                Color::LightRed,
            ],
        }
    }

    /// Color for an enumeration tag.
    pub fn tone(&self, tone: Tone) -> Color {
        let index = Tone::ALL.iter().position(|t| *t == tone).unwrap_or(0);
        self.tones[index]
    }

    /// Style for a colored tag cell.
    pub fn tag_style(&self, tone: Tone) -> Style {
        Style::default()
            .fg(self.tone(tone))
            .add_modifier(Modifier::BOLD)
    }

    /// Border color based on focus state
    pub fn panel_border(&self, focused: bool) -> Color {
        if focused {
            self.highlight
        } else {
            self.border
        }
    }

    /// Base style: foreground on background
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// List all available themes (bundled + external)
    pub fn list_available() -> Vec<String> {
        let mut themes: Vec<String> = bundled::list_bundled_themes()
            .into_iter()
            .map(|name| name.replace('_', " "))
            .collect();

        if let Some(themes_dir) = Self::themes_dir() {
            if let Ok(entries) = std::fs::read_dir(themes_dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "toml") {
                        if let Some(stem) = path.file_stem() {
                            // Filename format (underscore) to display format (space)
                            let display_name = stem.to_string_lossy().replace('_', " ");
                            if !themes.iter().any(|t| t.eq_ignore_ascii_case(&display_name)) {
                                themes.push(display_name);
                            }
                        }
                    }
                }
            }
        }

        themes
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::by_name(crate::config::DEFAULT_THEME)
    }
}

/// Ensure themes directory exists and extract bundled themes on first run
pub fn ensure_themes_extracted() {
    let Some(themes_dir) = Theme::themes_dir() else {
        return;
    };

    if std::fs::create_dir_all(&themes_dir).is_err() {
        return;
    }

    let marker = themes_dir.join(".extracted_v1");
    if marker.exists() {
        return;
    }

    for theme in bundled::BUNDLED_THEMES {
        let path = themes_dir.join(theme.filename);
        // Don't overwrite user modifications
        if !path.exists() {
            let _ = std::fs::write(&path, theme.content);
        }
    }

    let _ = std::fs::write(&marker, "1");
}
