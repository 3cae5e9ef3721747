//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, newest entry at the bottom,
//! color-coded by severity. The buffer is shared with the tracing layer, so
//! the panel only receives entries and never owns them.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;

/// How many recent entries are pulled from the buffer per frame
pub const TAIL: usize = 200;

#[derive(Debug, Clone, Default)]
pub struct LogsPanel {
    /// Auto-following scroll state
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
        let height = usize::from(area.height.saturating_sub(2));
        self.scroll.update_dimensions(entries.len(), height);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(" 日志 "),
        );
        f.render_widget(list, area);
    }
}

/// Format a log entry for display
fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

/// Get color style for log level
fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.highlight),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}
