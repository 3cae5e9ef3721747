// Components module - reusable UI building blocks
//
// Shell components are rendered in every view:
// - Title bar: app name, view heading, route path
// - Status bar: focus hints, active filters, layout mode
// - Logs panel: system log tail
// - Toast: transient confirmation overlay
//
// Page components own their focus and return actions for App to apply:
// - Table panel: grid or card rendering with header sorting
// - Filter panel: pending filter form with 查询 / 重置
// - Editor panel: record form with the date-time calendar

pub mod editor_panel;
pub mod filter_panel;
pub mod inputs;
pub mod logs_panel;
pub mod status_bar;
pub mod table_panel;
pub mod title_bar;
pub mod toast;

pub use filter_panel::{FilterAction, FilterPanel};
pub use logs_panel::LogsPanel;
pub use table_panel::{TableAction, TablePanel, TableView};
pub use toast::Toast;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}

/// Render the logs panel with the most recent entries
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &mut App) {
    let entries = app.log_buffer.recent(logs_panel::TAIL);
    app.logs_panel.render(f, area, &entries, &app.theme);
}
