// Status bar component
//
// Renders the focused component's key hints, the active filter count and the
// layout breakpoint.

use crate::model::RecordKind;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
///
/// Narrow terminals drop the breakpoint label and the global key summary.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = app.breakpoint();

    let filters = match (app.route.is_list(), app.route.kind()) {
        (true, Some(RecordKind::Session)) => app.pages.sessions.filter().active().len(),
        (true, Some(RecordKind::Student)) => app.pages.students.filter().active().len(),
        _ => 0,
    };
    let filter_info = if filters > 0 {
        format!(" │ 筛选 {}", filters)
    } else {
        String::new()
    };

    let status_text = if bp.at_least(Breakpoint::Normal) {
        let layout = match bp {
            Breakpoint::Compact => "卡片",
            Breakpoint::Normal => "表格",
            Breakpoint::Wide => "表格+筛选",
        };
        format!(
            " {}{} │ {} │ s:课程 t:学员 n:新建 f:筛选 y:复制 ?:帮助 q:退出",
            app.focus_hint(),
            filter_info,
            layout,
        )
    } else {
        format!(" {}{}", app.focus_hint(), filter_info)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
