// Not-found view - unknown paths and edit routes naming a missing record

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, message: &str) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter/Esc 返回列表",
            Style::default().fg(app.theme.muted),
        )),
    ];

    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(panel, area);
}
