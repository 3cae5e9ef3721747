// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help modal: keyboard shortcuts and current config
// - Filter drawer: the list's filter form when it is not docked

use crate::model::RecordKind;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the centered filter drawer
const DRAWER_WIDTH: u16 = 48;

/// Render a modal dialog as an overlay
pub fn render(f: &mut Frame, modal: Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Filter => render_filter(f, app),
    }
}

/// Calculate a centered rectangle within the given area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Full-width rectangle anchored to the bottom of the area
fn bottom_rect(height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    Rect::new(area.x, area.bottom() - height, area.width, height)
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &App) {
    // Styles
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  页面", header_style)),
        kb("s", "课程管理"),
        kb("t", "学员管理"),
        kb("n", "新建记录"),
        Line::raw(""),
        Line::from(Span::styled("  列表", header_style)),
        kb("↑/↓, j/k", "选择行"),
        kb("Enter, e", "编辑所选"),
        kb("1-9", "按列排序"),
        kb("Tab", "表头 / 行"),
        kb("f", "筛选"),
        kb("y", "复制为 JSON"),
        kb("d", "删除"),
        Line::raw(""),
        Line::from(Span::styled("  编辑", header_style)),
        kb("Tab/↑↓", "切换字段"),
        kb("Ctrl+S", "保存"),
        kb("Esc", "取消"),
        Line::raw(""),
        Line::from(Span::styled("  通用", header_style)),
        kb("?", "显示/关闭帮助"),
        kb("L", "日志面板"),
        kb("q", "退出"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  主题: ", desc_style),
            Span::styled(app.theme.name.as_str(), key_style),
        ]),
    ]);

    // Calculate modal size
    let width = 44;
    let height = 31;
    let area = centered_rect(width, height, f.area());

    // Clear the area behind the modal
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(Modal::Help.title())
                .title_bottom(Line::from(" ? 或 Esc 关闭 ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the filter form as a drawer: from the bottom on compact terminals,
/// centered otherwise.
fn render_filter(f: &mut Frame, app: &App) {
    let Some(kind) = app.route.is_list().then(|| app.route.kind()).flatten() else {
        return;
    };
    let frame_area = f.area();
    let area = if app.breakpoint() == Breakpoint::Compact {
        bottom_rect(frame_area.height * 2 / 3, frame_area)
    } else {
        centered_rect(DRAWER_WIDTH, frame_area.height.saturating_sub(6), frame_area)
    };

    f.render_widget(Clear, area);
    let ui = match kind {
        RecordKind::Session => &app.sessions_ui,
        RecordKind::Student => &app.students_ui,
    };
    ui.filter.render(f, area, &app.theme, true);
}
