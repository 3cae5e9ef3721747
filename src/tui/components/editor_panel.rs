// Record editor rendering
//
// One labeled line per field (multi-picks wrap onto their own lines), the
// 保存 / 取消 buttons, and a month calendar beside the form while a date-time
// field has focus.

use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::inputs::{choice_spans, date_time_spans, label_style, pick_spans, text_spans};
use crate::editor::{Control, DateTimePicker, Editor, EditorFocus};
use crate::model::Record;
use crate::theme::Theme;

/// Width of the calendar column
const CALENDAR_WIDTH: u16 = 26;

pub fn render<T: Record>(f: &mut Frame, area: Rect, editor: &Editor<T>, heading: &str, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.highlight))
        .title(format!(" {} ", heading));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let picker = match editor.focus() {
        EditorFocus::Field(index) => match editor.controls().get(index) {
            Some(Control::DateTime(picker)) => Some(picker),
            _ => None,
        },
        _ => None,
    };

    let (form_area, calendar_area) = match picker {
        Some(_) if inner.width > CALENDAR_WIDTH * 2 => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(1), Constraint::Length(CALENDAR_WIDTH)])
                .split(inner);
            (chunks[0], Some(chunks[1]))
        }
        _ => (inner, None),
    };

    f.render_widget(
        Paragraph::new(form_lines(editor, theme)).wrap(Wrap { trim: false }),
        form_area,
    );
    if let (Some(picker), Some(calendar_area)) = (picker, calendar_area) {
        render_calendar(f, calendar_area, picker, theme);
    }
}

fn form_lines<T: Record>(editor: &Editor<T>, theme: &Theme) -> Vec<Line<'static>> {
    let label_width = editor
        .fields()
        .iter()
        .map(|field| UnicodeWidthStr::width(field.title.as_str()) + usize::from(field.required))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (index, (field, control)) in editor.fields().iter().zip(editor.controls()).enumerate() {
        let focused = editor.focus() == EditorFocus::Field(index);
        let marker = if focused { "› " } else { "  " };
        let title = if field.required {
            format!("{}*", field.title)
        } else {
            field.title.clone()
        };
        let pad = label_width.saturating_sub(UnicodeWidthStr::width(title.as_str()));

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.highlight)),
            Span::styled(title, label_style(theme, focused)),
            Span::raw(format!("{}  ", " ".repeat(pad))),
        ];
        spans.extend(match control {
            Control::Text(input) => text_spans(input, theme, focused),
            Control::DateTime(picker) => date_time_spans(picker, theme, focused),
            Control::Choice(input) => choice_spans(input, theme, focused),
            Control::MultiPick(input) => pick_spans(input, theme, focused),
            Control::Numeric(input) => {
                vec![Span::styled(input.buffer().to_string(), Style::default().fg(theme.foreground))]
            }
        });
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    let button = |text: &'static str, active: bool| {
        if active {
            Span::styled(
                text,
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, Style::default().fg(theme.foreground))
        }
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        button("[ 保存 ]", editor.focus() == EditorFocus::Save),
        Span::raw("  "),
        button("[ 取消 ]", editor.focus() == EditorFocus::Cancel),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "  Tab/↑↓:切换  Ctrl+S:保存  Esc:取消",
        Style::default().fg(theme.muted),
    )));
    lines
}

fn render_calendar(f: &mut Frame, area: Rect, picker: &DateTimePicker, theme: &Theme) {
    let mut lines = Vec::new();
    match picker.value() {
        Some(value) => {
            lines.push(Line::from(Span::styled(
                format!("{}年{}月", value.year(), value.month()),
                Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "一 二 三 四 五 六 日",
                Style::default().fg(theme.muted),
            )));
            for week in picker.calendar_weeks() {
                let mut spans = Vec::new();
                for day in week {
                    let (text, style) = match day {
                        Some(d) if d == value.day() => (
                            format!("{:>2}", d),
                            Style::default()
                                .fg(theme.selection_fg)
                                .bg(theme.selection)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Some(d) => (format!("{:>2}", d), Style::default().fg(theme.foreground)),
                        None => ("  ".to_string(), Style::default()),
                    };
                    spans.push(Span::styled(text, style));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                value.format("%H:%M").to_string(),
                Style::default().fg(theme.foreground),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "↑↓ 从当前时间开始",
            Style::default().fg(theme.muted),
        ))),
    }
    lines.push(Line::from(Span::styled(
        "←→:年月日时分  ↑↓:调整",
        Style::default().fg(theme.muted),
    )));

    let calendar = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(calendar, area);
}
