// Spans for the editor's input controls, shared by the filter form and the
// record editor.

use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::editor::{ChoiceInput, DateTimePicker, MultiPickInput, TextInput};
use crate::theme::Theme;

const CURSOR: &str = "▏";

/// Style of the label in front of an input.
pub fn label_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    }
}

/// Text with a bar cursor when focused.
pub fn text_spans(input: &TextInput, theme: &Theme, focused: bool) -> Vec<Span<'static>> {
    let value = input.value();
    if !focused {
        return vec![Span::styled(value.to_string(), Style::default().fg(theme.foreground))];
    }
    let split = value
        .char_indices()
        .nth(input.cursor())
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    vec![
        Span::styled(value[..split].to_string(), Style::default().fg(theme.foreground)),
        Span::styled(CURSOR, Style::default().fg(theme.highlight)),
        Span::styled(value[split..].to_string(), Style::default().fg(theme.foreground)),
    ]
}

/// Checklist chips: `☑ 张三  ☐ 李四`, the cursor chip highlighted when focused.
pub fn pick_spans(input: &MultiPickInput, theme: &Theme, focused: bool) -> Vec<Span<'static>> {
    if input.options().is_empty() {
        return vec![Span::styled("（无选项）", Style::default().fg(theme.muted))];
    }
    let mut spans = Vec::new();
    for (index, option) in input.options().iter().enumerate() {
        let mark = if input.is_picked(&option.value) { "☑" } else { "☐" };
        let style = if focused && index == input.cursor() {
            Style::default().fg(theme.selection_fg).bg(theme.selection)
        } else if input.is_picked(&option.value) {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.foreground)
        };
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("{} {}", mark, option.label), style));
    }
    spans
}

/// `‹ label ›` with the current option, or a placeholder.
pub fn choice_spans(input: &ChoiceInput, theme: &Theme, focused: bool) -> Vec<Span<'static>> {
    let arrow = Style::default().fg(if focused { theme.highlight } else { theme.muted });
    let value = match input.selected_label() {
        Some(label) => Span::styled(label.to_string(), Style::default().fg(theme.foreground)),
        None => Span::styled("请选择", Style::default().fg(theme.muted)),
    };
    vec![Span::styled("‹ ", arrow), value, Span::styled(" ›", arrow)]
}

/// Timestamp with the active segment highlighted when focused.
pub fn date_time_spans(picker: &DateTimePicker, theme: &Theme, focused: bool) -> Vec<Span<'static>> {
    let text = Style::default().fg(theme.foreground);
    match picker.display_parts() {
        Some((before, segment, after)) if focused => vec![
            Span::styled(before, text),
            Span::styled(
                segment,
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(after, text),
        ],
        Some(_) => vec![Span::styled(picker.display(), text)],
        None => vec![Span::styled("选择时间", Style::default().fg(theme.muted))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::PickOption;

    fn joined(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn cursor_sits_between_characters() {
        let input = TextInput::new("李教练");
        let theme = Theme::default();
        let shown = joined(&text_spans(&input, &theme, true));
        assert_eq!(shown.replace(CURSOR, ""), "李教练");
        assert!(shown.contains(CURSOR));
        assert_eq!(joined(&text_spans(&input, &theme, false)), "李教练");
    }

    #[test]
    fn picks_show_check_marks() {
        let input = MultiPickInput::new(
            vec![PickOption::plain("张三"), PickOption::plain("李四")],
            vec!["李四".into()],
        );
        let shown = joined(&pick_spans(&input, &Theme::default(), false));
        assert_eq!(shown, "☐ 张三  ☑ 李四");
    }

    #[test]
    fn empty_choice_shows_placeholder() {
        let input = ChoiceInput::new(vec![PickOption::new("A", "甲")], "");
        assert_eq!(joined(&choice_spans(&input, &Theme::default(), false)), "‹ 请选择 ›");
    }
}
