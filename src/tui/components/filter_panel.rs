//! Filter form component
//!
//! Holds pending inputs separately from the engine's committed selection:
//! typing and ticking options never re-filter. A query is only requested by
//! the 查询 button or Enter inside a text input. 重置 clears the inputs and
//! asks the App to reset the engine.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::inputs::{label_style, pick_spans, text_spans};
use crate::editor::{ControlEvent, MultiPickInput, PickOption, TextInput};
use crate::filter::{Selection, Selections};
use crate::pages::{Entity, Page};
use crate::theme::Theme;
use crate::tui::traits::{Handled, Interactive};

/// Pending value for one filter field
#[derive(Debug, Clone)]
enum FilterInput {
    Text(TextInput),
    Pick(MultiPickInput),
}

#[derive(Debug, Clone)]
struct FilterRow {
    key: String,
    label: String,
    input: FilterInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    Input(usize),
    Query,
    Reset,
}

/// What the App should do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Ignored,
    Consumed,
    /// Commit these selections to the engine
    Query(Selections),
    /// Clear the engine's committed selection
    Reset,
    /// Leave the form
    Close,
}

impl From<FilterAction> for Handled {
    fn from(action: FilterAction) -> Self {
        Handled::from_bool(action != FilterAction::Ignored)
    }
}

#[derive(Debug, Clone)]
pub struct FilterPanel {
    rows: Vec<FilterRow>,
    focus: FilterFocus,
}

impl FilterPanel {
    /// Empty form for every configured filter of `page`.
    pub fn for_page<T: Entity>(page: &Page<T>) -> Self {
        let mut panel = Self {
            rows: Vec::new(),
            focus: FilterFocus::Input(0),
        };
        panel.rebuild(page);
        panel
    }

    /// Rebuild option lists from the page's current data, keeping what was
    /// typed or ticked. Picked values that vanished from the data are kept.
    pub fn rebuild<T: Entity>(&mut self, page: &Page<T>) {
        let pending = self.pending();
        self.rows = page
            .filter()
            .configs()
            .iter()
            .map(|config| {
                let previous = pending.get(&config.key);
                let input = if config.is_text_input() {
                    let text = match previous {
                        Some(Selection::Text(text)) => text.as_str(),
                        _ => "",
                    };
                    FilterInput::Text(TextInput::new(text))
                } else {
                    let options = page
                        .options(&config.key)
                        .into_iter()
                        .map(|o| PickOption::new(o.value, o.label))
                        .collect();
                    let picked = match previous {
                        Some(Selection::Many(values)) => values.clone(),
                        _ => Vec::new(),
                    };
                    FilterInput::Pick(MultiPickInput::new(options, picked))
                };
                FilterRow {
                    key: config.key.clone(),
                    label: config.label.clone(),
                    input,
                }
            })
            .collect();
        if let FilterFocus::Input(i) = self.focus {
            if i >= self.rows.len() {
                self.focus = FilterFocus::Query;
            }
        }
    }

    /// The form's current inputs as a selection set (empty entries dropped).
    pub fn pending(&self) -> Selections {
        let mut selections = Selections::new();
        for row in &self.rows {
            let selection = match &row.input {
                FilterInput::Text(input) => Selection::Text(input.value().trim().to_string()),
                FilterInput::Pick(input) => Selection::Many(input.picked().to_vec()),
            };
            if !selection.is_empty() {
                selections.insert(row.key.clone(), selection);
            }
        }
        selections
    }

    fn clear(&mut self) {
        for row in &mut self.rows {
            row.input = match &row.input {
                FilterInput::Text(_) => FilterInput::Text(TextInput::default()),
                FilterInput::Pick(input) => {
                    FilterInput::Pick(MultiPickInput::new(input.options().to_vec(), Vec::new()))
                }
            };
        }
    }

    #[cfg(test)]
    pub fn focus(&self) -> FilterFocus {
        self.focus
    }

    /// Focus order: inputs, then 查询, then 重置, wrapping.
    fn move_focus(&mut self, forward: bool) {
        let count = self.rows.len();
        let slots = count + 2;
        let current = match self.focus {
            FilterFocus::Input(i) => i,
            FilterFocus::Query => count,
            FilterFocus::Reset => count + 1,
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.focus = match next {
            i if i < count => FilterFocus::Input(i),
            i if i == count => FilterFocus::Query,
            _ => FilterFocus::Reset,
        };
    }

    fn handle_input_key(&mut self, index: usize, key: KeyEvent) -> FilterAction {
        let Some(row) = self.rows.get_mut(index) else {
            self.focus = FilterFocus::Query;
            return FilterAction::Consumed;
        };
        let text_input = matches!(row.input, FilterInput::Text(_));
        if text_input && key.code == KeyCode::Enter {
            return FilterAction::Query(self.pending());
        }
        let event = match &mut row.input {
            FilterInput::Text(input) => input.handle_key(key),
            FilterInput::Pick(input) => input.handle_key(key),
        };
        match event {
            ControlEvent::Changed(_) | ControlEvent::Consumed => FilterAction::Consumed,
            ControlEvent::Ignored => match key.code {
                KeyCode::Up => {
                    self.move_focus(false);
                    FilterAction::Consumed
                }
                KeyCode::Down | KeyCode::Enter => {
                    self.move_focus(true);
                    FilterAction::Consumed
                }
                _ => FilterAction::Ignored,
            },
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let mut lines: Vec<Line> = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            let row_focused = focused && self.focus == FilterFocus::Input(index);
            lines.push(Line::from(Span::styled(
                row.label.clone(),
                label_style(theme, row_focused),
            )));
            let spans = match &row.input {
                FilterInput::Text(input) => {
                    let mut spans = vec![Span::styled("› ", Style::default().fg(theme.border))];
                    spans.extend(text_spans(input, theme, row_focused));
                    spans
                }
                FilterInput::Pick(input) => pick_spans(input, theme, row_focused),
            };
            lines.push(Line::from(spans));
            lines.push(Line::raw(""));
        }

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
            button("[ 查询 ]", focused && self.focus == FilterFocus::Query),
            Span::raw("  "),
            button("[ 重置 ]", focused && self.focus == FilterFocus::Reset),
        ]));

        let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.panel_border(focused)))
                .title(" 筛选 "),
        );
        f.render_widget(panel, area);
    }
}

impl Interactive for FilterPanel {
    type Action = FilterAction;

    fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Tab => {
                self.move_focus(true);
                return FilterAction::Consumed;
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return FilterAction::Consumed;
            }
            KeyCode::Esc => return FilterAction::Close,
            _ => {}
        }

        match self.focus {
            FilterFocus::Input(index) => self.handle_input_key(index, key),
            FilterFocus::Query | FilterFocus::Reset => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') if self.focus == FilterFocus::Query => {
                    FilterAction::Query(self.pending())
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.clear();
                    FilterAction::Reset
                }
                KeyCode::Left => {
                    self.focus = FilterFocus::Query;
                    FilterAction::Consumed
                }
                KeyCode::Right => {
                    self.focus = FilterFocus::Reset;
                    FilterAction::Consumed
                }
                KeyCode::Up => {
                    self.move_focus(false);
                    FilterAction::Consumed
                }
                KeyCode::Down => {
                    self.move_focus(true);
                    FilterAction::Consumed
                }
                _ => FilterAction::Ignored,
            },
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            FilterFocus::Input(_) => Some("Tab:下一项  Space:勾选  Enter:查询  Esc:返回"),
            FilterFocus::Query | FilterFocus::Reset => Some("←→:按钮  Enter:确认  Esc:返回"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Pages;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(panel: &mut FilterPanel, text: &str) {
        for c in text.chars() {
            panel.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Tab until the form focuses the input for `field`.
    fn focus_field(panel: &mut FilterPanel, field: &str) {
        let index = panel.rows.iter().position(|r| r.key == field).unwrap();
        while panel.focus() != FilterFocus::Input(index) {
            panel.handle_key(key(KeyCode::Tab));
        }
    }

    #[test]
    fn typing_does_not_query() {
        let pages = Pages::seeded();
        let mut panel = FilterPanel::for_page(&pages.sessions);
        let field = panel
            .rows
            .iter()
            .find(|r| matches!(r.input, FilterInput::Text(_)))
            .map(|r| r.key.clone())
            .unwrap();
        focus_field(&mut panel, &field);

        type_text(&mut panel, "abc");
        assert_eq!(
            panel.pending().get(&field),
            Some(&Selection::Text("abc".into()))
        );

        match panel.handle_key(key(KeyCode::Enter)) {
            FilterAction::Query(selections) => {
                assert_eq!(selections.get(&field), Some(&Selection::Text("abc".into())))
            }
            other => panic!("expected query, got {:?}", other),
        }
    }

    #[test]
    fn space_ticks_options_and_query_button_commits() {
        let pages = Pages::seeded();
        let mut panel = FilterPanel::for_page(&pages.sessions);
        focus_field(&mut panel, "coach");

        panel.handle_key(key(KeyCode::Char(' ')));
        let picked = match panel.pending().get("coach") {
            Some(Selection::Many(values)) => values.clone(),
            other => panic!("expected a pick, got {:?}", other),
        };
        assert_eq!(picked.len(), 1);

        while panel.focus() != FilterFocus::Query {
            panel.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(
            panel.handle_key(key(KeyCode::Enter)),
            FilterAction::Query(panel.pending())
        );
    }

    #[test]
    fn reset_clears_inputs() {
        let pages = Pages::seeded();
        let mut panel = FilterPanel::for_page(&pages.sessions);
        focus_field(&mut panel, "coach");
        panel.handle_key(key(KeyCode::Char(' ')));
        assert!(!panel.pending().is_empty());

        while panel.focus() != FilterFocus::Reset {
            panel.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(panel.handle_key(key(KeyCode::Enter)), FilterAction::Reset);
        assert!(panel.pending().is_empty());
    }

    #[test]
    fn rebuild_keeps_pending_values() {
        let pages = Pages::seeded();
        let mut panel = FilterPanel::for_page(&pages.sessions);
        focus_field(&mut panel, "coach");
        panel.handle_key(key(KeyCode::Char(' ')));
        let before = panel.pending();

        panel.rebuild(&pages.sessions);
        assert_eq!(panel.pending(), before);
    }

    #[test]
    fn esc_closes() {
        let pages = Pages::seeded();
        let mut panel = FilterPanel::for_page(&pages.students);
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), FilterAction::Close);
    }
}
