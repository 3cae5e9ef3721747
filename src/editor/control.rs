//! Input controls for editor fields.
//!
//! Each control owns its own echo state and reports every value change as a
//! [`ControlEvent::Changed`], which the editor writes straight into the draft.

use crossterm::event::{KeyCode, KeyEvent};

use super::datetime::DateTimePicker;
use crate::model::{coerce_number, format_number, EditValue, FieldValue};

/// A selectable value with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOption {
    pub value: String,
    pub label: String,
}

impl PickOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Value and label are the same string.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Which control a field uses.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Text,
    DateTime,
    /// Exactly one of a fixed set (enumerations).
    Choice(Vec<PickOption>),
    /// Any subset, kept in pick order (participants, equipment).
    MultiPick(Vec<PickOption>),
    /// Non-numeric input coerces to 0; results below `min` clamp to it.
    Numeric { integer: bool, min: Option<f64> },
}

/// Result of feeding a key to a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Not for this control; the editor may use it for navigation.
    Ignored,
    /// Handled with no value change (cursor movement).
    Consumed,
    Changed(EditValue),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    Text(TextInput),
    DateTime(DateTimePicker),
    Choice(ChoiceInput),
    MultiPick(MultiPickInput),
    Numeric(NumericInput),
}

impl Control {
    /// Build the control for `kind`, seeded from the field's current value.
    pub fn new(kind: &ControlKind, value: &FieldValue<'_>) -> Self {
        match kind {
            ControlKind::Text => Control::Text(TextInput::new(&value.to_text())),
            ControlKind::DateTime => Control::DateTime(DateTimePicker::new(&value.to_text())),
            ControlKind::Choice(options) => {
                Control::Choice(ChoiceInput::new(options.clone(), &value.to_text()))
            }
            ControlKind::MultiPick(options) => {
                let picked = match value {
                    FieldValue::List(items) => items.iter().map(|s| s.to_string()).collect(),
                    FieldValue::Text(s) if !s.is_empty() => vec![s.to_string()],
                    _ => Vec::new(),
                };
                Control::MultiPick(MultiPickInput::new(options.clone(), picked))
            }
            ControlKind::Numeric { integer, min } => {
                Control::Numeric(NumericInput::new(value, *integer, *min))
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ControlEvent {
        match self {
            Control::Text(input) => input.handle_key(key),
            Control::DateTime(picker) => picker.handle_key(key),
            Control::Choice(input) => input.handle_key(key),
            Control::MultiPick(input) => input.handle_key(key),
            Control::Numeric(input) => input.handle_key(key),
        }
    }

    /// One-line summary of the current value.
    pub fn display(&self) -> String {
        match self {
            Control::Text(input) => input.value().to_string(),
            Control::DateTime(picker) => picker.display(),
            Control::Choice(input) => input.selected_label().unwrap_or_default().to_string(),
            Control::MultiPick(input) => input.summary(),
            Control::Numeric(input) => input.buffer().to_string(),
        }
    }
}

/// Single-line text with a char cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Edit keys only; reports changes as [`ControlEvent::Changed`] text.
    pub fn handle_key(&mut self, key: KeyEvent) -> ControlEvent {
        let len = self.value.chars().count();
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                ControlEvent::Changed(EditValue::Text(self.value.clone()))
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let at = self.byte_index(self.cursor - 1);
                self.value.remove(at);
                self.cursor -= 1;
                ControlEvent::Changed(EditValue::Text(self.value.clone()))
            }
            KeyCode::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                ControlEvent::Changed(EditValue::Text(self.value.clone()))
            }
            KeyCode::Backspace | KeyCode::Delete => ControlEvent::Consumed,
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                ControlEvent::Consumed
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                ControlEvent::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                ControlEvent::Consumed
            }
            KeyCode::End => {
                self.cursor = len;
                ControlEvent::Consumed
            }
            _ => ControlEvent::Ignored,
        }
    }
}

/// One-of-many picker cycled with ←/→ or Space.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceInput {
    options: Vec<PickOption>,
    selected: Option<usize>,
}

impl ChoiceInput {
    pub fn new(options: Vec<PickOption>, current: &str) -> Self {
        let selected = options
            .iter()
            .position(|o| o.value == current || o.label == current);
        Self { options, selected }
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].label.as_str())
    }

    fn step(&mut self, forward: bool) -> ControlEvent {
        if self.options.is_empty() {
            return ControlEvent::Consumed;
        }
        let last = self.options.len() - 1;
        let next = match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => if i == last { 0 } else { i + 1 },
            (Some(i), false) => if i == 0 { last } else { i - 1 },
        };
        self.selected = Some(next);
        ControlEvent::Changed(EditValue::Text(self.options[next].value.clone()))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ControlEvent {
        match key.code {
            KeyCode::Right | KeyCode::Char(' ') => self.step(true),
            KeyCode::Left => self.step(false),
            _ => ControlEvent::Ignored,
        }
    }
}

/// Checklist; picked values keep the order they were picked in.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPickInput {
    options: Vec<PickOption>,
    picked: Vec<String>,
    cursor: usize,
}

impl MultiPickInput {
    /// Picked values missing from `options` are kept and listed by raw value.
    pub fn new(mut options: Vec<PickOption>, picked: Vec<String>) -> Self {
        for value in &picked {
            if !options.iter().any(|o| &o.value == value) {
                options.push(PickOption::plain(value.clone()));
            }
        }
        Self {
            options,
            picked,
            cursor: 0,
        }
    }

    pub fn options(&self) -> &[PickOption] {
        &self.options
    }

    pub fn picked(&self) -> &[String] {
        &self.picked
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_picked(&self, value: &str) -> bool {
        self.picked.iter().any(|p| p == value)
    }

    /// Picked labels joined, in pick order.
    pub fn summary(&self) -> String {
        self.picked
            .iter()
            .map(|value| {
                self.options
                    .iter()
                    .find(|o| &o.value == value)
                    .map(|o| o.label.as_str())
                    .unwrap_or(value.as_str())
            })
            .collect::<Vec<_>>()
            .join(crate::model::LIST_SEPARATOR)
    }

    fn toggle(&mut self) -> ControlEvent {
        let Some(option) = self.options.get(self.cursor) else {
            return ControlEvent::Consumed;
        };
        if let Some(pos) = self.picked.iter().position(|p| p == &option.value) {
            self.picked.remove(pos);
        } else {
            self.picked.push(option.value.clone());
        }
        ControlEvent::Changed(EditValue::List(self.picked.clone()))
    }

    /// ↑/↓ move inside the list and fall through at its ends.
    pub fn handle_key(&mut self, key: KeyEvent) -> ControlEvent {
        match key.code {
            KeyCode::Up if self.cursor > 0 => {
                self.cursor -= 1;
                ControlEvent::Consumed
            }
            KeyCode::Down if self.cursor + 1 < self.options.len() => {
                self.cursor += 1;
                ControlEvent::Consumed
            }
            KeyCode::Char(' ') => self.toggle(),
            _ => ControlEvent::Ignored,
        }
    }
}

/// Number entry. The buffer echoes what was typed; the emitted value is coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericInput {
    buffer: String,
    integer: bool,
    min: Option<f64>,
}

impl NumericInput {
    pub fn new(value: &FieldValue<'_>, integer: bool, min: Option<f64>) -> Self {
        let buffer = match value {
            FieldValue::Number(n) => format_number(*n),
            other => other.to_text().into_owned(),
        };
        Self {
            buffer,
            integer,
            min,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The value the buffer stands for.
    pub fn value(&self) -> f64 {
        let mut n = coerce_number(&self.buffer);
        if self.integer {
            n = n.round();
        }
        match self.min {
            Some(min) if n < min => min,
            _ => n,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ControlEvent {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.buffer.push(c);
            }
            KeyCode::Char(_) => return ControlEvent::Consumed,
            KeyCode::Backspace => {
                if self.buffer.pop().is_none() {
                    return ControlEvent::Consumed;
                }
            }
            _ => return ControlEvent::Ignored,
        }
        ControlEvent::Changed(EditValue::Number(self.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(control: &mut Control, text: &str) -> ControlEvent {
        let mut last = ControlEvent::Ignored;
        for c in text.chars() {
            last = control.handle_key(key(KeyCode::Char(c)));
        }
        last
    }

    #[test]
    fn text_input_edits_at_cursor_with_wide_chars() {
        let mut input = TextInput::new("李教练");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "李练");
        let event = input.handle_key(key(KeyCode::Char('老')));
        assert_eq!(event, ControlEvent::Changed(EditValue::Text("李老练".into())));
        assert_eq!(input.handle_key(key(KeyCode::Up)), ControlEvent::Ignored);
    }

    #[test]
    fn numeric_coerces_garbage_to_zero() {
        let mut control = Control::new(
            &ControlKind::Numeric {
                integer: false,
                min: None,
            },
            &FieldValue::Number(0.0),
        );
        control.handle_key(key(KeyCode::Backspace));
        assert_eq!(type_str(&mut control, "12"), ControlEvent::Changed(EditValue::Number(12.0)));
        // Letters never reach the buffer.
        assert_eq!(control.handle_key(key(KeyCode::Char('x'))), ControlEvent::Consumed);
        assert_eq!(type_str(&mut control, "-."), ControlEvent::Changed(EditValue::Number(0.0)));
    }

    #[test]
    fn numeric_clamps_and_rounds() {
        let mut input = NumericInput::new(&FieldValue::Text(""), true, Some(0.0));
        input.handle_key(key(KeyCode::Char('-')));
        assert_eq!(input.handle_key(key(KeyCode::Char('3'))), ControlEvent::Changed(EditValue::Number(0.0)));

        let mut input = NumericInput::new(&FieldValue::Number(2.0), true, Some(0.0));
        input.handle_key(key(KeyCode::Char('.')));
        assert_eq!(input.handle_key(key(KeyCode::Char('6'))), ControlEvent::Changed(EditValue::Number(3.0)));
    }

    #[test]
    fn choice_cycles_and_wraps() {
        let options = vec![PickOption::new("male", "男"), PickOption::new("female", "女")];
        let mut input = ChoiceInput::new(options, "male");
        assert_eq!(input.selected_label(), Some("男"));
        assert_eq!(
            input.handle_key(key(KeyCode::Right)),
            ControlEvent::Changed(EditValue::Text("female".into()))
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Right)),
            ControlEvent::Changed(EditValue::Text("male".into()))
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Left)),
            ControlEvent::Changed(EditValue::Text("female".into()))
        );
        assert_eq!(input.handle_key(key(KeyCode::Down)), ControlEvent::Ignored);
    }

    #[test]
    fn multi_pick_keeps_pick_order_and_falls_through_at_edges() {
        let options = vec![
            PickOption::new("c1", "王小明"),
            PickOption::new("c2", "李华"),
            PickOption::new("c3", "张三"),
        ];
        let mut input = MultiPickInput::new(options, vec!["c3".into()]);
        assert_eq!(input.handle_key(key(KeyCode::Up)), ControlEvent::Ignored);

        let event = input.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(event, ControlEvent::Changed(EditValue::List(vec!["c3".into(), "c1".into()])));
        assert_eq!(input.summary(), "张三、王小明");

        input.handle_key(key(KeyCode::Down));
        input.handle_key(key(KeyCode::Down));
        assert_eq!(input.handle_key(key(KeyCode::Down)), ControlEvent::Ignored);

        let event = input.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(event, ControlEvent::Changed(EditValue::List(vec!["c1".into()])));
    }

    #[test]
    fn multi_pick_lists_unknown_values() {
        let input = MultiPickInput::new(vec![PickOption::new("c1", "王小明")], vec!["ghost".into()]);
        assert_eq!(input.options().len(), 2);
        assert!(input.is_picked("ghost"));
        assert_eq!(input.summary(), "ghost");
    }
}
