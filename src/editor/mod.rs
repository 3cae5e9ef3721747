//! Record editor: a draft of one record, one control per field, save/cancel.
//!
//! The editor never touches a store. Saving hands the whole draft back as
//! [`EditorAction::Save`] and the page decides whether it replaces an
//! existing record or becomes a new one.

mod control;
mod datetime;

pub use control::{
    ChoiceInput, Control, ControlEvent, ControlKind, MultiPickInput, PickOption, TextInput,
};
pub use datetime::DateTimePicker;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{FieldValue, Record};
use crate::route::Route;

/// One labeled control.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorField {
    pub title: String,
    pub field: String,
    pub required: bool,
    /// `None` picks the default for the field's key and value.
    pub control: Option<ControlKind>,
}

impl EditorField {
    pub fn new(title: &str, field: &str) -> Self {
        Self {
            title: title.to_string(),
            field: field.to_string(),
            required: false,
            control: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn control(mut self, kind: ControlKind) -> Self {
        self.control = Some(kind);
        self
    }

    /// Explicit control, or: text values under a key mentioning date/time get
    /// the date-time picker, everything else a text input.
    pub fn resolve_control(&self, value: &FieldValue<'_>) -> ControlKind {
        if let Some(kind) = &self.control {
            return kind.clone();
        }
        let key = self.field.to_ascii_lowercase();
        let date_like_key = key.contains("date") || key.contains("time");
        match value {
            FieldValue::Text(_) if date_like_key => ControlKind::DateTime,
            _ => ControlKind::Text,
        }
    }
}

/// Identity of the record being edited. A change discards the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// A new record; the generation distinguishes separate "new" visits.
    New(u64),
    Existing(String),
}

/// Where cancel goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelBehavior {
    Navigate(Route),
    /// Pop route history.
    Back,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction<T> {
    None,
    Save(T),
    Cancel(CancelBehavior),
}

/// What has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Field(usize),
    Save,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Editor<T: Record> {
    fields: Vec<EditorField>,
    on_cancel: Option<Route>,
    seed: Option<Seed>,
    draft: T,
    controls: Vec<Control>,
    focus: EditorFocus,
}

impl<T: Record> Editor<T> {
    pub fn new(fields: Vec<EditorField>, on_cancel: Option<Route>) -> Self {
        let draft = T::blank();
        let controls = build_controls(&fields, &draft);
        Self {
            fields,
            on_cancel,
            seed: None,
            draft,
            controls,
            focus: EditorFocus::Field(0),
        }
    }

    /// Re-seed from `record` when `seed` differs from the current one.
    /// Returns whether the draft was replaced.
    pub fn sync(&mut self, seed: Seed, record: &T) -> bool {
        if self.seed.as_ref() == Some(&seed) {
            return false;
        }
        tracing::debug!(kind = %T::KIND, seed = ?seed, "Editor re-seeded");
        self.seed = Some(seed);
        self.draft = record.clone();
        self.controls = build_controls(&self.fields, &self.draft);
        self.focus = EditorFocus::Field(0);
        true
    }

    /// Drop the draft. The next [`sync`](Self::sync) re-seeds whatever its identity.
    pub fn discard(&mut self) {
        self.seed = None;
        self.draft = T::blank();
        self.controls = build_controls(&self.fields, &self.draft);
        self.focus = EditorFocus::Field(0);
    }

    /// Replace field definitions (fresh option lists) keeping the draft.
    pub fn set_fields(&mut self, fields: Vec<EditorField>) {
        self.fields = fields;
        self.controls = build_controls(&self.fields, &self.draft);
        if let EditorFocus::Field(i) = self.focus {
            if i >= self.fields.len() {
                self.focus = EditorFocus::Field(0);
            }
        }
    }

    #[cfg(test)]
    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    fn cancel(&self) -> EditorAction<T> {
        match &self.on_cancel {
            Some(route) => EditorAction::Cancel(CancelBehavior::Navigate(route.clone())),
            None => EditorAction::Cancel(CancelBehavior::Back),
        }
    }

    fn save(&self) -> EditorAction<T> {
        tracing::debug!(kind = %T::KIND, id = self.draft.id(), "Editor submitted");
        EditorAction::Save(self.draft.clone())
    }

    /// Focus order: fields, then 保存, then 取消, wrapping.
    fn move_focus(&mut self, forward: bool) {
        let count = self.fields.len();
        let slots = count + 2;
        let current = match self.focus {
            EditorFocus::Field(i) => i,
            EditorFocus::Save => count,
            EditorFocus::Cancel => count + 1,
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.focus = match next {
            i if i < count => EditorFocus::Field(i),
            i if i == count => EditorFocus::Save,
            _ => EditorFocus::Cancel,
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditorAction<T> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.save();
        }
        match key.code {
            KeyCode::Esc => return self.cancel(),
            KeyCode::Tab => {
                self.move_focus(true);
                return EditorAction::None;
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return EditorAction::None;
            }
            _ => {}
        }

        match self.focus {
            EditorFocus::Field(index) => {
                let Some(control) = self.controls.get_mut(index) else {
                    self.focus = EditorFocus::Save;
                    return EditorAction::None;
                };
                match control.handle_key(key) {
                    ControlEvent::Changed(value) => {
                        let field = &self.fields[index].field;
                        match self.draft.set_field(field, value) {
                            Ok(()) => tracing::trace!(field = %field, value = %control.display(), "Field edited"),
                            Err(e) => tracing::warn!(field = %field, error = %e, "Rejected field edit"),
                        }
                    }
                    ControlEvent::Consumed => {}
                    ControlEvent::Ignored => match key.code {
                        KeyCode::Up => self.move_focus(false),
                        KeyCode::Down | KeyCode::Enter => self.move_focus(true),
                        _ => {}
                    },
                }
                EditorAction::None
            }
            EditorFocus::Save | EditorFocus::Cancel => {
                let on_save = self.focus == EditorFocus::Save;
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') if on_save => self.save(),
                    KeyCode::Enter | KeyCode::Char(' ') => self.cancel(),
                    KeyCode::Left => {
                        self.focus = EditorFocus::Save;
                        EditorAction::None
                    }
                    KeyCode::Right => {
                        self.focus = EditorFocus::Cancel;
                        EditorAction::None
                    }
                    KeyCode::Up => {
                        self.move_focus(false);
                        EditorAction::None
                    }
                    KeyCode::Down => {
                        self.move_focus(true);
                        EditorAction::None
                    }
                    _ => EditorAction::None,
                }
            }
        }
    }
}

fn build_controls<T: Record>(fields: &[EditorField], draft: &T) -> Vec<Control> {
    fields
        .iter()
        .map(|f| {
            let value = draft.field_value(&f.field);
            Control::new(&f.resolve_control(&value), &value)
        })
        .collect()
}
