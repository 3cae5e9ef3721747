//! Per-field filtering over a record collection.
//!
//! A [`Selections`] map holds, per filter key, either one typed value (text,
//! date or time inputs) or a set of picked options (multi-selects). A record
//! passes when every non-empty selection matches: AND across fields, OR
//! within one field's picked values.
//!
//! Values are compared as strings after projection. List fields (equipment,
//! participants) match when any element matches, and participant ids are
//! projected to names through a [`Directory`] first.

use chrono::NaiveTime;
use std::collections::{BTreeMap, HashSet};

use crate::model::time::parse_timestamp;
use crate::model::{Directory, FieldValue, Record};

/// How a filter input is presented and how its values are projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, matched exactly (after trimming).
    Text,
    /// Single date; stored timestamps match on their `YYYY-MM-DD` part.
    Date,
    /// Single time; stored timestamps match on their `HH:MM` part.
    Time,
    /// Pick any number of options derived from the data.
    MultiSelect,
}

/// One filter over a record field.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Selection key; the field name unless set with [`with_key`](Self::with_key).
    pub key: String,
    pub field: String,
    pub label: String,
    pub kind: FilterKind,
    references: Option<Directory>,
    option_label: Option<fn(&str) -> String>,
}

impl FilterConfig {
    fn new(field: &str, label: &str, kind: FilterKind) -> Self {
        Self {
            key: field.to_string(),
            field: field.to_string(),
            label: label.to_string(),
            kind,
            references: None,
            option_label: None,
        }
    }

    pub fn text(field: &str, label: &str) -> Self {
        Self::new(field, label, FilterKind::Text)
    }

    pub fn date(field: &str, label: &str) -> Self {
        Self::new(field, label, FilterKind::Date)
    }

    pub fn time(field: &str, label: &str) -> Self {
        Self::new(field, label, FilterKind::Time)
    }

    pub fn multi_select(field: &str, label: &str) -> Self {
        Self::new(field, label, FilterKind::MultiSelect)
    }

    /// Select under `key`, so one field can carry several filters (date and time).
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = key.to_string();
        self
    }

    /// Stored values are ids; match and list them by resolved name.
    pub fn with_references(mut self, directory: Directory) -> Self {
        self.references = Some(directory);
        self
    }

    /// Display stored values through `label` in option lists (`male` → 男).
    pub fn with_option_label(mut self, label: fn(&str) -> String) -> Self {
        self.option_label = Some(label);
        self
    }

    pub fn is_text_input(&self) -> bool {
        !matches!(self.kind, FilterKind::MultiSelect)
    }

    /// Project a stored scalar (or list element) into comparison space.
    fn project_stored(&self, value: &str) -> String {
        let value = match &self.references {
            Some(directory) => directory.resolve(value),
            None => value,
        };
        match self.kind {
            FilterKind::Date => project_date(value),
            FilterKind::Time => project_time(value),
            FilterKind::Text | FilterKind::MultiSelect => value.trim().to_string(),
        }
    }

    /// Project a selected value into comparison space.
    fn project_selected(&self, value: &str) -> String {
        match self.kind {
            FilterKind::Date => project_date(value),
            FilterKind::Time => project_time(value),
            FilterKind::Text | FilterKind::MultiSelect => value.trim().to_string(),
        }
    }
}

fn project_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => value.trim().to_string(),
    }
}

fn project_time(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(ts) = parse_timestamp(trimmed) {
        return ts.format("%H:%M").to_string();
    }
    ["%H:%M", "%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// The chosen value(s) for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Text(String),
    Many(Vec<String>),
}

impl Selection {
    /// Blank text and an empty pick list both mean "no constraint".
    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Text(s) => s.trim().is_empty(),
            Selection::Many(values) => values.is_empty(),
        }
    }

    pub fn values(&self) -> Vec<&str> {
        match self {
            Selection::Text(s) => vec![s.as_str()],
            Selection::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Field key → selection. Ordered so logs and reports are stable.
pub type Selections = BTreeMap<String, Selection>;

/// A pickable value for a multi-select filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// What goes into the selection.
    pub value: String,
    /// What the user sees.
    pub label: String,
}

/// Filter configuration plus the committed selection set.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    configs: Vec<FilterConfig>,
    active: Selections,
}

impl FilterEngine {
    pub fn new(configs: Vec<FilterConfig>) -> Self {
        Self {
            configs,
            active: Selections::new(),
        }
    }

    pub fn configs(&self) -> &[FilterConfig] {
        &self.configs
    }

    pub fn config(&self, key: &str) -> Option<&FilterConfig> {
        self.configs.iter().find(|c| c.key == key)
    }

    /// Swap the directory used by reference filters (after the roster changes).
    pub fn set_references(&mut self, key: &str, directory: Directory) {
        if let Some(config) = self.configs.iter_mut().find(|c| c.key == key) {
            config.references = Some(directory);
        }
    }

    /// The committed selection set.
    pub fn active(&self) -> &Selections {
        &self.active
    }

    /// Commit a selection set. Empty entries are dropped.
    pub fn apply(&mut self, selections: Selections) {
        self.active = selections
            .into_iter()
            .filter(|(_, selection)| !selection.is_empty())
            .collect();
        tracing::debug!(selections = ?self.active, "Filter applied");
    }

    /// Clear the committed selection; [`current`](Self::current) returns the full source again.
    pub fn reset(&mut self) {
        self.active.clear();
        tracing::debug!("Filter reset");
    }

    /// Records of `source` matching the committed selection, in source order.
    pub fn current<T: Record>(&self, source: &[T]) -> Vec<T> {
        self.query(source, &self.active)
    }

    /// Records of `source` matching `selections`, in source order.
    pub fn query<T: Record>(&self, source: &[T], selections: &Selections) -> Vec<T> {
        let result: Vec<T> = source
            .iter()
            .filter(|record| self.matches(*record, selections))
            .cloned()
            .collect();
        tracing::debug!(
            kind = %T::KIND,
            source = source.len(),
            matched = result.len(),
            "Filter query"
        );
        result
    }

    pub fn matches<T: Record>(&self, record: &T, selections: &Selections) -> bool {
        selections.iter().all(|(key, selection)| {
            if selection.is_empty() {
                return true;
            }
            let fallback;
            let config = match self.config(key) {
                Some(config) => config,
                None => {
                    fallback = FilterConfig::text(key, key);
                    &fallback
                }
            };
            let wanted: HashSet<String> = selection
                .values()
                .into_iter()
                .map(|v| config.project_selected(v))
                .collect();

            match record.field_value(&config.field) {
                FieldValue::Missing => true,
                FieldValue::List(items) => items
                    .iter()
                    .any(|item| wanted.contains(&config.project_stored(item))),
                scalar => wanted.contains(&config.project_stored(&scalar.to_text())),
            }
        })
    }

    /// Distinct values of the field behind filter `key` across `source`, in
    /// first-seen order.
    ///
    /// List fields contribute each element. Reference fields list names.
    pub fn options<T: Record>(&self, source: &[T], key: &str) -> Vec<FilterOption> {
        let fallback = FilterConfig::multi_select(key, key);
        let config = self.config(key).unwrap_or(&fallback);

        let mut seen = HashSet::new();
        let mut options = Vec::new();
        let mut push = |raw: &str| {
            let value = config.project_stored(raw);
            if value.is_empty() || !seen.insert(value.clone()) {
                return;
            }
            let label = match config.option_label {
                Some(label) => label(&value),
                None => value.clone(),
            };
            options.push(FilterOption { value, label });
        };

        for record in source {
            match record.field_value(&config.field) {
                FieldValue::Missing => {}
                FieldValue::List(items) => {
                    for item in items {
                        push(item);
                    }
                }
                scalar => push(scalar.to_text().as_ref()),
            }
        }
        options
    }
}
