//! Column descriptors and per-kind cell display.

use crate::model::time::parse_timestamp;
use crate::model::{format_number, Directory, Enumerated, FieldValue, Record, Tone, LIST_SEPARATOR};

/// `5月28日 14:35`
pub const SHORT_DATE_TIME: &str = "%-m月%d日 %H:%M";

/// How a column turns a field value into display text.
#[derive(Debug, Clone)]
pub enum ColumnKind {
    /// Stringified value.
    Text,
    /// Stored code shown by label, colored by tone.
    Enumeration {
        entries: Vec<(&'static str, &'static str, Tone)>,
    },
    /// Timestamp reformatted with a chrono format string.
    DateTime { format: &'static str },
    /// List of ids shown by resolved name.
    MultiReference { directory: Directory },
    /// Number with decoration (`￥100`, `Lv2`).
    Numeric {
        prefix: &'static str,
        suffix: &'static str,
    },
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    /// Set for enumeration tags.
    pub tone: Option<Tone>,
}

impl Cell {
    fn plain(text: String) -> Self {
        Self { text, tone: None }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    pub field: String,
    pub kind: ColumnKind,
    /// Relative grid width.
    pub span: u16,
}

impl Column {
    fn new(title: &str, field: &str, kind: ColumnKind) -> Self {
        Self {
            title: title.to_string(),
            field: field.to_string(),
            kind,
            span: 2,
        }
    }

    pub fn text(title: &str, field: &str) -> Self {
        Self::new(title, field, ColumnKind::Text)
    }

    pub fn enumeration<E: Enumerated>(title: &str, field: &str) -> Self {
        Self::new(
            title,
            field,
            ColumnKind::Enumeration {
                entries: E::entries(),
            },
        )
    }

    pub fn date_time(title: &str, field: &str, format: &'static str) -> Self {
        Self::new(title, field, ColumnKind::DateTime { format })
    }

    pub fn references(title: &str, field: &str, directory: Directory) -> Self {
        Self::new(title, field, ColumnKind::MultiReference { directory })
    }

    pub fn numeric(title: &str, field: &str, prefix: &'static str, suffix: &'static str) -> Self {
        Self::new(title, field, ColumnKind::Numeric { prefix, suffix })
    }

    pub fn span(mut self, span: u16) -> Self {
        self.span = span;
        self
    }

    /// Display cell for `record`.
    pub fn cell<R: Record>(&self, record: &R) -> Cell {
        let value = record.field_value(&self.field);
        match &self.kind {
            ColumnKind::Text => Cell::plain(value.to_text().into_owned()),
            ColumnKind::Enumeration { entries } => {
                let code = value.to_text();
                match entries.iter().find(|(c, _, _)| *c == code) {
                    Some((_, label, tone)) => Cell {
                        text: label.to_string(),
                        tone: Some(*tone),
                    },
                    None => Cell {
                        text: code.into_owned(),
                        tone: Some(Tone::Gray),
                    },
                }
            }
            ColumnKind::DateTime { format } => {
                Cell::plain(format_date_time(&value.to_text(), format, &self.field))
            }
            ColumnKind::MultiReference { directory } => {
                let names: Vec<&str> = match &value {
                    FieldValue::List(ids) => ids.iter().map(|id| directory.resolve(id)).collect(),
                    FieldValue::Text(id) if !id.is_empty() => vec![directory.resolve(id)],
                    _ => Vec::new(),
                };
                Cell::plain(names.join(LIST_SEPARATOR))
            }
            ColumnKind::Numeric { prefix, suffix } => match value {
                FieldValue::Number(n) => Cell::plain(format!("{}{}{}", prefix, format_number(n), suffix)),
                FieldValue::Missing => Cell::default(),
                other => Cell::plain(other.to_text().into_owned()),
            },
        }
    }

    /// Point a reference column at a refreshed directory. Other kinds are untouched.
    pub fn set_directory(&mut self, replacement: Directory) {
        if let ColumnKind::MultiReference { directory } = &mut self.kind {
            *directory = replacement;
        }
    }
}

/// Reformat a stored timestamp; unparsable values display empty.
pub fn format_date_time(raw: &str, format: &str, field: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_timestamp(raw) {
        Some(ts) => ts.format(format).to_string(),
        None => {
            tracing::debug!(field, value = raw, "Unparsable timestamp, showing empty cell");
            String::new()
        }
    }
}
