//! Record types and the field-access trait shared by filters, tables and editors.
//!
//! Every record exposes its fields by string key (`dateTime`, `feePerStudent`,
//! ...) so column descriptors, filter configs and editor fields can be declared
//! as data rather than as per-type code.

mod directory;
mod error;
mod ids;
mod session;
mod student;
pub mod time;
mod value;

pub use directory::Directory;
pub use error::ModelError;
pub use ids::generate_id;
pub use session::{ClientType, Session, SessionType};
pub use student::{Gender, Receipt, Student};
pub use value::{coerce_number, format_number, EditValue, FieldValue, LIST_SEPARATOR};

use serde::Serialize;
use std::fmt;

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Session,
    Student,
}

impl RecordKind {
    /// Prefix used for generated ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            RecordKind::Session => "session",
            RecordKind::Student => "student",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Session => write!(f, "session"),
            RecordKind::Student => write!(f, "student"),
        }
    }
}

/// A record that can be listed, filtered, sorted and edited.
pub trait Record: Clone + Serialize + fmt::Debug {
    const KIND: RecordKind;

    /// Zero-value template used to seed the editor for a new record.
    fn blank() -> Self;

    /// Empty until the store assigns one on first save.
    fn id(&self) -> &str;

    /// Only [`RecordStore`](crate::store::RecordStore) calls this.
    fn assign_id(&mut self, id: String);

    /// Read a field by key. Unknown keys yield [`FieldValue::Missing`].
    fn field_value(&self, field: &str) -> FieldValue<'_>;

    /// Write a field by key.
    fn set_field(&mut self, field: &str, value: EditValue) -> Result<(), ModelError>;
}

/// Display color family for enumeration tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Gray,
    Blue,
    Green,
    Yellow,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl Tone {
    pub const ALL: [Tone; 8] = [
        Tone::Gray,
        Tone::Blue,
        Tone::Green,
        Tone::Yellow,
        Tone::Pink,
        Tone::Purple,
        Tone::Cyan,
        Tone::Orange,
    ];
}

/// A closed set of values stored by code and shown by label.
pub trait Enumerated: Copy + Sized + 'static {
    const ALL: &'static [Self];

    /// Stored form (what `field_value` returns).
    fn code(self) -> &'static str;

    /// Display form.
    fn label(self) -> &'static str;

    fn tone(self) -> Tone {
        Tone::Gray
    }

    /// Accepts either the code or the label.
    fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.code() == input || v.label() == input)
    }

    /// `(code, label, tone)` for every variant, in declaration order.
    fn entries() -> Vec<(&'static str, &'static str, Tone)> {
        Self::ALL
            .iter()
            .map(|v| (v.code(), v.label(), v.tone()))
            .collect()
    }
}

/// Look up the label for a stored code; unknown codes display as-is.
pub fn label_for<E: Enumerated>(code: &str) -> String {
    E::parse(code)
        .map(|v| v.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerations_parse_code_or_label() {
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("女"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
        assert_eq!(label_for::<Gender>("male"), "男");
        assert_eq!(label_for::<Gender>("unknown"), "unknown");
    }

    #[test]
    fn id_prefixes_differ_per_kind() {
        assert_ne!(
            RecordKind::Session.id_prefix(),
            RecordKind::Student.id_prefix()
        );
    }
}
