//! Error types for record field access.

use thiserror::Error;

use super::RecordKind;

/// Errors raised when writing a field through [`Record::set_field`](super::Record::set_field).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The record kind has no field with this key.
    #[error("{kind} has no field '{field}'")]
    UnknownField { kind: RecordKind, field: String },

    /// The field exists but is derived or immutable.
    #[error("field '{field}' is read-only")]
    ReadOnly { field: String },

    /// The value does not fit the field (wrong shape or unknown enumeration label).
    #[error("invalid value for '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

impl ModelError {
    pub(crate) fn unknown(kind: RecordKind, field: &str) -> Self {
        Self::UnknownField {
            kind,
            field: field.to_string(),
        }
    }

    pub(crate) fn read_only(field: &str) -> Self {
        Self::ReadOnly {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, value: impl std::fmt::Debug) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: format!("{:?}", value),
        }
    }
}
