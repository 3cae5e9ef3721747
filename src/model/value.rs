//! Runtime field values.
//!
//! [`FieldValue`] is what a record exposes for filtering, sorting and table
//! cells (borrowed from the record). [`EditValue`] is the owned value an editor
//! control writes back.

use std::borrow::Cow;

use super::{Enumerated, ModelError};

/// Separator used when a list value is shown as one string.
pub const LIST_SEPARATOR: &str = "、";

/// Borrowed view of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Free text, enumeration codes, timestamps.
    Text(&'a str),
    /// Counts, fees, balances, levels.
    Number(f64),
    /// Ordered tags or references (equipment, participant ids).
    List(Vec<&'a str>),
    /// The record has no field with the requested key.
    Missing,
}

impl<'a> FieldValue<'a> {
    #[cfg(test)]
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Stringified form: numbers without a trailing `.0`, lists joined.
    pub fn to_text(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Number(n) => Cow::Owned(format_number(*n)),
            FieldValue::List(items) => Cow::Owned(items.join(LIST_SEPARATOR)),
            FieldValue::Missing => Cow::Borrowed(""),
        }
    }
}

/// Owned value written into a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum EditValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl EditValue {
    /// Numbers pass through; text is parsed and anything unparsable becomes 0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            EditValue::Number(n) => Some(*n),
            EditValue::Text(s) => Some(coerce_number(s)),
            EditValue::List(_) => None,
        }
    }
}

/// Format a number the way the tables show it: `80`, `99.5`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Parse user input as a number. Blank, non-numeric and non-finite input all yield 0.
pub fn coerce_number(input: &str) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

// Field-write conversions shared by the record types.

pub(super) fn text_value(field: &str, value: EditValue) -> Result<String, ModelError> {
    match value {
        EditValue::Text(s) => Ok(s),
        other => Err(ModelError::invalid(field, other)),
    }
}

pub(super) fn list_value(field: &str, value: EditValue) -> Result<Vec<String>, ModelError> {
    match value {
        EditValue::List(items) => Ok(items),
        other => Err(ModelError::invalid(field, other)),
    }
}

pub(super) fn enum_value<E: Enumerated>(field: &str, value: EditValue) -> Result<E, ModelError> {
    let text = text_value(field, value)?;
    E::parse(&text).ok_or_else(|| ModelError::invalid(field, text))
}

pub(super) fn number_value(field: &str, value: EditValue) -> Result<f64, ModelError> {
    value
        .as_number()
        .ok_or_else(|| ModelError::invalid(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_without_trailing_zero() {
        assert_eq!(format_number(80.0), "80");
        assert_eq!(format_number(99.5), "99.5");
        assert_eq!(FieldValue::Number(2.0).to_text(), "2");
    }

    #[test]
    fn lists_join_with_separator() {
        let value = FieldValue::List(vec!["球拍", "羽毛球"]);
        assert_eq!(value.to_text(), "球拍、羽毛球");
    }

    #[test]
    fn coercion_never_rejects() {
        assert_eq!(coerce_number("42"), 42.0);
        assert_eq!(coerce_number(" 3.5 "), 3.5);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
    }

    #[test]
    fn text_edit_value_coerces_to_number() {
        assert_eq!(EditValue::Text("12".into()).as_number(), Some(12.0));
        assert_eq!(EditValue::Text("x".into()).as_number(), Some(0.0));
        assert_eq!(EditValue::List(vec![]).as_number(), None);
    }
}
