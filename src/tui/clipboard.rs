//! Clipboard helper for copying records as JSON
//!
//! Uses `arboard` for cross-platform support. The clipboard is created fresh
//! each time to avoid holding resources.

use anyhow::{Context, Result};
use arboard::Clipboard;
use serde::Serialize;

/// Pretty JSON of one record, as it is copied.
pub fn record_json<T: Serialize>(record: &T) -> Result<String> {
    serde_json::to_string_pretty(record).context("Failed to serialize record")
}

/// Copy text to the system clipboard
///
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn student_json_uses_wire_names() {
        let student = &mock::students()[0];
        let json = record_json(student).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], student.id.as_str());
        assert!(json.contains('\n'));
    }
}
