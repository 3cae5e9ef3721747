//! Plain-text rendering of a table snapshot for the headless `list` command.
//!
//! Same layout rule as the TUI: a grid at or above the compact threshold,
//! stacked cards below it.

use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::table::{TableSnapshot, GRID_SPAN};
use crate::tui::layout::Breakpoint;

/// Shown when no row survives the filter.
pub const EMPTY: &str = "暂无数据";

/// Card footer; delete is not wired to anything.
pub const CARD_ACTIONS: &str = "[e] 编辑  [d] 删除";

/// Render grid or cards depending on `width`.
pub fn render(
    snapshot: &TableSnapshot,
    badges: &[Option<String>],
    width: u16,
    compact_below: u16,
) -> String {
    if Breakpoint::from_width(width, compact_below).shows_grid() {
        render_grid(snapshot, usize::from(width))
    } else {
        render_cards(snapshot, badges)
    }
}

/// Pretty JSON array of the listed records.
pub fn render_json<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Character widths for each column, proportional to its grid span.
///
/// One space separates columns; the last column absorbs rounding.
pub fn column_widths(spans: &[u16], width: usize) -> Vec<usize> {
    if spans.is_empty() {
        return Vec::new();
    }
    let usable = width.saturating_sub(spans.len() - 1);
    let grid = usize::from(GRID_SPAN);
    let mut widths: Vec<usize> = spans
        .iter()
        .map(|&span| usize::from(span) * usable / grid)
        .collect();
    let assigned: usize = widths.iter().sum();
    if let Some(last) = widths.last_mut() {
        *last += usable.saturating_sub(assigned);
    }
    widths
}

/// Truncate to `width` display columns (with `…`) and pad with spaces.
pub fn fit(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn grid_line(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let line: Vec<String> = cells.zip(widths).map(|(text, w)| fit(&text, *w)).collect();
    line.join(" ").trim_end().to_string()
}

pub fn render_grid(snapshot: &TableSnapshot, width: usize) -> String {
    let widths = column_widths(&snapshot.spans, width);
    let mut out = String::new();

    out.push_str(&grid_line(snapshot.headers.iter().map(|h| h.label()), &widths));
    out.push('\n');
    out.push_str(&"─".repeat(width));
    out.push('\n');

    if snapshot.rows.is_empty() {
        out.push_str(EMPTY);
        out.push('\n');
    }
    for row in &snapshot.rows {
        out.push_str(&grid_line(row.cells.iter().map(|c| c.text.clone()), &widths));
        out.push('\n');
    }
    out
}

/// One card per row: heading, `label: value` for every column, actions.
pub fn render_cards(snapshot: &TableSnapshot, badges: &[Option<String>]) -> String {
    if snapshot.rows.is_empty() {
        return format!("{}\n", EMPTY);
    }

    let mut out = String::new();
    for (index, row) in snapshot.rows.iter().enumerate() {
        out.push_str(&format!("┌ #{}", index + 1));
        if let Some(Some(badge)) = badges.get(index) {
            out.push_str("  ");
            out.push_str(badge);
        }
        out.push('\n');
        for (header, cell) in snapshot.headers.iter().zip(&row.cells) {
            out.push_str(&format!("│ {}: {}\n", header.label(), cell.text));
        }
        out.push_str(&format!("└ {}\n", CARD_ACTIONS));
        if index + 1 < snapshot.rows.len() {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Pages;

    #[test]
    fn widths_fill_the_line() {
        let widths = column_widths(&[3, 3, 2, 2, 2], 100);
        let total: usize = widths.iter().sum();
        assert_eq!(total + widths.len() - 1, 100);
        assert_eq!(widths[0], 24);
    }

    #[test]
    fn fit_counts_wide_characters() {
        assert_eq!(fit("李教练", 8), "李教练  ");
        assert_eq!(fit("羽毛球基础入门", 7), "羽毛球…");
        assert_eq!(UnicodeWidthStr::width(fit("羽毛球基础入门", 8).as_str()), 8);
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn wide_terminal_renders_grid() {
        let pages = Pages::seeded();
        let snapshot = pages.sessions.snapshot();
        let text = render(&snapshot, &pages.sessions.badges(), 160, 100);

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("时间"));
        assert!(lines[0].contains("单人学费"));
        assert_eq!(lines.len(), 2 + 3);
        // Newest first.
        assert!(lines[2].starts_with("5月30日 18:00"));
        for line in &lines {
            assert!(UnicodeWidthStr::width(*line) <= 160, "{}", line);
        }
    }

    #[test]
    fn narrow_terminal_renders_cards() {
        let pages = Pages::seeded();
        let snapshot = pages.sessions.snapshot();
        let text = render(&snapshot, &pages.sessions.badges(), 60, 100);

        assert!(text.starts_with("┌ #1  学员 (3)\n"));
        assert!(text.contains("│ 学员: 王五、赵六、钱七\n"));
        assert!(text.contains("│ 单人学费: ￥80\n"));
        assert_eq!(text.matches(CARD_ACTIONS).count(), 3);
    }

    #[test]
    fn student_cards_have_no_badge() {
        let pages = Pages::seeded();
        let text = render_cards(&pages.students.snapshot(), &pages.students.badges());
        assert!(text.starts_with("┌ #1\n"));
        assert!(text.contains("│ 等级: Lv2\n"));
    }

    #[test]
    fn empty_result_says_so() {
        let mut pages = Pages::seeded();
        let mut selections = crate::filter::Selections::new();
        selections.insert(
            "coach".into(),
            crate::filter::Selection::Many(vec!["不存在".into()]),
        );
        pages.sessions.filter_mut().apply(selections);
        let snapshot = pages.sessions.snapshot();
        assert!(render_grid(&snapshot, 120).ends_with(&format!("{}\n", EMPTY)));
        assert_eq!(render_cards(&snapshot, &[]), format!("{}\n", EMPTY));
    }

    #[test]
    fn json_lists_records_in_camel_case() {
        let pages = Pages::seeded();
        let json = render_json(&pages.sessions.rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "3");
        assert_eq!(value[0]["totalStudents"], 3);
        assert_eq!(value[0]["feePerStudent"], 80.0);
    }
}
