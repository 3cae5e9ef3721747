//! Table model: columns, sort state, and display snapshots.
//!
//! Nothing here draws. [`Table::snapshot`] turns records into header and row
//! cells that the TUI panel and the plain-text report both render.

mod column;
mod sort;

pub use column::{Cell, Column, SHORT_DATE_TIME};
pub use sort::{compare_values, SortOrder, SortState};

use crate::model::{Directory, Record};

/// Grid columns always add up to this many units.
pub const GRID_SPAN: u16 = 12;

/// Normalize relative spans so they sum to [`GRID_SPAN`].
///
/// Largest-remainder apportionment; ties go to the leftmost column. All-zero
/// input is treated as equal spans.
pub fn grid_spans(spans: &[u16]) -> Vec<u16> {
    if spans.is_empty() {
        return Vec::new();
    }
    let total: u32 = spans.iter().map(|&s| u32::from(s)).sum();
    let weights: Vec<u32> = if total == 0 {
        vec![1; spans.len()]
    } else {
        spans.iter().map(|&s| u32::from(s)).collect()
    };
    let total: u32 = weights.iter().sum();
    let grid = u32::from(GRID_SPAN);

    let mut out: Vec<u16> = weights.iter().map(|w| (w * grid / total) as u16).collect();
    let assigned: u32 = out.iter().map(|&s| u32::from(s)).sum();

    let mut remainders: Vec<(usize, u32)> = weights
        .iter()
        .enumerate()
        .map(|(i, w)| (i, w * grid % total))
        .collect();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for (i, _) in remainders.into_iter().take((grid - assigned) as usize) {
        out[i] += 1;
    }
    out
}

/// Header cell as shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub title: String,
    pub field: String,
    /// Sort direction glyph, only on the active sort column.
    pub glyph: Option<&'static str>,
}

impl HeaderCell {
    pub fn label(&self) -> String {
        match self.glyph {
            Some(glyph) => format!("{} {}", self.title, glyph),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<Cell>,
}

/// Everything needed to draw one table frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<TableRow>,
    /// Normalized grid spans, one per column.
    pub spans: Vec<u16>,
}

/// Columns plus the table's own sort state.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    sort: SortState,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            sort: SortState::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Refresh every reference column's directory.
    pub fn set_directory(&mut self, directory: &Directory) {
        for column in &mut self.columns {
            column.set_directory(directory.clone());
        }
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Activate the header at `index`. Returns the column's field, or `None` when out of range.
    pub fn activate_header(&mut self, index: usize) -> Option<&str> {
        let field = self.columns.get(index)?.field.clone();
        self.sort.activate(&field);
        Some(&self.columns[index].field)
    }

    /// Activate the header whose column shows `field`.
    pub fn activate_field(&mut self, field: &str) -> bool {
        match self.columns.iter().position(|c| c.field == field) {
            Some(index) => self.activate_header(index).is_some(),
            None => {
                tracing::debug!(field, "No column for sort field");
                false
            }
        }
    }

    /// Sorted copy of `records` per the current sort state.
    pub fn arrange<T: Record>(&self, records: &[T]) -> Vec<T> {
        self.sort.sorted(records)
    }

    /// Sort `records` and render every cell.
    pub fn snapshot<T: Record>(&self, records: &[T]) -> TableSnapshot {
        let headers = self
            .columns
            .iter()
            .map(|c| HeaderCell {
                title: c.title.clone(),
                field: c.field.clone(),
                glyph: self.sort.glyph_for(&c.field),
            })
            .collect();
        let rows = self
            .arrange(records)
            .iter()
            .map(|record| TableRow {
                id: record.id().to_string(),
                cells: self.columns.iter().map(|c| c.cell(record)).collect(),
            })
            .collect();
        let spans = grid_spans(&self.columns.iter().map(|c| c.span).collect::<Vec<_>>());
        TableSnapshot {
            headers,
            rows,
            spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn table() -> Table {
        Table::new(vec![
            Column::date_time("时间", "dateTime", SHORT_DATE_TIME).span(3),
            Column::text("教练", "coach"),
            Column::numeric("单人学费", "feePerStudent", "￥", ""),
        ])
    }

    #[test]
    fn spans_always_sum_to_grid() {
        for spans in [vec![3, 2, 2, 3, 2], vec![1, 1, 1, 1, 1, 1, 1], vec![0, 0], vec![5]] {
            let out = grid_spans(&spans);
            assert_eq!(out.iter().sum::<u16>(), GRID_SPAN, "{:?}", spans);
            assert_eq!(out.len(), spans.len());
        }
        assert_eq!(grid_spans(&[6, 6]), vec![6, 6]);
        assert_eq!(grid_spans(&[1, 1]), vec![6, 6]);
        assert!(grid_spans(&[]).is_empty());
    }

    #[test]
    fn snapshot_renders_cells_in_column_order() {
        let snapshot = table().snapshot(&mock::sessions());
        assert_eq!(snapshot.headers.len(), 3);
        assert_eq!(snapshot.rows.len(), 3);
        let first = &snapshot.rows[0];
        assert_eq!(first.id, "1");
        let texts: Vec<_> = first.cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["5月28日 14:35", "李教练", "￥100"]);
    }

    #[test]
    fn header_glyph_follows_activation() {
        let mut table = table();
        assert_eq!(table.activate_header(2), Some("feePerStudent"));
        let snapshot = table.snapshot(&mock::sessions());
        assert_eq!(snapshot.headers[2].label(), "单人学费 ▲");
        assert_eq!(snapshot.headers[1].label(), "教练");
        let order: Vec<_> = snapshot.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, ["3", "1", "2"]);
    }

    #[test]
    fn out_of_range_header_is_ignored() {
        let mut table = table();
        assert_eq!(table.activate_header(7), None);
        assert_eq!(table.sort().field(), None);
        assert!(!table.activate_field("nope"));
    }
}
