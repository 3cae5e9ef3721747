//! Table panel component
//!
//! Draws a [`TableSnapshot`] either as a grid (header row plus one line per
//! record) or as stacked cards, and turns keys into [`TableAction`]s:
//!
//! - Tab switches focus between the header and the rows
//! - header focus: ←/→ move, Enter/Space sort by the focused column
//! - `1`-`9` sort by column n from either focus
//! - row focus: ↑/↓ (j/k) select, Enter or `e` opens the selected record
//!
//! The panel keeps the screen position of every header cell from the last
//! frame so mouse clicks can be mapped back to a column.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::report::{column_widths, fit, CARD_ACTIONS, EMPTY};
use crate::table::{Cell, TableSnapshot};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Handled, Interactive};

/// Which part of the table receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFocus {
    Header(usize),
    Rows,
}

/// What the App should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Ignored,
    Consumed,
    /// Activate the header of this column
    Sort(usize),
    /// Open the record shown in this row
    Open(usize),
}

impl From<TableAction> for Handled {
    fn from(action: TableAction) -> Self {
        Handled::from_bool(action != TableAction::Ignored)
    }
}

/// One frame's worth of table data.
pub struct TableView<'a> {
    pub title: &'a str,
    pub snapshot: &'a TableSnapshot,
    pub badges: &'a [Option<String>],
    /// Stacked cards instead of a grid
    pub cards: bool,
}

#[derive(Debug, Clone)]
pub struct TablePanel {
    focus: TableFocus,
    selected: usize,
    columns: usize,
    rows: usize,
    scroll: ScrollState,
    header_hits: Vec<Rect>,
}

impl TablePanel {
    pub fn new() -> Self {
        Self {
            focus: TableFocus::Rows,
            selected: 0,
            columns: 0,
            rows: 0,
            scroll: ScrollState::manual(),
            header_hits: Vec::new(),
        }
    }

    /// Sync with the current snapshot's shape (call before handling keys).
    pub fn sync(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.selected = self.selected.min(rows.saturating_sub(1));
        if let TableFocus::Header(i) = self.focus {
            if i >= columns {
                self.focus = TableFocus::Header(columns.saturating_sub(1));
            }
        }
    }

    /// Selected row, if there are any rows.
    pub fn selected(&self) -> Option<usize> {
        (self.rows > 0).then_some(self.selected)
    }

    #[cfg(test)]
    pub fn focus(&self) -> TableFocus {
        self.focus
    }

    /// Column whose header was drawn at this screen cell in the last frame.
    pub fn header_at(&self, x: u16, y: u16) -> Option<usize> {
        self.header_hits
            .iter()
            .position(|hit| hit.contains(Position::new(x, y)))
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.rows.saturating_sub(1));
    }

    /// Move the row selection (mouse wheel uses this too).
    pub fn step(&mut self, down: bool) {
        if down {
            self.select(self.selected + 1);
        } else {
            self.select(self.selected.saturating_sub(1));
        }
    }

    fn sort_key(&self, key: KeyCode) -> Option<usize> {
        let KeyCode::Char(c @ '1'..='9') = key else {
            return None;
        };
        let index = c.to_digit(10)? as usize - 1;
        (index < self.columns).then_some(index)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, view: &TableView, theme: &Theme, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(focused)))
            .title(format!(" {} · {} 条 ", view.title, view.snapshot.rows.len()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.sync(view.snapshot.headers.len(), view.snapshot.rows.len());
        self.header_hits.clear();
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let header_area = Rect::new(inner.x, inner.y, inner.width, 1);
        let body = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height.saturating_sub(1),
        );

        if view.cards {
            self.render_header_chips(f, header_area, view.snapshot, theme, focused);
            self.render_cards(f, body, view, theme, focused);
        } else {
            self.render_header_row(f, header_area, view.snapshot, theme, focused);
            self.render_grid_rows(f, body, view.snapshot, theme, focused);
        }

        if view.snapshot.rows.is_empty() && body.height > 0 {
            let empty = Paragraph::new(EMPTY)
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.muted));
            f.render_widget(empty, Rect::new(body.x, body.y, body.width, 1));
        }
    }

    fn header_style(&self, index: usize, theme: &Theme, focused: bool) -> Style {
        if focused && self.focus == TableFocus::Header(index) {
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD)
        }
    }

    fn render_header_row(
        &mut self,
        f: &mut Frame,
        area: Rect,
        snapshot: &TableSnapshot,
        theme: &Theme,
        focused: bool,
    ) {
        let widths = column_widths(&snapshot.spans, usize::from(area.width));
        let mut spans = Vec::new();
        let mut x = area.x;
        for (index, (header, width)) in snapshot.headers.iter().zip(&widths).enumerate() {
            if index > 0 {
                spans.push(Span::raw(" "));
                x = x.saturating_add(1);
            }
            let width = *width as u16;
            self.header_hits.push(Rect::new(x, area.y, width, 1));
            x = x.saturating_add(width);
            spans.push(Span::styled(
                fit(&header.label(), usize::from(width)),
                self.header_style(index, theme, focused),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Card mode has no grid header; a line of numbered chips stands in for it.
    fn render_header_chips(
        &mut self,
        f: &mut Frame,
        area: Rect,
        snapshot: &TableSnapshot,
        theme: &Theme,
        focused: bool,
    ) {
        let mut spans = Vec::new();
        let mut x = area.x;
        for (index, header) in snapshot.headers.iter().enumerate() {
            let chip = format!("{}:{}", index + 1, header.label());
            let width = UnicodeWidthStr::width(chip.as_str()) as u16;
            if x.saturating_add(width) > area.right() {
                break;
            }
            self.header_hits.push(Rect::new(x, area.y, width, 1));
            spans.push(Span::styled(chip, self.header_style(index, theme, focused)));
            spans.push(Span::raw("  "));
            x = x.saturating_add(width + 2);
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn cell_span(cell: &Cell, text: String, theme: &Theme) -> Span<'static> {
        match cell.tone {
            Some(tone) => Span::styled(text, theme.tag_style(tone)),
            None => Span::raw(text),
        }
    }

    fn render_grid_rows(
        &mut self,
        f: &mut Frame,
        area: Rect,
        snapshot: &TableSnapshot,
        theme: &Theme,
        focused: bool,
    ) {
        let widths = column_widths(&snapshot.spans, usize::from(area.width));
        self.scroll
            .update_dimensions(snapshot.rows.len(), usize::from(area.height));
        self.scroll.ensure_visible(self.selected);
        let (start, end) = self.scroll.visible_range();

        let lines: Vec<Line> = snapshot.rows[start..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| {
                let mut spans = Vec::new();
                for (index, (cell, width)) in row.cells.iter().zip(&widths).enumerate() {
                    if index > 0 {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(Self::cell_span(cell, fit(&cell.text, *width), theme));
                }
                let line = Line::from(spans);
                if focused && self.focus == TableFocus::Rows && start + offset == self.selected {
                    line.style(Style::default().bg(theme.selection).fg(theme.selection_fg))
                } else {
                    line
                }
            })
            .collect();

        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_cards(
        &mut self,
        f: &mut Frame,
        area: Rect,
        view: &TableView,
        theme: &Theme,
        focused: bool,
    ) {
        let snapshot = view.snapshot;
        let mut lines: Vec<Line> = Vec::new();
        let mut selected_span = (0, 0);

        for (index, row) in snapshot.rows.iter().enumerate() {
            let is_selected = focused && self.focus == TableFocus::Rows && index == self.selected;
            let frame_style = if is_selected {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.border)
            };
            let first = lines.len();

            let mut heading = vec![
                Span::styled("┌ ", frame_style),
                Span::styled(
                    format!("#{}", index + 1),
                    Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(Some(badge)) = view.badges.get(index) {
                heading.push(Span::raw("  "));
                heading.push(Span::styled(badge.clone(), Style::default().fg(theme.muted)));
            }
            lines.push(Line::from(heading));

            for (header, cell) in snapshot.headers.iter().zip(&row.cells) {
                lines.push(Line::from(vec![
                    Span::styled("│ ", frame_style),
                    Span::styled(format!("{}: ", header.title), Style::default().fg(theme.muted)),
                    Self::cell_span(cell, cell.text.clone(), theme),
                ]));
            }

            lines.push(Line::from(vec![
                Span::styled("└ ", frame_style),
                Span::styled(CARD_ACTIONS, Style::default().fg(theme.muted)),
            ]));
            if index == self.selected {
                selected_span = (first, lines.len() - 1);
            }
            lines.push(Line::raw(""));
        }

        self.scroll.update_dimensions(lines.len(), usize::from(area.height));
        self.scroll.ensure_visible(selected_span.1);
        self.scroll.ensure_visible(selected_span.0);
        let offset = u16::try_from(self.scroll.offset()).unwrap_or(u16::MAX);

        f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
    }
}

impl Default for TablePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Interactive for TablePanel {
    type Action = TableAction;

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        if let Some(index) = self.sort_key(key.code) {
            return TableAction::Sort(index);
        }
        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                TableFocus::Rows if self.columns > 0 => TableFocus::Header(0),
                _ => TableFocus::Rows,
            };
            return TableAction::Consumed;
        }

        match self.focus {
            TableFocus::Header(index) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.focus = TableFocus::Header(index.saturating_sub(1));
                    TableAction::Consumed
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    let last = self.columns.saturating_sub(1);
                    self.focus = TableFocus::Header((index + 1).min(last));
                    TableAction::Consumed
                }
                KeyCode::Enter | KeyCode::Char(' ') => TableAction::Sort(index),
                KeyCode::Down | KeyCode::Char('j') => {
                    self.focus = TableFocus::Rows;
                    TableAction::Consumed
                }
                _ => TableAction::Ignored,
            },
            TableFocus::Rows => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.step(false);
                    TableAction::Consumed
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.step(true);
                    TableAction::Consumed
                }
                KeyCode::Home => {
                    self.select(0);
                    TableAction::Consumed
                }
                KeyCode::End => {
                    self.select(self.rows.saturating_sub(1));
                    TableAction::Consumed
                }
                KeyCode::Enter | KeyCode::Char('e') => match self.selected() {
                    Some(row) => TableAction::Open(row),
                    None => TableAction::Consumed,
                },
                _ => TableAction::Ignored,
            },
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            TableFocus::Header(_) => Some("←→:列  Enter:排序  1-9:按列排序  Tab:行"),
            TableFocus::Rows => Some("↑↓:选择  Enter/e:编辑  1-9:排序  Tab:表头"),
        }
    }
}
