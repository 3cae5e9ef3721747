// List view - one page's table, with the filter form docked on wide terminals

use crate::model::RecordKind;
use crate::pages::Paged;
use crate::tui::app::{App, ListFocus, ListUi};
use crate::tui::components::TableView;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Width of the docked filter form
const FILTER_WIDTH: u16 = 34;

pub fn render<T: Paged>(f: &mut Frame, area: Rect, app: &mut App) {
    let page = T::page(&app.pages);
    let snapshot = page.snapshot();
    let badges = page.badges();
    let docked = app.filter_docked();
    let cards = !app.breakpoint().shows_grid();
    let table_focused = app.modal.is_none() && app.list_focus == ListFocus::Table;
    let filter_focused = app.list_focus == ListFocus::Filter;

    let (table_area, filter_area) = if docked {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(FILTER_WIDTH)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let (ui, theme) = split_borrow(app, T::KIND);
    let view = TableView {
        title: T::TITLE,
        snapshot: &snapshot,
        badges: &badges,
        cards,
    };
    ui.table.render(f, table_area, &view, theme, table_focused);
    if let Some(filter_area) = filter_area {
        ui.filter.render(f, filter_area, theme, filter_focused);
    }
}

/// The page's UI state alongside the theme, borrowed together.
fn split_borrow(app: &mut App, kind: RecordKind) -> (&mut ListUi, &Theme) {
    let ui = match kind {
        RecordKind::Session => &mut app.sessions_ui,
        RecordKind::Student => &mut app.students_ui,
    };
    (ui, &app.theme)
}
