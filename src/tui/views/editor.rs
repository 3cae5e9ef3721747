// Editor view - create/edit form for the current route's record

use crate::pages::Paged;
use crate::tui::app::App;
use crate::tui::components::editor_panel;
use ratatui::{layout::Rect, Frame};

pub fn render<T: Paged>(f: &mut Frame, area: Rect, app: &App) {
    let editor = T::page(&app.pages).editor();
    editor_panel::render(f, area, editor, &app.heading(), &app.theme);
}
