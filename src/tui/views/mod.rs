// Views module - screen-level rendering logic
//
// Each route maps to one view:
// - List: table (grid or cards) plus the docked filter form on wide terminals
// - Editor: create/edit form for one record
// - Not found: unknown paths and unknown record ids
//
// This module builds the shell layout, then dispatches on the route.

mod editor;
mod list;
mod modal;
mod not_found;

use super::app::App;
use crate::model::{Session, Student};
use crate::pages::{EditorStatus, Entity};
use crate::route::Route;
use crate::tui::app::ListFocus;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the logs panel when shown
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    app.width = f.area().width;
    // A resize can undock the filter form while it holds focus
    if !app.filter_docked() && app.list_focus == ListFocus::Filter {
        app.list_focus = ListFocus::Table;
    }

    // Apply theme background to entire frame (respects use_theme_background toggle)
    let bg_block = Block::default().style(app.theme.base());
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(5)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    components::render_title(f, chunks[0], app);

    let content = chunks[1];
    match app.route.clone() {
        Route::Sessions => list::render::<Session>(f, content, app),
        Route::Students => list::render::<Student>(f, content, app),
        Route::NotFound(path) => {
            not_found::render(f, content, app, &format!("页面不存在: {}", path))
        }
        Route::NewSession | Route::EditSession(_) => match app.editor_status {
            EditorStatus::Ready => editor::render::<Session>(f, content, app),
            EditorStatus::NotFound => not_found::render(f, content, app, Session::NOT_FOUND),
        },
        Route::NewStudent | Route::EditStudent(_) => match app.editor_status {
            EditorStatus::Ready => editor::render::<Student>(f, content, app),
            EditorStatus::NotFound => not_found::render(f, content, app, Student::NOT_FOUND),
        },
    }

    if app.show_logs {
        components::render_logs_panel(f, chunks[2], app);
    }
    components::render_status(f, chunks[chunks.len() - 1], app);

    // Overlays last so they sit on top
    if let Some(active) = app.modal {
        modal::render(f, active, app);
    }
    if let Some(toast) = &app.toast {
        let area = f.area();
        toast.render(f, area, &app.theme);
    }
    app.clear_expired_toast();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::tui::modal::Modal;
    use crate::tui::screen_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        screen_text(terminal.backend().buffer(), width)
    }

    fn app(start: &str) -> App {
        App::new(Config::default(), LogBuffer::new(), start)
    }

    #[test]
    fn session_list_renders_shell_and_rows() {
        let mut app = app("/sessions");
        let screen = render(&mut app, 120, 30);
        assert!(screen.contains("Courtside"));
        assert!(screen.contains("课程管理 · 3 条"));
        assert!(screen.contains("高级杀球技巧"));
        assert!(screen.contains("q:退出"));
        assert_eq!(app.width, 120);
    }

    #[test]
    fn wide_terminal_docks_the_filter_form() {
        let mut app = app("/students");
        let screen = render(&mut app, 180, 30);
        assert!(screen.contains("[ 查询 ]"));
        assert!(screen.contains("学员管理"));
    }

    #[test]
    fn narrow_terminal_renders_cards() {
        let mut app = app("/sessions");
        let screen = render(&mut app, 60, 40);
        assert!(screen.contains("[e] 编辑"));
        assert!(!screen.contains("[ 查询 ]"));
    }

    #[test]
    fn unknown_route_renders_not_found() {
        let mut app = app("/nowhere");
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("页面不存在: /nowhere"));
    }

    #[test]
    fn unknown_record_renders_kind_message() {
        let mut app = app("/students/edit/zz");
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("学员不存在"));
    }

    #[test]
    fn editor_route_renders_form() {
        let mut app = app("/sessions/new");
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("新建课程"));
        assert!(screen.contains("[ 保存 ]"));
    }

    #[test]
    fn help_modal_overlays_content() {
        let mut app = app("/sessions");
        app.modal = Some(Modal::Help);
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("快捷键"));
        assert!(screen.contains("新建记录"));
    }

    #[test]
    fn filter_drawer_overlays_the_list() {
        let mut app = app("/sessions");
        app.width = 120;
        app.open_filter();
        assert_eq!(app.modal, Some(Modal::Filter));
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("[ 查询 ]"));
        assert!(screen.contains("[ 重置 ]"));
    }

    #[test]
    fn resize_undocks_focused_filter() {
        let mut app = app("/sessions");
        app.list_focus = ListFocus::Filter;
        render(&mut app, 80, 30);
        assert_eq!(app.list_focus, ListFocus::Table);
    }
}
