// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Layered key dispatch from modals down to the focused component

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::route::Route;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use traits::Handled;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. `start_route` is the path of the first view.
pub async fn run_tui(config: Config, log_buffer: LogBuffer, start_route: String) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let tick = Duration::from_millis(config.layout.tick_ms);
    let mut app = App::new(config, log_buffer, &start_route);
    tracing::info!(route = %app.route, "TUI started");

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, tick).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Input and the periodic tick race in `tokio::select!`; whichever completes
/// first is handled, then the frame is redrawn.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        // Draw the UI
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick: toasts expire even without input
            _ = tick_interval.tick() => {
                app.clear_expired_toast();
            }
        }

        if app.should_quit {
            tracing::info!("TUI exiting");
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → View-specific → Component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C quits from anywhere, text entry included
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        app.should_quit = true;
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, key_event) {
        return;
    }

    // Layer 2: Global keys, unless a text field is taking input
    if !app.captures_text() && handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: Views without a focusable component
    if app.route.kind().is_none() || (!app.route.is_list() && !app.is_editing()) {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            let list = app.route.list();
            app.navigate(list);
        }
        return;
    }

    // Layer 4: Focused component
    if app.dispatch_to_view(key_event) == Handled::No {
        tracing::trace!(key = ?key_event.code, "Unhandled key");
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse_event.column, mouse_event.row),
        MouseEventKind::ScrollUp if app.modal.is_none() => app.scroll(false),
        MouseEventKind::ScrollDown if app.modal.is_none() => app.scroll(true),
        _ => {}
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: KeyEvent) -> bool {
    let Some(modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Forward => app.filter_drawer_key(key_event),
    }

    true // Modal absorbed the input
}

/// Handle global keys - returns true if handled
/// Global keys work the same regardless of current view
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,
        // Help modal
        KeyCode::Char('?') => app.modal = Some(Modal::Help),
        // Page switching
        KeyCode::Char('s') => switch_page(app, Route::Sessions),
        KeyCode::Char('t') => switch_page(app, Route::Students),
        KeyCode::Char('n') => app.new_record(),
        KeyCode::Char('f') => app.open_filter(),
        // Record actions on the selected row
        KeyCode::Char('y') => app.copy_selected(),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('L') => app.toggle_logs(),
        _ => return false,
    }
    true
}

fn switch_page(app: &mut App, route: Route) {
    if app.route != route {
        app.navigate(route);
    }
}

/// Screen contents as text, one line per row. Cells hidden behind a wide
/// character are skipped so CJK text reads back unbroken.
#[cfg(test)]
pub(crate) fn screen_text(buffer: &ratatui::buffer::Buffer, width: u16) -> String {
    use unicode_width::UnicodeWidthStr;

    let mut out = String::new();
    for (row, line) in buffer.content().chunks(usize::from(width)).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        let mut skip = 0;
        for cell in line {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            let symbol = cell.symbol();
            out.push_str(symbol);
            skip = UnicodeWidthStr::width(symbol).saturating_sub(1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::ListFocus;

    fn app(start: &str) -> App {
        App::new(Config::default(), LogBuffer::new(), start)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn q_quits_from_a_list() {
        let mut app = app("/sessions");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn editor_keeps_printable_keys() {
        let mut app = app("/students/new");
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('s'));
        assert!(!app.should_quit);
        assert_eq!(app.route, Route::NewStudent);
    }

    #[test]
    fn ctrl_c_quits_while_editing() {
        let mut app = app("/sessions/edit/1");
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app("/sessions");
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut app, key);
        assert!(!app.should_quit);
    }

    #[test]
    fn help_modal_swallows_keys_until_closed() {
        let mut app = app("/sessions");
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modal, Some(Modal::Help));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.route, Route::Sessions);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.modal, None);
    }

    #[test]
    fn letters_switch_pages() {
        let mut app = app("/sessions");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.route, Route::Students);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.route, Route::NewStudent);
    }

    #[test]
    fn not_found_returns_to_list() {
        let mut unknown = app("/nowhere");
        press(&mut unknown, KeyCode::Enter);
        assert_eq!(unknown.route, Route::Sessions);

        let mut missing = app("/students/edit/missing");
        press(&mut missing, KeyCode::Esc);
        assert_eq!(missing.route, Route::Students);
    }

    #[test]
    fn filter_drawer_takes_typing_and_esc_closes() {
        let mut app = app("/sessions");
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.modal, Some(Modal::Filter));
        // 'q' goes to the form, not the quit shortcut
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.modal, None);
        assert_eq!(app.list_focus, ListFocus::Table);
    }

    #[test]
    fn enter_on_a_row_opens_the_editor() {
        let mut app = app("/students");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.route, Route::EditStudent(_)));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Students);
    }

    #[test]
    fn wheel_moves_the_selection() {
        let mut app = app("/sessions");
        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 10,
                row: 10,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.sessions_ui.table.selected(), Some(1));
    }

    #[test]
    fn screen_text_skips_wide_char_padding() {
        let mut buffer = ratatui::buffer::Buffer::empty(ratatui::layout::Rect::new(0, 0, 6, 1));
        buffer.set_string(0, 0, "课程ab", ratatui::style::Style::default());
        assert_eq!(screen_text(&buffer, 6), "课程ab");
    }
}
