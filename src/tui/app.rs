// App state - the core data structure for the TUI
//
// Holds both pages, the current route and its history, per-page UI state and
// the shell (modal, toast, logs). Components return actions; App is the only
// place those actions touch a page.

use crossterm::event::KeyEvent;

use super::clipboard;
use super::components::{FilterAction, FilterPanel, LogsPanel, TableAction, TablePanel, Toast};
use super::layout::Breakpoint;
use super::modal::Modal;
use super::traits::{Handled, Interactive};
use crate::config::Config;
use crate::editor::{CancelBehavior, EditorAction};
use crate::logging::LogBuffer;
use crate::model::{RecordKind, Session, Student};
use crate::pages::{EditorStatus, Entity, Paged, Pages};
use crate::route::Route;
use crate::theme::{Theme, ThemeConfig};

/// Routes kept for Back; older ones are dropped
const HISTORY_LIMIT: usize = 50;

/// Per-page UI state: table focus/selection and the pending filter form
#[derive(Debug, Clone)]
pub struct ListUi {
    pub table: TablePanel,
    pub filter: FilterPanel,
}

impl ListUi {
    fn for_kind<T: Paged>(pages: &Pages) -> Self {
        Self {
            table: TablePanel::new(),
            filter: FilterPanel::for_page(T::page(pages)),
        }
    }
}

/// Which list component has keyboard focus (the filter form is docked on
/// wide terminals and a drawer otherwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFocus {
    Table,
    Filter,
}

pub struct App {
    pub pages: Pages,
    pub route: Route,
    history: Vec<Route>,
    /// Whether the current create/edit route resolved to a record
    pub editor_status: EditorStatus,
    pub sessions_ui: ListUi,
    pub students_ui: ListUi,
    pub list_focus: ListFocus,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub theme: Theme,
    pub config: Config,
    pub log_buffer: LogBuffer,
    pub logs_panel: LogsPanel,
    pub show_logs: bool,

    /// Terminal width from the last frame
    pub width: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, log_buffer: LogBuffer, start: &str) -> Self {
        let theme = Theme::by_name_with_config(
            &config.theme,
            &ThemeConfig {
                use_theme_background: config.use_theme_background,
            },
        );
        let pages = Pages::seeded();
        let mut app = Self {
            sessions_ui: ListUi::for_kind::<Session>(&pages),
            students_ui: ListUi::for_kind::<Student>(&pages),
            pages,
            route: Route::Sessions,
            history: Vec::new(),
            editor_status: EditorStatus::Ready,
            list_focus: ListFocus::Table,
            modal: None,
            toast: None,
            theme,
            show_logs: false,
            logs_panel: LogsPanel::new(),
            log_buffer,
            width: 120,
            should_quit: false,
            config,
        };
        app.enter(Route::parse(start));
        app
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::from_width(self.width, self.config.layout.compact_below)
    }

    /// Wide terminals dock the filter form beside the table.
    pub fn filter_docked(&self) -> bool {
        self.breakpoint().at_least(Breakpoint::Wide)
    }

    pub fn ui(&self, kind: RecordKind) -> &ListUi {
        match kind {
            RecordKind::Session => &self.sessions_ui,
            RecordKind::Student => &self.students_ui,
        }
    }

    pub fn ui_mut(&mut self, kind: RecordKind) -> &mut ListUi {
        match kind {
            RecordKind::Session => &mut self.sessions_ui,
            RecordKind::Student => &mut self.students_ui,
        }
    }

    /// Record kind of the current list route.
    fn list_kind(&self) -> Option<RecordKind> {
        self.route.is_list().then(|| self.route.kind()).flatten()
    }

    pub fn is_editing(&self) -> bool {
        self.route.kind().is_some()
            && !self.route.is_list()
            && self.editor_status == EditorStatus::Ready
    }

    /// Text-entry views swallow printable keys, so global shortcuts are off.
    pub fn captures_text(&self) -> bool {
        self.is_editing() || (self.list_kind().is_some() && self.list_focus == ListFocus::Filter)
    }

    // ─── Navigation ──────────────────────────────────────────────────

    /// Go to `route`, remembering the current one for Back.
    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, Route::Sessions);
        self.history.push(previous);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.enter(route);
    }

    /// Pop route history; with nothing to pop, go to the current list.
    pub fn back(&mut self) {
        let target = self.history.pop().unwrap_or_else(|| self.route.list());
        self.enter(target);
    }

    fn enter(&mut self, route: Route) {
        tracing::debug!(path = %route, "Navigated");
        self.editor_status = match &route {
            Route::NewSession | Route::EditSession(_) => self.pages.sessions.open_editor(&route),
            Route::NewStudent | Route::EditStudent(_) => self.pages.students.open_editor(&route),
            Route::NotFound(path) => {
                tracing::warn!(path = %path, "Unknown route");
                EditorStatus::NotFound
            }
            Route::Sessions | Route::Students => EditorStatus::Ready,
        };
        self.route = route;
        self.list_focus = ListFocus::Table;
        if self.modal == Some(Modal::Filter) {
            self.modal = None;
        }
    }

    /// `n`: the create route of the current kind.
    pub fn new_record(&mut self) {
        let kind = self.route.kind().unwrap_or(RecordKind::Session);
        self.navigate(Route::new_for(kind));
    }

    // ─── Table ───────────────────────────────────────────────────────

    fn sync_table<T: Paged>(&mut self) {
        let page = T::page(&self.pages);
        let columns = page.table().columns().len();
        let rows = page.rows().len();
        self.ui_mut(T::KIND).table.sync(columns, rows);
    }

    fn table_key<T: Paged>(&mut self, key: KeyEvent) -> Handled {
        self.sync_table::<T>();
        let action = self.ui_mut(T::KIND).table.handle_key(key);
        match action {
            TableAction::Sort(index) => self.sort_by::<T>(index),
            TableAction::Open(row) => self.open_row::<T>(row),
            TableAction::Consumed | TableAction::Ignored => {}
        }
        action.into()
    }

    fn sort_by<T: Paged>(&mut self, index: usize) {
        let table = T::page_mut(&mut self.pages).table_mut();
        if let Some(field) = table.activate_header(index).map(str::to_string) {
            let sort = table.sort();
            tracing::debug!(
                kind = %T::KIND,
                field = %field,
                active = ?sort.field(),
                order = ?sort.order(),
                "Header activated"
            );
        }
    }

    fn open_row<T: Paged>(&mut self, row: usize) {
        let rows = T::page(&self.pages).rows();
        if let Some(record) = rows.get(row) {
            let route = Route::edit_for(T::KIND, record.id());
            self.navigate(route);
        }
    }

    /// Activate header `index` of the current list (mouse click).
    pub fn activate_header(&mut self, index: usize) {
        match self.list_kind() {
            Some(RecordKind::Session) => self.sort_by::<Session>(index),
            Some(RecordKind::Student) => self.sort_by::<Student>(index),
            None => {}
        }
    }

    /// Mouse click: header cells of the visible list sort.
    pub fn click(&mut self, x: u16, y: u16) {
        if self.modal.is_some() {
            return;
        }
        let Some(kind) = self.list_kind() else {
            return;
        };
        if let Some(index) = self.ui(kind).table.header_at(x, y) {
            self.list_focus = ListFocus::Table;
            self.activate_header(index);
        }
    }

    /// Mouse wheel over a list moves the row selection.
    pub fn scroll(&mut self, down: bool) {
        match self.list_kind() {
            Some(RecordKind::Session) => {
                self.sync_table::<Session>();
                self.sessions_ui.table.step(down);
            }
            Some(RecordKind::Student) => {
                self.sync_table::<Student>();
                self.students_ui.table.step(down);
            }
            None => {}
        }
    }

    // ─── Filter ──────────────────────────────────────────────────────

    fn filter_key<T: Paged>(&mut self, key: KeyEvent) -> Handled {
        let action = self.ui_mut(T::KIND).filter.handle_key(key);
        let handled = Handled::from(action.clone());
        self.apply_filter::<T>(action);
        handled
    }

    fn apply_filter<T: Paged>(&mut self, action: FilterAction) {
        match action {
            FilterAction::Query(selections) => {
                let page = T::page_mut(&mut self.pages);
                page.filter_mut().apply(selections);
                let count = page.rows().len();
                tracing::debug!(kind = %T::KIND, results = count, "Filter query");
                self.close_filter();
            }
            FilterAction::Reset => {
                T::page_mut(&mut self.pages).filter_mut().reset();
                self.close_filter();
            }
            FilterAction::Close => self.close_filter(),
            FilterAction::Consumed | FilterAction::Ignored => {}
        }
    }

    fn close_filter(&mut self) {
        self.list_focus = ListFocus::Table;
        if self.modal == Some(Modal::Filter) {
            self.modal = None;
        }
    }

    /// `f`: focus the docked form, or open the drawer on narrower terminals.
    pub fn open_filter(&mut self) {
        if self.list_kind().is_none() {
            return;
        }
        if self.filter_docked() {
            self.list_focus = match self.list_focus {
                ListFocus::Table => ListFocus::Filter,
                ListFocus::Filter => ListFocus::Table,
            };
        } else {
            self.modal = Some(Modal::Filter);
        }
    }

    /// Keys for the filter form hosted by the drawer modal.
    pub fn filter_drawer_key(&mut self, key: KeyEvent) {
        match self.list_kind() {
            Some(RecordKind::Session) => {
                self.filter_key::<Session>(key);
            }
            Some(RecordKind::Student) => {
                self.filter_key::<Student>(key);
            }
            None => self.modal = None,
        }
    }

    /// Option lists derive from the data, so saves refresh both forms.
    fn rebuild_filters(&mut self) {
        self.sessions_ui.filter.rebuild(&self.pages.sessions);
        self.students_ui.filter.rebuild(&self.pages.students);
    }

    // ─── Editor ──────────────────────────────────────────────────────

    fn editor_key<T: Paged>(&mut self, key: KeyEvent) -> Handled {
        let action = T::page_mut(&mut self.pages).editor_mut().handle_key(key);
        match action {
            EditorAction::None => {}
            EditorAction::Save(record) => {
                let name = record.display_name();
                T::save_into(&mut self.pages, record);
                self.rebuild_filters();
                self.show_toast(format!("✓ 已保存 {}", name));
                self.navigate(Route::list_for(T::KIND));
            }
            EditorAction::Cancel(behavior) => {
                T::page_mut(&mut self.pages).editor_mut().discard();
                match behavior {
                    CancelBehavior::Navigate(route) => self.navigate(route),
                    CancelBehavior::Back => self.back(),
                }
            }
        }
        Handled::Yes
    }

    // ─── View dispatch ───────────────────────────────────────────────

    /// Route a key to whatever the current view has focused.
    pub fn dispatch_to_view(&mut self, key: KeyEvent) -> Handled {
        let kind = self.route.kind();
        if self.is_editing() {
            return match kind {
                Some(RecordKind::Session) => self.editor_key::<Session>(key),
                Some(RecordKind::Student) => self.editor_key::<Student>(key),
                None => Handled::No,
            };
        }
        match (self.list_kind(), self.list_focus) {
            (Some(RecordKind::Session), ListFocus::Table) => self.table_key::<Session>(key),
            (Some(RecordKind::Student), ListFocus::Table) => self.table_key::<Student>(key),
            (Some(RecordKind::Session), ListFocus::Filter) => self.filter_key::<Session>(key),
            (Some(RecordKind::Student), ListFocus::Filter) => self.filter_key::<Student>(key),
            (None, _) => Handled::No,
        }
    }

    /// Status bar hint for the focused component.
    pub fn focus_hint(&self) -> &'static str {
        if self.is_editing() {
            return "Tab:切换  Ctrl+S:保存  Esc:取消";
        }
        let Some(kind) = self.list_kind() else {
            return "Enter/Esc:返回列表";
        };
        let ui = self.ui(kind);
        let hint = match self.list_focus {
            ListFocus::Table => ui.table.focus_hint(),
            ListFocus::Filter => ui.filter.focus_hint(),
        };
        hint.unwrap_or("")
    }

    // ─── Record actions ──────────────────────────────────────────────

    /// JSON of the selected row in the current list.
    pub fn selected_record_json(&mut self) -> Option<anyhow::Result<String>> {
        match self.list_kind()? {
            RecordKind::Session => self.selected_json::<Session>(),
            RecordKind::Student => self.selected_json::<Student>(),
        }
    }

    fn selected_json<T: Paged>(&mut self) -> Option<anyhow::Result<String>> {
        self.sync_table::<T>();
        let rows = T::page(&self.pages).rows();
        let index = self.ui(T::KIND).table.selected()?;
        rows.get(index).map(clipboard::record_json)
    }

    /// `y`: copy the selected record as JSON.
    pub fn copy_selected(&mut self) {
        if !self.config.features.clipboard {
            self.show_toast("复制已关闭");
            return;
        }
        let Some(json) = self.selected_record_json() else {
            return;
        };
        match json.and_then(|text| clipboard::copy_to_clipboard(&text)) {
            Ok(()) => self.show_toast("✓ 已复制到剪贴板"),
            Err(e) => {
                tracing::warn!(error = %e, "Copy failed");
                self.show_toast("✗ 复制失败");
            }
        }
    }

    /// `d`: delete is not offered; say so.
    pub fn delete_selected(&mut self) {
        if self.list_kind().is_none() {
            return;
        }
        tracing::info!(path = %self.route, "Delete requested but not available");
        self.show_toast("删除功能暂未开放");
    }

    // ─── Shell ───────────────────────────────────────────────────────

    pub fn toggle_logs(&mut self) {
        if self.config.features.logs_panel {
            self.show_logs = !self.show_logs;
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Heading for the current view.
    pub fn heading(&self) -> String {
        match &self.route {
            Route::Sessions => Session::TITLE.to_string(),
            Route::Students => Student::TITLE.to_string(),
            Route::NewSession => format!("新建{}", Session::NOUN),
            Route::NewStudent => format!("新建{}", Student::NOUN),
            Route::EditSession(_) => format!("编辑{}", Session::NOUN),
            Route::EditStudent(_) => format!("编辑{}", Student::NOUN),
            Route::NotFound(_) => "页面不存在".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::filter_panel::FilterFocus;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app(start: &str) -> App {
        App::new(Config::default(), LogBuffer::new(), start)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch_to_view(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn start_route_is_parsed() {
        assert_eq!(app("/students").route, Route::Students);
        assert_eq!(app("/").route, Route::Sessions);
        let missing = app("/sessions/edit/99");
        assert_eq!(missing.editor_status, EditorStatus::NotFound);
        assert!(!missing.is_editing());
    }

    #[test]
    fn enter_opens_the_selected_record() {
        let mut app = app("/sessions");
        app.dispatch_to_view(key(KeyCode::Enter));
        // Newest first, so the first row is session 3
        assert_eq!(app.route, Route::EditSession("3".into()));
        assert!(app.is_editing());
        assert_eq!(app.pages.sessions.editor().draft().id, "3");
    }

    #[test]
    fn saving_a_new_student_returns_to_the_list() {
        let mut app = app("/students");
        let before = app.pages.students.store().records().len();
        app.new_record();
        assert_eq!(app.route, Route::NewStudent);

        type_text(&mut app, "周八");
        app.dispatch_to_view(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        assert_eq!(app.route, Route::Students);
        assert_eq!(app.pages.students.store().records().len(), before + 1);
        assert!(app.toast.is_some());
        // The new name is pickable in the students filter form.
        let names: Vec<_> = app
            .pages
            .students
            .options("name")
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert!(names.contains(&"周八".to_string()));
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut app = app("/sessions/edit/1");
        type_text(&mut app, "改");
        app.dispatch_to_view(key(KeyCode::Esc));
        assert_eq!(app.route, Route::Sessions);

        app.navigate(Route::EditSession("1".into()));
        assert_eq!(app.pages.sessions.editor().draft().title, "羽毛球基础入门");
    }

    #[test]
    fn back_without_history_goes_to_the_list() {
        let mut app = app("/students/new");
        app.back();
        assert_eq!(app.route, Route::Students);

        app.navigate(Route::NotFound("/x".into()));
        app.back();
        assert_eq!(app.route, Route::Students);
    }

    #[test]
    fn editor_swallows_shortcut_letters() {
        let app = app("/sessions/new");
        assert!(app.captures_text());
        let list = self::app("/sessions");
        assert!(!list.captures_text());
    }

    #[test]
    fn docked_filter_query_narrows_rows() {
        let mut app = app("/sessions");
        app.width = 200;
        app.open_filter();
        assert_eq!(app.list_focus, ListFocus::Filter);

        // Second input is the coach checklist; every coach has one session.
        app.dispatch_to_view(key(KeyCode::Tab));
        assert_eq!(app.sessions_ui.filter.focus(), FilterFocus::Input(1));
        app.dispatch_to_view(key(KeyCode::Char(' ')));
        while app.sessions_ui.filter.focus() != FilterFocus::Query {
            app.dispatch_to_view(key(KeyCode::Tab));
        }
        app.dispatch_to_view(key(KeyCode::Enter));

        assert_eq!(app.list_focus, ListFocus::Table);
        assert_eq!(app.pages.sessions.rows().len(), 1);
    }

    #[test]
    fn narrow_filter_opens_a_drawer() {
        let mut app = app("/students");
        app.width = 80;
        app.open_filter();
        assert_eq!(app.modal, Some(Modal::Filter));
        app.filter_drawer_key(key(KeyCode::Esc));
        assert_eq!(app.modal, None);
    }

    #[test]
    fn header_number_key_sorts() {
        let mut app = app("/students");
        app.dispatch_to_view(key(KeyCode::Char('4')));
        let sort = app.pages.students.table().sort();
        assert_eq!(sort.field(), Some("level"));
    }

    #[test]
    fn delete_is_a_stub() {
        let mut app = app("/students");
        let before = app.pages.students.store().records().len();
        app.delete_selected();
        assert_eq!(app.pages.students.store().records().len(), before);
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("删除功能暂未开放")
        );
    }

    #[test]
    fn selected_record_is_json() {
        let mut app = app("/sessions");
        let json = app.selected_record_json().unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "3");
    }

    #[test]
    fn copy_respects_feature_flag() {
        let mut app = app("/sessions");
        app.config.features.clipboard = false;
        app.copy_selected();
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("复制已关闭")
        );
    }

    #[test]
    fn logs_toggle_respects_feature_flag() {
        let mut app = app("/sessions");
        app.toggle_logs();
        assert!(app.show_logs);

        app.config.features.logs_panel = false;
        app.show_logs = false;
        app.toggle_logs();
        assert!(!app.show_logs);
    }
}
