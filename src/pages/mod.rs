//! Per-kind page wiring: store, filter engine, table and editor.

mod sessions;
mod students;

use std::cmp::Ordering;

use crate::editor::{Editor, EditorField, Seed};
use crate::filter::{FilterConfig, FilterEngine, FilterOption};
use crate::mock;
use crate::model::{Directory, Record, Session, Student};
use crate::route::Route;
use crate::store::{RecordStore, SaveOutcome};
use crate::table::{Column, Table, TableSnapshot};

/// How one record kind is listed, filtered and edited.
pub trait Entity: Record {
    /// Page heading.
    const TITLE: &'static str;
    /// Singular noun for headings (`新建课程`).
    const NOUN: &'static str;
    /// Shown when an edit route names an unknown id.
    const NOT_FOUND: &'static str;

    fn columns(directory: &Directory) -> Vec<Column>;

    fn filters(directory: &Directory) -> Vec<FilterConfig>;

    /// `records` is the current collection, for options derived from data.
    fn editor_fields(records: &[Self], directory: &Directory) -> Vec<EditorField>;

    /// Field whose values are ids resolved through the directory.
    fn reference_field() -> Option<&'static str> {
        None
    }

    /// Order the seed data is stored in.
    fn default_order(_a: &Self, _b: &Self) -> Ordering {
        Ordering::Equal
    }

    /// Where the editor's cancel goes. `None` pops route history.
    fn cancel_route() -> Option<Route> {
        Some(Route::list_for(Self::KIND))
    }

    /// Short label for logs and toasts (`羽毛球基础入门`).
    fn display_name(&self) -> String;

    /// Extra text on a card's heading line.
    fn card_badge(&self) -> Option<String> {
        None
    }
}

/// Outcome of resolving an editor route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Ready,
    NotFound,
}

/// One kind's collection and the components showing it.
#[derive(Debug, Clone)]
pub struct Page<T: Entity> {
    store: RecordStore<T>,
    filter: FilterEngine,
    table: Table,
    editor: Editor<T>,
    directory: Directory,
    new_generation: u64,
}

impl<T: Entity> Page<T> {
    pub fn new(mut seed: Vec<T>, directory: Directory) -> Self {
        seed.sort_by(T::default_order);
        let store = RecordStore::new(seed);
        let editor = Editor::new(
            T::editor_fields(store.records(), &directory),
            T::cancel_route(),
        );
        Self {
            filter: FilterEngine::new(T::filters(&directory)),
            table: Table::new(T::columns(&directory)),
            editor,
            store,
            directory,
            new_generation: 0,
        }
    }

    pub fn store(&self) -> &RecordStore<T> {
        &self.store
    }

    pub fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterEngine {
        &mut self.filter
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn editor(&self) -> &Editor<T> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor<T> {
        &mut self.editor
    }

    /// Filtered, then sorted: what the table shows.
    pub fn rows(&self) -> Vec<T> {
        self.table.arrange(&self.filter.current(self.store.records()))
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.table.snapshot(&self.filter.current(self.store.records()))
    }

    /// Card badges in the same order as [`Page::snapshot`] rows.
    pub fn badges(&self) -> Vec<Option<String>> {
        self.rows().iter().map(T::card_badge).collect()
    }

    /// Options for a multi-select filter, from the whole collection.
    pub fn options(&self, key: &str) -> Vec<FilterOption> {
        self.filter.options(self.store.records(), key)
    }

    /// Seed the editor for a create or edit route.
    ///
    /// Every visit to a "new" route starts a fresh draft. Edit routes look the
    /// id up in the store each time.
    pub fn open_editor(&mut self, route: &Route) -> EditorStatus {
        match route {
            Route::NewSession | Route::NewStudent => {
                self.new_generation += 1;
                self.editor.sync(Seed::New(self.new_generation), &T::blank());
                EditorStatus::Ready
            }
            Route::EditSession(id) | Route::EditStudent(id) => match self.store.find(id) {
                Some(record) => {
                    let record = record.clone();
                    self.editor.sync(Seed::Existing(id.clone()), &record);
                    EditorStatus::Ready
                }
                None => {
                    tracing::warn!(kind = %T::KIND, id = %id, "Record not found");
                    EditorStatus::NotFound
                }
            },
            _ => EditorStatus::NotFound,
        }
    }

    /// Merge a submitted draft into the store.
    pub fn save(&mut self, record: T) -> SaveOutcome {
        let name = record.display_name();
        let outcome = self.store.save(record);
        tracing::info!(kind = %T::KIND, id = outcome.id(), name = %name, "Saved");
        // Derived option lists (equipment) may have grown.
        self.editor
            .set_fields(T::editor_fields(self.store.records(), &self.directory));
        self.editor.discard();
        outcome
    }

    /// Point every id-resolving component at a new directory.
    pub fn refresh_directory(&mut self, directory: Directory) {
        if let Some(field) = T::reference_field() {
            self.filter.set_references(field, directory.clone());
        }
        self.table.set_directory(&directory);
        self.editor
            .set_fields(T::editor_fields(self.store.records(), &directory));
        self.directory = directory;
    }
}

/// Both pages, wired together through the student directory.
#[derive(Debug, Clone)]
pub struct Pages {
    pub sessions: Page<Session>,
    pub students: Page<Student>,
}

impl Pages {
    /// Pages over the built-in mock data.
    pub fn seeded() -> Self {
        Self::from_records(mock::sessions(), mock::students())
    }

    pub fn from_records(sessions: Vec<Session>, students: Vec<Student>) -> Self {
        let students = Page::new(students, Directory::new());
        let directory = student_directory(students.store().records());
        Self {
            sessions: Page::new(sessions, directory),
            students,
        }
    }

    pub fn save_session(&mut self, session: Session) -> SaveOutcome {
        self.sessions.save(session)
    }

    /// Saving a student can rename a participant, so sessions re-resolve.
    pub fn save_student(&mut self, student: Student) -> SaveOutcome {
        let outcome = self.students.save(student);
        let directory = student_directory(self.students.store().records());
        self.sessions.refresh_directory(directory);
        outcome
    }
}

/// Where a kind's page lives inside [`Pages`], for code generic over kinds.
pub trait Paged: Entity {
    fn page(pages: &Pages) -> &Page<Self>;

    fn page_mut(pages: &mut Pages) -> &mut Page<Self>;

    /// Save through [`Pages`] so cross-page effects happen.
    fn save_into(pages: &mut Pages, record: Self) -> SaveOutcome;
}

impl Paged for Session {
    fn page(pages: &Pages) -> &Page<Self> {
        &pages.sessions
    }

    fn page_mut(pages: &mut Pages) -> &mut Page<Self> {
        &mut pages.sessions
    }

    fn save_into(pages: &mut Pages, record: Self) -> SaveOutcome {
        pages.save_session(record)
    }
}

impl Paged for Student {
    fn page(pages: &Pages) -> &Page<Self> {
        &pages.students
    }

    fn page_mut(pages: &mut Pages) -> &mut Page<Self> {
        &mut pages.students
    }

    fn save_into(pages: &mut Pages, record: Self) -> SaveOutcome {
        pages.save_student(record)
    }
}

/// Student id → name.
pub fn student_directory(students: &[Student]) -> Directory {
    Directory::from_pairs(students.iter().map(|s| (s.id.clone(), s.name.clone())))
}
