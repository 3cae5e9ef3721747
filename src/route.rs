//! Route surface: list, create and edit views for each record kind.

use std::fmt;

use crate::model::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Sessions,
    NewSession,
    EditSession(String),
    Students,
    NewStudent,
    EditStudent(String),
    /// Any path that names no view.
    NotFound(String),
}

impl Route {
    /// Parse a path. `/` is the sessions list; a trailing slash is ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = trimmed.trim_end_matches('/');
        let segments: Vec<&str> = normalized
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["sessions"] => Route::Sessions,
            ["sessions", "new"] => Route::NewSession,
            ["sessions", "edit", id] => Route::EditSession(id.to_string()),
            ["students"] => Route::Students,
            ["students", "new"] => Route::NewStudent,
            ["students", "edit", id] => Route::EditStudent(id.to_string()),
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Sessions => "/sessions".to_string(),
            Route::NewSession => "/sessions/new".to_string(),
            Route::EditSession(id) => format!("/sessions/edit/{}", id),
            Route::Students => "/students".to_string(),
            Route::NewStudent => "/students/new".to_string(),
            Route::EditStudent(id) => format!("/students/edit/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Record kind this route belongs to.
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Route::Sessions | Route::NewSession | Route::EditSession(_) => Some(RecordKind::Session),
            Route::Students | Route::NewStudent | Route::EditStudent(_) => Some(RecordKind::Student),
            Route::NotFound(_) => None,
        }
    }

    /// The list view of this route's kind. Unknown paths go to sessions.
    pub fn list(&self) -> Route {
        match self.kind() {
            Some(RecordKind::Student) => Route::Students,
            _ => Route::Sessions,
        }
    }

    pub fn list_for(kind: RecordKind) -> Route {
        match kind {
            RecordKind::Session => Route::Sessions,
            RecordKind::Student => Route::Students,
        }
    }

    pub fn new_for(kind: RecordKind) -> Route {
        match kind {
            RecordKind::Session => Route::NewSession,
            RecordKind::Student => Route::NewStudent,
        }
    }

    pub fn edit_for(kind: RecordKind, id: &str) -> Route {
        match kind {
            RecordKind::Session => Route::EditSession(id.to_string()),
            RecordKind::Student => Route::EditStudent(id.to_string()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Route::Sessions | Route::Students)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_view() {
        assert_eq!(Route::parse("/"), Route::Sessions);
        assert_eq!(Route::parse("/sessions"), Route::Sessions);
        assert_eq!(Route::parse("/sessions/new/"), Route::NewSession);
        assert_eq!(Route::parse("/sessions/edit/3"), Route::EditSession("3".into()));
        assert_eq!(Route::parse("students"), Route::Students);
        assert_eq!(Route::parse("/students/new"), Route::NewStudent);
        assert_eq!(Route::parse("/students/edit/c7"), Route::EditStudent("c7".into()));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/coaches"), Route::NotFound("/coaches".into()));
        assert_eq!(Route::parse("/sessions/edit"), Route::NotFound("/sessions/edit".into()));
        assert_eq!(Route::NotFound("/x".into()).list(), Route::Sessions);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Sessions,
            Route::NewStudent,
            Route::EditSession("2".into()),
            Route::EditStudent("c1".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn kind_helpers() {
        assert_eq!(Route::EditStudent("c1".into()).list(), Route::Students);
        assert_eq!(Route::new_for(RecordKind::Session), Route::NewSession);
        assert_eq!(Route::edit_for(RecordKind::Student, "c2").path(), "/students/edit/c2");
        assert!(Route::Students.is_list());
        assert!(!Route::NewStudent.is_list());
    }
}
