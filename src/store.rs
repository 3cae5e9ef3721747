//! Per-page record collection.
//!
//! A page owns exactly one store. Ids are assigned here and nowhere else:
//! a record saved with an empty id gets a fresh one and is appended.

use std::collections::HashSet;

use crate::model::{generate_id, Record};

/// What [`RecordStore::save`] did with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Appended under this (possibly freshly generated) id.
    Created(String),
    /// Replaced the existing record with this id.
    Updated(String),
}

impl SaveOutcome {
    pub fn id(&self) -> &str {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> RecordStore<T> {
    /// Seed a store. Records with an empty or repeated id are dropped.
    pub fn new(seed: Vec<T>) -> Self {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(seed.len());
        for record in seed {
            if record.id().is_empty() || !seen.insert(record.id().to_string()) {
                tracing::warn!(
                    kind = %T::KIND,
                    id = record.id(),
                    "Dropping seed record with missing or duplicate id"
                );
                continue;
            }
            records.push(record);
        }
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Merge a submitted draft back into the collection.
    ///
    /// Empty id: a fresh id is generated and the record appended. Known id:
    /// replaced in place. Unknown non-empty id: appended as-is.
    pub fn save(&mut self, mut record: T) -> SaveOutcome {
        if record.id().is_empty() {
            let id = generate_id(T::KIND.id_prefix(), |candidate| {
                self.contains_id(candidate)
            });
            record.assign_id(id.clone());
            self.records.push(record);
            tracing::info!(kind = %T::KIND, id = %id, "Created record");
            return SaveOutcome::Created(id);
        }

        let id = record.id().to_string();
        match self.records.iter().position(|r| r.id() == id) {
            Some(index) => {
                self.records[index] = record;
                tracing::info!(kind = %T::KIND, id = %id, "Updated record");
                SaveOutcome::Updated(id)
            }
            None => {
                self.records.push(record);
                tracing::info!(kind = %T::KIND, id = %id, "Appended record with caller-supplied id");
                SaveOutcome::Created(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::model::{EditValue, Session};

    #[test]
    fn new_record_gets_fresh_unique_id() {
        let mut store = RecordStore::new(mock::sessions());
        let before: Vec<String> = store.records().iter().map(|s| s.id.clone()).collect();

        let outcome = store.save(Session::blank());
        let id = outcome.id().to_string();

        assert!(matches!(outcome, SaveOutcome::Created(_)));
        assert!(!id.is_empty());
        assert!(!before.contains(&id));
        assert_eq!(store.len(), before.len() + 1);
        assert_eq!(store.records().last().map(|s| s.id.as_str()), Some(id.as_str()));
    }

    #[test]
    fn existing_id_replaces_in_place() {
        let mut store = RecordStore::new(mock::sessions());
        let mut edited = store.find("2").cloned().unwrap();
        edited
            .set_field("title", EditValue::Text("杀球进阶".into()))
            .unwrap();

        assert_eq!(store.save(edited), SaveOutcome::Updated("2".into()));
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[1].title, "杀球进阶");
    }

    #[test]
    fn participant_edit_keeps_count_after_save() {
        let mut store = RecordStore::new(mock::sessions());
        let mut edited = store.find("1").cloned().unwrap();
        edited
            .set_field(
                "students",
                EditValue::List(vec!["c1".into(), "c3".into(), "c7".into()]),
            )
            .unwrap();
        store.save(edited);

        let saved = store.find("1").unwrap();
        assert_eq!(saved.total_students(), saved.students().len());
        assert_eq!(saved.total_students(), 3);
    }

    #[test]
    fn blank_session_saves_with_zero_participants() {
        let mut store = RecordStore::new(mock::sessions());
        let id = store.save(Session::blank()).id().to_string();
        let saved = store.find(&id).unwrap();
        assert_eq!(saved.total_students(), 0);
        assert!(saved.students().is_empty());
    }

    #[test]
    fn seed_drops_duplicate_ids() {
        let mut sessions = mock::sessions();
        sessions.push(sessions[0].clone());
        let store = RecordStore::new(sessions);
        assert_eq!(store.len(), 3);
    }
}
