//! Header-driven sort state and the value comparator.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use unicase::UniCase;

use crate::model::{FieldValue, Record};

thread_local! {
    /// Chinese collation (pinyin for Han) at secondary strength, so case is ignored.
    static COLLATOR: Option<Collator> = {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        match Collator::try_new(&locale!("zh").into(), options) {
            Ok(collator) => Some(collator),
            Err(e) => {
                tracing::warn!(error = ?e, "Collator unavailable, sorting text case-insensitively");
                None
            }
        }
    };
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Apply this order to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        }
    }
}

/// Transient sort state of one table. Starts unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    field: Option<String>,
    order: SortOrder,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn by(field: &str, order: SortOrder) -> Self {
        Self {
            field: Some(field.to_string()),
            order,
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Header activation: new field sorts ascending, ascending flips to
    /// descending, descending clears back to source order.
    pub fn activate(&mut self, field: &str) {
        match (self.field.as_deref(), self.order) {
            (Some(current), SortOrder::Ascending) if current == field => {
                self.order = SortOrder::Descending;
            }
            (Some(current), SortOrder::Descending) if current == field => {
                self.field = None;
                self.order = SortOrder::Ascending;
            }
            _ => {
                self.field = Some(field.to_string());
                self.order = SortOrder::Ascending;
            }
        }
        tracing::debug!(field = ?self.field, order = ?self.order, "Sort changed");
    }

    /// Direction glyph for `field`'s header, only if it is the active one.
    pub fn glyph_for(&self, field: &str) -> Option<&'static str> {
        match self.field.as_deref() {
            Some(current) if current == field => Some(self.order.glyph()),
            _ => None,
        }
    }

    /// A sorted copy of `records`. Stable; unsorted state keeps input order.
    pub fn sorted<T: Record>(&self, records: &[T]) -> Vec<T> {
        let mut out = records.to_vec();
        if let Some(field) = self.field.as_deref() {
            out.sort_by(|a, b| {
                self.order
                    .apply(compare_values(&a.field_value(field), &b.field_value(field)))
            });
        }
        out
    }
}

/// Compare two field values ascending.
///
/// Numbers compare numerically (NaN ties). Text compares by Chinese collation
/// ignoring case, falling back to the raw string to keep the order total.
/// Anything else (lists, mixed kinds) is stringified first.
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (FieldValue::Missing, FieldValue::Missing) => Ordering::Equal,
        (FieldValue::Missing, _) => Ordering::Less,
        (_, FieldValue::Missing) => Ordering::Greater,
        _ => compare_text(&a.to_text(), &b.to_text()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let collated = COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => UniCase::new(a).cmp(&UniCase::new(b)),
    });
    collated.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use crate::model::{Session, Student};
    use proptest::prelude::*;

    fn ids(sessions: &[Session]) -> Vec<&str> {
        sessions.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn three_step_cycle() {
        let mut sort = SortState::new();
        assert_eq!(sort.field(), None);

        sort.activate("coach");
        assert_eq!((sort.field(), sort.order()), (Some("coach"), SortOrder::Ascending));

        sort.activate("coach");
        assert_eq!((sort.field(), sort.order()), (Some("coach"), SortOrder::Descending));

        sort.activate("coach");
        assert_eq!((sort.field(), sort.order()), (None, SortOrder::Ascending));
    }

    #[test]
    fn switching_field_restarts_ascending() {
        let mut sort = SortState::new();
        sort.activate("coach");
        sort.activate("coach");
        sort.activate("title");
        assert_eq!((sort.field(), sort.order()), (Some("title"), SortOrder::Ascending));
    }

    #[test]
    fn glyph_only_on_active_column() {
        let mut sort = SortState::new();
        sort.activate("feePerStudent");
        assert_eq!(sort.glyph_for("feePerStudent"), Some("▲"));
        assert_eq!(sort.glyph_for("coach"), None);
        sort.activate("feePerStudent");
        assert_eq!(sort.glyph_for("feePerStudent"), Some("▼"));
    }

    #[test]
    fn descending_date_time_is_newest_first() {
        let sort = SortState::by("dateTime", SortOrder::Descending);
        let sorted = sort.sorted(&mock::sessions());
        let dates: Vec<_> = sorted.iter().map(|s| &s.date_time[..10]).collect();
        assert_eq!(dates, ["2025-05-30", "2025-05-29", "2025-05-28"]);
    }

    #[test]
    fn numbers_sort_numerically_not_lexically() {
        let mut sessions = mock::sessions();
        sessions[0].fee_per_student = 1000.0;
        let mut sort = SortState::new();
        sort.activate("feePerStudent");
        assert_eq!(ids(&sort.sorted(&sessions)), ["3", "2", "1"]);
    }

    #[test]
    fn third_activation_restores_source_order() {
        let source = mock::sessions();
        let mut sort = SortState::new();
        for _ in 0..3 {
            sort.activate("feePerStudent");
        }
        assert_eq!(ids(&sort.sorted(&source)), ["1", "2", "3"]);
    }

    #[test]
    fn sorting_leaves_input_untouched() {
        let source = mock::sessions();
        let before = source.clone();
        let _ = SortState::by("coach", SortOrder::Descending).sorted(&source);
        assert_eq!(source, before);
    }

    #[test]
    fn text_ignores_case_first() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("Apple", "apple"), Ordering::Less);
        assert_eq!(compare_text("a", "a"), Ordering::Equal);
    }

    #[test]
    fn chinese_text_follows_pinyin() {
        // 李 (li) < 王 (wang) < 张 (zhang), unlike code point order
        assert_eq!(compare_text("李教练", "张教练"), Ordering::Less);
        assert_eq!(compare_text("王教练", "张教练"), Ordering::Less);

        let mut sort = SortState::new();
        sort.activate("coach");
        assert_eq!(ids(&sort.sorted(&mock::sessions())), ["1", "3", "2"]);
    }

    #[test]
    fn lists_compare_joined() {
        let a = FieldValue::List(vec!["球拍", "水"]);
        let b = FieldValue::List(vec!["球拍", "羽毛球"]);
        assert_eq!(compare_values(&a, &b), compare_text("球拍、水", "球拍、羽毛球"));
    }

    proptest! {
        /// Ascending then descending gives the exact reverse when keys are distinct.
        #[test]
        fn descending_reverses_ascending(names in prop::collection::hash_set("[a-zA-Z]{1,6}", 0..20)) {
            let students: Vec<Student> = names
                .into_iter()
                .enumerate()
                .map(|(i, name)| Student { id: i.to_string(), name, ..Student::default() })
                .collect();

            let mut sort = SortState::new();
            sort.activate("name");
            let ascending = sort.sorted(&students);
            sort.activate("name");
            let mut descending = sort.sorted(&students);
            descending.reverse();

            prop_assert_eq!(ascending, descending);
        }

        /// Levels repeat, so stability matters: equal keys keep input order.
        #[test]
        fn sort_is_stable(levels in prop::collection::vec(0u32..3, 0..30)) {
            let students: Vec<Student> = levels
                .into_iter()
                .enumerate()
                .map(|(i, level)| Student { id: i.to_string(), level, ..Student::default() })
                .collect();

            let sorted = SortState::by("level", SortOrder::Ascending).sorted(&students);
            for pair in sorted.windows(2) {
                if pair[0].level == pair[1].level {
                    let a: usize = pair[0].id.parse().unwrap();
                    let b: usize = pair[1].id.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }
    }
}
