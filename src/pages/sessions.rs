use std::cmp::Ordering;

use super::Entity;
use crate::editor::{ControlKind, EditorField, PickOption};
use crate::filter::FilterConfig;
use crate::model::{label_for, ClientType, Directory, Enumerated, Record, Session, SessionType};
use crate::table::{compare_values, Column, SHORT_DATE_TIME};

fn choices<E: Enumerated>() -> ControlKind {
    ControlKind::Choice(
        E::ALL
            .iter()
            .map(|v| PickOption::new(v.code(), v.label()))
            .collect(),
    )
}

/// Distinct equipment tags across `sessions`, first-seen order.
fn equipment_options(sessions: &[Session]) -> Vec<PickOption> {
    let mut options: Vec<PickOption> = Vec::new();
    for tag in sessions.iter().flat_map(|s| s.equipment.iter()) {
        if !options.iter().any(|o| &o.value == tag) {
            options.push(PickOption::plain(tag.clone()));
        }
    }
    options
}

impl Entity for Session {
    const TITLE: &'static str = "课程管理";
    const NOUN: &'static str = "课程";
    const NOT_FOUND: &'static str = "课程不存在";

    fn columns(directory: &Directory) -> Vec<Column> {
        vec![
            Column::date_time("时间", "dateTime", SHORT_DATE_TIME).span(3),
            Column::text("课程名称", "title").span(3),
            Column::enumeration::<SessionType>("课程类型", "sessionType").span(2),
            Column::text("教练", "coach").span(2),
            Column::text("场地", "courtName").span(2),
            Column::enumeration::<ClientType>("学员类型", "clientType").span(2),
            Column::references("学员", "students", directory.clone()).span(3),
            Column::numeric("单人学费", "feePerStudent", "￥", "").span(2),
        ]
    }

    fn filters(directory: &Directory) -> Vec<FilterConfig> {
        vec![
            FilterConfig::multi_select("title", "课程名"),
            FilterConfig::multi_select("coach", "教练"),
            FilterConfig::multi_select("courtName", "场地"),
            FilterConfig::multi_select("students", "学员").with_references(directory.clone()),
            FilterConfig::multi_select("sessionType", "课程类型")
                .with_option_label(label_for::<SessionType>),
            FilterConfig::date("dateTime", "日期"),
            FilterConfig::time("dateTime", "时间").with_key("time"),
        ]
    }

    fn editor_fields(records: &[Self], directory: &Directory) -> Vec<EditorField> {
        let students = directory
            .entries()
            .map(|(id, name)| PickOption::new(id, name))
            .collect();
        vec![
            EditorField::new("课程名称", "title").required(),
            EditorField::new("教练", "coach").required(),
            EditorField::new("时间", "dateTime").required(),
            EditorField::new("课程类型", "sessionType").control(choices::<SessionType>()),
            EditorField::new("学员类型", "clientType").control(choices::<ClientType>()),
            EditorField::new("场地", "courtName"),
            EditorField::new("场地号", "courtNumber"),
            EditorField::new("学员", "students").control(ControlKind::MultiPick(students)),
            EditorField::new("设备", "equipment")
                .control(ControlKind::MultiPick(equipment_options(records))),
            EditorField::new("单人学费", "feePerStudent").control(ControlKind::Numeric {
                integer: false,
                min: Some(0.0),
            }),
        ]
    }

    fn reference_field() -> Option<&'static str> {
        Some("students")
    }

    /// Newest first.
    fn default_order(a: &Self, b: &Self) -> Ordering {
        compare_values(&b.field_value("dateTime"), &a.field_value("dateTime"))
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn card_badge(&self) -> Option<String> {
        Some(format!("学员 ({})", self.total_students()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn equipment_options_are_distinct() {
        let values: Vec<_> = equipment_options(&mock::sessions())
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, ["球拍", "羽毛球", "训练器材", "水"]);
    }

    #[test]
    fn participant_picker_lists_the_roster() {
        let directory = Directory::from_pairs([("c1", "王小明"), ("c2", "李华")]);
        let fields = Session::editor_fields(&mock::sessions(), &directory);
        let students = fields.iter().find(|f| f.field == "students").unwrap();
        assert_eq!(
            students.control,
            Some(ControlKind::MultiPick(vec![
                PickOption::new("c1", "王小明"),
                PickOption::new("c2", "李华"),
            ]))
        );
        // Derived count is never an editor field.
        assert!(fields.iter().all(|f| f.field != "totalStudents"));
    }

    #[test]
    fn card_badge_counts_participants() {
        let sessions = mock::sessions();
        let badges: Vec<_> = sessions.iter().filter_map(Session::card_badge).collect();
        assert_eq!(badges, ["学员 (1)", "学员 (2)", "学员 (3)"]);
    }

    #[test]
    fn every_column_and_filter_names_a_real_field() {
        let sessions = mock::sessions();
        let session = &sessions[0];
        let directory = Directory::new();
        for column in Session::columns(&directory) {
            assert!(!session.field_value(&column.field).is_missing(), "{}", column.field);
        }
        for filter in Session::filters(&directory) {
            assert!(!session.field_value(&filter.field).is_missing(), "{}", filter.field);
        }
    }
}
