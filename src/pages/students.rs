use super::Entity;
use crate::editor::{ControlKind, EditorField, PickOption};
use crate::filter::FilterConfig;
use crate::model::{label_for, Directory, Enumerated, Gender, Student};
use crate::table::Column;

fn level_label(value: &str) -> String {
    format!("Lv{}", value)
}

impl Entity for Student {
    const TITLE: &'static str = "学员管理";
    const NOUN: &'static str = "学员";
    const NOT_FOUND: &'static str = "学员不存在";

    fn columns(_directory: &Directory) -> Vec<Column> {
        vec![
            Column::text("姓名", "name").span(2),
            Column::enumeration::<Gender>("性别", "gender").span(1),
            Column::text("生日", "birthday").span(2),
            Column::numeric("等级", "level", "Lv", "").span(1),
            Column::numeric("预存款", "prePay", "￥", "").span(2),
            Column::text("备注", "remark").span(4),
        ]
    }

    fn filters(_directory: &Directory) -> Vec<FilterConfig> {
        vec![
            FilterConfig::multi_select("name", "姓名"),
            FilterConfig::multi_select("gender", "性别").with_option_label(label_for::<Gender>),
            FilterConfig::multi_select("level", "等级").with_option_label(level_label),
        ]
    }

    fn editor_fields(_records: &[Self], _directory: &Directory) -> Vec<EditorField> {
        let genders = Gender::ALL
            .iter()
            .map(|g| PickOption::new(g.code(), g.label()))
            .collect();
        vec![
            EditorField::new("姓名", "name").required(),
            EditorField::new("性别", "gender").control(ControlKind::Choice(genders)),
            EditorField::new("生日", "birthday"),
            EditorField::new("等级", "level").control(ControlKind::Numeric {
                integer: true,
                min: Some(0.0),
            }),
            EditorField::new("预存款", "prePay").control(ControlKind::Numeric {
                integer: false,
                min: Some(0.0),
            }),
            EditorField::new("备注", "remark"),
        ]
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterEngine;
    use crate::mock;

    #[test]
    fn level_options_read_as_lv() {
        let engine = FilterEngine::new(Student::filters(&Directory::new()));
        let labels: Vec<_> = engine
            .options(&mock::students(), "level")
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, ["Lv2", "Lv1", "Lv3"]);
    }

    #[test]
    fn birthday_uses_plain_text_input() {
        let fields = Student::editor_fields(&[], &Directory::new());
        let birthday = fields.iter().find(|f| f.field == "birthday").unwrap();
        let student = Student::default();
        assert_eq!(
            birthday.resolve_control(&crate::model::Record::field_value(&student, "birthday")),
            ControlKind::Text
        );
    }
}
