use serde::Serialize;

use super::value::{enum_value, list_value, number_value, text_value};
use super::{EditValue, Enumerated, FieldValue, ModelError, Record, RecordKind, Tone};

/// Course format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SessionType {
    #[default]
    #[serde(rename = "一对一")]
    OneOnOne,
    #[serde(rename = "一对二")]
    OneOnTwo,
    #[serde(rename = "一对多")]
    Group,
    #[serde(rename = "夏令营")]
    SummerCamp,
    #[serde(rename = "开放式团课")]
    OpenClass,
}

impl Enumerated for SessionType {
    const ALL: &'static [Self] = &[
        SessionType::OneOnOne,
        SessionType::OneOnTwo,
        SessionType::Group,
        SessionType::SummerCamp,
        SessionType::OpenClass,
    ];

    fn code(self) -> &'static str {
        self.label()
    }

    fn label(self) -> &'static str {
        match self {
            SessionType::OneOnOne => "一对一",
            SessionType::OneOnTwo => "一对二",
            SessionType::Group => "一对多",
            SessionType::SummerCamp => "夏令营",
            SessionType::OpenClass => "开放式团课",
        }
    }

    fn tone(self) -> Tone {
        match self {
            SessionType::OneOnOne => Tone::Blue,
            SessionType::OneOnTwo => Tone::Green,
            SessionType::Group => Tone::Yellow,
            SessionType::SummerCamp => Tone::Pink,
            SessionType::OpenClass => Tone::Purple,
        }
    }
}

/// Audience of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ClientType {
    #[default]
    #[serde(rename = "青少年")]
    Youth,
    #[serde(rename = "成人")]
    Adult,
}

impl Enumerated for ClientType {
    const ALL: &'static [Self] = &[ClientType::Youth, ClientType::Adult];

    fn code(self) -> &'static str {
        self.label()
    }

    fn label(self) -> &'static str {
        match self {
            ClientType::Youth => "青少年",
            ClientType::Adult => "成人",
        }
    }

    fn tone(self) -> Tone {
        match self {
            ClientType::Youth => Tone::Cyan,
            ClientType::Adult => Tone::Orange,
        }
    }
}

/// A scheduled coaching session.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub title: String,
    pub coach: String,
    /// Local timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub date_time: String,
    pub session_type: SessionType,
    pub equipment: Vec<String>,
    pub client_type: ClientType,
    pub court_name: String,
    pub court_number: String,
    /// Student ids, in enrollment order.
    students: Vec<String>,
    total_students: usize,
    pub fee_per_student: f64,
}

impl Session {
    #[cfg(test)]
    pub fn students(&self) -> &[String] {
        &self.students
    }

    pub fn total_students(&self) -> usize {
        self.total_students
    }

    /// Replace the participant list, keeping the count in step.
    pub fn set_students(&mut self, students: Vec<String>) {
        self.total_students = students.len();
        self.students = students;
    }

    /// Builder-style variant of [`set_students`](Self::set_students).
    pub fn with_students<I, S>(mut self, students: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_students(students.into_iter().map(Into::into).collect());
        self
    }
}

impl Record for Session {
    const KIND: RecordKind = RecordKind::Session;

    fn blank() -> Self {
        Self::default()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "id" => FieldValue::Text(&self.id),
            "title" => FieldValue::Text(&self.title),
            "coach" => FieldValue::Text(&self.coach),
            "dateTime" => FieldValue::Text(&self.date_time),
            "sessionType" => FieldValue::Text(self.session_type.code()),
            "equipment" => FieldValue::List(self.equipment.iter().map(String::as_str).collect()),
            "clientType" => FieldValue::Text(self.client_type.code()),
            "courtName" => FieldValue::Text(&self.court_name),
            "courtNumber" => FieldValue::Text(&self.court_number),
            "students" => FieldValue::List(self.students.iter().map(String::as_str).collect()),
            "totalStudents" => FieldValue::Number(self.total_students as f64),
            "feePerStudent" => FieldValue::Number(self.fee_per_student),
            _ => FieldValue::Missing,
        }
    }

    fn set_field(&mut self, field: &str, value: EditValue) -> Result<(), ModelError> {
        match field {
            "id" | "totalStudents" => return Err(ModelError::read_only(field)),
            "title" => self.title = text_value(field, value)?,
            "coach" => self.coach = text_value(field, value)?,
            "dateTime" => self.date_time = text_value(field, value)?,
            "sessionType" => self.session_type = enum_value(field, value)?,
            "equipment" => self.equipment = list_value(field, value)?,
            "clientType" => self.client_type = enum_value(field, value)?,
            "courtName" => self.court_name = text_value(field, value)?,
            "courtNumber" => self.court_number = text_value(field, value)?,
            "students" => self.set_students(list_value(field, value)?),
            "feePerStudent" => self.fee_per_student = number_value(field, value)?,
            _ => return Err(ModelError::unknown(Self::KIND, field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_edits_keep_count_in_step() {
        let mut session = Session::blank().with_students(["s1", "s2"]);
        assert_eq!(session.total_students(), 2);

        session
            .set_field(
                "students",
                EditValue::List(vec!["s1".into(), "s2".into(), "s3".into()]),
            )
            .unwrap();
        assert_eq!(session.total_students(), 3);
        assert_eq!(session.field_value("totalStudents"), FieldValue::Number(3.0));

        session.set_field("students", EditValue::List(vec![])).unwrap();
        assert_eq!(session.total_students(), 0);
    }

    #[test]
    fn derived_and_identity_fields_are_read_only() {
        let mut session = Session::blank();
        assert_eq!(
            session.set_field("totalStudents", EditValue::Number(9.0)),
            Err(ModelError::read_only("totalStudents"))
        );
        assert!(session.set_field("id", EditValue::Text("x".into())).is_err());
    }

    #[test]
    fn unknown_fields_read_missing_and_fail_to_write() {
        let mut session = Session::blank();
        assert!(session.field_value("nope").is_missing());
        assert!(matches!(
            session.set_field("nope", EditValue::Text("x".into())),
            Err(ModelError::UnknownField { .. })
        ));
    }

    #[test]
    fn enumerations_accept_labels_only_from_the_set() {
        let mut session = Session::blank();
        session
            .set_field("sessionType", EditValue::Text("夏令营".into()))
            .unwrap();
        assert_eq!(session.session_type, SessionType::SummerCamp);
        assert!(session
            .set_field("sessionType", EditValue::Text("私教".into()))
            .is_err());
    }

    #[test]
    fn fee_coerces_text_input() {
        let mut session = Session::blank();
        session
            .set_field("feePerStudent", EditValue::Text("abc".into()))
            .unwrap();
        assert_eq!(session.fee_per_student, 0.0);
        session
            .set_field("feePerStudent", EditValue::Number(120.0))
            .unwrap();
        assert_eq!(session.fee_per_student, 120.0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let session = Session {
            id: "1".into(),
            date_time: "2025-05-28T14:35:00".into(),
            fee_per_student: 100.0,
            ..Session::blank()
        }
        .with_students(["s1"]);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["dateTime"], "2025-05-28T14:35:00");
        assert_eq!(json["totalStudents"], 1);
        assert_eq!(json["sessionType"], "一对一");
        assert_eq!(json["clientType"], "青少年");
    }
}
