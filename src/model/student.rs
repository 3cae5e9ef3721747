use serde::Serialize;

use super::value::{enum_value, number_value, text_value};
use super::{EditValue, Enumerated, FieldValue, ModelError, Record, RecordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Enumerated for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn code(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
        }
    }
}

/// A session a student has paid for.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub session_id: String,
    /// Multiplier applied to the session fee (1.0 = full price).
    pub discount: f64,
    pub voucher_id: String,
}

/// A student on the roster.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub birthday: String,
    pub level: u32,
    pub pre_pay: f64,
    pub pre_pay_voucher_id: String,
    pub paid_sessions: Vec<Receipt>,
    pub remark: String,
}

impl Record for Student {
    const KIND: RecordKind = RecordKind::Student;

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
            "name" => FieldValue::Text(&self.name),
            "gender" => FieldValue::Text(self.gender.code()),
            "birthday" => FieldValue::Text(&self.birthday),
            "level" => FieldValue::Number(f64::from(self.level)),
            "prePay" => FieldValue::Number(self.pre_pay),
            "prePayVoucherId" => FieldValue::Text(&self.pre_pay_voucher_id),
            "paidSessions" => FieldValue::List(
                self.paid_sessions
                    .iter()
                    .map(|r| r.session_id.as_str())
                    .collect(),
            ),
            "remark" => FieldValue::Text(&self.remark),
            _ => FieldValue::Missing,
        }
    }

    fn set_field(&mut self, field: &str, value: EditValue) -> Result<(), ModelError> {
        match field {
            "id" | "paidSessions" => return Err(ModelError::read_only(field)),
            "name" => self.name = text_value(field, value)?,
            "gender" => self.gender = enum_value(field, value)?,
            "birthday" => self.birthday = text_value(field, value)?,
            "level" => {
                let level = number_value(field, value)?;
                self.level = level.max(0.0).round().min(f64::from(u32::MAX)) as u32;
            }
            "prePay" => self.pre_pay = number_value(field, value)?.max(0.0),
            "prePayVoucherId" => self.pre_pay_voucher_id = text_value(field, value)?,
            "remark" => self.remark = text_value(field, value)?,
            _ => return Err(ModelError::unknown(Self::KIND, field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_and_prepay_never_go_negative() {
        let mut student = Student::blank();
        student.set_field("level", EditValue::Number(-3.0)).unwrap();
        assert_eq!(student.level, 0);
        student.set_field("level", EditValue::Number(2.6)).unwrap();
        assert_eq!(student.level, 3);
        student.set_field("prePay", EditValue::Number(-50.0)).unwrap();
        assert_eq!(student.pre_pay, 0.0);
    }

    #[test]
    fn gender_reads_as_code() {
        let mut student = Student::blank();
        assert_eq!(student.field_value("gender"), FieldValue::Text("male"));
        student
            .set_field("gender", EditValue::Text("女".into()))
            .unwrap();
        assert_eq!(student.gender, Gender::Female);
        assert_eq!(student.field_value("gender"), FieldValue::Text("female"));
    }

    #[test]
    fn receipts_are_read_only() {
        let mut student = Student {
            paid_sessions: vec![Receipt {
                session_id: "1".into(),
                discount: 1.0,
                voucher_id: String::new(),
            }],
            ..Student::blank()
        };
        assert_eq!(student.field_value("paidSessions"), FieldValue::List(vec!["1"]));
        assert!(student
            .set_field("paidSessions", EditValue::List(vec![]))
            .is_err());
    }

    #[test]
    fn serializes_gender_lowercase() {
        let json = serde_json::to_value(Student::blank()).unwrap();
        assert_eq!(json["gender"], "male");
        assert_eq!(json["prePay"], 0.0);
    }
}
