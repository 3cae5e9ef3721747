// Seed data: the roster and schedule every page starts from.
//
// Sessions reference students by id; names resolve through the student
// page's directory, so renaming a student shows up in the session list.

use crate::model::{ClientType, Gender, Receipt, Session, SessionType, Student};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three scheduled sessions, in store order.
pub fn sessions() -> Vec<Session> {
    vec![
        session(
            "1",
            "2025-05-28T14:35:00",
            "羽毛球基础入门",
            "李教练",
            SessionType::OneOnOne,
            &["球拍", "羽毛球"],
            ("中心球场", "A1"),
            100.0,
        )
        .with_students(["c1"]),
        session(
            "2",
            "2025-05-29T09:00:00",
            "高级杀球技巧",
            "张教练",
            SessionType::OneOnTwo,
            &["球拍", "羽毛球", "训练器材"],
            ("2号场", "B2"),
            120.0,
        )
        .with_students(["c3", "c4"]),
        session(
            "3",
            "2025-05-30T18:00:00",
            "团体训练课",
            "王教练",
            SessionType::Group,
            &["球拍", "羽毛球", "水"],
            ("3号场", "C3"),
            80.0,
        )
        .with_students(["c5", "c6", "c7"]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn session(
    id: &str,
    date_time: &str,
    title: &str,
    coach: &str,
    session_type: SessionType,
    equipment: &[&str],
    (court_name, court_number): (&str, &str),
    fee_per_student: f64,
) -> Session {
    let mut session = Session::default();
    session.id = id.into();
    session.date_time = date_time.into();
    session.title = title.into();
    session.coach = coach.into();
    session.session_type = session_type;
    session.equipment = strings(equipment);
    session.client_type = ClientType::Youth;
    session.court_name = court_name.into();
    session.court_number = court_number.into();
    session.fee_per_student = fee_per_student;
    session
}

fn student(id: &str, name: &str, gender: Gender, birthday: &str, level: u32) -> Student {
    Student {
        id: id.into(),
        name: name.into(),
        gender,
        birthday: birthday.into(),
        level,
        ..Student::default()
    }
}

fn receipt(session_id: &str) -> Receipt {
    Receipt {
        session_id: session_id.into(),
        discount: 1.0,
        voucher_id: String::new(),
    }
}

/// The roster. `c2` is on file but not enrolled in any session.
pub fn students() -> Vec<Student> {
    vec![
        Student {
            pre_pay: 500.0,
            paid_sessions: vec![receipt("1")],
            remark: "周末优先".into(),
            ..student("c1", "王小明", Gender::Male, "1997-03-12", 2)
        },
        Student {
            pre_pay: 0.0,
            remark: "试课".into(),
            ..student("c2", "李华", Gender::Female, "2012-09-01", 1)
        },
        Student {
            pre_pay: 1200.0,
            pre_pay_voucher_id: "V-2025-031".into(),
            paid_sessions: vec![receipt("2")],
            ..student("c3", "张三", Gender::Male, "1993-07-21", 3)
        },
        Student {
            pre_pay: 300.0,
            paid_sessions: vec![receipt("2")],
            ..student("c4", "李四", Gender::Male, "1995-11-05", 2)
        },
        Student {
            pre_pay: 800.0,
            paid_sessions: vec![receipt("3")],
            ..student("c5", "王五", Gender::Male, "1990-01-30", 2)
        },
        Student {
            paid_sessions: vec![Receipt {
                discount: 0.8,
                ..receipt("3")
            }],
            ..student("c6", "赵六", Gender::Male, "1997-06-18", 1)
        },
        Student {
            pre_pay: 200.0,
            paid_sessions: vec![receipt("3")],
            remark: "需要借拍".into(),
            ..student("c7", "钱七", Gender::Female, "1999-04-09", 1)
        },
    ]
}
