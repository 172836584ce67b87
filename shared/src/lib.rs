use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod dates;
pub mod editing;
pub mod forms;
pub mod reports;
pub mod routes;

#[cfg(test)]
mod fake_server;

pub use editing::{EditBuffer, EditError, EditableRow, EditableTable, TableAction};
pub use forms::{
    adopt_new_student, FormError, SessionDraft, SessionEditBuffer, SessionField, StudentDraft,
    StudentEditBuffer, StudentField,
};
pub use reports::{ReportKind, ReportTracker};
pub use routes::{Access, Page};

/// Grade given to a piece of recited material.
///
/// The same closed set is used for the new memorization and for the review.
/// On the wire each level is its Arabic label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Level {
    #[serde(rename = "إعادة")]
    Repeat,
    #[serde(rename = "⏳ انتظار")]
    Pending,
    #[serde(rename = "ممتاز")]
    Excellent,
    #[serde(rename = "جيد جدا")]
    VeryGood,
    #[default]
    #[serde(rename = "جيد")]
    Good,
    #[serde(rename = "مقبول")]
    Acceptable,
    #[serde(rename = "ضعيف")]
    Weak,
}

impl Level {
    /// All levels in the order they are offered in selects.
    pub const ALL: [Level; 7] = [
        Level::Repeat,
        Level::Pending,
        Level::Excellent,
        Level::VeryGood,
        Level::Good,
        Level::Acceptable,
        Level::Weak,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Level::Repeat => "إعادة",
            Level::Pending => "⏳ انتظار",
            Level::Excellent => "ممتاز",
            Level::VeryGood => "جيد جدا",
            Level::Good => "جيد",
            Level::Acceptable => "مقبول",
            Level::Weak => "ضعيف",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.label() == s)
            .ok_or_else(|| FormError::UnknownLevel(s.to_string()))
    }
}

/// Raised when a server record carries no usable id
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record has neither id nor _id")]
    MissingId,
}

/// Some records carry `id`, some `_id`, some both with the same value
fn record_id(id: Option<String>, mongo_id: Option<String>) -> Result<String, RecordError> {
    id.or(mongo_id).ok_or(RecordError::MissingId)
}

/// A student as returned by `GET /students`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStudent")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    /// Computed by the server
    #[serde(default)]
    pub session_count: u32,
    /// Computed by the server
    #[serde(default)]
    pub unpaid_session_count: u32,
}

#[derive(Deserialize)]
struct RawStudent {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    name: String,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    session_count: u32,
    #[serde(default)]
    unpaid_session_count: u32,
}

impl TryFrom<RawStudent> for Student {
    type Error = RecordError;

    fn try_from(raw: RawStudent) -> Result<Self, Self::Error> {
        Ok(Student {
            id: record_id(raw.id, raw.mongo_id)?,
            name: raw.name,
            age: raw.age,
            session_count: raw.session_count,
            unpaid_session_count: raw.unpaid_session_count,
        })
    }
}

/// Request body for `POST /students`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub age: Option<u32>,
}

/// Request body for `PUT /students/{id}` (full replace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: String,
    pub age: Option<u32>,
}

/// One logged memorization/review meeting.
///
/// `student_name` is a join by name, not by id: renaming a student on the
/// server leaves older sessions pointing at the old name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct Session {
    pub id: String,
    pub student_name: String,
    /// ISO 8601 date or timestamp
    pub date_gregorian: String,
    /// Server-computed, display only
    #[serde(default)]
    pub date_hijri: Option<String>,
    pub new_lesson: String,
    pub level: Level,
    pub review: String,
    /// Older records may not carry a review level
    #[serde(default)]
    pub review_level: Option<Level>,
    #[serde(default)]
    pub is_paid: bool,
}

#[derive(Deserialize)]
struct RawSession {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    student_name: String,
    date_gregorian: String,
    #[serde(default)]
    date_hijri: Option<String>,
    new_lesson: String,
    level: Level,
    review: String,
    #[serde(default)]
    review_level: Option<Level>,
    #[serde(default)]
    is_paid: bool,
}

impl TryFrom<RawSession> for Session {
    type Error = RecordError;

    fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
        Ok(Session {
            id: record_id(raw.id, raw.mongo_id)?,
            student_name: raw.student_name,
            date_gregorian: raw.date_gregorian,
            date_hijri: raw.date_hijri,
            new_lesson: raw.new_lesson,
            level: raw.level,
            review: raw.review,
            review_level: raw.review_level,
            is_paid: raw.is_paid,
        })
    }
}

/// Full session record sent by `POST /session` and `PUT /session/{id}`.
///
/// Updates are full-record replaces, so every field the client knows is
/// always present. `date_gregorian` is left out on creation so the server
/// stamps the current date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub student_name: String,
    pub new_lesson: String,
    pub level: Level,
    pub review: String,
    pub review_level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_gregorian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_paid: Option<bool>,
}

/// Request body for `POST /login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from `POST /login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn level_uses_arabic_labels_on_the_wire() {
        assert_eq!(serde_json::to_value(Level::VeryGood).unwrap(), json!("جيد جدا"));
        assert_eq!(serde_json::to_value(Level::Pending).unwrap(), json!("⏳ انتظار"));
        let level: Level = serde_json::from_value(json!("ضعيف")).unwrap();
        assert_eq!(level, Level::Weak);
    }

    #[test]
    fn level_defaults_to_good() {
        assert_eq!(Level::default(), Level::Good);
        assert_eq!(Level::default().to_string(), "جيد");
    }

    #[test]
    fn level_parses_every_label() {
        for level in Level::ALL {
            assert_eq!(level.label().parse::<Level>().unwrap(), level);
        }
        assert!("excellent".parse::<Level>().is_err());
    }

    #[test]
    fn session_accepts_mongo_style_id_and_missing_optionals() {
        let session: Session = serde_json::from_value(json!({
            "_id": "65f1",
            "student_name": "أحمد",
            "date_gregorian": "2025-03-01T00:00:00.000Z",
            "new_lesson": "القلم 1:42",
            "level": "جيد",
            "review": "الملك"
        }))
        .unwrap();

        assert_eq!(session.id, "65f1");
        assert_eq!(session.review_level, None);
        assert_eq!(session.date_hijri, None);
        assert!(!session.is_paid);
    }

    #[test]
    fn student_counters_default_to_zero() {
        let student: Student =
            serde_json::from_value(json!({"id": "1", "name": "أحمد", "age": 10})).unwrap();
        assert_eq!(student.age, Some(10));
        assert_eq!(student.session_count, 0);
        assert_eq!(student.unpaid_session_count, 0);
    }

    #[test]
    fn student_accepts_both_id_keys_together() {
        let student: Student = serde_json::from_value(json!({
            "_id": "65f1",
            "id": "65f1",
            "name": "أحمد",
            "age": 10
        }))
        .unwrap();
        assert_eq!(student.id, "65f1");
        assert_eq!(student.name, "أحمد");

        let student: Student =
            serde_json::from_value(json!({"_id": "65f2", "name": "بلال"})).unwrap();
        assert_eq!(student.id, "65f2");
        assert_eq!(serde_json::to_value(&student).unwrap()["id"], json!("65f2"));
    }

    #[test]
    fn session_accepts_both_id_keys_together() {
        let session: Session = serde_json::from_value(json!({
            "_id": "65f1",
            "id": "65f1",
            "student_name": "أحمد",
            "date_gregorian": "2025-03-01T00:00:00.000Z",
            "new_lesson": "القلم 1:42",
            "level": "جيد",
            "review": "الملك"
        }))
        .unwrap();
        assert_eq!(session.id, "65f1");
    }

    #[test]
    fn record_without_any_id_is_rejected() {
        let result = serde_json::from_value::<Student>(json!({"name": "أحمد"}));
        let error = result.unwrap_err().to_string();
        assert!(error.contains("neither id nor _id"), "{error}");
    }

    #[test]
    fn creation_payload_omits_date_and_paid_flag() {
        let payload = SessionPayload {
            student_name: "أحمد".to_string(),
            new_lesson: "القلم 1:42".to_string(),
            level: Level::Good,
            review: "الملك".to_string(),
            review_level: Level::Good,
            date_gregorian: None,
            is_paid: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("date_gregorian").is_none());
        assert!(value.get("is_paid").is_none());
        assert_eq!(value["level"], json!("جيد"));
    }
}
