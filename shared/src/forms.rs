//! Form buffers: in-place edit buffers for table rows, the session
//! creation draft, and the quick-add student draft.
//!
//! Validation is limited to required-field presence and turning the age
//! text field into a number. Everything else is the server's call.

use thiserror::Error;

use crate::dates::input_date;
use crate::editing::{EditBuffer, EditableRow};
use crate::{
    CreateStudentRequest, Level, Session, SessionPayload, Student, UpdateStudentRequest,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("age must be a whole number, got {0:?}")]
    InvalidAge(String),
    #[error("unknown level {0:?}")]
    UnknownLevel(String),
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Empty means "no age"; anything else must be a non-negative integer.
fn parse_age(raw: &str) -> Result<Option<u32>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| FormError::InvalidAge(trimmed.to_string()))
}

/// Edit buffer for a student row. Age is kept as typed text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentEditBuffer {
    pub name: String,
    pub age: String,
}

impl EditBuffer for StudentEditBuffer {
    type Request = UpdateStudentRequest;

    fn to_request(&self) -> Result<UpdateStudentRequest, FormError> {
        Ok(UpdateStudentRequest {
            name: required(&self.name, "name")?,
            age: parse_age(&self.age)?,
        })
    }
}

/// One edited field of a student row
#[derive(Debug, Clone, PartialEq)]
pub enum StudentField {
    Name(String),
    Age(String),
}

impl StudentEditBuffer {
    pub fn set(&mut self, field: StudentField) {
        match field {
            StudentField::Name(name) => self.name = name,
            StudentField::Age(age) => self.age = age,
        }
    }
}

impl EditableRow for Student {
    type Buffer = StudentEditBuffer;

    fn row_id(&self) -> &str {
        &self.id
    }

    fn edit_buffer(&self) -> StudentEditBuffer {
        StudentEditBuffer {
            name: self.name.clone(),
            age: self.age.map(|age| age.to_string()).unwrap_or_default(),
        }
    }
}

/// Edit buffer for a session row.
///
/// `is_paid` is not editable here but rides along so the full-record PUT
/// does not reset it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionEditBuffer {
    pub student_name: String,
    pub new_lesson: String,
    pub level: Level,
    pub review: String,
    pub review_level: Level,
    /// `YYYY-MM-DD`
    pub date_gregorian: String,
    pub is_paid: bool,
}

impl EditBuffer for SessionEditBuffer {
    type Request = SessionPayload;

    fn to_request(&self) -> Result<SessionPayload, FormError> {
        let date = self.date_gregorian.trim();
        Ok(SessionPayload {
            student_name: required(&self.student_name, "student_name")?,
            new_lesson: self.new_lesson.clone(),
            level: self.level,
            review: self.review.clone(),
            review_level: self.review_level,
            date_gregorian: (!date.is_empty()).then(|| date.to_string()),
            is_paid: Some(self.is_paid),
        })
    }
}

/// One edited field of a session row or draft
#[derive(Debug, Clone, PartialEq)]
pub enum SessionField {
    StudentName(String),
    NewLesson(String),
    Level(Level),
    Review(String),
    ReviewLevel(Level),
    Date(String),
}

impl SessionEditBuffer {
    pub fn set(&mut self, field: SessionField) {
        match field {
            SessionField::StudentName(name) => self.student_name = name,
            SessionField::NewLesson(lesson) => self.new_lesson = lesson,
            SessionField::Level(level) => self.level = level,
            SessionField::Review(review) => self.review = review,
            SessionField::ReviewLevel(level) => self.review_level = level,
            SessionField::Date(date) => self.date_gregorian = date,
        }
    }
}

impl EditableRow for Session {
    type Buffer = SessionEditBuffer;

    fn row_id(&self) -> &str {
        &self.id
    }

    fn edit_buffer(&self) -> SessionEditBuffer {
        SessionEditBuffer {
            student_name: self.student_name.clone(),
            new_lesson: self.new_lesson.clone(),
            level: self.level,
            review: self.review.clone(),
            review_level: self.review_level.unwrap_or_default(),
            date_gregorian: input_date(&self.date_gregorian),
            is_paid: self.is_paid,
        }
    }
}

impl Session {
    /// The row's current values, republished with only the paid flag
    /// flipped. This bypasses any edit buffer on purpose: the toggle acts on
    /// what the server last returned.
    pub fn paid_toggled(&self) -> SessionPayload {
        SessionPayload {
            student_name: self.student_name.clone(),
            new_lesson: self.new_lesson.clone(),
            level: self.level,
            review: self.review.clone(),
            review_level: self.review_level.unwrap_or_default(),
            date_gregorian: Some(self.date_gregorian.clone()),
            is_paid: Some(!self.is_paid),
        }
    }
}

/// Buffer of the "new session" form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionDraft {
    pub student_name: String,
    pub new_lesson: String,
    pub level: Level,
    pub review: String,
    pub review_level: Level,
}

impl SessionDraft {
    /// Draft pre-filled with a student, as used by a student's session log.
    pub fn for_student(student_name: &str) -> Self {
        Self {
            student_name: student_name.to_string(),
            ..Self::default()
        }
    }

    /// Drafts carry no date; a `Date` edit is ignored.
    pub fn set(&mut self, field: SessionField) {
        match field {
            SessionField::StudentName(name) => self.student_name = name,
            SessionField::NewLesson(lesson) => self.new_lesson = lesson,
            SessionField::Level(level) => self.level = level,
            SessionField::Review(review) => self.review = review,
            SessionField::ReviewLevel(level) => self.review_level = level,
            SessionField::Date(_) => {}
        }
    }

    /// Pick the first student when nothing is selected yet.
    pub fn select_default_student(&mut self, students: &[Student]) {
        if self.student_name.is_empty() {
            if let Some(first) = students.first() {
                self.student_name = first.name.clone();
            }
        }
    }

    /// Back to defaults, keeping the selected student so consecutive
    /// sessions for the same student are quick to log.
    pub fn reset_keeping_student(&mut self) {
        *self = Self::for_student(&self.student_name);
    }

    pub fn to_payload(&self) -> Result<SessionPayload, FormError> {
        Ok(SessionPayload {
            student_name: required(&self.student_name, "student_name")?,
            new_lesson: required(&self.new_lesson, "new_lesson")?,
            level: self.level,
            review: required(&self.review, "review")?,
            review_level: self.review_level,
            date_gregorian: None,
            is_paid: None,
        })
    }
}

/// Buffer of the quick-add student sub-form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentDraft {
    pub name: String,
    pub age: String,
}

impl StudentDraft {
    /// `Ok(None)` for a blank name: submitting it is a silent no-op.
    pub fn to_request(&self) -> Result<Option<CreateStudentRequest>, FormError> {
        if self.name.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(CreateStudentRequest {
            name: self.name.trim().to_string(),
            age: parse_age(&self.age)?,
        }))
    }
}

/// Append a freshly created student to the locally held list and select it.
///
/// This is the one place where a fetched collection is patched locally
/// instead of being re-fetched.
pub fn adopt_new_student(students: &mut Vec<Student>, draft: &mut SessionDraft, created: Student) {
    draft.student_name = created.name.clone();
    students.push(created);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(is_paid: bool) -> Session {
        Session {
            id: "s1".to_string(),
            student_name: "أحمد".to_string(),
            date_gregorian: "2025-03-01T00:00:00.000Z".to_string(),
            date_hijri: Some("1 رمضان 1446".to_string()),
            new_lesson: "القلم 1:42".to_string(),
            level: Level::Good,
            review: "الملك".to_string(),
            review_level: Some(Level::Excellent),
            is_paid,
        }
    }

    fn student(name: &str) -> Student {
        Student {
            id: format!("id-{name}"),
            name: name.to_string(),
            age: None,
            session_count: 0,
            unpaid_session_count: 0,
        }
    }

    #[test]
    fn student_buffer_parses_age() {
        let buffer = StudentEditBuffer {
            name: "أحمد".to_string(),
            age: " 12 ".to_string(),
        };
        assert_eq!(buffer.to_request().unwrap().age, Some(12));

        let blank = StudentEditBuffer {
            age: String::new(),
            ..buffer.clone()
        };
        assert_eq!(blank.to_request().unwrap().age, None);

        let negative = StudentEditBuffer {
            age: "-3".to_string(),
            ..buffer
        };
        assert_eq!(
            negative.to_request(),
            Err(FormError::InvalidAge("-3".to_string()))
        );
    }

    #[test]
    fn session_buffer_uses_date_part_and_defaults_review_level() {
        let mut legacy = session(true);
        legacy.review_level = None;

        let buffer = legacy.edit_buffer();
        assert_eq!(buffer.date_gregorian, "2025-03-01");
        assert_eq!(buffer.review_level, Level::Good);
        assert!(buffer.is_paid);
    }

    #[test]
    fn session_buffer_resends_every_field() {
        let mut buffer = session(true).edit_buffer();
        buffer.level = Level::Excellent;

        let payload = buffer.to_request().unwrap();
        assert_eq!(
            payload,
            SessionPayload {
                student_name: "أحمد".to_string(),
                new_lesson: "القلم 1:42".to_string(),
                level: Level::Excellent,
                review: "الملك".to_string(),
                review_level: Level::Excellent,
                date_gregorian: Some("2025-03-01".to_string()),
                is_paid: Some(true),
            }
        );
    }

    #[test]
    fn paid_toggle_only_flips_the_flag() {
        let unpaid = session(false);
        let payload = unpaid.paid_toggled();
        assert_eq!(payload.is_paid, Some(true));
        assert_eq!(payload.new_lesson, unpaid.new_lesson);
        assert_eq!(payload.review, unpaid.review);
        assert_eq!(payload.level, unpaid.level);
        assert_eq!(payload.review_level, Level::Excellent);
        assert_eq!(payload.date_gregorian.as_deref(), Some("2025-03-01T00:00:00.000Z"));

        assert_eq!(session(true).paid_toggled().is_paid, Some(false));
    }

    #[test]
    fn paid_toggle_keeps_the_full_timestamp() {
        let session = Session {
            date_gregorian: "2025-03-01T14:22:05.000Z".to_string(),
            ..session(false)
        };
        assert_eq!(
            session.paid_toggled().date_gregorian.as_deref(),
            Some("2025-03-01T14:22:05.000Z")
        );
    }

    #[test]
    fn field_edits_land_in_the_right_place() {
        let mut buffer = session(false).edit_buffer();
        buffer.set(SessionField::Date("2025-04-02".to_string()));
        buffer.set(SessionField::ReviewLevel(Level::Weak));
        assert_eq!(buffer.date_gregorian, "2025-04-02");
        assert_eq!(buffer.review_level, Level::Weak);
        assert_eq!(buffer.level, Level::Good);

        let mut draft = SessionDraft::for_student("أحمد");
        draft.set(SessionField::NewLesson("النبأ".to_string()));
        draft.set(SessionField::Date("2025-04-02".to_string()));
        assert_eq!(draft.new_lesson, "النبأ");

        let mut student = StudentEditBuffer::default();
        student.set(StudentField::Age("7".to_string()));
        assert_eq!(student.age, "7");
    }

    #[test]
    fn draft_requires_lesson_and_review() {
        let mut draft = SessionDraft::for_student("أحمد");
        assert_eq!(draft.to_payload(), Err(FormError::MissingField("new_lesson")));

        draft.new_lesson = "القلم 1:42".to_string();
        assert_eq!(draft.to_payload(), Err(FormError::MissingField("review")));

        draft.review = "الملك".to_string();
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.level, Level::Good);
        assert_eq!(payload.review_level, Level::Good);
        assert_eq!(payload.date_gregorian, None);
        assert_eq!(payload.is_paid, None);
    }

    #[test]
    fn draft_without_student_is_rejected() {
        let draft = SessionDraft {
            new_lesson: "x".to_string(),
            review: "y".to_string(),
            ..SessionDraft::default()
        };
        assert_eq!(draft.to_payload(), Err(FormError::MissingField("student_name")));
    }

    #[test]
    fn reset_keeps_selected_student_only() {
        let mut draft = SessionDraft {
            student_name: "أحمد".to_string(),
            new_lesson: "القلم".to_string(),
            level: Level::Weak,
            review: "الملك".to_string(),
            review_level: Level::Repeat,
        };
        draft.reset_keeping_student();
        assert_eq!(draft, SessionDraft::for_student("أحمد"));
    }

    #[test]
    fn default_student_is_first_and_never_overrides_a_choice() {
        let students = vec![student("أحمد"), student("بلال")];

        let mut draft = SessionDraft::default();
        draft.select_default_student(&students);
        assert_eq!(draft.student_name, "أحمد");

        let mut chosen = SessionDraft::for_student("بلال");
        chosen.select_default_student(&students);
        assert_eq!(chosen.student_name, "بلال");

        let mut empty = SessionDraft::default();
        empty.select_default_student(&[]);
        assert_eq!(empty.student_name, "");
    }

    #[test]
    fn blank_quick_add_is_a_no_op() {
        let draft = StudentDraft {
            name: "   ".to_string(),
            age: "9".to_string(),
        };
        assert_eq!(draft.to_request(), Ok(None));
    }

    #[test]
    fn quick_add_builds_request() {
        let draft = StudentDraft {
            name: " أحمد ".to_string(),
            age: "10".to_string(),
        };
        assert_eq!(
            draft.to_request(),
            Ok(Some(CreateStudentRequest {
                name: "أحمد".to_string(),
                age: Some(10),
            }))
        );
    }

    #[test]
    fn adopted_student_is_appended_and_selected() {
        let mut students = vec![student("أحمد")];
        let mut draft = SessionDraft::for_student("أحمد");
        draft.new_lesson = "القلم".to_string();

        adopt_new_student(&mut students, &mut draft, student("يوسف"));

        assert_eq!(students.len(), 2);
        assert_eq!(students[1].name, "يوسف");
        assert_eq!(draft.student_name, "يوسف");
        assert_eq!(draft.new_lesson, "القلم");
    }
}
