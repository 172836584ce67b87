//! In-memory stand-in for the Iqra REST server, used to run the table and
//! form state machines through full request/re-fetch cycles.

use crate::editing::{EditableTable, TableAction};
use crate::{
    CreateStudentRequest, Session, SessionPayload, Student, UpdateStudentRequest,
};

const TODAY: &str = "2025-03-01";

#[derive(Default)]
pub struct FakeServer {
    students: Vec<Student>,
    sessions: Vec<Session>,
    next_id: u32,
    /// Every call counts, reads included
    pub requests: usize,
}

impl FakeServer {
    fn id(&mut self) -> String {
        self.next_id += 1;
        format!("{:024x}", self.next_id)
    }

    pub fn create_student(&mut self, request: CreateStudentRequest) -> Student {
        self.requests += 1;
        let student = Student {
            id: self.id(),
            name: request.name,
            age: request.age,
            session_count: 0,
            unpaid_session_count: 0,
        };
        self.students.push(student.clone());
        student
    }

    pub fn list_students(&mut self) -> Vec<Student> {
        self.requests += 1;
        self.students
            .iter()
            .map(|student| {
                let owned = self
                    .sessions
                    .iter()
                    .filter(|session| session.student_name == student.name);
                Student {
                    session_count: owned.clone().count() as u32,
                    unpaid_session_count: owned.filter(|session| !session.is_paid).count() as u32,
                    ..student.clone()
                }
            })
            .collect()
    }

    pub fn update_student(&mut self, id: &str, request: UpdateStudentRequest) {
        self.requests += 1;
        if let Some(student) = self.students.iter_mut().find(|student| student.id == id) {
            student.name = request.name;
            student.age = request.age;
        }
    }

    pub fn delete_student(&mut self, id: &str) {
        self.requests += 1;
        if let Some(position) = self.students.iter().position(|student| student.id == id) {
            let removed = self.students.remove(position);
            self.sessions
                .retain(|session| session.student_name != removed.name);
        }
    }

    pub fn create_session(&mut self, payload: SessionPayload) -> Session {
        self.requests += 1;
        let session = Session {
            id: self.id(),
            student_name: payload.student_name,
            date_gregorian: payload
                .date_gregorian
                .unwrap_or_else(|| format!("{TODAY}T00:00:00.000Z")),
            date_hijri: Some("1 رمضان 1446".to_string()),
            new_lesson: payload.new_lesson,
            level: payload.level,
            review: payload.review,
            review_level: Some(payload.review_level),
            is_paid: payload.is_paid.unwrap_or(false),
        };
        self.sessions.push(session.clone());
        session
    }

    pub fn sessions_of(&mut self, student_name: &str) -> Vec<Session> {
        self.requests += 1;
        self.sessions
            .iter()
            .filter(|session| session.student_name == student_name)
            .cloned()
            .collect()
    }

    /// Full replace, as `PUT /session/{id}` does
    pub fn update_session(&mut self, id: &str, payload: SessionPayload) {
        self.requests += 1;
        if let Some(session) = self.sessions.iter_mut().find(|session| session.id == id) {
            session.student_name = payload.student_name;
            session.new_lesson = payload.new_lesson;
            session.level = payload.level;
            session.review = payload.review;
            session.review_level = Some(payload.review_level);
            if let Some(date) = payload.date_gregorian {
                // Bare input dates are stored at midnight, full timestamps as sent
                session.date_gregorian = if date.contains('T') {
                    date
                } else {
                    format!("{date}T00:00:00.000Z")
                };
            }
            session.is_paid = payload.is_paid.unwrap_or(false);
        }
    }

    pub fn delete_session(&mut self, id: &str) {
        self.requests += 1;
        self.sessions.retain(|session| session.id != id);
    }
}

/// Fetch cycle the views run on mount and after every successful mutation
pub fn refetch_students(server: &mut FakeServer, table: &mut EditableTable<Student>) {
    table.apply(TableAction::FetchStarted);
    table.apply(TableAction::Loaded(server.list_students()));
}

pub fn refetch_log(server: &mut FakeServer, name: &str, table: &mut EditableTable<Session>) {
    table.apply(TableAction::FetchStarted);
    table.apply(TableAction::Loaded(server.sessions_of(name)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Level, SessionDraft, SessionEditBuffer, StudentDraft};

    fn ahmad() -> CreateStudentRequest {
        StudentDraft {
            name: "أحمد".to_string(),
            age: "10".to_string(),
        }
        .to_request()
        .unwrap()
        .unwrap()
    }

    fn first_session_draft() -> SessionDraft {
        SessionDraft {
            student_name: "أحمد".to_string(),
            new_lesson: "القلم 1:42".to_string(),
            level: Level::Good,
            review: "الملك".to_string(),
            review_level: Level::Good,
        }
    }

    #[test]
    fn created_student_is_listed_once_with_zero_sessions() {
        let mut server = FakeServer::default();
        let mut table = EditableTable::new();

        server.create_student(ahmad());
        refetch_students(&mut server, &mut table);

        let matching: Vec<_> = table.rows().iter().filter(|s| s.name == "أحمد").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].age, Some(10));
        assert_eq!(matching[0].session_count, 0);
    }

    #[test]
    fn created_session_appears_in_student_log() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());

        let mut draft = first_session_draft();
        server.create_session(draft.to_payload().unwrap());
        draft.reset_keeping_student();
        assert_eq!(draft.student_name, "أحمد");
        assert!(draft.new_lesson.is_empty());

        let mut log = EditableTable::new();
        refetch_log(&mut server, "أحمد", &mut log);

        assert_eq!(log.rows().len(), 1);
        let session = &log.rows()[0];
        assert_eq!(session.student_name, "أحمد");
        assert_eq!(session.new_lesson, "القلم 1:42");
        assert_eq!(session.level, Level::Good);
        assert_eq!(session.review, "الملك");
        assert_eq!(session.review_level, Some(Level::Good));
        assert!(!session.id.is_empty());
        assert!(!session.date_gregorian.is_empty());
    }

    #[test]
    fn level_update_changes_nothing_else() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        server.create_session(first_session_draft().to_payload().unwrap());

        let mut log = EditableTable::new();
        refetch_log(&mut server, "أحمد", &mut log);
        let before = log.rows()[0].clone();

        log.apply(TableAction::BeginEdit(before.id.clone()));
        log.apply(TableAction::ModifyBuffer(Box::new(|buffer: &mut SessionEditBuffer| {
            buffer.level = Level::Excellent;
        })));
        let (id, payload) = log.pending_save().unwrap();
        server.update_session(&id, payload);
        log.apply(TableAction::SaveSucceeded(id));
        refetch_log(&mut server, "أحمد", &mut log);

        let after = &log.rows()[0];
        assert_eq!(after.level, Level::Excellent);
        assert_eq!(
            Session {
                level: before.level,
                ..after.clone()
            },
            before
        );
        assert!(log.editing().is_none());
    }

    #[test]
    fn paid_toggle_round_trip_preserves_other_fields() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        server.create_session(first_session_draft().to_payload().unwrap());

        let mut log = EditableTable::new();
        refetch_log(&mut server, "أحمد", &mut log);
        let before = log.rows()[0].clone();

        server.update_session(&before.id, before.paid_toggled());
        refetch_log(&mut server, "أحمد", &mut log);

        let after = &log.rows()[0];
        assert!(after.is_paid);
        assert_eq!(
            Session {
                is_paid: false,
                ..after.clone()
            },
            before
        );

        let mut students = EditableTable::new();
        refetch_students(&mut server, &mut students);
        assert_eq!(students.rows()[0].unpaid_session_count, 0);
        assert_eq!(students.rows()[0].session_count, 1);
    }

    #[test]
    fn paid_toggle_keeps_the_session_time() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        let mut payload = first_session_draft().to_payload().unwrap();
        payload.date_gregorian = Some("2025-03-01T14:22:05.000Z".to_string());
        server.create_session(payload);

        let mut log = EditableTable::new();
        refetch_log(&mut server, "أحمد", &mut log);
        let before = log.rows()[0].clone();
        server.update_session(&before.id, before.paid_toggled());
        refetch_log(&mut server, "أحمد", &mut log);

        assert!(log.rows()[0].is_paid);
        assert_eq!(log.rows()[0].date_gregorian, "2025-03-01T14:22:05.000Z");
    }

    #[test]
    fn closing_the_log_issues_no_requests() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        server.create_session(first_session_draft().to_payload().unwrap());
        let mut students = EditableTable::new();
        refetch_students(&mut server, &mut students);

        let mut log = EditableTable::new();
        refetch_log(&mut server, "أحمد", &mut log);
        let id = log.rows()[0].id.clone();
        log.apply(TableAction::BeginEdit(id));
        let requests = server.requests;
        drop(log);

        assert_eq!(server.requests, requests);
        assert_eq!(students.rows()[0].session_count, 1);
    }

    #[test]
    fn cancel_and_declined_delete_issue_no_requests() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        let mut table = EditableTable::new();
        refetch_students(&mut server, &mut table);
        let id = table.rows()[0].id.clone();
        let requests = server.requests;

        table.apply(TableAction::BeginEdit(id.clone()));
        table.apply(TableAction::ModifyBuffer(Box::new(|buffer: &mut crate::StudentEditBuffer| {
            buffer.name = "غيره".to_string();
        })));
        table.apply(TableAction::CancelEdit);

        if let Some(target) = table.delete_target(&id, || false) {
            server.delete_student(&target);
        }

        assert_eq!(server.requests, requests);
        assert_eq!(table.rows()[0].name, "أحمد");
    }

    #[test]
    fn deleted_session_leaves_the_log_after_refetch() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        server.create_session(first_session_draft().to_payload().unwrap());
        let mut log = EditableTable::new();
        refetch_log(&mut server, "أحمد", &mut log);
        let id = log.rows()[0].id.clone();

        let target = log.delete_target(&id, || true).unwrap();
        server.delete_session(&target);
        refetch_log(&mut server, "أحمد", &mut log);

        assert!(log.rows().is_empty());
        assert!(!log.is_loading());
    }

    #[test]
    fn renaming_a_student_detaches_old_sessions() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        server.create_session(first_session_draft().to_payload().unwrap());
        let mut table = EditableTable::new();
        refetch_students(&mut server, &mut table);
        let id = table.rows()[0].id.clone();

        table.apply(TableAction::BeginEdit(id));
        table.apply(TableAction::ModifyBuffer(Box::new(|buffer: &mut crate::StudentEditBuffer| {
            buffer.name = "أحمد علي".to_string();
        })));
        let (id, request) = table.pending_save().unwrap();
        server.update_student(&id, request);
        table.apply(TableAction::SaveSucceeded(id));
        refetch_students(&mut server, &mut table);

        assert_eq!(table.rows()[0].name, "أحمد علي");
        assert_eq!(table.rows()[0].age, Some(10));
        assert_eq!(table.rows()[0].session_count, 0);
        assert_eq!(server.sessions_of("أحمد").len(), 1);
    }

    #[test]
    fn confirmed_student_delete_cascades_on_the_server() {
        let mut server = FakeServer::default();
        server.create_student(ahmad());
        server.create_session(first_session_draft().to_payload().unwrap());
        let mut table = EditableTable::new();
        refetch_students(&mut server, &mut table);
        let id = table.rows()[0].id.clone();

        let target = table.delete_target(&id, || true).unwrap();
        server.delete_student(&target);
        refetch_students(&mut server, &mut table);

        assert!(table.rows().is_empty());
        assert!(server.sessions_of("أحمد").is_empty());
    }
}
