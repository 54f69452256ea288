// Integration tests for role gating, forms and the key-driven app

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gradebook::auth::{Authenticator, FixedCredentials, Role};
use gradebook::records::{RecordError, Store};
use gradebook::session::{Action, Outcome, Session};
use gradebook::snapshot::{Detached, Persistence, SnapshotFile};
use gradebook::ui::forms::{Form, FormKind};
use gradebook::ui::panes::MessageKind;
use gradebook::ui::App;

fn detached_session(role: Role) -> Session {
    Session::new(Store::default(), role, Box::new(Detached))
}

fn create_class(name: &str, capacity: i32) -> Action {
    Action::CreateClass {
        name: name.to_string(),
        capacity,
    }
}

fn create_student(name: &str, ra: &str, class_id: u32) -> Action {
    Action::CreateStudent {
        name: name.to_string(),
        registration_id: ra.to_string(),
        class_id,
    }
}

fn form_with(kind: FormKind, values: &[&str]) -> Form {
    let mut form = Form::new(kind);
    for (slot, value) in form.values.iter_mut().zip(values) {
        *slot = value.to_string();
    }
    form
}

#[test]
fn test_builtin_credentials() {
    let auth = FixedCredentials::builtin();
    assert_eq!(auth.len(), 3);
    assert_eq!(auth.authenticate("admin", "master"), Some(Role::Admin));
    assert_eq!(auth.authenticate("222", "senha222"), Some(Role::Professor));
    assert_eq!(auth.authenticate("111", "senha111"), Some(Role::Student));
    assert_eq!(auth.authenticate("admin", "senha111"), None);
    assert_eq!(auth.authenticate("nobody", ""), None);
}

#[test]
fn test_role_ordering() {
    assert!(Role::Admin > Role::Professor);
    assert!(Role::Professor > Role::Student);
    assert_eq!(Role::Admin.level(), 2);
}

#[test]
fn test_student_role_is_read_only() {
    let mut session = detached_session(Role::Student);
    let err = session.execute(create_class("Math", 10)).unwrap_err().error;
    assert_eq!(
        err,
        RecordError::PermissionDenied {
            required: Role::Professor,
            actual: Role::Student
        }
    );
    assert_eq!(session.store().active_class_count(), 0);

    // Reports are open to everyone
    assert_eq!(
        session
            .execute(Action::ClassReport { class_id: 1 })
            .unwrap_err()
            .error,
        RecordError::ClassNotFound(1)
    );
}

#[test]
fn test_professor_cannot_edit_or_delete() {
    let mut session = detached_session(Role::Professor);
    session.execute(create_class("Math", 10)).unwrap();
    session.execute(create_student("Ana", "1", 1)).unwrap();

    let admin_only = [
        Action::EditStudent {
            registration_id: "1".to_string(),
            new_name: "Other".to_string(),
            new_class_id: None,
        },
        Action::DeleteStudent {
            registration_id: "1".to_string(),
        },
        Action::DeleteClass { id: 1 },
        Action::SortStudents,
    ];
    for action in admin_only {
        assert_eq!(
            session.execute(action).unwrap_err().error,
            RecordError::PermissionDenied {
                required: Role::Admin,
                actual: Role::Professor
            }
        );
    }
    assert_eq!(session.store().student("1").unwrap().name, "Ana");

    let executed = session
        .execute(Action::RecordScores {
            registration_id: "1".to_string(),
            scores: [6.0, 6.0, 6.0],
        })
        .unwrap();
    assert_eq!(executed.outcome, Outcome::ScoresRecorded { average: 6.0 });
}

#[test]
fn test_admin_runs_everything() {
    let mut session = detached_session(Role::Admin);
    let created = session.execute(create_class("Math", 10)).unwrap();
    assert_eq!(created.outcome, Outcome::ClassCreated { id: 1 });
    assert!(created.save_error.is_none());

    session.execute(create_student("Zoe", "1", 1)).unwrap();
    session.execute(create_student("Ana", "2", 1)).unwrap();
    session.execute(Action::SortStudents).unwrap();

    let report = session
        .execute(Action::ClassReport { class_id: 1 })
        .unwrap();
    match report.outcome {
        Outcome::Report(report) => {
            assert_eq!(report.lines[0].name, "Ana");
            assert_eq!(report.lines[1].name, "Zoe");
        }
        other => panic!("expected a report, got {:?}", other),
    }

    let deleted = session.execute(Action::DeleteClass { id: 1 }).unwrap();
    assert_eq!(deleted.outcome, Outcome::ClassDeleted { cascaded: 2 });
    assert_eq!(session.store().active_student_count(), 0);
}

#[test]
fn test_successful_mutation_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let mut session = Session::new(Store::default(), Role::Professor, Box::new(file.clone()));

    session.execute(create_class("Math", 10)).unwrap();
    let saved = file.load().unwrap();
    assert_eq!(saved.class(1).unwrap().name, "Math");
}

#[test]
fn test_failed_action_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let mut session = Session::new(Store::default(), Role::Admin, Box::new(file));

    assert!(session.execute(create_class("Broken", 0)).is_err());
    assert!(session.execute(Action::ClassReport { class_id: 3 }).is_err());
    assert!(!path.exists());
}

#[test]
fn test_partial_edit_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let mut session = Session::new(Store::default(), Role::Admin, Box::new(file.clone()));
    session.execute(create_class("Math", 10)).unwrap();
    session.execute(create_class("Tiny", 1)).unwrap();
    session.execute(create_student("Ana", "1", 1)).unwrap();
    session.execute(create_student("Bia", "2", 2)).unwrap();

    let err = session
        .execute(Action::EditStudent {
            registration_id: "1".to_string(),
            new_name: "Ana Maria".to_string(),
            new_class_id: Some(2),
        })
        .unwrap_err();
    assert!(matches!(err.error, RecordError::ClassFull { id: 2, .. }));
    assert!(err.save_error.is_none());

    let saved = file.load().unwrap();
    assert_eq!(saved.student("1").unwrap().name, "Ana Maria");
    assert_eq!(saved.student("1").unwrap().class_id, 1);
}

/// Store with a roomy class 1 and a full class 2
fn store_with_full_class() -> Store {
    let mut store = Store::default();
    store.create_class("Math", 10).unwrap();
    store.create_class("Tiny", 1).unwrap();
    store.create_student("Ana", "1", 1).unwrap();
    store.create_student("Bia", "2", 2).unwrap();
    store
}

fn edit(ra: &str, new_name: &str, new_class_id: Option<u32>) -> Action {
    Action::EditStudent {
        registration_id: ra.to_string(),
        new_name: new_name.to_string(),
        new_class_id,
    }
}

#[test]
fn test_edit_without_change_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let mut session = Session::new(store_with_full_class(), Role::Admin, Box::new(file));

    let err = session.execute(edit("1", "", None)).unwrap_err();
    assert_eq!(err.error, RecordError::NoChange);
    let err = session.execute(edit("9", "Nobody", None)).unwrap_err();
    assert_eq!(err.error, RecordError::StudentNotFound("9".to_string()));
    assert!(!path.exists());

    // Only the edit that left a rename behind writes the snapshot
    let err = session.execute(edit("1", "Ana Maria", Some(2))).unwrap_err();
    assert!(matches!(err.error, RecordError::ClassFull { .. }));
    assert!(path.exists());
}

#[test]
fn test_partial_edit_reports_save_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let mut session = Session::new(store_with_full_class(), Role::Admin, Box::new(file));

    let err = session.execute(edit("1", "Ana Maria", Some(2))).unwrap_err();
    assert!(matches!(err.error, RecordError::ClassFull { id: 2, .. }));
    assert!(err.save_error.is_some());
    assert_eq!(session.store().student("1").unwrap().name, "Ana Maria");
}

#[test]
fn test_app_warns_when_partial_edit_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let session = Session::new(store_with_full_class(), Role::Student, Box::new(file));
    let mut app = App::new(session, Box::new(FixedCredentials::builtin()));
    login(&mut app, "admin", "master");

    app.handle_key_event(key(KeyCode::Char('e')));
    type_text(&mut app, "1");
    app.handle_key_event(key(KeyCode::Enter));
    type_text(&mut app, "Ana Maria");
    app.handle_key_event(key(KeyCode::Enter));
    type_text(&mut app, "2");
    app.handle_key_event(key(KeyCode::Enter));

    assert_eq!(app.message_kind, MessageKind::Warning);
    assert!(app.status_message.contains("not saved"));
}

#[test]
fn test_save_failure_keeps_change_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("data.bin");
    let file = SnapshotFile::new(&path, 20, 100);
    let mut session = Session::new(Store::default(), Role::Professor, Box::new(file));

    let executed = session.execute(create_class("Math", 10)).unwrap();
    assert!(executed.save_error.is_some());
    assert_eq!(session.store().active_class_count(), 1);
}

#[test]
fn test_form_builds_actions() {
    let form = form_with(FormKind::CreateClass, &[" Math ", "30"]);
    assert_eq!(form.to_action(), Ok(create_class("Math", 30)));

    let form = form_with(FormKind::RecordScores, &["2", "7,5", "8", " 9.25 "]);
    assert_eq!(
        form.to_action(),
        Ok(Action::RecordScores {
            registration_id: "2".to_string(),
            scores: [7.5, 8.0, 9.25],
        })
    );

    let form = form_with(FormKind::EditStudent, &["2", "", "0"]);
    assert_eq!(
        form.to_action(),
        Ok(Action::EditStudent {
            registration_id: "2".to_string(),
            new_name: String::new(),
            new_class_id: None,
        })
    );

    let form = form_with(FormKind::EditStudent, &["2", "New", "3"]);
    assert!(matches!(
        form.to_action(),
        Ok(Action::EditStudent {
            new_class_id: Some(3),
            ..
        })
    ));
}

#[test]
fn test_form_rejects_bad_input() {
    let bad = [
        form_with(FormKind::CreateClass, &["Math", "thirty"]),
        form_with(FormKind::CreateStudent, &["Ana", "", "1"]),
        form_with(FormKind::CreateStudent, &["Ana", "1", "-2"]),
        form_with(FormKind::RecordScores, &["1", "NaN", "1", "1"]),
        form_with(FormKind::DeleteClass, &[""]),
        Form::new(FormKind::Login),
    ];
    for form in bad {
        assert!(
            matches!(form.to_action(), Err(RecordError::InvalidInput(_))),
            "{:?} should be rejected",
            form.kind
        );
    }
}

#[test]
fn test_form_focus_wraps() {
    let mut form = Form::new(FormKind::CreateStudent);
    form.prev_field();
    assert_eq!(form.focus, 2);
    assert!(form.on_last_field());
    form.next_field();
    assert_eq!(form.focus, 0);

    form.push_char('A');
    form.push_char('b');
    form.backspace();
    assert_eq!(form.values[0], "A");
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c)));
    }
}

fn login(app: &mut App, user: &str, secret: &str) {
    type_text(app, user);
    app.handle_key_event(key(KeyCode::Enter));
    type_text(app, secret);
    app.handle_key_event(key(KeyCode::Enter));
}

fn new_app() -> App {
    App::new(
        detached_session(Role::Student),
        Box::new(FixedCredentials::builtin()),
    )
}

#[test]
fn test_app_login_and_create_class() {
    let mut app = new_app();
    login(&mut app, "admin", "master");
    assert!(app.logged_in);
    assert_eq!(app.session.role(), Role::Admin);

    app.handle_key_event(key(KeyCode::Char('c')));
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::CreateClass));
    type_text(&mut app, "Math");
    app.handle_key_event(key(KeyCode::Tab));
    type_text(&mut app, "25");
    app.handle_key_event(key(KeyCode::Enter));

    assert!(app.form.is_none());
    assert_eq!(app.message_kind, MessageKind::Success);
    assert_eq!(app.session.store().class(1).unwrap().capacity, 25);
}

#[test]
fn test_app_rejects_bad_login() {
    let mut app = new_app();
    login(&mut app, "admin", "wrong");
    assert!(!app.logged_in);
    assert!(app.form_error.is_some());
    assert!(app.login_form.values[1].is_empty());

    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.should_quit);
}

#[test]
fn test_app_blocks_forms_above_role() {
    let mut app = new_app();
    login(&mut app, "111", "senha111");
    assert_eq!(app.session.role(), Role::Student);

    app.handle_key_event(key(KeyCode::Char('x')));
    assert!(app.form.is_none());
    assert_eq!(app.message_kind, MessageKind::Error);

    app.handle_key_event(key(KeyCode::Char('r')));
    assert_eq!(app.form.as_ref().map(|f| f.kind), Some(FormKind::ClassReport));
}

#[test]
fn test_app_invalid_form_stays_open() {
    let mut app = new_app();
    login(&mut app, "222", "senha222");

    app.handle_key_event(key(KeyCode::Char('c')));
    type_text(&mut app, "Math");
    app.handle_key_event(key(KeyCode::Enter));
    type_text(&mut app, "lots");
    app.handle_key_event(key(KeyCode::Enter));

    assert!(app.form.is_some());
    assert!(app.form_error.is_some());
    assert_eq!(app.session.store().active_class_count(), 0);

    app.handle_key_event(key(KeyCode::Esc));
    assert!(app.form.is_none());
}

#[test]
fn test_app_report_and_logout() {
    let mut app = new_app();
    login(&mut app, "admin", "master");

    app.handle_key_event(key(KeyCode::Char('c')));
    type_text(&mut app, "Math");
    app.handle_key_event(key(KeyCode::Enter));
    type_text(&mut app, "5");
    app.handle_key_event(key(KeyCode::Enter));

    app.handle_key_event(key(KeyCode::Char('r')));
    type_text(&mut app, "1");
    app.handle_key_event(key(KeyCode::Enter));
    assert_eq!(app.report_class, Some(1));

    app.handle_key_event(key(KeyCode::Char('l')));
    assert!(!app.logged_in);
    assert_eq!(app.session.role(), Role::Student);
    assert_eq!(app.report_class, None);

    // The store survives a logout
    assert_eq!(app.session.store().active_class_count(), 1);
}

#[test]
fn test_detached_session_saves_nothing() {
    let session = detached_session(Role::Admin);
    assert!(session.save().is_ok());
    assert!(Detached.load().is_err());
}
