//! Role-gated access to the record store
//!
//! A [`Session`] owns the store for one logged-in user. Menu actions are
//! described as [`Action`] values, checked against the user's [`Role`],
//! executed, and persisted when they changed anything.

use crate::auth::Role;
use crate::records::{ClassReport, EditOutcome, RecordError, Store};
use crate::snapshot::{Persistence, SnapshotError};
use thiserror::Error;

/// A request issued from the menu
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CreateClass {
        name: String,
        capacity: i32,
    },
    CreateStudent {
        name: String,
        registration_id: String,
        class_id: u32,
    },
    RecordScores {
        registration_id: String,
        scores: [f32; 3],
    },
    EditStudent {
        registration_id: String,
        new_name: String,
        new_class_id: Option<u32>,
    },
    DeleteStudent {
        registration_id: String,
    },
    DeleteClass {
        id: u32,
    },
    SortStudents,
    ClassReport {
        class_id: u32,
    },
}

impl Action {
    /// Lowest role allowed to issue this action
    pub fn required_role(&self) -> Role {
        match self {
            Action::ClassReport { .. } => Role::Student,
            Action::CreateClass { .. }
            | Action::CreateStudent { .. }
            | Action::RecordScores { .. } => Role::Professor,
            Action::EditStudent { .. }
            | Action::DeleteStudent { .. }
            | Action::DeleteClass { .. }
            | Action::SortStudents => Role::Admin,
        }
    }

    /// Whether a successful run changes the store
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::ClassReport { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateClass { .. } => "create class",
            Action::CreateStudent { .. } => "create student",
            Action::RecordScores { .. } => "record scores",
            Action::EditStudent { .. } => "edit student",
            Action::DeleteStudent { .. } => "delete student",
            Action::DeleteClass { .. } => "delete class",
            Action::SortStudents => "sort students",
            Action::ClassReport { .. } => "class report",
        }
    }
}

/// What a successful action produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    ClassCreated { id: u32 },
    StudentCreated,
    ScoresRecorded { average: f32 },
    StudentEdited(EditOutcome),
    StudentDeleted,
    ClassDeleted { cascaded: usize },
    StudentsSorted,
    Report(ClassReport),
}

impl Outcome {
    /// One-line summary for the status bar
    pub fn summary(&self) -> String {
        match self {
            Outcome::ClassCreated { id } => format!("Class created with id {}", id),
            Outcome::StudentCreated => "Student enrolled".to_string(),
            Outcome::ScoresRecorded { average } => {
                format!("Scores recorded (average {:.2})", average)
            }
            Outcome::StudentEdited(edit) => {
                let mut parts = Vec::new();
                if edit.renamed {
                    parts.push("name updated".to_string());
                }
                if let Some(id) = edit.transferred_to {
                    parts.push(format!("moved to class {}", id));
                }
                if let Some(id) = edit.skipped_transfer {
                    parts.push(format!("class {} invalid, not moved", id));
                }
                format!("Student edited: {}", parts.join(", "))
            }
            Outcome::StudentDeleted => "Student deleted".to_string(),
            Outcome::ClassDeleted { cascaded } => {
                format!("Class deleted, {} student(s) deactivated", cascaded)
            }
            Outcome::StudentsSorted => "Students sorted by name".to_string(),
            Outcome::Report(report) => format!(
                "Report for '{}': {} student(s)",
                report.class.name,
                report.lines.len()
            ),
        }
    }
}

/// Result of executing an action: the outcome plus any save failure
#[derive(Debug)]
pub struct Executed {
    pub outcome: Outcome,
    /// Set when the change was applied in memory but could not be saved
    pub save_error: Option<SnapshotError>,
}

/// A failed action, plus any save failure for changes it left behind
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected {
    pub error: RecordError,
    pub save_error: Option<SnapshotError>,
}

impl From<RecordError> for Rejected {
    fn from(error: RecordError) -> Self {
        Rejected {
            error,
            save_error: None,
        }
    }
}

/// One logged-in user working on the store
pub struct Session {
    store: Store,
    role: Role,
    persistence: Box<dyn Persistence>,
}

impl Session {
    pub fn new(store: Store, role: Role, persistence: Box<dyn Persistence>) -> Self {
        Session {
            store,
            role,
            persistence,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Switch the acting user, e.g. after a new login
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn can(&self, required: Role) -> bool {
        self.role >= required
    }

    /// Check the role gate, run the action, save if it changed the store
    pub fn execute(&mut self, action: Action) -> Result<Executed, Rejected> {
        let required = action.required_role();
        if !self.can(required) {
            tracing::warn!(action = action.name(), role = %self.role, "action refused");
            return Err(Rejected::from(RecordError::PermissionDenied {
                required,
                actual: self.role,
            }));
        }

        let name = action.name();
        let mutation = action.is_mutation();
        let is_edit = matches!(action, Action::EditStudent { .. });
        let result = self.apply(action);

        // An edit refused for a full class has already renamed the student
        let touched = mutation
            && match &result {
                Ok(_) => true,
                Err(RecordError::ClassFull { .. }) => is_edit,
                Err(_) => false,
            };
        let save_error = if touched { self.save().err() } else { None };

        match result {
            Ok(outcome) => {
                tracing::info!(action = name, "{}", outcome.summary());
                Ok(Executed {
                    outcome,
                    save_error,
                })
            }
            Err(error) => {
                tracing::info!(action = name, %error, "action failed");
                Err(Rejected { error, save_error })
            }
        }
    }

    fn apply(&mut self, action: Action) -> Result<Outcome, RecordError> {
        let store = &mut self.store;
        match action {
            Action::CreateClass { name, capacity } => store
                .create_class(&name, capacity)
                .map(|id| Outcome::ClassCreated { id }),
            Action::CreateStudent {
                name,
                registration_id,
                class_id,
            } => store
                .create_student(&name, &registration_id, class_id)
                .map(|()| Outcome::StudentCreated),
            Action::RecordScores {
                registration_id,
                scores,
            } => store
                .record_scores(&registration_id, scores, self.role)
                .map(|average| Outcome::ScoresRecorded { average }),
            Action::EditStudent {
                registration_id,
                new_name,
                new_class_id,
            } => store
                .edit_student(&registration_id, &new_name, new_class_id)
                .map(Outcome::StudentEdited),
            Action::DeleteStudent { registration_id } => store
                .delete_student(&registration_id)
                .map(|()| Outcome::StudentDeleted),
            Action::DeleteClass { id } => store
                .delete_class(id)
                .map(|cascaded| Outcome::ClassDeleted { cascaded }),
            Action::SortStudents => {
                store.sort_students_by_name();
                Ok(Outcome::StudentsSorted)
            }
            Action::ClassReport { class_id } => {
                store.generate_class_report(class_id).map(Outcome::Report)
            }
        }
    }

    /// Write the current store through the persistence layer
    pub fn save(&self) -> Result<(), SnapshotError> {
        self.persistence.save(&self.store).map_err(|e| {
            tracing::error!(error = %e, "saving snapshot failed");
            e
        })
    }
}
