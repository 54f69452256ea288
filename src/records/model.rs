//! Record types stored in the fixed slot arrays
//!
//! A slot is never removed. An inactive record keeps whatever data it last
//! held until a later creation overwrites it.

use super::constants::{APPROVAL_THRESHOLD, NAME_MAX_LEN, REMEDIAL_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Truncate `text` to at most `max_chars` characters
pub fn bounded(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// A class (turma)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: u32,
    pub name: String,
    pub capacity: u32,
    pub occupied: u32,
    pub active: bool,
}

impl Class {
    pub fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }

    /// Seats left before the class is full
    pub fn free_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }
}

/// A student (aluno)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub registration_id: String,
    pub name: String,
    pub class_id: u32,
    pub scores: [f32; 3],
    pub average: f32,
    pub active: bool,
}

impl Student {
    /// Overwrite the scores and recompute the average
    pub fn set_scores(&mut self, scores: [f32; 3]) {
        self.scores = scores;
        self.average = (scores[0] + scores[1] + scores[2]) / 3.0;
    }

    pub fn rename(&mut self, name: &str) {
        self.name = bounded(name, NAME_MAX_LEN);
    }

    pub fn status(&self) -> Status {
        Status::from_average(self.average)
    }
}

/// Outcome derived from a student's average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Approved,
    Remedial,
    Failed,
}

impl Status {
    pub fn from_average(average: f32) -> Self {
        if average >= APPROVAL_THRESHOLD {
            Status::Approved
        } else if average >= REMEDIAL_THRESHOLD {
            Status::Remedial
        } else {
            Status::Failed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Approved => "Approved",
            Status::Remedial => "Remedial",
            Status::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of a class report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub registration_id: String,
    pub name: String,
    pub scores: [f32; 3],
    pub average: f32,
    pub status: Status,
}

impl From<&Student> for ReportLine {
    fn from(student: &Student) -> Self {
        ReportLine {
            registration_id: student.registration_id.clone(),
            name: student.name.clone(),
            scores: student.scores,
            average: student.average,
            status: student.status(),
        }
    }
}

/// Report for one active class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReport {
    pub class: Class,
    pub lines: Vec<ReportLine>,
}

/// What an edit actually changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub renamed: bool,
    /// New class id when the student was transferred
    pub transferred_to: Option<u32>,
    /// Requested class id that did not resolve, transfer skipped
    pub skipped_transfer: Option<u32>,
}
