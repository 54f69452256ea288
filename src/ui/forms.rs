//! Input forms for the menu
//!
//! A [`Form`] is a list of labelled text fields. Values stay raw text while
//! the user types; numbers are parsed only when the form is submitted.

use crate::auth::Role;
use crate::records::RecordError;
use crate::session::Action;

/// Every form the UI can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    CreateClass,
    CreateStudent,
    RecordScores,
    EditStudent,
    DeleteStudent,
    DeleteClass,
    ClassReport,
}

impl FormKind {
    pub fn title(self) -> &'static str {
        match self {
            FormKind::Login => " Login ",
            FormKind::CreateClass => " New Class ",
            FormKind::CreateStudent => " New Student ",
            FormKind::RecordScores => " Record Scores ",
            FormKind::EditStudent => " Edit Student ",
            FormKind::DeleteStudent => " Delete Student ",
            FormKind::DeleteClass => " Delete Class ",
            FormKind::ClassReport => " Class Report ",
        }
    }

    pub fn labels(self) -> &'static [&'static str] {
        match self {
            FormKind::Login => &["Login", "Password"],
            FormKind::CreateClass => &["Name", "Capacity"],
            FormKind::CreateStudent => &["Name", "RA", "Class id"],
            FormKind::RecordScores => &["RA", "Score 1", "Score 2", "Score 3"],
            FormKind::EditStudent => &["RA", "New name (blank keeps)", "New class id (0 keeps)"],
            FormKind::DeleteStudent => &["RA"],
            FormKind::DeleteClass => &["Class id"],
            FormKind::ClassReport => &["Class id"],
        }
    }

    /// Lowest role that may open this form
    pub const fn required_role(self) -> Role {
        match self {
            FormKind::Login | FormKind::ClassReport => Role::Student,
            FormKind::CreateClass | FormKind::CreateStudent | FormKind::RecordScores => {
                Role::Professor
            }
            FormKind::EditStudent | FormKind::DeleteStudent | FormKind::DeleteClass => Role::Admin,
        }
    }

    /// Whether field `index` hides its contents
    pub fn is_secret(self, index: usize) -> bool {
        self == FormKind::Login && index == 1
    }
}

/// An open form and what has been typed so far
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub values: Vec<String>,
    pub focus: usize,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        Form {
            kind,
            values: vec![String::new(); kind.labels().len()],
            focus: 0,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.values[self.focus].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focus].pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.values.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.values.len() - 1) % self.values.len();
    }

    pub fn on_last_field(&self) -> bool {
        self.focus + 1 == self.values.len()
    }

    fn field(&self, index: usize) -> &str {
        self.values[index].trim()
    }

    /// Build the session action this form describes
    pub fn to_action(&self) -> Result<Action, RecordError> {
        let action = match self.kind {
            FormKind::Login => {
                return Err(RecordError::InvalidInput(
                    "the login form does not map to an action".to_string(),
                ))
            }
            FormKind::CreateClass => Action::CreateClass {
                name: self.field(0).to_string(),
                capacity: parse_number(self.field(1), "capacity")?,
            },
            FormKind::CreateStudent => Action::CreateStudent {
                name: self.field(0).to_string(),
                registration_id: required(self.field(1), "RA")?,
                class_id: parse_number(self.field(2), "class id")?,
            },
            FormKind::RecordScores => Action::RecordScores {
                registration_id: required(self.field(0), "RA")?,
                scores: [
                    parse_score(self.field(1))?,
                    parse_score(self.field(2))?,
                    parse_score(self.field(3))?,
                ],
            },
            FormKind::EditStudent => {
                let class = self.field(2);
                let new_class_id = if class.is_empty() {
                    None
                } else {
                    Some(parse_number::<u32>(class, "class id")?).filter(|&id| id != 0)
                };
                Action::EditStudent {
                    registration_id: required(self.field(0), "RA")?,
                    new_name: self.field(1).to_string(),
                    new_class_id,
                }
            }
            FormKind::DeleteStudent => Action::DeleteStudent {
                registration_id: required(self.field(0), "RA")?,
            },
            FormKind::DeleteClass => Action::DeleteClass {
                id: parse_number(self.field(0), "class id")?,
            },
            FormKind::ClassReport => Action::ClassReport {
                class_id: parse_number(self.field(0), "class id")?,
            },
        };
        Ok(action)
    }
}

fn required(value: &str, what: &str) -> Result<String, RecordError> {
    if value.is_empty() {
        Err(RecordError::InvalidInput(format!("{} is required", what)))
    } else {
        Ok(value.to_string())
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, RecordError> {
    value
        .parse()
        .map_err(|_| RecordError::InvalidInput(format!("{} '{}' is not a valid number", what, value)))
}

/// Parse a score, accepting a decimal comma
fn parse_score(value: &str) -> Result<f32, RecordError> {
    let score: f32 = parse_number(&value.replace(',', "."), "score")?;
    if !score.is_finite() {
        return Err(RecordError::InvalidInput(format!(
            "score '{}' is not a finite number",
            value
        )));
    }
    Ok(score)
}
