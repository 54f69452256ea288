//! Error type for record store operations
//!
//! Every variant is recoverable: the UI shows the message in the status bar
//! and the session carries on.

use crate::auth::Role;
use thiserror::Error;

/// Which fixed collection ran out of slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Classes,
    Students,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Classes => write!(f, "classes"),
            Collection::Students => write!(f, "students"),
        }
    }
}

/// Errors returned by the record store and the session layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// All slots of a collection hold active records
    #[error("capacity exceeded: all {limit} {collection} slots are in use")]
    CapacityExceeded { collection: Collection, limit: usize },

    /// Registration id already belongs to an active student
    #[error("RA '{0}' is already registered")]
    DuplicateKey(String),

    /// No active class with this id
    #[error("class {0} not found or inactive")]
    ClassNotFound(u32),

    /// No active student with this registration id
    #[error("student with RA '{0}' not found or inactive")]
    StudentNotFound(String),

    /// Non-positive capacity, malformed number, missing field
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Caller role is below what the operation requires
    #[error("permission denied: requires {required}, logged in as {actual}")]
    PermissionDenied { required: Role, actual: Role },

    /// Target class has no free seats
    #[error("class '{name}' (id {id}) is full")]
    ClassFull { id: u32, name: String },

    /// Edit requested but nothing differed
    #[error("no change applied")]
    NoChange,
}
