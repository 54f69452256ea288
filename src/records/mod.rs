//! Record store for classes and students
//!
//! This module provides the core data abstractions:
//! - [`model`]: [`Class`], [`Student`] and the derived report types
//! - [`store`]: the fixed-capacity [`Store`] with first-fit slot reuse
//! - [`errors`]: [`RecordError`], returned by every fallible operation
//! - [`constants`]: default slot counts and field bounds
//!
//! # Slots
//!
//! Both collections are allocated to full capacity up front. Records are
//! never removed; deleting one clears its `active` flag and the slot becomes
//! the first candidate for the next creation:
//! ```text
//! [A1][  ][C3][  ]   create "D" → [A1][D2][C3][  ]
//! ```
//!
//! # Occupancy
//!
//! `Class::occupied` always equals the number of active students whose
//! `class_id` matches, and never exceeds `Class::capacity`. Use
//! [`Store::check_invariants`] to verify a store built from outside data.

pub mod constants;
pub mod errors;
pub mod model;
pub mod store;

pub use errors::{Collection, RecordError};
pub use model::{Class, ClassReport, EditOutcome, ReportLine, Status, Student};
pub use store::Store;
