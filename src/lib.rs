//! # Introduction
//!
//! gradebook is a single-user academic records manager. It keeps classes and
//! students in fixed-capacity slot arrays, records three scores per student,
//! and saves the whole store to a binary snapshot after every change. A
//! terminal UI built with [ratatui](https://docs.rs/ratatui) drives it.
//!
//! ## Request pipeline
//!
//! ```text
//! Keys → Form → Action → Session (role gate) → Store → Snapshot
//! ```
//!
//! 1. [`ui`]: login screen, panes and input forms.
//! 2. [`session`]: checks the caller's [`auth::Role`] against each
//!    [`session::Action`], runs it, and saves the store on success.
//! 3. [`records`]: the [`records::Store`]: first-fit slot reuse, logical
//!    deletion, occupancy bookkeeping and cascading class deletion.
//! 4. [`snapshot`]: bincode image of the whole store behind the
//!    [`snapshot::Persistence`] trait.
//! 5. [`auth`]: the [`auth::Authenticator`] trait and the built-in accounts.
//!
//! ## Roles
//!
//! Students may open class reports. Professors may also create classes and
//! students and record scores. Admins may additionally edit, delete and sort.

pub mod auth;
pub mod config;
pub mod logging;
pub mod records;
pub mod session;
pub mod snapshot;
pub mod ui;
