//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`classes`]: active classes with seat usage
//! - [`students`]: active students in slot order with average and status
//! - [`report`]: per-class report with the three scores
//! - [`form`]: popup for input forms and the login screen
//! - [`status`]: status bar with role badge and the keys the role may use
//! - `layout`: shared border, scroll and popup helpers
//!
//! Each pane module exports a `render_*` function that draws from borrowed
//! data and keeps no state of its own beyond the scroll offset it is handed.

mod layout;

pub mod classes;
pub mod form;
pub mod report;
pub mod status;
pub mod students;

// Re-export render functions for convenience
pub use classes::{render_classes_pane, ClassesRenderData};
pub use form::render_form;
pub use report::render_report_pane;
pub use status::{render_status_bar, MessageKind};
pub use students::{render_students_pane, StudentsRenderData};
