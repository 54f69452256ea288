//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, login, pane focus
//! - **[`forms`]**: labelled input fields and their conversion to session actions
//! - **[`panes`]**: stateless render functions for each visible pane (classes,
//!   students, report, form popup, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Session`] and
//! an [`Authenticator`], then call [`App::run`] to start the event loop.
//!
//! [`Session`]: crate::session::Session
//! [`Authenticator`]: crate::auth::Authenticator
//! [`App::run`]: app::App::run

pub mod app;
pub mod forms;
pub mod panes;
pub mod theme;

pub use app::App;
