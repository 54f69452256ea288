//! Main TUI application state and logic

use crate::auth::{Authenticator, Role};
use crate::records::RecordError;
use crate::session::{Action, Outcome, Session};
use crate::snapshot::SnapshotError;
use crate::ui::forms::{Form, FormKind};
use crate::ui::panes::{self, ClassesRenderData, MessageKind, StudentsRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Classes,
    Students,
    Report,
}

impl FocusedPane {
    /// Move focus to the next pane (classes -> students -> report)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Classes => FocusedPane::Students,
            FocusedPane::Students => FocusedPane::Report,
            FocusedPane::Report => FocusedPane::Classes,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Classes => FocusedPane::Report,
            FocusedPane::Students => FocusedPane::Classes,
            FocusedPane::Report => FocusedPane::Students,
        }
    }
}

/// The main application state
pub struct App {
    /// Store access for the current user
    pub session: Session,

    authenticator: Box<dyn Authenticator>,

    /// Whether a login has succeeded since start or the last logout
    pub logged_in: bool,

    /// Login screen fields
    pub login_form: Form,

    /// Form open over the main screen, if any
    pub form: Option<Form>,

    /// Validation error shown inside the open form (or the login form)
    pub form_error: Option<String>,

    /// Class whose report is shown in the report pane
    pub report_class: Option<u32>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub class_scroll: usize,
    pub student_scroll: usize,
    pub report_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub message_kind: MessageKind,
}

impl App {
    /// Create a new app showing the login screen
    pub fn new(session: Session, authenticator: Box<dyn Authenticator>) -> Self {
        App {
            session,
            authenticator,
            logged_in: false,
            login_form: Form::new(FormKind::Login),
            form: None,
            form_error: None,
            report_class: None,
            focused_pane: FocusedPane::Classes,
            class_scroll: 0,
            student_scroll: 0,
            report_scroll: 0,
            should_quit: false,
            status_message: String::from("Please log in"),
            message_kind: MessageKind::Info,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Save the store, as done once more at exit
    pub fn save(&self) -> Result<(), SnapshotError> {
        self.session.save()
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        if !self.logged_in {
            let banner = Paragraph::new("gradebook: classes, students and grades")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(crate::ui::theme::DEFAULT_THEME.primary)
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_widget(banner, pane_area);
            panes::render_form(
                frame,
                pane_area,
                &self.login_form,
                self.form_error.as_deref(),
            );
            panes::render_status_bar(
                frame,
                status_area,
                &self.status_message,
                self.message_kind,
                None,
            );
            return;
        }

        // Left column: Classes (top) | Students (bottom); right column: Report
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(pane_area);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[0]);

        let store = self.session.store();

        panes::render_classes_pane(
            frame,
            left_rows[0],
            ClassesRenderData {
                classes: store.list_active_classes(),
                active_count: store.active_class_count(),
                max_classes: store.max_classes(),
                selected: self.report_class,
            },
            self.focused_pane == FocusedPane::Classes,
            &mut self.class_scroll,
        );

        panes::render_students_pane(
            frame,
            left_rows[1],
            StudentsRenderData {
                students: store.list_active_students(),
                active_count: store.active_student_count(),
                max_students: store.max_students(),
            },
            self.focused_pane == FocusedPane::Students,
            &mut self.student_scroll,
        );

        // Regenerated every frame so it follows later edits
        let report = self
            .report_class
            .and_then(|id| store.generate_class_report(id).ok());
        panes::render_report_pane(
            frame,
            columns[1],
            report.as_ref(),
            self.focused_pane == FocusedPane::Report,
            &mut self.report_scroll,
        );

        if let Some(form) = &self.form {
            panes::render_form(frame, pane_area, form, self.form_error.as_deref());
        }

        panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.message_kind,
            Some(self.session.role()),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if !self.logged_in {
            self.handle_login_key(key);
        } else if self.form.is_some() {
            self.handle_form_key(key);
        } else {
            self.handle_menu_key(key);
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter if self.login_form.on_last_field() => self.attempt_login(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.login_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.login_form.prev_field(),
            KeyCode::Backspace => self.login_form.backspace(),
            KeyCode::Char(c) => self.login_form.push_char(c),
            _ => {}
        }
    }

    fn attempt_login(&mut self) {
        let login = self.login_form.values[0].trim().to_string();
        let secret = self.login_form.values[1].clone();

        match self.authenticator.authenticate(&login, &secret) {
            Some(role) => {
                self.session.set_role(role);
                self.logged_in = true;
                self.login_form = Form::new(FormKind::Login);
                self.form_error = None;
                self.set_status(format!("Logged in as {}", role), MessageKind::Success);
            }
            None => {
                self.login_form.values[1].clear();
                self.form_error = Some("Invalid login or password".to_string());
                self.set_status("Login failed", MessageKind::Error);
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.form_error = None;
                self.set_status("Cancelled", MessageKind::Info);
            }
            KeyCode::Enter if form.on_last_field() => self.submit_form(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        match form.to_action() {
            Ok(action) => {
                self.form = None;
                self.form_error = None;
                self.run_action(action);
            }
            // Keep the form open so the input can be corrected
            Err(e) => self.form_error = Some(e.to_string()),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char('c') => self.open_form(FormKind::CreateClass),
            KeyCode::Char('a') => self.open_form(FormKind::CreateStudent),
            KeyCode::Char('g') => self.open_form(FormKind::RecordScores),
            KeyCode::Char('e') => self.open_form(FormKind::EditStudent),
            KeyCode::Char('d') => self.open_form(FormKind::DeleteStudent),
            KeyCode::Char('x') => self.open_form(FormKind::DeleteClass),
            KeyCode::Char('r') => self.open_form(FormKind::ClassReport),
            KeyCode::Char('s') => self.run_action(Action::SortStudents),
            KeyCode::Char('l') => self.logout(),
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Classes => &mut self.class_scroll,
            FocusedPane::Students => &mut self.student_scroll,
            FocusedPane::Report => &mut self.report_scroll,
        }
    }

    /// Open a form if the current role may use it
    fn open_form(&mut self, kind: FormKind) {
        let required = kind.required_role();
        if !self.session.can(required) {
            self.deny(required);
            return;
        }
        self.form = Some(Form::new(kind));
        self.form_error = None;
        self.set_status(kind.title().trim().to_string(), MessageKind::Info);
    }

    fn deny(&mut self, required: Role) {
        let err = RecordError::PermissionDenied {
            required,
            actual: self.session.role(),
        };
        self.set_status(err.to_string(), MessageKind::Error);
    }

    fn run_action(&mut self, action: Action) {
        match self.session.execute(action) {
            Ok(executed) => {
                let summary = executed.outcome.summary();
                if let Outcome::Report(report) = &executed.outcome {
                    self.report_class = Some(report.class.id);
                    self.report_scroll = 0;
                    self.focused_pane = FocusedPane::Report;
                }
                match executed.save_error {
                    Some(e) => self.set_status(
                        format!("{} (not saved: {})", summary, e),
                        MessageKind::Warning,
                    ),
                    None => self.set_status(summary, MessageKind::Success),
                }
            }
            Err(rejected) => match rejected.save_error {
                Some(e) => self.set_status(
                    format!("{} (partial change not saved: {})", rejected.error, e),
                    MessageKind::Warning,
                ),
                None => self.set_status(rejected.error.to_string(), MessageKind::Error),
            },
        }
    }

    fn logout(&mut self) {
        self.logged_in = false;
        self.session.set_role(Role::Student);
        self.form = None;
        self.form_error = None;
        self.report_class = None;
        self.focused_pane = FocusedPane::Classes;
        self.set_status("Logged out", MessageKind::Info);
    }

    fn set_status(&mut self, message: impl Into<String>, kind: MessageKind) {
        self.status_message = message.into();
        self.message_kind = kind;
    }
}
