//! Status bar rendering with role badge and keybindings

use crate::auth::Role;
use crate::ui::forms::FormKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Tone of the current status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Keys shown for a role, each with the role it needs
const KEYBINDS: &[(&str, &str, Role)] = &[
    ("c", "class", FormKind::CreateClass.required_role()),
    ("a", "student", FormKind::CreateStudent.required_role()),
    ("g", "grades", FormKind::RecordScores.required_role()),
    ("e", "edit", FormKind::EditStudent.required_role()),
    ("d", "del student", FormKind::DeleteStudent.required_role()),
    ("x", "del class", FormKind::DeleteClass.required_role()),
    ("s", "sort", Role::Admin),
    ("r", "report", FormKind::ClassReport.required_role()),
    ("l", "logout", Role::Student),
    ("q", "quit", Role::Student),
];

/// Render the status bar at the bottom.
///
/// `role` is `None` on the login screen.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    kind: MessageKind,
    role: Option<Role>,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let badge = match role {
        Some(role) => format!(" {} ", role),
        None => " LOGIN ".to_string(),
    };
    let message_color = match kind {
        MessageKind::Info => DEFAULT_THEME.fg,
        MessageKind::Success => DEFAULT_THEME.success,
        MessageKind::Warning => DEFAULT_THEME.warning,
        MessageKind::Error => DEFAULT_THEME.error,
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(if role.is_some() {
                    DEFAULT_THEME.primary
                } else {
                    DEFAULT_THEME.secondary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.highlight_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.highlight_bg)
                .fg(message_color),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.highlight_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.highlight_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.highlight_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    match role {
        Some(role) => {
            let allowed = KEYBINDS.iter().filter(|(_, _, needed)| role >= *needed);
            for (idx, (key, desc, _)) in allowed.enumerate() {
                if idx > 0 {
                    right_spans.push(Span::styled("│", sep_style));
                }
                right_spans.push(Span::styled(format!(" {} ", key), key_style));
                right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
            }
        }
        None => {
            right_spans.push(Span::styled(" ↵ ", key_style));
            right_spans.push(Span::styled(" submit ", desc_style));
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" esc ", key_style));
            right_spans.push(Span::styled(" quit ", desc_style));
        }
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.highlight_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
