//! Popup rendering for input forms, including the login screen

use super::layout::centered_rect;
use crate::ui::forms::Form;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render `form` as a centered popup over whatever is below it
pub fn render_form(frame: &mut Frame, area: Rect, form: &Form, error: Option<&str>) {
    let labels = form.kind.labels();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines = vec![Line::from("")];
    for (idx, label) in labels.iter().enumerate() {
        let focused = idx == form.focus;
        let value = if form.kind.is_secret(idx) {
            "*".repeat(form.values[idx].chars().count())
        } else {
            form.values[idx].clone()
        };

        let marker = if focused { " ▸ " } else { "   " };
        let label_style = if focused {
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };

        let mut spans = vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<width$} ", label, width = label_width), label_style),
            Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
        ];
        if focused {
            spans.push(Span::styled(
                "_",
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(DEFAULT_THEME.error),
        )));
    }
    lines.push(Line::from(Span::styled(
        " ↵ next/submit │ ⇥ switch field │ esc cancel",
        Style::default().fg(DEFAULT_THEME.comment),
    )));

    let height = lines.len() as u16 + 2;
    let width = (label_width as u16 + 40).max(50);
    let popup = centered_rect(width, height, area);

    let block = Block::default()
        .title(form.kind.title())
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
