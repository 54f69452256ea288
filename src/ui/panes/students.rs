//! Student roster pane, in slot order

use super::layout::{clamp_scroll, pane_block};
use super::report::status_style;
use crate::records::Student;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

/// Data needed to render the student pane
pub struct StudentsRenderData<'a, I: Iterator<Item = &'a Student>> {
    pub students: I,
    pub active_count: usize,
    pub max_students: usize,
}

/// Render every active student with class and average
pub fn render_students_pane<'a, I: Iterator<Item = &'a Student>>(
    frame: &mut Frame,
    area: Rect,
    data: StudentsRenderData<'a, I>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(
        format!(" Students {}/{} ", data.active_count, data.max_students),
        is_focused,
    );

    let all_rows: Vec<Row> = data
        .students
        .map(|student| {
            let status = student.status();
            Row::new(vec![
                Cell::from(student.registration_id.clone()),
                Cell::from(student.name.clone()),
                Cell::from(student.class_id.to_string()),
                Cell::from(format!("{:5.2}", student.average)),
                Cell::from(status.label()).style(status_style(status)),
            ])
            .style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    if all_rows.is_empty() {
        let paragraph = Paragraph::new("(no active students)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // One row for the header
    let visible_height = clamp_scroll(all_rows.len(), area, 1, scroll_offset);
    let visible_rows: Vec<Row> = all_rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let header = Row::new(vec!["RA", "Name", "Class", "Avg", "Status"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(10),
        Constraint::Min(12),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(9),
    ];

    let table = Table::new(visible_rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
