//! Class report pane: scores, average and status per student

use super::layout::{clamp_scroll, pane_block};
use crate::records::{ClassReport, Status};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

/// Color used for a status label
pub fn status_style(status: Status) -> Style {
    let color = match status {
        Status::Approved => DEFAULT_THEME.success,
        Status::Remedial => DEFAULT_THEME.warning,
        Status::Failed => DEFAULT_THEME.error,
    };
    Style::default().fg(color)
}

/// Render the report of the selected class, or a hint when none is open
pub fn render_report_pane(
    frame: &mut Frame,
    area: Rect,
    report: Option<&ClassReport>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let Some(report) = report else {
        let paragraph = Paragraph::new("Press r and enter a class id to open its report")
            .block(pane_block(" Report ".to_string(), is_focused))
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let class = &report.class;
    let block = pane_block(
        format!(
            " Report: {} (ID {}) | seats {}/{} ",
            class.name, class.id, class.occupied, class.capacity
        ),
        is_focused,
    );

    if report.lines.is_empty() {
        let paragraph = Paragraph::new("(no active students in this class)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = clamp_scroll(report.lines.len(), area, 1, scroll_offset);
    let rows: Vec<Row> = report
        .lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| {
            Row::new(vec![
                Cell::from(line.registration_id.clone()),
                Cell::from(line.name.clone()),
                Cell::from(format!("{:5.2}", line.scores[0])),
                Cell::from(format!("{:5.2}", line.scores[1])),
                Cell::from(format!("{:5.2}", line.scores[2])),
                Cell::from(format!("{:5.2}", line.average)),
                Cell::from(line.status.label()).style(status_style(line.status)),
            ])
            .style(Style::default().fg(DEFAULT_THEME.fg))
        })
        .collect();

    let header = Row::new(vec!["RA", "Name", "N1", "N2", "N3", "Avg", "Status"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
