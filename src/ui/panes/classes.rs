//! Class list pane

use super::layout::{clamp_scroll, pane_block};
use crate::records::Class;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Data needed to render the class pane
pub struct ClassesRenderData<'a, I: Iterator<Item = &'a Class>> {
    pub classes: I,
    pub active_count: usize,
    pub max_classes: usize,
    /// Class whose report is open, highlighted in the list
    pub selected: Option<u32>,
}

/// Render the list of active classes
pub fn render_classes_pane<'a, I: Iterator<Item = &'a Class>>(
    frame: &mut Frame,
    area: Rect,
    data: ClassesRenderData<'a, I>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(
        format!(" Classes {}/{} ", data.active_count, data.max_classes),
        is_focused,
    );

    let selected = data.selected;
    let all_items: Vec<ListItem> = data
        .classes
        .map(|class| {
            let seats_color = if class.is_full() {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.success
            };
            let name_style = if selected == Some(class.id) {
                Style::default().fg(DEFAULT_THEME.border_focused)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3} ", class.id),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(class.name.clone(), name_style),
                Span::styled(
                    format!("  {}/{}", class.occupied, class.capacity),
                    Style::default().fg(seats_color),
                ),
            ]))
        })
        .collect();

    if all_items.is_empty() {
        let paragraph = Paragraph::new("(no active classes)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = clamp_scroll(all_items.len(), area, 0, scroll_offset);
    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
