//! Variables pane rendering

use super::memory::pointer_label;
use crate::memory::MemoryState;
use crate::snapshot::{VarValue, Variables};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the variables pane
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    variables: &Variables,
    state: &MemoryState,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Variables ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if variables.is_empty() {
        let paragraph = Paragraph::new("(no variables)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let name_width = variables.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let all_items: Vec<ListItem> = variables
        .iter()
        .map(|(name, value)| {
            let (type_str, value_str, value_style) = match value {
                VarValue::Pointer(id) => (
                    "Node*",
                    pointer_label(state, *id),
                    Style::default().fg(if id.is_some() {
                        DEFAULT_THEME.pointer
                    } else {
                        DEFAULT_THEME.number
                    }),
                ),
                VarValue::Value(v) => ("value", v.to_string(), Style::default().fg(DEFAULT_THEME.number)),
                VarValue::Index(n) => ("int", n.to_string(), Style::default().fg(DEFAULT_THEME.number)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>6} ", type_str),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
                Span::styled(
                    format!("{:width$}", name, width = name_width),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value_str, value_style),
            ]))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
