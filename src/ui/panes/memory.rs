//! Memory pane: the list drawn as boxes and arrows plus a node table
//!
//! The first line follows `next` from `head` the way the list would be drawn
//! on a whiteboard. Below it every allocated node is listed by address with
//! its pointer fields and the names currently pointing at it, so nodes that
//! are mid-splice or already cut loose stay visible.

use crate::engine::Variant;
use crate::memory::{MemoryState, NodeId};
use crate::snapshot::{VarValue, Variables};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Data needed to render the memory pane
pub struct MemoryRenderData<'a> {
    pub state: &'a MemoryState,
    pub variant: Variant,
    pub variables: &'a Variables,
}

/// Address plus value, or NULL
pub(super) fn pointer_label(state: &MemoryState, id: Option<NodeId>) -> String {
    match id {
        None => "NULL".to_string(),
        Some(id) => match state.value_at(Some(id)) {
            Some(value) => format!("{} [{}]", id, value),
            None => format!("{} (freed)", id),
        },
    }
}

/// Every name that refers to `id` in this step
fn pointer_names(state: &MemoryState, variables: &Variables, id: NodeId) -> Vec<String> {
    let mut names = Vec::new();
    for (name, reference) in [("head", state.head), ("tail", state.tail), ("curr", state.curr)] {
        if reference == Some(id) {
            names.push(name.to_string());
        }
    }
    for (name, value) in variables.iter() {
        if matches!(value, VarValue::Pointer(Some(p)) if *p == id)
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

/// Whiteboard rendering of the chain reachable from `head`
fn chain_line(state: &MemoryState, variant: Variant) -> Line<'static> {
    let arrow = if variant.is_doubly() { " ⇄ " } else { " → " };
    let arrow_style = Style::default().fg(DEFAULT_THEME.comment);
    let box_style = Style::default()
        .fg(DEFAULT_THEME.success)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(
        "head",
        Style::default().fg(DEFAULT_THEME.pointer),
    )];
    spans.push(Span::styled(" → ", arrow_style));

    let ids = state.walk_forward();
    if ids.is_empty() {
        spans.push(Span::styled("NULL", Style::default().fg(DEFAULT_THEME.number)));
        return Line::from(spans);
    }

    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(arrow, arrow_style));
        }
        let label = state
            .value_at(Some(*id))
            .map(|v| format!("[{}]", v))
            .unwrap_or_else(|| "[?]".to_string());
        spans.push(Span::styled(label, box_style));
    }

    let closes = ids
        .last()
        .and_then(|last| state.node(*last))
        .and_then(|node| node.next);
    match closes {
        Some(id) if Some(id) == state.head => {
            spans.push(Span::styled(" ↺ head", arrow_style));
        }
        Some(id) => {
            spans.push(Span::styled(" → ", arrow_style));
            spans.push(Span::styled(
                id.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            ));
        }
        None if variant.is_circular() => {
            spans.push(Span::styled(" → ", arrow_style));
            spans.push(Span::styled("NULL (ring open)", Style::default().fg(DEFAULT_THEME.error)));
        }
        None => {
            spans.push(Span::styled(" → ", arrow_style));
            spans.push(Span::styled("NULL", Style::default().fg(DEFAULT_THEME.number)));
        }
    }
    Line::from(spans)
}

fn node_item(data: &MemoryRenderData<'_>, id: NodeId, reachable: bool) -> ListItem<'static> {
    let state = data.state;
    let Some(node) = state.node(id) else {
        return ListItem::new(format!("{} (freed)", id));
    };

    let text_style = if reachable {
        Style::default().fg(DEFAULT_THEME.fg)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let mut spans = vec![
        Span::styled(format!("{} ", id), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("[{}]", node.value),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  next: {}", short(node.next)), text_style),
    ];
    if data.variant.is_doubly() {
        spans.push(Span::styled(format!("  prev: {}", short(node.prev)), text_style));
    }
    if !reachable {
        spans.push(Span::styled(" (unlinked)", Style::default().fg(DEFAULT_THEME.comment)));
    }

    let names = pointer_names(state, data.variables, id);
    if !names.is_empty() {
        spans.push(Span::styled(
            format!("  ← {}", names.join(", ")),
            Style::default().fg(DEFAULT_THEME.pointer),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn short(id: Option<NodeId>) -> String {
    id.map_or_else(|| "NULL".to_string(), |id| id.to_string())
}

/// Render the memory pane
pub fn render_memory_pane(
    frame: &mut Frame,
    area: Rect,
    data: MemoryRenderData,
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
        .title(format!(" Memory ({} {}) ", data.state.len(), data.variant))
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.state.is_empty() {
        let paragraph = Paragraph::new(vec![
            chain_line(data.state, data.variant),
            Line::from(""),
            Line::from(Span::styled(
                "(no nodes allocated)",
                Style::default().fg(DEFAULT_THEME.comment),
            )),
        ])
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let reachable = data.state.walk_forward();
    let mut all_items = vec![
        ListItem::new(chain_line(data.state, data.variant)),
        ListItem::new(""),
    ];
    for id in data.state.sorted_ids() {
        all_items.push(node_item(&data, id, reachable.contains(&id)));
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryModel, Value};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_chain_line_linear() {
        let mut mem = MemoryModel::new();
        let a = mem.create_node(Value::Int(1));
        let b = mem.create_node(Value::Int(2));
        mem.set_next(a, Some(b)).unwrap();
        mem.set_head(Some(a));
        mem.set_tail(Some(b));

        assert_eq!(text(&chain_line(mem.state(), Variant::Singly)), "head → [1] → [2] → NULL");
    }

    #[test]
    fn test_chain_line_circular() {
        let mut mem = MemoryModel::new();
        let a = mem.create_node(Value::Int(1));
        mem.set_next(a, Some(a)).unwrap();
        mem.set_head(Some(a));
        mem.set_tail(Some(a));

        assert_eq!(
            text(&chain_line(mem.state(), Variant::CircularSingly)),
            "head → [1] ↺ head"
        );
    }

    #[test]
    fn test_pointer_names_merge_refs_and_variables() {
        let mut mem = MemoryModel::new();
        let a = mem.create_node(Value::Int(1));
        mem.set_head(Some(a));
        let mut vars = Variables::new();
        vars.set_ptr("head", Some(a));
        vars.set_ptr("temp", Some(a));

        assert_eq!(pointer_names(mem.state(), &vars, a), vec!["head", "temp"]);
        assert_eq!(pointer_label(mem.state(), Some(a)), "0x1000 [1]");
        assert_eq!(pointer_label(mem.state(), None), "NULL");
    }
}
