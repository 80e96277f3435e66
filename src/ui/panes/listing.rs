//! Reference listing pane with the active line highlighted
//!
//! Each recorded step carries the index of the listing line it illustrates.
//! The pane keeps that line at a fixed visual row while stepping so the eye
//! does not have to chase it.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple highlighting for the C-like listing
fn highlight_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            current_word.push(c);
            continue;
        }

        if !current_word.is_empty() {
            let is_func = c == '(';
            spans.push(Span::styled(
                current_word.clone(),
                keyword_style(&current_word, is_func),
            ));
            current_word.clear();
        }

        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    if !current_word.is_empty() {
        let style = keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "Node" | "int" | "void" => Style::default().fg(DEFAULT_THEME.type_name),
        "return" | "if" | "else" | "while" | "for" | "do" | "break" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "NULL" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        _ if is_function => Style::default().fg(DEFAULT_THEME.border_focused),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the listing pane
#[derive(Debug, Default)]
pub struct ListingScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the listing pane
pub fn render_listing_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    listing: &[&str],
    active_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut ListingScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = listing.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if let Some(line) = active_line.filter(|&l| l < total_lines) {
        scroll_state.offset = line.saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = listing
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, text)| {
            let is_current = active_line == Some(idx);
            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content = highlight_line(text);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, idx + 1), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_text_intact() {
        let line = highlight_line("if (head == NULL) return;");
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "if (head == NULL) return;");
    }

    #[test]
    fn test_null_is_styled_as_constant() {
        let line = highlight_line("temp->next = NULL;");
        let null = line
            .spans
            .iter()
            .find(|s| s.content == "NULL")
            .map(|s| s.style.fg);
        assert_eq!(null, Some(Some(DEFAULT_THEME.number)));
    }
}
