//! Step description pane

use crate::engine::Outcome;
use crate::snapshot::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn outcome_line(outcome: &Outcome) -> Line<'static> {
    let (text, color) = match outcome {
        Outcome::Done => ("done".to_string(), DEFAULT_THEME.success),
        Outcome::NoOp => ("no change".to_string(), DEFAULT_THEME.comment),
        Outcome::Found(i) => (format!("found at index {}", i), DEFAULT_THEME.success),
        Outcome::NotFound => ("not found (-1)".to_string(), DEFAULT_THEME.error),
        Outcome::Visited(values) => {
            let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            (format!("visited [{}]", joined.join(", ")), DEFAULT_THEME.success)
        }
    };
    Line::from(vec![
        Span::styled("Result: ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

/// Render the description of the current step; the outcome shows on the last one
pub fn render_description_pane(
    frame: &mut Frame,
    area: Rect,
    step: Option<&Step>,
    outcome: Option<&Outcome>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Step ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines = match step {
        Some(step) => vec![Line::from(Span::styled(
            step.description.clone(),
            Style::default().fg(DEFAULT_THEME.fg),
        ))],
        None => vec![Line::from(Span::styled(
            "(press → to start)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };
    if let Some(outcome) = outcome {
        lines.push(Line::from(""));
        lines.push(outcome_line(outcome));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
