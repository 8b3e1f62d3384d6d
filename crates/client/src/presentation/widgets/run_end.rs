//! End-of-run summary.

use game_core::{RunOutcome, Session};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::panel;

pub fn render_run_end(frame: &mut Frame, area: Rect, outcome: RunOutcome, session: &Session) {
    let (headline, color) = match outcome {
        RunOutcome::Victory => (format!("{} is cleared!", session.level.name), Color::Green),
        RunOutcome::Defeat => (format!("{} has fallen.", session.name), Color::Red),
    };

    let summary = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Enemies defeated: {}", session.enemies_defeated)),
        Line::from(format!("Gold: {}", session.currency)),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(panel("Run over", color));

    frame.render_widget(summary, area);
}
