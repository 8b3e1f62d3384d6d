//! Level selection list.

use game_content::LevelCatalog;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
};

use super::panel;

pub fn render_level_list(frame: &mut Frame, area: Rect, catalog: &LevelCatalog, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Levels
            Constraint::Length(5), // Description of the highlighted level
        ])
        .split(area);

    let items: Vec<ListItem> = if catalog.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            format!("No levels under {}", catalog.root().display()),
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        catalog
            .entries()
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let is_selected = idx == selected;
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_selected { "► " } else { "  " },
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(
                        entry.name(),
                        if is_selected {
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                    Span::styled(
                        format!(" ({} enemies)", entry.enemy_count()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };

    frame.render_widget(
        List::new(items).block(panel("Choose a level", Color::Cyan)),
        chunks[0],
    );

    let description = catalog
        .get(selected)
        .map(|entry| entry.descriptor.description.as_str())
        .unwrap_or_default();
    let footer = Paragraph::new(vec![
        Line::from(description),
        Line::from(Span::styled(
            "↑/↓ choose   Enter play   Backspace back",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(panel("About", Color::DarkGray));
    frame.render_widget(footer, chunks[1]);
}
