//! Loot offers after a victory.

use game_core::{LootTable, Session};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use super::panel;

pub fn render_loot(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    table: &LootTable,
    value_multiplier: u32,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let title = session
        .loot_enemy
        .as_ref()
        .map(|enemy| format!("{} dropped", enemy.name))
        .unwrap_or_else(|| "Loot".to_string());

    let items: Vec<ListItem> = table
        .offers()
        .iter()
        .enumerate()
        .map(|(idx, offer)| {
            let current = session
                .items
                .get(offer.slot)
                .map(|item| format!("replaces {} (+{})", item.name, item.modifier))
                .unwrap_or_else(|| "empty slot".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", idx + 1), Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    "{:<7} {} (+{})  ",
                    offer.slot.label(),
                    offer.item.name,
                    offer.item.modifier
                )),
                Span::styled(
                    format!("{}g  ", offer.value(value_multiplier)),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(current, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(panel(&title, Color::Green)),
        chunks[0],
    );

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("1-3", Style::default().fg(Color::Yellow)),
        Span::raw(" take   "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" done"),
    ]))
    .block(panel("Choose one", Color::DarkGray));
    frame.render_widget(footer, chunks[1]);
}
