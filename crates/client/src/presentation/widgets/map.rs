//! Map viewport and character sidebar.
//!
//! The viewport is a fixed window of tiles centred on the player. Cells past
//! the map edge render blank, so the player stays in the middle even in a
//! corner.

use game_core::{ItemSlot, Position, Session, TerrainKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::panel;

/// Tiles shown on each side of the player.
pub const VIEW_RADIUS: i32 = 5;

pub const PLAYER_GLYPH: char = '@';
pub const ENEMY_GLYPH: char = 'E';
pub const WALL_GLYPH: char = '#';
pub const FLOOR_GLYPH: char = '.';
const VOID_GLYPH: char = ' ';

pub fn render_map(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let lines: Vec<Line> = viewport_rows(session, VIEW_RADIUS)
        .into_iter()
        .map(|row| Line::from(row.chars().map(styled_glyph).collect::<Vec<_>>()))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(panel(&session.level.name, Color::Cyan)),
        chunks[0],
    );

    render_sidebar(frame, chunks[1], session);
}

/// Glyph rows of the `(2 * radius + 1)` square window around the player.
pub fn viewport_rows(session: &Session, radius: i32) -> Vec<String> {
    let center = session.position;
    (-radius..=radius)
        .map(|dy| {
            (-radius..=radius)
                .map(|dx| glyph_at(session, center.offset(dx, dy)))
                .collect()
        })
        .collect()
}

fn glyph_at(session: &Session, position: Position) -> char {
    if position == session.position {
        return PLAYER_GLYPH;
    }
    if session.level.enemy_at(position).is_some() {
        return ENEMY_GLYPH;
    }
    match session.level.terrain_at(position) {
        Some(TerrainKind::Wall) => WALL_GLYPH,
        Some(TerrainKind::Floor) => FLOOR_GLYPH,
        None => VOID_GLYPH,
    }
}

fn styled_glyph(glyph: char) -> Span<'static> {
    let style = match glyph {
        PLAYER_GLYPH => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        ENEMY_GLYPH => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        WALL_GLYPH => Style::default().fg(Color::Gray),
        _ => Style::default().fg(Color::DarkGray),
    };
    // Doubled horizontally so tiles look square in a terminal cell grid.
    Span::styled(format!("{glyph}{glyph}"), style)
}

fn render_sidebar(frame: &mut Frame, area: Rect, session: &Session) {
    let mut lines = vec![
        Line::from(Span::styled(
            session.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Health: {}", session.health)),
        Line::from(format!("Gold:   {}", session.currency)),
        Line::from(format!("At:     {}", session.position)),
        Line::from(""),
    ];

    for slot in ItemSlot::ALL {
        let item = session
            .items
            .get(slot)
            .map(|item| format!("{} (+{})", item.name, item.modifier))
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(format!("{:<7} {item}", slot.label())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Enemies left: {}",
        session.level.enemies.len()
    )));
    lines.push(Line::from(Span::styled(
        "arrows/wasd move   q quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(
        Paragraph::new(lines).block(panel("Hero", Color::Yellow)),
        area,
    );
}
