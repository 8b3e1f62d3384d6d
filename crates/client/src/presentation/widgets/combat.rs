//! Combat screen: two character cards over the action log.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{ActiveItem, Encounter, HealthMeter, Session};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Wrap},
};

use super::panel;

/// Data shown on one character card.
struct Card<'a> {
    name: &'a str,
    description: &'a str,
    health: HealthMeter,
    item: ActiveItem,
    stats: Option<(u32, u32)>,
    image: Option<&'a str>,
}

pub fn render_combat(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    encounter: &Encounter,
    portraits: &Portraits,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Cards
            Constraint::Min(0),    // Log
            Constraint::Length(3), // Actions
        ])
        .split(area);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let player = Card {
        name: &session.name,
        description: &session.description,
        health: session.health,
        item: ActiveItem::select(&session.items),
        stats: None,
        image: session.image.as_deref(),
    };
    let enemy = encounter.enemy();
    let foe = Card {
        name: &enemy.name,
        description: &enemy.description,
        health: enemy.health,
        item: enemy.active_item(),
        stats: Some((enemy.attack, enemy.defense)),
        image: enemy.image.as_deref(),
    };

    render_card(frame, cards[0], &player, portraits, Color::Yellow);
    render_card(frame, cards[1], &foe, portraits, Color::Red);
    render_log(frame, rows[1], encounter);

    let actions = Paragraph::new(Line::from(vec![
        Span::styled("[a]", Style::default().fg(Color::Yellow)),
        Span::raw(" Attack   "),
        Span::styled("[h]", Style::default().fg(Color::Yellow)),
        Span::raw(" Heal   "),
        Span::styled("[r]", Style::default().fg(Color::Yellow)),
        Span::raw(" Run"),
    ]))
    .block(panel("Actions", Color::DarkGray));
    frame.render_widget(actions, rows[2]);
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, portraits: &Portraits, color: Color) {
    let block = panel(card.name, color);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let ratio = if card.health.maximum() == 0 {
        0.0
    } else {
        f64::from(card.health.current()) / f64::from(card.health.maximum())
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .label(format!("HP {}", card.health))
        .ratio(ratio);
    frame.render_widget(gauge, parts[0]);

    let mut lines = vec![Line::from(format!(
        "{} {} (+{})",
        card.item.slot.label(),
        card.item.name,
        card.item.modifier
    ))];
    if let Some((attack, defense)) = card.stats {
        lines.push(Line::from(format!("ATK {attack}  DEF {defense}")));
    }
    lines.push(Line::from(Span::styled(
        portraits.label(card.image),
        Style::default().fg(Color::DarkGray),
    )));
    if !card.description.is_empty() {
        lines.push(Line::from(card.description));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), parts[1]);
}

fn render_log(frame: &mut Frame, area: Rect, encounter: &Encounter) {
    let visible = usize::from(area.height.saturating_sub(2));
    let log = encounter.log();
    let lines: Vec<Line> = log
        .iter()
        .skip(log.len().saturating_sub(visible))
        .map(|line| {
            let style = if line.contains("CRITICAL") || line.contains("defeated") {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(line.to_string(), style))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel("Battle", Color::Gray)),
        area,
    );
}

/// Which portrait files of a level exist on disk.
///
/// Resolved once when the level opens so drawing a frame never touches the
/// filesystem. The terminal cannot draw images, so a card only shows a label
/// saying whether the file the level points to is there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portraits {
    present: BTreeMap<String, bool>,
}

impl Portraits {
    pub fn resolve<'a>(level_dir: &Path, images: impl IntoIterator<Item = &'a str>) -> Self {
        let present = images
            .into_iter()
            .map(|image| (image.to_owned(), level_dir.join(image).is_file()))
            .collect();
        Self { present }
    }

    pub fn label(&self, image: Option<&str>) -> String {
        match image {
            None => "[no portrait]".to_string(),
            Some(image) if self.present.get(image).copied().unwrap_or(false) => {
                format!("[portrait: {image}]")
            }
            Some(image) => format!("[portrait missing: {image}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_when_portrait_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.png"), b"png").unwrap();

        let portraits = Portraits::resolve(dir.path(), ["hero.png", "ogre.png"]);

        assert_eq!(portraits.label(Some("hero.png")), "[portrait: hero.png]");
        assert_eq!(portraits.label(Some("ogre.png")), "[portrait missing: ogre.png]");
        assert_eq!(portraits.label(Some("never.png")), "[portrait missing: never.png]");
        assert_eq!(portraits.label(None), "[no portrait]");
        assert_eq!(Portraits::default().label(Some("hero.png")), "[portrait missing: hero.png]");
    }

    #[test]
    fn labels_do_not_recheck_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let hero = dir.path().join("hero.png");
        std::fs::write(&hero, b"png").unwrap();
        let portraits = Portraits::resolve(dir.path(), ["hero.png"]);

        std::fs::remove_file(&hero).unwrap();

        assert_eq!(portraits.label(Some("hero.png")), "[portrait: hero.png]");
    }
}
