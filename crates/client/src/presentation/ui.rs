//! Frame composition.
//!
//! Every screen is full-frame; a single status line sits underneath it.
use anyhow::Result;
use game_content::LevelCatalog;
use game_core::{GameFlow, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::app::ViewState;
use crate::presentation::{terminal::Tui, widgets};

/// Everything a frame is drawn from.
pub struct RenderContext<'a> {
    pub flow: &'a GameFlow,
    pub catalog: &'a LevelCatalog,
    pub view: &'a ViewState,
}

pub fn render(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    terminal.draw(|frame| draw(frame, ctx))?;
    Ok(())
}

fn draw(frame: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    draw_screen(frame, chunks[0], ctx);

    if let Some(status) = &ctx.view.status {
        let line = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow));
        frame.render_widget(line, chunks[1]);
    }
}

fn draw_screen(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let flow = ctx.flow;
    match (flow.screen(), flow.session()) {
        (Screen::Title, _) => widgets::title::render_title(frame, area),
        (Screen::LevelSelect, _) => {
            widgets::level_list::render_level_list(frame, area, ctx.catalog, ctx.view.selected);
        }
        (Screen::Map, Some(session)) => widgets::map::render_map(frame, area, session),
        (Screen::Combat, Some(session)) => {
            if let Some(encounter) = flow.encounter() {
                widgets::combat::render_combat(
                    frame,
                    area,
                    session,
                    encounter,
                    &ctx.view.portraits,
                );
            }
        }
        (Screen::Loot, Some(session)) => {
            if let Some(table) = flow.loot() {
                widgets::loot::render_loot(
                    frame,
                    area,
                    session,
                    table,
                    flow.config().loot_value_multiplier,
                );
            }
        }
        (Screen::RunEnded(outcome), Some(session)) => {
            widgets::run_end::render_run_end(frame, area, outcome, session);
        }
        // Screens past the title never render without a session.
        (_, None) | (Screen::Exit, _) => {}
    }
}
