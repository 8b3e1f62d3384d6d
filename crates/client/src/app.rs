//! Fixed-rate event loop tying input, the screen flow and rendering together.
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use game_content::{LevelCatalog, LevelLoader};
use game_core::{
    DirectionKeys, FlowEvent, FlowInput, GameConfig, GameError, GameFlow, PcgRng, Position,
    Screen,
};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

use crate::input::{self, KeyAction};
use crate::presentation::Portraits;
use crate::presentation::terminal::{self, TerminalGuard};
use crate::presentation::ui::{self, RenderContext};

/// Frontend-only state that the flow controller does not track.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Highlighted row of the level list.
    pub selected: usize,
    /// One-line message under the current screen.
    pub status: Option<String>,
    /// Portrait files of the level being played.
    pub portraits: Portraits,
}

pub struct App {
    flow: GameFlow,
    catalog: LevelCatalog,
    rng: PcgRng,
    persist_roster: bool,
    view: ViewState,
}

impl App {
    pub fn new(
        config: GameConfig,
        catalog: LevelCatalog,
        rng: PcgRng,
        persist_roster: bool,
    ) -> Self {
        Self {
            flow: GameFlow::new(config),
            catalog,
            rng,
            persist_roster,
            view: ViewState::default(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut terminal = terminal::init()?;
        let _guard = TerminalGuard;

        let frame = Duration::from_millis(self.flow.config().frame_interval_ms());
        let mut ticker = time::interval(frame);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();

        while self.flow.is_running() {
            ticker.tick().await;

            let keys = self.poll_input()?;
            if !self.flow.is_running() {
                break;
            }

            let now = Instant::now();
            let elapsed_ms =
                u32::try_from(now.duration_since(last_tick).as_millis()).unwrap_or(u32::MAX);
            last_tick = now;

            self.advance(keys, elapsed_ms);
            ui::render(&mut terminal, &self.render_context())?;
        }

        tracing::info!("event loop finished");
        Ok(())
    }

    /// Drains every pending terminal event, dispatching discrete commands at
    /// once and folding held directions into one set for the tick.
    fn poll_input(&mut self) -> Result<DirectionKeys> {
        let mut keys = DirectionKeys::empty();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                let action = input::map_key(key, self.flow.screen());
                self.apply_key(action, &mut keys);
                if action == KeyAction::Quit {
                    break;
                }
            }
        }

        Ok(keys)
    }

    fn apply_key(&mut self, action: KeyAction, keys: &mut DirectionKeys) {
        match action {
            KeyAction::Quit => self.dispatch(FlowInput::Quit),
            KeyAction::Direction(direction) => keys.insert(direction),
            KeyAction::MenuUp => {
                self.view.selected = self.view.selected.saturating_sub(1);
            }
            KeyAction::MenuDown => {
                if self.view.selected + 1 < self.catalog.len() {
                    self.view.selected += 1;
                }
            }
            KeyAction::Confirm => self.confirm(),
            KeyAction::Back => self.dispatch(FlowInput::Back),
            KeyAction::Combat(combat) => self.dispatch(FlowInput::Combat(combat)),
            KeyAction::TakeLoot(index) => {
                let slot = self
                    .flow
                    .loot()
                    .and_then(|table| table.offers().get(index))
                    .map(|offer| offer.slot);
                if let Some(slot) = slot {
                    self.dispatch(FlowInput::TakeLoot(slot));
                }
            }
            KeyAction::None => {}
        }
    }

    fn confirm(&mut self) {
        match self.flow.screen() {
            Screen::Title => self.dispatch(FlowInput::Start),
            Screen::LevelSelect => self.open_selected_level(),
            Screen::Loot => self.dispatch(FlowInput::DismissLoot),
            Screen::RunEnded(_) => {
                self.dispatch(FlowInput::Acknowledge);
                if self.persist_roster
                    && let Err(error) = self.catalog.rescan(self.flow.config())
                {
                    tracing::warn!(error = %format!("{error:#}"), "level catalog rescan failed");
                }
            }
            Screen::Map | Screen::Combat | Screen::Exit => {}
        }
    }

    fn open_selected_level(&mut self) {
        let Some(entry) = self.catalog.get(self.view.selected) else {
            self.view.status = Some("No levels found".to_string());
            return;
        };

        match entry.load() {
            Ok(level) => {
                let images = level
                    .enemies
                    .iter()
                    .map(|enemy| enemy.image.as_deref())
                    .chain([level.player.image.as_deref()])
                    .flatten();
                self.view.portraits = Portraits::resolve(&entry.descriptor.directory, images);
                self.dispatch(FlowInput::SelectLevel(level));
            }
            Err(error) => {
                tracing::warn!(
                    level = entry.id(),
                    error = %format!("{error:#}"),
                    "level failed to load"
                );
                self.view.status = Some(format!("Could not load {}", entry.name()));
            }
        }
    }

    /// Runs the per-frame map tick.
    fn advance(&mut self, keys: DirectionKeys, elapsed_ms: u32) {
        if self.flow.screen() == Screen::Map {
            self.dispatch(FlowInput::Tick { keys, elapsed_ms });
        }
    }

    fn dispatch(&mut self, input: FlowInput) {
        let label = input.as_str();
        match self.flow.handle(input, &mut self.rng) {
            Ok(screen) => {
                tracing::trace!(input = label, screen = screen.as_str(), "input handled");
            }
            Err(error) if error.severity().is_internal() => {
                tracing::error!(code = error.error_code(), %error, "flow rejected input");
            }
            Err(error) => {
                tracing::debug!(code = error.error_code(), %error, "input ignored");
            }
        }
        // Events refer to the session, which the next input may discard.
        self.process_events();
    }

    fn process_events(&mut self) {
        for event in self.flow.drain_events() {
            match event {
                FlowEvent::SessionStarted { level_id } => {
                    tracing::info!(level = %level_id, "run started");
                    self.view.status = None;
                }
                FlowEvent::EnemyDefeated { level_id, position, gold } => {
                    tracing::info!(level = %level_id, %position, gold, "enemy defeated");
                    self.view.status = Some(format!("Victory! +{gold} gold"));
                    if self.persist_roster {
                        self.save_roster(&level_id, position);
                    }
                }
                FlowEvent::Fled { restored_to } => {
                    self.view.status = Some(format!("You escaped to {restored_to}"));
                }
                FlowEvent::LootTaken { item, replaced, .. } => {
                    self.view.status = Some(match replaced {
                        Some(old) => format!("Equipped {} (dropped {})", item.name, old.name),
                        None => format!("Equipped {}", item.name),
                    });
                }
                FlowEvent::RunEnded { outcome, enemies_defeated } => {
                    tracing::info!(?outcome, enemies_defeated, "run ended");
                }
                FlowEvent::Moved { .. }
                | FlowEvent::MoveRejected(_)
                | FlowEvent::EncounterStarted { .. } => {}
            }
        }
    }

    fn save_roster(&self, level_id: &str, defeated_at: Position) {
        let Some(entry) = self.catalog.find(level_id) else {
            tracing::warn!(level = level_id, "no level file to save the roster to");
            return;
        };

        match LevelLoader::write_roster(&entry.file_path(), defeated_at) {
            Ok(removed) => tracing::debug!(level = level_id, removed, "roster saved"),
            Err(error) => tracing::warn!(
                level = level_id,
                error = %format!("{error:#}"),
                "roster save failed"
            ),
        }
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            flow: &self.flow,
            catalog: &self.catalog,
            view: &self.view,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use game_core::{CombatAction, RunOutcome};

    use super::*;

    /// 3x1 corridor: player at (0, 0), a one-health rat at (1, 0), and a
    /// ghost record with no position that the loader skips.
    fn write_corridor(root: &Path) -> PathBuf {
        let dir = root.join("corridor");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("level.json"),
            r#"{
                "name": "Corridor",
                "path": "corridor.ron",
                "starting_position": {"x": 0, "y": 0},
                "player": {
                    "name": "Hero",
                    "image": "hero.png",
                    "items": {"attack": {"name": "Sword", "modifier": 2}}
                },
                "enemies": [
                    {"name": "Rat", "health": 1, "max_health": 1, "image": "rat.png",
                     "position": {"x": 1, "y": 0}},
                    {"name": "Ghost", "lore": "never placed"}
                ]
            }"#,
        )
        .unwrap();
        std::fs::write(dir.join("hero.png"), b"png").unwrap();
        std::fs::write(
            dir.join("corridor.ron"),
            r#"(width: 3, height: 1, tilesets: [(first_gid: 1, tile_count: 1)], layers: [(name: "g", gids: [1, 1, 1])])"#,
        )
        .unwrap();
        dir.join("level.json")
    }

    fn app_in(root: &Path, persist_roster: bool) -> App {
        let config = GameConfig::default();
        let catalog = LevelCatalog::scan(root, &config).unwrap();
        App::new(config, catalog, PcgRng::seeded(7), persist_roster)
    }

    fn press(app: &mut App, action: KeyAction) {
        let mut keys = DirectionKeys::empty();
        app.apply_key(action, &mut keys);
        app.advance(keys, 500);
    }

    #[test]
    fn title_to_map_through_level_list() {
        let root = tempfile::tempdir().unwrap();
        write_corridor(root.path());
        let mut app = app_in(root.path(), false);

        press(&mut app, KeyAction::Confirm);
        assert_eq!(app.flow.screen(), Screen::LevelSelect);
        press(&mut app, KeyAction::MenuDown);
        assert_eq!(app.view.selected, 0, "only one level to select");
        press(&mut app, KeyAction::Confirm);
        assert_eq!(app.flow.screen(), Screen::Map);
        assert_eq!(app.view.portraits.label(Some("hero.png")), "[portrait: hero.png]");
        assert_eq!(app.view.portraits.label(Some("rat.png")), "[portrait missing: rat.png]");
    }

    #[test]
    fn walking_into_enemy_opens_combat() {
        let root = tempfile::tempdir().unwrap();
        write_corridor(root.path());
        let mut app = app_in(root.path(), false);
        press(&mut app, KeyAction::Confirm);
        press(&mut app, KeyAction::Confirm);

        press(&mut app, KeyAction::Direction(DirectionKeys::RIGHT));
        assert_eq!(app.flow.screen(), Screen::Combat);
    }

    #[test]
    fn fleeing_returns_to_map_with_status() {
        let root = tempfile::tempdir().unwrap();
        write_corridor(root.path());
        let mut app = app_in(root.path(), false);
        press(&mut app, KeyAction::Confirm);
        press(&mut app, KeyAction::Confirm);
        press(&mut app, KeyAction::Direction(DirectionKeys::RIGHT));

        press(&mut app, KeyAction::Combat(CombatAction::Flee));
        assert_eq!(app.flow.screen(), Screen::Map);
        assert!(app.view.status.as_deref().is_some_and(|s| s.starts_with("You escaped")));
    }

    #[test]
    fn quit_exits_from_any_screen() {
        let root = tempfile::tempdir().unwrap();
        write_corridor(root.path());
        let mut app = app_in(root.path(), false);
        press(&mut app, KeyAction::Confirm);

        press(&mut app, KeyAction::Quit);
        assert!(!app.flow.is_running());
    }

    #[test]
    fn victory_persists_roster_when_enabled() {
        let root = tempfile::tempdir().unwrap();
        let level_file = write_corridor(root.path());
        let mut app = app_in(root.path(), true);
        press(&mut app, KeyAction::Confirm);
        press(&mut app, KeyAction::Confirm);
        press(&mut app, KeyAction::Direction(DirectionKeys::RIGHT));

        // Seed 7 wins; the number of swings depends on the dice.
        for _ in 0..100 {
            if app.flow.screen() != Screen::Combat {
                break;
            }
            press(&mut app, KeyAction::Combat(CombatAction::Attack));
        }

        assert_eq!(app.flow.screen(), Screen::RunEnded(RunOutcome::Victory));
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&level_file).unwrap()).unwrap();
        assert_eq!(saved["name"], "Corridor");
        let enemies = saved["enemies"].as_array().unwrap();
        assert_eq!(enemies.len(), 1, "only the defeated rat is removed");
        assert_eq!(enemies[0]["name"], "Ghost");
        assert_eq!(enemies[0]["lore"], "never placed");
    }
}
