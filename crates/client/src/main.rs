//! QQuest terminal client.
//!
//! Composition root: reads the command line and environment, installs
//! logging, loads the game configuration and level catalog, then hands the
//! terminal to [`app::App`].
//!
//! ```bash
//! # run against ./levels with verbose logs
//! cargo run -p qquest-client -- --debug
//! ```
mod app;
mod config;
mod input;
mod logging;
mod presentation;

use anyhow::Result;
use clap::Parser;
use game_content::{ConfigLoader, LevelCatalog};
use game_core::{GameConfig, PcgRng};

use crate::app::App;
use crate::config::ClientConfig;

#[derive(Debug, Parser)]
#[command(name = "qquest", version, about = "Turn-based dungeon crawl in the terminal")]
struct Cli {
    /// Log game internals at debug level.
    #[arg(long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    logging::setup_logging(config.log_dir.as_deref(), cli.debug)?;
    tracing::info!(levels = %config.levels_dir.display(), "Starting qquest");

    let game_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    let catalog = LevelCatalog::scan(&config.levels_dir, &game_config)?;
    if catalog.is_empty() {
        tracing::warn!(root = %catalog.root().display(), "no playable levels found");
    }

    let seed = config.seed.unwrap_or_else(config::clock_seed);
    tracing::info!(seed, "dice seeded");

    let app = App::new(game_config, catalog, PcgRng::seeded(seed), config.persist_roster);
    app.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
