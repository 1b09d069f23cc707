//=========================================================================
// Lane Racer — Binary
//
// Loads `lane_racer.json` from the working directory (defaults if
// absent), opens the leaderboard file it names, and runs the game.
// Log verbosity follows `RUST_LOG`, defaulting to `lane_racer=info`.
//
//=========================================================================

use anyhow::Context;
use log::info;

use lane_racer::config::{GameConfig, CONFIG_FILE};
use lane_racer::core::leaderboard::JsonRecordStore;
use lane_racer::EngineBuilder;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("lane_racer=info")).init();

    let config = GameConfig::load_from(CONFIG_FILE)
        .with_context(|| format!("failed to load {}", CONFIG_FILE))?;
    let store = JsonRecordStore::new(config.records_path.clone());
    info!("Leaderboard file: {}", store.path().display());

    EngineBuilder::new()
        .with_config(config)
        .build(store)
        .context("failed to start the game")?
        .run()
        .context("game loop failed")?;

    Ok(())
}
