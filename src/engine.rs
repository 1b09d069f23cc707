//=========================================================================
// Lane Racer Engine
//
// Entry point that wires configuration, the record store, the core game
// and the winit platform together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(store)──>  Engine  ──run()──>  [Event loop]
//         │                               │
//         ├─ with_config()                └─ creates the channel
//         ├─ with_tick_rate()                runs the platform
//         ├─ with_seed()                     blocks until exit
//         └─ with_channel_capacity()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::leaderboard::RecordStore;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::Game;
use crate::error::InitError;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::default`]
/// - **Channel capacity**: 128 batches
///
/// # Examples
///
/// ```no_run
/// use lane_racer::config::GameConfig;
/// use lane_racer::core::leaderboard::JsonRecordStore;
/// use lane_racer::EngineBuilder;
///
/// # fn main() -> Result<(), lane_racer::error::InitError> {
/// EngineBuilder::new()
///     .with_config(GameConfig::default())
///     .with_seed(7)
///     .build(JsonRecordStore::new("records.json"))?
///     .run()?;
/// # Ok(())
/// # }
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            channel_capacity: 128,
        }
    }

    /// Replaces the whole game configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets gameplay ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate == 0`.
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        assert!(tick_rate > 0, "Tick rate must be positive");
        self.config.tick_rate = tick_rate;
        self
    }

    /// Fixes the traffic seed for a reproducible session.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Validates the configuration and builds the game.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::Config`] if the configuration is invalid.
    pub fn build<S: RecordStore + 'static>(self, store: S) -> Result<Engine, InitError> {
        self.config.validate()?;

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Building engine (tick rate: {}, seed: {:?}, channel: {})",
            self.config.tick_rate, self.config.seed, self.channel_capacity
        );

        Ok(Engine {
            game: Game::new(self.config.clone(), Box::new(store), rng),
            config: self.config,
            channel_capacity: self.channel_capacity,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Lane Racer runtime. Create via [`EngineBuilder`].
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (Event Loop)
///         ├─► Window, Input Polling
///         └─► Game::update on every redraw
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    game: Game,
    config: GameConfig,
    channel_capacity: usize,
}

impl Engine {
    /// Headless access to the game, before `run` takes it over.
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Runs the platform event loop and blocks until the game exits.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::Platform`] if the event loop or the window
    /// cannot be created, or the loop fails.
    pub fn run(self) -> Result<(), InitError> {
        info!("Starting engine runtime (tick rate: {})", self.config.tick_rate);

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        info!("Platform channel created (capacity: {})", self.channel_capacity);

        let platform = Platform::new(&self.config, self.game, tx, rx);
        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::leaderboard::MemoryRecordStore;
    use crate::core::stage::Stage;
    use crate::error::ConfigError;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config, GameConfig::default());
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_tick_rate() {
        let builder = EngineBuilder::new().with_tick_rate(120);
        assert_eq!(builder.config.tick_rate, 120);
    }

    #[test]
    #[should_panic(expected = "Tick rate must be positive")]
    fn builder_with_tick_rate_panics_on_zero() {
        EngineBuilder::new().with_tick_rate(0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_seed(9)
            .with_channel_capacity(256)
            .build(MemoryRecordStore::new())
            .unwrap();

        assert_eq!(engine.config().seed, Some(9));
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.game().stage(), Stage::MainMenu);
    }

    #[test]
    fn invalid_config_fails_build() {
        let mut config = GameConfig::default();
        config.traffic_pool = 0;

        let result = EngineBuilder::new().with_config(config).build(MemoryRecordStore::new());
        assert!(matches!(result, Err(InitError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn same_seed_same_traffic() {
        let a = EngineBuilder::new().with_seed(5).build(MemoryRecordStore::new()).unwrap();
        let b = EngineBuilder::new().with_seed(5).build(MemoryRecordStore::new()).unwrap();
        assert_eq!(a.game().frame().traffic, b.game().frame().traffic);
    }
}
