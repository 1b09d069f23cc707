//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables loaded from a JSON file. Every field has a default, so a
// partial file (or none at all) is valid.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::player::MIN_VIEWPORT_HEIGHT;
use crate::error::ConfigError;

/// File the binary reads from the working directory.
pub const CONFIG_FILE: &str = "lane_racer.json";

//=== GameConfig ==========================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Logical viewport size in pixels.
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Width of the road strip, centered in the viewport.
    pub road_width: f32,

    /// Background scroll speed in pixels per gameplay tick.
    pub scroll_speed: f32,

    /// Traffic moves this much slower than the road scrolls.
    pub traffic_slowdown: f32,

    /// Player movement per gameplay tick while a direction is held.
    pub player_step: f32,

    pub points_per_tick: u64,

    /// Number of cars in the recycled traffic pool.
    pub traffic_pool: usize,

    /// Gameplay ticks per second.
    pub tick_rate: u32,

    pub records_path: PathBuf,

    /// Fixed traffic seed; `None` seeds from entropy.
    pub seed: Option<u64>,

    pub window_title: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            road_width: 1000.0,
            scroll_speed: 20.0,
            traffic_slowdown: 3.0,
            player_step: 10.0,
            points_per_tick: 1,
            traffic_pool: 4,
            tick_rate: 64,
            records_path: PathBuf::from("records.json"),
            seed: None,
            window_title: "Lane Racer".to_string(),
        }
    }
}

impl GameConfig {
    //--- Derived Values ---------------------------------------------------

    /// Per-tick traffic displacement.
    pub fn traffic_speed(&self) -> f32 {
        self.scroll_speed - self.traffic_slowdown
    }

    /// Minimum wall time between gameplay ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// X coordinate of the road's left edge.
    pub fn road_origin(&self) -> f32 {
        self.viewport_width / 2.0 - self.road_width / 2.0
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(ConfigError::Invalid("viewport must have a positive size".into()));
        }
        if self.viewport_height <= MIN_VIEWPORT_HEIGHT {
            return Err(ConfigError::Invalid(format!(
                "viewport_height must exceed {MIN_VIEWPORT_HEIGHT}"
            )));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if self.traffic_pool == 0 {
            return Err(ConfigError::Invalid("traffic_pool must hold at least one car".into()));
        }
        Ok(())
    }

    //--- File I/O ---------------------------------------------------------

    /// Loads config from `path`, falling back to defaults if it is missing.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_arcade_tuning() {
        let config = GameConfig::default();
        assert_eq!(config.traffic_speed(), 17.0);
        assert_eq!(config.tick_interval(), Duration::from_micros(15_625));
        assert_eq!(config.road_origin(), 460.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = GameConfig::load_from(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "seed": 7, "traffic_pool": 6 }"#).unwrap();

        let config = GameConfig::load_from(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.traffic_pool, 6);
        assert_eq!(config.scroll_speed, 20.0);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = GameConfig::default();
        config.window_title = "Night Drive".into();
        config.save_to(&path).unwrap();

        assert_eq!(GameConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(GameConfig::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "tick_rate": 0 }"#).unwrap();

        assert!(matches!(GameConfig::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn viewport_shorter_than_the_car_is_rejected() {
        let mut config = GameConfig::default();
        config.viewport_height = 200.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.viewport_height = 250.0;
        assert!(config.validate().is_err());

        config.viewport_height = 251.0;
        assert!(config.validate().is_ok());
    }
}
