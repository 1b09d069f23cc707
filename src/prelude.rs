//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lane_racer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine and configuration
pub use crate::config::GameConfig;
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::{ConfigError, InitError, PersistenceError};

// Core
pub use crate::core::frame::{Frame, Renderer};
pub use crate::core::input::{InputDispatcher, KeyCode, KeyPoll, TextInput};
pub use crate::core::leaderboard::{JsonRecordStore, Leaderboard, Record, RecordStore};
pub use crate::core::stage::{Stage, StageController};
pub use crate::core::{Game, TickControl};
