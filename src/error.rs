//=========================================================================
// Error Types
//=========================================================================
//
// Startup and persistence failures.
//
// - `ConfigError` / `InitError`: startup, not retried; the binary aborts
//   with the message.
// - `PersistenceError`: leaderboard load/save. Recoverable: the stage
//   controller returns to the main menu with a notice.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;

//=== PersistenceError ====================================================

/// Leaderboard storage failure.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read leaderboard {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("leaderboard {} is corrupt: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize leaderboard: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write leaderboard {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Storage backend refused the operation for a non-I/O reason.
    #[error("leaderboard storage unavailable: {0}")]
    Unavailable(String),
}

//=== ConfigError =========================================================

/// Configuration file failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config {} is malformed: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

//=== InitError ===========================================================

/// Anything that stops the game from starting or its event loop from running.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=========================================================================
// Unit Tests
//=========================================================================
