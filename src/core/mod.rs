//=========================================================================
// Core Systems
//
// Everything that runs without a window: input resolution, the stage
// state machine, traffic, scoring and the leaderboard.
//
// Responsibilities:
// - Turn platform input batches into key state and edge events
// - Step gameplay at a fixed rate, independent of redraw cadence
// - Expose a per-frame snapshot for whatever renders it
//
// Notes:
// The core runs on the platform's thread, once per redraw. It never
// touches winit; input arrives as `InputEvent` batches through the
// platform bridge.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod frame;
pub mod game;
pub mod geometry;
pub mod input;
pub mod leaderboard;
pub mod platform_bridge;
pub mod player;
pub mod stage;
pub mod traffic;

//=== Public API ==========================================================

pub use frame::{Frame, Renderer};
pub use game::Game;

//=== TickControl =========================================================
//
// Whether the game loop keeps running after an update.
//
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}
