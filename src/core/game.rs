//=========================================================================
// Game
//=========================================================================
//
// Composition root for the core. Owns the key state and the stage
// controller; the platform layer calls `update` once per redraw.
//
// Architecture:
//   Game
//     ├─ keys: StateTracker        (raw key state + typed characters)
//     └─ controller: StageController
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::frame::Frame;
use super::input::{InputEvent, StateTracker};
use super::leaderboard::RecordStore;
use super::stage::{Stage, StageController};
use super::TickControl;
use crate::config::GameConfig;

//=== Game ================================================================

pub struct Game<R: Rng = StdRng> {
    keys: StateTracker,
    controller: StageController<R>,
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, store: Box<dyn RecordStore>, rng: R) -> Self {
        Self {
            keys: StateTracker::new(),
            controller: StageController::new(config, store, rng),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Applies this frame's input batches, then updates the stage controller.
    ///
    /// # Processing Pipeline
    ///
    /// 1. Drop last frame's typed characters
    /// 2. Fold every batch into the key state, in arrival order
    /// 3. Run the controller against the resulting state
    pub fn update(&mut self, now: Instant, batches: &[Vec<InputEvent>]) -> TickControl {
        self.keys.clear();
        for batch in batches {
            self.keys.process_events(batch);
        }
        self.controller.update(now, &self.keys)
    }

    pub fn frame(&self) -> Frame<'_> {
        self.controller.frame()
    }

    pub fn stage(&self) -> Stage {
        self.controller.stage()
    }

    pub fn controller(&self) -> &StageController<R> {
        &self.controller
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
