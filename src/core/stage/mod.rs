//=========================================================================
// Stage System
//=========================================================================
//
// Finite-state machine over the game's screens.
//
// Architecture:
//   StageController
//     ├─ stage: Stage
//     ├─ dispatcher: InputDispatcher<SignalQueue>
//     ├─ TRANSITIONS: (stage × trigger) → (stage, effect)
//     └─ player / traffic / leaderboard / record store
//
// Flow:
//   update() → dispatcher.tick() → drain signals → fire(trigger)
//            → gameplay step (gated to the tick rate, Playing only)
//
//=========================================================================

//=== Module Declarations =================================================

mod controller;
pub mod menu;
pub mod signal;
pub mod tick_gate;
pub mod transition;

//=== Public API ==========================================================

pub use controller::StageController;
pub use menu::{Menu, MenuCommand, MenuItem};
pub use signal::{Signal, SignalQueue};
pub use tick_gate::TickGate;
pub use transition::{Effect, Transition, Trigger, TRANSITIONS};

//=== Stage ===============================================================

/// The active screen. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    MainMenu,
    PauseMenu,
    Playing,
    GameOver,
    Leaderboard,
    EnterName,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::MainMenu,
        Stage::PauseMenu,
        Stage::Playing,
        Stage::GameOver,
        Stage::Leaderboard,
        Stage::EnterName,
    ];
}
