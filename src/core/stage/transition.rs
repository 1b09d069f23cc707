//=========================================================================
// Transition Table
//=========================================================================
//
// Every legal stage change as data: `(from, trigger) → (to, effect)`.
// Pairs with no row are ignored by the controller.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::menu::MenuCommand;
use super::menu::MenuCommand as M;
use super::Stage;
use super::Stage as S;

//=== Trigger =============================================================

/// What asks for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A menu item was activated.
    Menu(MenuCommand),
    Escape,
    /// Enter outside a menu.
    Confirm,
    /// The player hit traffic.
    Crashed,
    /// The finished round's score earns a leaderboard place.
    Qualified,
    /// Leaderboard load or save failed.
    StorageFailed,
}

//=== Effect ==============================================================

/// Work the controller performs after entering the new stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    None,
    /// Reset player and traffic for a new round.
    ResetRound,
    /// Load records and test the score for admission.
    CheckAdmission,
    /// Focus the name field.
    FocusName,
    /// Load records for display.
    ShowRatings,
    /// Commit the typed name, insert and persist.
    CommitName,
    /// Stop the game loop.
    Exit,
}

//=== Transition ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Stage,
    pub trigger: Trigger,
    pub to: Stage,
    pub effect: Effect,
}

const fn row(from: Stage, trigger: Trigger, to: Stage, effect: Effect) -> Transition {
    Transition {
        from,
        trigger,
        to,
        effect,
    }
}

pub const TRANSITIONS: &[Transition] = &[
    // Main menu
    row(S::MainMenu, Trigger::Menu(M::NewGame), S::Playing, Effect::ResetRound),
    row(S::MainMenu, Trigger::Menu(M::Ratings), S::Leaderboard, Effect::ShowRatings),
    row(S::MainMenu, Trigger::Menu(M::Exit), S::MainMenu, Effect::Exit),
    // Playing
    row(S::Playing, Trigger::Escape, S::PauseMenu, Effect::None),
    row(S::Playing, Trigger::Crashed, S::GameOver, Effect::CheckAdmission),
    // Pause menu
    row(S::PauseMenu, Trigger::Menu(M::Continue), S::Playing, Effect::None),
    row(S::PauseMenu, Trigger::Menu(M::MainMenu), S::MainMenu, Effect::None),
    row(S::PauseMenu, Trigger::Menu(M::Exit), S::PauseMenu, Effect::Exit),
    // Game over
    row(S::GameOver, Trigger::Qualified, S::EnterName, Effect::FocusName),
    row(S::GameOver, Trigger::Confirm, S::Playing, Effect::ResetRound),
    row(S::GameOver, Trigger::StorageFailed, S::MainMenu, Effect::None),
    // Leaderboard
    row(S::Leaderboard, Trigger::Confirm, S::MainMenu, Effect::None),
    row(S::Leaderboard, Trigger::Escape, S::MainMenu, Effect::None),
    row(S::Leaderboard, Trigger::StorageFailed, S::MainMenu, Effect::None),
    // Name entry
    row(S::EnterName, Trigger::Confirm, S::Leaderboard, Effect::CommitName),
];

/// Finds the row for `(from, trigger)`.
pub fn lookup(from: Stage, trigger: Trigger) -> Option<&'static Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == from && t.trigger == trigger)
}

//=========================================================================
// Unit Tests
//=========================================================================
