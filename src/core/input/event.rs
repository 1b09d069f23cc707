//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (Winit) into a
// small, game-friendly format used by the input subsystem.
//
// Responsibilities:
// - Represent the keys the game reacts to in a stable, portable way
// - Carry typed characters for the name entry field
// - Provide a fixed key enumeration order for deterministic dispatch
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (raw held state)
//         ↓
//    InputDispatcher (edges → handlers)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Only the keys the game binds are represented. The declaration order is
/// the dispatch order: handlers bound to `ArrowUp` always run before those
/// bound to `Enter` within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyCode {
    //--- Arrow Keys -------------------------------------------------------
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Special Keys -----------------------------------------------------

    /// Escape key
    Escape,

    /// Return/Enter key (numpad Enter maps here too)
    Enter,

    /// Backspace key
    Backspace,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

impl KeyCode {
    /// Every bindable key, in dispatch order.
    pub const ALL: [KeyCode; 7] = [
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::Escape,
        KeyCode::Enter,
        KeyCode::Backspace,
    ];
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// - **KeyDown/KeyUp**: discrete key transitions (OS key-repeat is
///   filtered out by the platform before it reaches here)
/// - **Character**: a printable character typed by the user
/// - **Unidentified**: anything else; ignored by the input system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Printable character produced by a key press (including repeats).
    Character(char),

    /// Unrecognized or unsupported event.
    Unidentified,
}

impl InputEvent {
    /// Returns `true` for key transitions, which may be deduplicated.
    ///
    /// Characters are never deduplicated: typing "aa" is two events.
    pub fn is_key_transition(&self) -> bool {
        matches!(self, Self::KeyDown(_) | Self::KeyUp(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
