//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard events into core InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (core type) → InputBuffer
//
// A key press yields a key transition (unless it is an OS auto-repeat)
// plus one `Character` per printable character of its text. Keys the
// game does not bind are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor;

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a winit KeyEvent into zero or more InputEvents.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match self.key_input_event(key_event.physical_key, key_event.state, key_event.repeat) {
            Some(event) => events.push(event),
            None => trace!(target: "platform::input", "Unmapped key ignored: {:?}", key_event.physical_key),
        }

        if key_event.state == ElementState::Pressed {
            events.extend(self.text_events(key_event.text.as_deref()));
        }

        events
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_input_event(&self, physical: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        let key = match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };

        if matches!(key, KeyCode::Unidentified) {
            return None;
        }

        match state {
            ElementState::Pressed if repeat => None,
            ElementState::Pressed => Some(InputEvent::KeyDown(key)),
            ElementState::Released => Some(InputEvent::KeyUp(key)),
        }
    }

    /// Printable characters of a key's text; control characters
    /// (Enter's "\r", Backspace's "\u{8}") are left to the key transition.
    fn text_events(&self, text: Option<&str>) -> Vec<InputEvent> {
        text.unwrap_or_default()
            .chars()
            .filter(|c| !c.is_control())
            .map(InputEvent::Character)
            .collect()
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit physical key codes to the keys the game binds.
///
/// Everything else maps to `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Backspace => KeyCode::Backspace,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
