//=========================================================================
// Input Buffer
//
// Holds the input events winit delivered since the last redraw.
//
// Responsibilities:
// - Store incoming events in arrival order
// - Drop a key transition identical to the one just before it
// - Hand the whole frame over via `drain()`
//
// Notes:
// Typed characters are never deduplicated: "aa" is two keystrokes.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a busy frame so typical frames never reallocate.
    //
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_key_transition() && self.events.last() == Some(&event) {
            return;
        }
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the frame's events and empties the buffer, or `None` when
    // nothing arrived (empty frames are not sent).
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        Some(self.events.drain(..).collect())
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
