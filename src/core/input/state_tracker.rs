//=========================================================================
// State Tracker
//=========================================================================
//
// Raw input state: which keys are physically held right now, plus the
// characters typed since the last frame.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → KeyPoll query
//
// Frame lifecycle: clear() → process_events() → query
//
// Edge detection does not live here. The dispatcher samples `is_down`
// once per tick and derives edges from its own per-key history, so a
// press and release inside one frame is never observed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::dispatcher::KeyPoll;
use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks persistent held state and per-frame typed text.
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    typed_this_frame: Vec<char>,
}

impl StateTracker {
    /// Creates a new state tracker with no keys held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            typed_this_frame: Vec::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (typed characters).
    pub fn clear(&mut self) {
        self.typed_this_frame.clear();
    }

    /// Processes input events, updating internal state.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    //--- Internal Helpers -------------------------------------------------
    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(KeyCode::Unidentified) | InputEvent::KeyUp(KeyCode::Unidentified) => {}

            InputEvent::KeyDown(key) => {
                if self.keys_down.insert(*key) {
                    trace!("Key down: {:?}", key);
                }
            }

            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(key) {
                    trace!("Key up: {:?}", key);
                }
            }

            InputEvent::Character(c) => self.typed_this_frame.push(*c),

            InputEvent::Unidentified => {
                // Ignore unrecognized events
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Characters typed since the last `clear()`, in arrival order.
    pub fn typed(&self) -> &[char] {
        &self.typed_this_frame
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl KeyPoll for StateTracker {
    fn is_down(&self, key: KeyCode) -> bool {
        self.is_key_down(key)
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_then_up() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[InputEvent::KeyDown(KeyCode::ArrowLeft)]);
        assert!(tracker.is_key_down(KeyCode::ArrowLeft));

        tracker.clear();
        assert!(tracker.is_key_down(KeyCode::ArrowLeft), "held state survives clear()");

        tracker.process_events(&[InputEvent::KeyUp(KeyCode::ArrowLeft)]);
        assert!(!tracker.is_key_down(KeyCode::ArrowLeft));
    }

    #[test]
    fn press_and_release_in_one_frame_leaves_key_up() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[
            InputEvent::KeyDown(KeyCode::Enter),
            InputEvent::KeyUp(KeyCode::Enter),
        ]);
        assert!(!tracker.is_down(KeyCode::Enter));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[InputEvent::KeyUp(KeyCode::Escape)]);
        assert_eq!(tracker.keys_down().count(), 0);
    }

    #[test]
    fn unidentified_keys_never_held() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[
            InputEvent::KeyDown(KeyCode::Unidentified),
            InputEvent::Unidentified,
        ]);
        assert_eq!(tracker.keys_down().count(), 0);
    }

    #[test]
    fn typed_characters_reset_each_frame() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[InputEvent::Character('a'), InputEvent::Character('a')]);
        assert_eq!(tracker.typed(), &['a', 'a']);

        tracker.clear();
        assert!(tracker.typed().is_empty());
    }
}
