//=========================================================================
// Signal Queue
//=========================================================================
//
// Key handlers push signals here during dispatch; the stage controller
// drains them in the same update and interprets them for the active
// stage.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::player::Direction;

//=== Signal ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Held arrow key.
    Steer(Direction),
    /// Freshly pressed Up/Down.
    Navigate(Direction),
    Escape,
    Confirm,
    Erase,
}

//=== SignalQueue =========================================================

#[derive(Debug, Default)]
pub struct SignalQueue {
    queue: Vec<Signal>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, signal: Signal) {
        self.queue.push(signal);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all signals in push order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
