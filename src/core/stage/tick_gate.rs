//=========================================================================
// Tick Gate
//=========================================================================
//
// Limits gameplay steps to one per fixed interval, independent of how
// often the render driver calls update.
//
//=========================================================================

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TickGate {
    interval: Duration,
    last: Option<Instant>,
}

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True if a step may run at `now`. The first call is always ready.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Records that a step ran at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Forgets the last step, so the next call is ready.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
