//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform layer and the core.
//
// Components:
// - `interface`: event and error types crossing the boundary
// - `event_collector`: core-side draining of the platform queue
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use interface::{PlatformError, PlatformEvent};
