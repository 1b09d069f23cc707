//=========================================================================
// Input System
//
// Raw key state, edge-triggered dispatch, and name entry.
//
// Responsibilities:
// - Track which keys are held from the platform's event stream
// - Sample keys once per tick and fire while-held / on-press handlers
// - Provide the text field used on the name entry stage
//
//=========================================================================

//=== Submodules ==========================================================
pub mod dispatcher;
pub mod event;
pub mod state_tracker;
pub mod text_field;

//=== Public API ==========================================================
pub use dispatcher::{Handler, InputDispatcher, KeyPoll, KeyState, Trigger};
pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;
pub use text_field::{TextField, TextInput};
