//=========================================================================
// Lane Racer — Library Root
//
// Single-screen arcade driving game: steer through five lanes of
// oncoming traffic, score by surviving, and keep a top-10 leaderboard.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the window-free core (input, stages, traffic, leaderboard)
//   so it can be driven and tested headless
// - Keep the winit integration private
//
// Typical usage:
// ```no_run
// use lane_racer::core::leaderboard::JsonRecordStore;
// use lane_racer::EngineBuilder;
//
// fn main() -> Result<(), lane_racer::error::InitError> {
//     EngineBuilder::new()
//         .build(JsonRecordStore::new("records.json"))?
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs without a window.
// `config` and `error` are the ambient configuration and error types.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit event loop and the window; `engine` wires it
// to the core.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------
pub use engine::{Engine, EngineBuilder};
