//=========================================================================
// Platform Subsystem
//
// Runs the winit event loop and drives the game once per redraw.
//
// Architecture:
// ```text
//  Main Thread
//  ┌────────────────────────────────────────────────┐
//  │  Winit Event Loop                              │
//  │   ↓ KeyboardInput                              │
//  │  InputProcessor → InputBuffer                  │
//  │   ↓ RedrawRequested (frame boundary)           │
//  │  flush → crossbeam channel → EventCollector    │
//  │   ↓                                            │
//  │  Game::update → TickControl                    │
//  │   ↓ Continue                                   │
//  │  TitleRenderer::draw → request_redraw          │
//  └────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input since the previous
//   redraw reaches the core as one batch, in arrival order
// - **Same thread**: the core runs inside the redraw callback; the
//   channel only decouples the producer and consumer sides
// - **Gameplay rate is the core's concern**: redraws may come faster
//   than the tick rate; the stage controller gates gameplay itself
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod title_renderer;

//=== External Crates =====================================================

use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::GameConfig;
use crate::core::platform_bridge::{EventCollector, PlatformError, PlatformEvent};
use crate::core::{Game, Renderer, TickControl};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use title_renderer::TitleRenderer;

//=== Platform ============================================================

/// Window owner, input aggregator and game driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(...)` - no window yet
/// 2. **Execution**: `platform.run()` - blocks in the winit event loop
/// 3. **Shutdown**: window closed or the game asks to exit → `run` returns
///
/// This type is not Send; it must stay on the main thread.
pub(crate) struct Platform {
    /// Draws frames; owns the window once `resumed()` creates it.
    renderer: TitleRenderer,

    /// Buffers input until frame boundary.
    buffer: InputBuffer,

    /// Producer side of the platform → core queue.
    event_sender: Sender<PlatformEvent>,

    /// Consumer side of the same queue.
    collector: EventCollector,

    input_processor: InputProcessor,

    game: Game,

    window_size: LogicalSize<f64>,
    window_title: String,

    /// Fatal error raised inside a callback, returned from `run`.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: &GameConfig,
        game: Game,
        event_sender: Sender<PlatformEvent>,
        event_receiver: Receiver<PlatformEvent>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            renderer: TitleRenderer::new(config.window_title.clone()),
            buffer: InputBuffer::new(),
            event_sender,
            collector: EventCollector::new(event_receiver),
            input_processor: InputProcessor::new(),
            game,
            window_size: LogicalSize::new(
                f64::from(config.viewport_width),
                f64::from(config.viewport_height),
            ),
            window_title: config.window_title.clone(),
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or the game exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails, or if the window cannot be created.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(err) => Err(err),
            None => {
                info!(target: "platform", "Event loop finished");
                Ok(())
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core queue. Empty frames send nothing.
    fn flush_input_buffer(&mut self) {
        let Some(events) = self.buffer.drain() else {
            return;
        };
        let count = events.len();
        trace!(target: "platform::input", "Flushing {} events", count);

        match self.event_sender.try_send(PlatformEvent::Inputs(events)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Event queue full, dropping {} events", count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Channel disconnected, dropping {} events", count);
            }
        }
    }

    /// One frame: drain the queue, update the game, draw.
    fn frame(&mut self) -> TickControl {
        self.flush_input_buffer();

        if let TickControl::Exit = self.collector.collect_frame() {
            return TickControl::Exit;
        }

        if let TickControl::Exit = self.game.update(Instant::now(), self.collector.batches()) {
            return TickControl::Exit;
        }

        self.renderer.draw(&self.game.frame());
        TickControl::Continue
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.window().is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.window_title.clone())
            .with_inner_size(self.window_size);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.renderer.attach(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.failure = Some(PlatformError::WindowCreation(e.to_string()));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                for event in self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                }
            }

            WindowEvent::RedrawRequested => match self.frame() {
                TickControl::Exit => {
                    info!(target: "platform", "Game requested exit");
                    event_loop.exit();
                }
                TickControl::Continue => {
                    if let Some(window) = self.renderer.window() {
                        window.request_redraw();
                    }
                }
            },

            _ => {
                // Ignore: Resized, Focused, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::leaderboard::MemoryRecordStore;
    use crate::core::stage::Stage;
    use crossbeam_channel::bounded;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn platform(capacity: usize) -> Platform {
        let config = GameConfig::default();
        let game = Game::new(
            config.clone(),
            Box::new(MemoryRecordStore::new()),
            StdRng::seed_from_u64(1),
        );
        let (tx, rx) = bounded(capacity);
        Platform::new(&config, game, tx, rx)
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let platform = platform(4);
        assert!(platform.renderer.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn frame_delivers_buffered_input_to_game() {
        let mut platform = platform(4);
        platform.buffer.push(InputEvent::KeyDown(KeyCode::Enter));

        assert_eq!(platform.frame(), TickControl::Continue);
        assert_eq!(platform.game.stage(), Stage::Playing);
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn empty_frame_sends_nothing() {
        let mut platform = platform(1);
        platform.flush_input_buffer();
        assert_eq!(platform.collector.collect_frame(), TickControl::Continue);
        assert!(platform.collector.batches().is_empty());
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let mut platform = platform(1);

        platform.buffer.push(InputEvent::Character('a'));
        platform.flush_input_buffer();
        platform.buffer.push(InputEvent::Character('b'));
        platform.flush_input_buffer();

        platform.collector.collect_frame();
        assert_eq!(platform.collector.batches(), &[vec![InputEvent::Character('a')]]);
    }

    #[test]
    fn window_closed_ends_the_frame() {
        let mut platform = platform(4);
        platform.event_sender.try_send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(platform.frame(), TickControl::Exit);
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_display_format() {
        let err = PlatformError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
