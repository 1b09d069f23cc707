//=========================================================================
// Title Renderer
//=========================================================================
//
// Minimal `Renderer`: writes a one-line summary of each frame into the
// window title. Sprites, fonts and audio are out of scope; this keeps
// the game playable and observable without them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::stage::Stage;
use crate::core::{Frame, Renderer};

//=== TitleRenderer =======================================================

pub(crate) struct TitleRenderer {
    base: String,
    window: Option<Window>,
    last_title: String,
}

impl TitleRenderer {
    pub(crate) fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            window: None,
            last_title: String::new(),
        }
    }

    pub(crate) fn attach(&mut self, window: Window) {
        self.window = Some(window);
        self.last_title.clear();
    }

    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

impl Renderer for TitleRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        let title = compose_title(&self.base, frame);
        if title == self.last_title {
            return;
        }

        if let Some(window) = &self.window {
            trace!(target: "platform", "Title: {}", title);
            window.set_title(&title);
        }
        self.last_title = title;
    }
}

//=== Title Composition ===================================================

/// Builds the title text for `frame`.
pub(crate) fn compose_title(base: &str, frame: &Frame<'_>) -> String {
    let mut parts = vec![base.to_string()];

    if let Some(notice) = frame.notice {
        parts.push(notice.to_string());
    }

    match frame.stage {
        Stage::MainMenu | Stage::PauseMenu => {
            if let Some(menu) = frame.menu {
                for (i, item) in menu.items.iter().enumerate() {
                    let marker = if i == menu.selected { "> " } else { "" };
                    parts.push(format!("{}{}", marker, item.label));
                }
            }
        }
        Stage::Playing => parts.push(format!("Points: {}", frame.points)),
        Stage::GameOver => {
            parts.extend(frame.prompt.map(str::to_string));
            parts.push(format!("Points: {}", frame.points));
        }
        Stage::EnterName => {
            let prompt = frame.prompt.unwrap_or_default();
            parts.push(format!("{} {}_", prompt, frame.entry.unwrap_or_default()));
        }
        Stage::Leaderboard => {
            parts.extend(frame.prompt.map(str::to_string));
            let lines: Vec<String> = frame.ranking_lines().collect();
            if lines.is_empty() {
                parts.push("no records yet".to_string());
            } else {
                parts.push(lines.join(", "));
            }
        }
    }

    parts.join(" | ")
}

//=========================================================================
// Unit Tests
//=========================================================================
