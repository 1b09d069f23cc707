//=========================================================================
// Frame
//=========================================================================
//
// Read-only snapshot of everything a renderer needs for one stage. The
// core never draws; it hands a `Frame` to whatever implements
// `Renderer`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::geometry::Rect;
use super::leaderboard::Record;
use super::stage::{MenuItem, Stage};

//=== MenuView ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuView<'a> {
    pub items: &'a [MenuItem],
    pub selected: usize,
}

//=== Frame ===============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub stage: Stage,
    pub points: u64,
    pub player: Rect,
    pub traffic: Vec<Rect>,
    /// Ranked records as last loaded.
    pub records: &'a [Record],
    /// Stage heading, e.g. "Game over".
    pub prompt: Option<&'static str>,
    /// Name typed so far on the name entry stage.
    pub entry: Option<&'a str>,
    /// Non-fatal problem to show the player.
    pub notice: Option<&'a str>,
    pub menu: Option<MenuView<'a>>,
}

impl Frame<'_> {
    /// Heading text for `stage`, if it has one.
    pub fn prompt_for(stage: Stage) -> Option<&'static str> {
        match stage {
            Stage::GameOver => Some("Game over"),
            Stage::EnterName => Some("Enter your name:"),
            Stage::Leaderboard => Some("Player ratings:"),
            Stage::MainMenu | Stage::PauseMenu | Stage::Playing => None,
        }
    }

    /// Leaderboard rows as "N) name: points".
    pub fn ranking_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{}) {}: {}", i + 1, record.name, record.points))
    }

    /// Label of the focused menu item.
    pub fn selected_label(&self) -> Option<&'static str> {
        self.menu
            .and_then(|menu| menu.items.get(menu.selected))
            .map(|item| item.label)
    }
}

//=== Renderer ============================================================

/// Draws frames. Implemented by the platform layer.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

//=========================================================================
// Unit Tests
//=========================================================================
