//=========================================================================
// Player Vehicle
//=========================================================================
//
// The car the player steers: a bounding box confined to the playable
// area, the points accrued this round, and the name it is recorded under.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::geometry::Rect;
use super::traffic::LANE_OFFSETS;
use crate::config::GameConfig;

pub const PLAYER_WIDTH: f32 = 110.0;
pub const PLAYER_HEIGHT: f32 = 200.0;

/// Space kept free below the player's lowest position.
pub const BOTTOM_MARGIN: f32 = 250.0;

/// Viewports this short leave the player no vertical room.
pub const MIN_VIEWPORT_HEIGHT: f32 = BOTTOM_MARGIN;

//=== Direction ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

//=== PlayArea ============================================================

/// Bounds for the player's top-left corner, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl PlayArea {
    /// An inverted vertical range collapses to the top edge.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            min_x: width / 2.0 - 480.0,
            max_x: width / 2.0 + 370.0,
            min_y: 0.0,
            max_y: (height - BOTTOM_MARGIN).max(0.0),
        }
    }

    /// Clamps a top-left position into the area.
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

//=== PlayerVehicle =======================================================

#[derive(Debug, Clone)]
pub struct PlayerVehicle {
    rect: Rect,
    start: (f32, f32),
    area: PlayArea,
    points: u64,
    name: String,
}

impl PlayerVehicle {
    /// Places the car in the middle lane at the bottom of the play area.
    pub fn new(config: &GameConfig) -> Self {
        let area = PlayArea::for_viewport(config.viewport_width, config.viewport_height);
        let start = area.clamp(config.road_origin() + LANE_OFFSETS[2], area.max_y);

        Self {
            rect: Rect::new(start.0, start.1, PLAYER_WIDTH, PLAYER_HEIGHT),
            start,
            area,
            points: 0,
            name: String::new(),
        }
    }

    /// Returns to the start position with zero points. The name is kept.
    pub fn reset(&mut self) {
        self.rect.x = self.start.0;
        self.rect.y = self.start.1;
        self.points = 0;
        debug!("Player reset to ({}, {})", self.rect.x, self.rect.y);
    }

    /// Moves `step` pixels in `direction`, clamped to the play area.
    ///
    /// A move that would cross an edge stops at the edge instead of being
    /// dropped, so a car one pixel short of the boundary still reaches it.
    pub fn steer(&mut self, direction: Direction, step: f32) {
        let (dx, dy) = match direction {
            Direction::Up => (0.0, -step),
            Direction::Down => (0.0, step),
            Direction::Left => (-step, 0.0),
            Direction::Right => (step, 0.0),
        };
        let (x, y) = self.area.clamp(self.rect.x + dx, self.rect.y + dy);
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn accrue(&mut self, points: u64) {
        self.points = self.points.saturating_add(points);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    //--- Accessors --------------------------------------------------------

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
