//=========================================================================
// Traffic Simulator
//=========================================================================
//
// A fixed pool of cars scrolling down the road's five lanes.
//
// Architecture:
// - The pool is sized once at construction and never resized
// - Cars that leave the bottom of the viewport respawn in a band above
//   it, in a random lane (repeats of the previous lane are allowed)
// - All randomness comes from one injected `Rng`, so a seeded source
//   reproduces the exact respawn sequence
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::geometry::Rect;

//=== Constants ===========================================================

/// Lane x-offsets from the road's left edge.
pub const LANE_OFFSETS: [f32; 5] = [65.0, 265.0, 465.0, 655.0, 855.0];
pub const LANE_COUNT: usize = LANE_OFFSETS.len();

/// Off-screen y every car starts a round at.
pub const START_Y: f32 = -500.0;

/// Respawn band is `[RESPAWN_MIN_Y, RESPAWN_MIN_Y + RESPAWN_SPAN)`.
pub const RESPAWN_MIN_Y: i32 = -930;
pub const RESPAWN_SPAN: i32 = 400;

pub const CAR_WIDTH: f32 = 110.0;
pub const CAR_HEIGHT: f32 = 220.0;

/// Distinct car sprites; entity `i` uses sprite `i % SPRITE_COUNT`.
pub const SPRITE_COUNT: usize = 4;

//=== TrafficEntity =======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficEntity {
    pub rect: Rect,
    pub lane: usize,
    /// Opaque handle for the renderer.
    pub sprite: usize,
}

//=== TrafficSimulator ====================================================

pub struct TrafficSimulator<R: Rng = StdRng> {
    entities: Vec<TrafficEntity>,
    road_origin: f32,
    viewport_height: f32,
    rng: R,
}

impl<R: Rng> TrafficSimulator<R> {
    /// Builds `pool` cars at the start line, each in a random lane.
    pub fn new(pool: usize, road_origin: f32, viewport_height: f32, mut rng: R) -> Self {
        let entities = (0..pool)
            .map(|i| {
                let lane = rng.gen_range(0..LANE_COUNT);
                TrafficEntity {
                    rect: Rect::new(road_origin + LANE_OFFSETS[lane], START_Y, CAR_WIDTH, CAR_HEIGHT),
                    lane,
                    sprite: i % SPRITE_COUNT,
                }
            })
            .collect();

        debug!("Traffic pool of {} cars ready", pool);

        Self {
            entities,
            road_origin,
            viewport_height,
            rng,
        }
    }

    /// Moves every car down by `speed`, respawning those past the bottom.
    pub fn advance(&mut self, speed: f32) {
        for entity in &mut self.entities {
            entity.rect.y += speed;

            if entity.rect.y > self.viewport_height {
                let lane = self.rng.gen_range(0..LANE_COUNT);
                let y = self.rng.gen_range(0..RESPAWN_SPAN) + RESPAWN_MIN_Y;

                entity.lane = lane;
                entity.rect.x = self.road_origin + LANE_OFFSETS[lane];
                entity.rect.y = y as f32;

                debug!("Respawned car {} in lane {} at y={}", entity.sprite, lane, y);
            }
        }
    }

    /// True if any car overlaps `player`.
    pub fn collides(&self, player: &Rect) -> bool {
        self.entities.iter().any(|entity| entity.rect.intersects(player))
    }

    /// Sends every car back to the start line. Lanes are kept.
    pub fn reset(&mut self) {
        for entity in &mut self.entities {
            entity.rect.y = START_Y;
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn entities(&self) -> &[TrafficEntity] {
        &self.entities
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.entities.iter().map(|entity| entity.rect).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn lane_x(&self, lane: usize) -> f32 {
        self.road_origin + LANE_OFFSETS[lane]
    }

    #[cfg(test)]
    pub(crate) fn entities_mut(&mut self) -> &mut [TrafficEntity] {
        &mut self.entities
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const ORIGIN: f32 = 460.0;
    const HEIGHT: f32 = 1080.0;

    fn simulator(seed: u64, pool: usize) -> TrafficSimulator<StdRng> {
        TrafficSimulator::new(pool, ORIGIN, HEIGHT, StdRng::seed_from_u64(seed))
    }

    fn on_a_lane(sim: &TrafficSimulator<StdRng>, entity: &TrafficEntity) -> bool {
        entity.rect.x == sim.lane_x(entity.lane)
            && LANE_OFFSETS.iter().any(|offset| entity.rect.x == ORIGIN + offset)
    }

    //=====================================================================
    // Construction and reset
    //=====================================================================

    #[test]
    fn new_pool_starts_off_screen_in_lanes() {
        let sim = simulator(1, 4);
        assert_eq!(sim.len(), 4);
        for entity in sim.entities() {
            assert_eq!(entity.rect.y, START_Y);
            assert!(on_a_lane(&sim, entity));
        }
    }

    #[test]
    fn sprites_cycle_through_the_set() {
        let sim = simulator(1, 6);
        let sprites: Vec<_> = sim.entities().iter().map(|e| e.sprite).collect();
        assert_eq!(sprites, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn reset_keeps_lanes() {
        let mut sim = simulator(3, 4);
        for _ in 0..200 {
            sim.advance(17.0);
        }
        let lanes: Vec<_> = sim.entities().iter().map(|e| e.lane).collect();

        sim.reset();
        for (entity, lane) in sim.entities().iter().zip(lanes) {
            assert_eq!(entity.rect.y, START_Y);
            assert_eq!(entity.lane, lane);
        }
    }

    //=====================================================================
    // Advance and respawn
    //=====================================================================

    #[test]
    fn advance_moves_down_without_respawn() {
        let mut sim = simulator(5, 4);
        sim.advance(17.0);
        for entity in sim.entities() {
            assert_eq!(entity.rect.y, START_Y + 17.0);
        }
    }

    #[test]
    fn car_past_bottom_respawns_in_band() {
        let mut sim = simulator(9, 1);
        sim.entities_mut()[0].rect.y = HEIGHT + 1.0;
        sim.advance(17.0);

        let entity = sim.entities()[0];
        assert!(entity.rect.y >= -930.0 && entity.rect.y < -530.0);
        assert!(on_a_lane(&sim, &entity));
    }

    #[test]
    fn same_seed_same_respawns() {
        let mut a = simulator(42, 4);
        let mut b = simulator(42, 4);
        for _ in 0..500 {
            a.advance(17.0);
            b.advance(17.0);
        }
        assert_eq!(a.entities(), b.entities());
    }

    //=====================================================================
    // Collision
    //=====================================================================

    #[test]
    fn collides_with_overlapping_car() {
        let mut sim = simulator(7, 4);
        let target = sim.entities()[2].rect;
        sim.entities_mut()[2].rect.y = 600.0;

        let player = Rect::new(target.x + 20.0, 650.0, 110.0, 200.0);
        assert!(sim.collides(&player));
    }

    #[test]
    fn no_collision_while_traffic_is_off_screen() {
        let sim = simulator(7, 4);
        let player = Rect::new(ORIGIN + 465.0, HEIGHT - 250.0, 110.0, 200.0);
        assert!(!sim.collides(&player));
    }

    //=====================================================================
    // Properties
    //=====================================================================

    proptest! {
        #[test]
        fn lanes_hold_after_any_advance(seed in any::<u64>(), steps in 0usize..400, speed in 1.0f32..60.0) {
            let mut sim = simulator(seed, 4);
            for _ in 0..steps {
                sim.advance(speed);
            }
            for entity in sim.entities() {
                prop_assert!(on_a_lane(&sim, entity));
            }
        }

        #[test]
        fn below_viewport_always_respawns_into_band(seed in any::<u64>(), over in 0.1f32..500.0, speed in 1.0f32..60.0) {
            let mut sim = simulator(seed, 4);
            for entity in sim.entities_mut() {
                entity.rect.y = HEIGHT + over;
            }
            sim.advance(speed);
            for entity in sim.entities() {
                prop_assert!(entity.rect.y >= -930.0 && entity.rect.y < -530.0);
                prop_assert!(on_a_lane(&sim, entity));
            }
        }

        #[test]
        fn collision_ignores_pool_order(seed in any::<u64>(), px in 400.0f32..1500.0, py in -800.0f32..1000.0) {
            let mut sim = simulator(seed, 4);
            for (i, entity) in sim.entities_mut().iter_mut().enumerate() {
                entity.rect.y = -200.0 + 300.0 * i as f32;
            }
            let player = Rect::new(px, py, 110.0, 200.0);
            let expected = sim.entities().iter().any(|e| e.rect.intersects(&player));

            prop_assert_eq!(sim.collides(&player), expected);
            sim.entities_mut().reverse();
            prop_assert_eq!(sim.collides(&player), expected);
        }
    }
}
