#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level planning system that answers plan requests with randomised levels.

use glam::Vec2;
use math_defence_core::{
    Command, Event, LevelPlan, DEFAULT_ROUTE, KILL_THRESHOLD_MAX, KILL_THRESHOLD_MIN,
    PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH, ROUTE_ENTRY, ROUTE_EXIT, SPAWN_QUOTA_MAX, SPAWN_QUOTA_MIN,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Horizontal margin generated waypoints keep from either side of the play area.
const WAYPOINT_MARGIN_X: f32 = 100.0;
/// Vertical margin generated waypoints keep from the top and bottom.
const WAYPOINT_MARGIN_Y: f32 = 80.0;
const MIN_INTERIOR_WAYPOINTS: usize = 3;
const MAX_INTERIOR_WAYPOINTS: usize = 7;

/// Configuration parameters required to construct the level planner.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that rolls kill thresholds, spawn quotas, and paths.
#[derive(Debug)]
pub struct LevelPlanner {
    rng: ChaCha8Rng,
}

impl LevelPlanner {
    /// Creates a new planner using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits a [`Command::BeginLevel`] for every plan request found in `events`.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::LevelPlanRequested { level } = event {
                out.push(Command::BeginLevel {
                    plan: self.plan(*level),
                });
            }
        }
    }

    fn plan(&mut self, level: u32) -> LevelPlan {
        let kill_threshold = self.rng.gen_range(KILL_THRESHOLD_MIN..=KILL_THRESHOLD_MAX);
        let spawn_quota = self.rng.gen_range(SPAWN_QUOTA_MIN..=SPAWN_QUOTA_MAX);
        let waypoints = if level <= 1 {
            DEFAULT_ROUTE.to_vec()
        } else {
            self.generate_route()
        };

        LevelPlan {
            level,
            kill_threshold,
            spawn_quota,
            waypoints,
        }
    }

    fn generate_route(&mut self) -> Vec<Vec2> {
        let interior = self
            .rng
            .gen_range(MIN_INTERIOR_WAYPOINTS..=MAX_INTERIOR_WAYPOINTS);
        let span_x = (PLAY_AREA_WIDTH - 2.0 * WAYPOINT_MARGIN_X) as u32;
        let span_y = (PLAY_AREA_HEIGHT - 2.0 * WAYPOINT_MARGIN_Y) as u32;

        let mut waypoints = Vec::with_capacity(interior + 2);
        waypoints.push(ROUTE_ENTRY);
        for _ in 0..interior {
            let x = WAYPOINT_MARGIN_X + self.rng.gen_range(0..span_x) as f32;
            let y = WAYPOINT_MARGIN_Y + self.rng.gen_range(0..span_y) as f32;
            waypoints.push(Vec2::new(x, y));
        }
        waypoints.push(ROUTE_EXIT);
        waypoints
    }
}
