#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use math_defence_core::{Command, EnemyStats, Event, WavePhase, WaveSnapshot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
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

/// Pure system that releases enemies while the level is spawning.
#[derive(Debug)]
pub struct Spawning {
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the level snapshot to emit spawn commands.
    ///
    /// At most one enemy is released per call, once the accumulated time
    /// exceeds the level's spawn interval; the timer then restarts from zero.
    pub fn handle(&mut self, events: &[Event], wave: &WaveSnapshot, out: &mut Vec<Command>) {
        if wave.phase != WavePhase::Spawning {
            self.accumulator = Duration::ZERO;
            return;
        }

        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.accumulator = self.accumulator.saturating_add(*dt);
            }
        }

        if !wave.accepts_spawns() || self.accumulator <= wave.spawn_interval {
            return;
        }

        self.accumulator = Duration::ZERO;
        out.push(Command::SpawnEnemy {
            stats: self.roll_stats(wave.level),
        });
    }

    fn roll_stats(&mut self, level: u32) -> EnemyStats {
        let hp_roll: f32 = self.rng.gen();
        let speed_roll: f32 = self.rng.gen();
        EnemyStats::for_level(level, hp_roll, speed_roll)
    }
}
