//! Timed burn and slow effects carried by enemies.

use std::time::Duration;

use math_defence_core::{BURN_DAMAGE_PER_LEVEL, BURN_TICK};

/// Status effects that a tower shot attaches to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum StatusApplication {
    /// Periodic damage scaled by the game level.
    Burn { duration: Duration, level: u32 },
    /// Movement penalty.
    Slow { duration: Duration, factor: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StatusEffects {
    burn_remaining: Duration,
    burn_level: u32,
    burn_accumulator: Duration,
    slow_remaining: Duration,
    slow_factor: f32,
}

impl Default for StatusEffects {
    fn default() -> Self {
        Self {
            burn_remaining: Duration::ZERO,
            burn_level: 0,
            burn_accumulator: Duration::ZERO,
            slow_remaining: Duration::ZERO,
            slow_factor: 1.0,
        }
    }
}

impl StatusEffects {
    /// Durations never shrink when a weaker application lands.
    pub(crate) fn apply(&mut self, application: StatusApplication) {
        match application {
            StatusApplication::Burn { duration, level } => {
                self.burn_remaining = self.burn_remaining.max(duration);
                self.burn_level = level;
            }
            StatusApplication::Slow { duration, factor } => {
                self.slow_remaining = self.slow_remaining.max(duration);
                self.slow_factor = factor;
            }
        }
    }

    /// Advances both timers and returns the burn damage dealt during `dt`.
    pub(crate) fn advance(&mut self, dt: Duration) -> f32 {
        let mut damage = 0.0;
        if !self.burn_remaining.is_zero() {
            self.burn_accumulator = self.burn_accumulator.saturating_add(dt);
            while self.burn_accumulator >= BURN_TICK {
                damage += BURN_DAMAGE_PER_LEVEL * self.burn_level as f32;
                self.burn_accumulator -= BURN_TICK;
            }
            self.burn_remaining = self.burn_remaining.saturating_sub(dt);
        }

        if !self.slow_remaining.is_zero() {
            self.slow_remaining = self.slow_remaining.saturating_sub(dt);
            if self.slow_remaining.is_zero() {
                self.slow_factor = 1.0;
            }
        }
        damage
    }

    pub(crate) fn speed_factor(&self) -> f32 {
        if self.slow_remaining.is_zero() {
            1.0
        } else {
            self.slow_factor
        }
    }

    pub(crate) fn burning(&self) -> bool {
        !self.burn_remaining.is_zero()
    }

    pub(crate) fn slowed(&self) -> bool {
        !self.slow_remaining.is_zero()
    }
}
