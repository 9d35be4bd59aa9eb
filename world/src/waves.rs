//! Level state machine driving spawn quotas, kill thresholds, and pauses.

use std::time::Duration;

use math_defence_core::{
    LevelPlan, WavePhase, WaveSnapshot, INTER_LEVEL_PAUSE, LEVEL_MESSAGE_DURATION,
    SPAWN_INTERVAL_BASE, SPAWN_INTERVAL_DECAY, SPAWN_INTERVAL_MIN,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LevelMessage {
    pub(crate) text: String,
    pub(crate) remaining: Duration,
}

/// Clock-driven transitions reported by [`WaveDirector::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WaveTick {
    pub(crate) pause_ended: bool,
    pub(crate) level_completed: bool,
}

#[derive(Debug)]
pub(crate) struct WaveDirector {
    level: u32,
    phase: WavePhase,
    kills: u32,
    kill_threshold: u32,
    spawned: u32,
    spawn_quota: u32,
    spawn_interval: Duration,
    message: Option<LevelMessage>,
}

impl WaveDirector {
    pub(crate) fn new() -> Self {
        Self {
            level: 1,
            phase: WavePhase::AwaitingPlan,
            kills: 0,
            kill_threshold: 0,
            spawned: 0,
            spawn_quota: 0,
            spawn_interval: SPAWN_INTERVAL_BASE,
            message: None,
        }
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn phase(&self) -> WavePhase {
        self.phase
    }

    pub(crate) fn message(&self) -> Option<&LevelMessage> {
        self.message.as_ref()
    }

    pub(crate) fn is_defeated(&self) -> bool {
        self.phase == WavePhase::Defeated
    }

    pub(crate) fn accepts_plan(&self, plan: &LevelPlan) -> bool {
        self.phase == WavePhase::AwaitingPlan && plan.level == self.level
    }

    /// Installs the random parameters of the awaited level.
    ///
    /// Every level after the first opens with an inter-level pause and a
    /// level message. Returns the pause length when one started.
    pub(crate) fn install_plan(&mut self, plan: &LevelPlan) -> Option<Duration> {
        self.kill_threshold = plan.kill_threshold;
        self.spawn_quota = plan.spawn_quota;
        self.spawned = 0;

        if self.level > 1 {
            self.message = Some(LevelMessage {
                text: format!(
                    "Level {} - New path generated! Next threshold: {} kills",
                    self.level, self.kill_threshold
                ),
                remaining: LEVEL_MESSAGE_DURATION,
            });
            self.phase = WavePhase::InterLevelPause {
                remaining: INTER_LEVEL_PAUSE,
            };
            return Some(INTER_LEVEL_PAUSE);
        }

        self.phase = self.spawning_phase();
        None
    }

    /// Advances timers and reports clock-driven transitions.
    pub(crate) fn advance(&mut self, dt: Duration, enemies_alive: usize) -> WaveTick {
        let mut tick = WaveTick::default();

        if let Some(message) = self.message.as_mut() {
            message.remaining = message.remaining.saturating_sub(dt);
            if message.remaining.is_zero() {
                self.message = None;
            }
        }

        match self.phase {
            WavePhase::InterLevelPause { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.resume_spawning();
                    tick.pause_ended = true;
                } else {
                    self.phase = WavePhase::InterLevelPause { remaining };
                }
            }
            WavePhase::Draining if enemies_alive == 0 => {
                self.complete_level();
                tick.level_completed = true;
            }
            _ => {}
        }

        tick
    }

    /// Ends an inter-level pause early. Returns `false` outside a pause.
    pub(crate) fn skip_pause(&mut self) -> bool {
        if !matches!(self.phase, WavePhase::InterLevelPause { .. }) {
            return false;
        }
        self.resume_spawning();
        true
    }

    pub(crate) fn record_spawn(&mut self) {
        self.spawned = self.spawned.saturating_add(1);
        if self.phase == WavePhase::Spawning && self.spawned >= self.spawn_quota {
            self.phase = WavePhase::Draining;
        }
    }

    /// Counts a kill and returns the running kill number of the level.
    pub(crate) fn record_kill(&mut self) -> u32 {
        self.kills = self.kills.saturating_add(1);
        self.kills
    }

    /// Completes the level when the kill threshold is met while it is in play.
    pub(crate) fn check_kill_threshold(&mut self) -> bool {
        let in_play = matches!(self.phase, WavePhase::Spawning | WavePhase::Draining);
        if in_play && self.kills >= self.kill_threshold {
            self.complete_level();
            return true;
        }
        false
    }

    pub(crate) fn mark_defeated(&mut self) {
        self.phase = WavePhase::Defeated;
    }

    /// Enemies still to come plus those on the field.
    pub(crate) fn remaining_enemies(&self, enemies_alive: usize) -> u32 {
        let alive = u32::try_from(enemies_alive).unwrap_or(u32::MAX);
        self.spawn_quota
            .saturating_sub(self.spawned)
            .saturating_add(alive)
    }

    pub(crate) fn snapshot(&self) -> WaveSnapshot {
        WaveSnapshot {
            level: self.level,
            phase: self.phase,
            kills: self.kills,
            kill_threshold: self.kill_threshold,
            spawned: self.spawned,
            spawn_quota: self.spawn_quota,
            spawn_interval: self.spawn_interval,
        }
    }

    fn complete_level(&mut self) {
        self.level = self.level.saturating_add(1);
        self.kills = 0;
        self.spawned = 0;
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_DECAY)
            .max(SPAWN_INTERVAL_MIN);
        self.phase = WavePhase::AwaitingPlan;
    }

    fn resume_spawning(&mut self) {
        self.spawned = 0;
        self.phase = self.spawning_phase();
    }

    fn spawning_phase(&self) -> WavePhase {
        if self.spawned < self.spawn_quota {
            WavePhase::Spawning
        } else {
            WavePhase::Draining
        }
    }
}
