//! Session configuration loaded from TOML with command-line overrides.

use std::{path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

/// Parameters of one headless session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Seed shared by the simulation and the autopilot.
    pub(crate) seed: u64,
    /// Simulation steps per simulated second.
    pub(crate) tick_rate: u32,
    /// Number of steps to run before stopping.
    pub(crate) ticks: u64,
    /// Behaviour of the scripted player.
    pub(crate) autoplay: AutoplayConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x4d61_7468,
            tick_rate: 60,
            ticks: 36_000,
            autoplay: AutoplayConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Reads a configuration file, falling back to defaults for missing keys.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("parse session TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(self.tick_rate > 0, "tick_rate must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.autoplay.accuracy),
            "accuracy must lie in [0, 1], got {}",
            self.autoplay.accuracy
        );
        ensure!(
            self.autoplay.challenge_every > 0,
            "challenge_every must be positive"
        );
        Ok(())
    }

    /// Length of one simulation step.
    pub(crate) fn tick(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }
}

/// Scripted player behaviour.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AutoplayConfig {
    /// Probability of answering a challenge correctly.
    pub(crate) accuracy: f64,
    /// Steps between two challenge attempts.
    pub(crate) challenge_every: u64,
    /// Buys the cheapest affordable upgrade whenever possible.
    pub(crate) buy_upgrades: bool,
    /// Ends inter-level pauses as soon as they start.
    pub(crate) skip_pauses: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            accuracy: 0.8,
            challenge_every: 600,
            buy_upgrades: true,
            skip_pauses: false,
        }
    }
}
