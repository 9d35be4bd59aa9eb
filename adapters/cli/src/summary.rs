//! Run statistics gathered from the event stream.

use std::fmt;

use math_defence_core::Event;
use math_defence_simulation::Frame;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RunSummary {
    ticks: u64,
    levels_completed: u32,
    kills: u32,
    escapes: u32,
    towers_placed: u32,
    towers_improved: u32,
    challenges_answered: u32,
    challenges_correct: u32,
    upgrades_purchased: u32,
    gold_spent: u32,
    final_level: u32,
    final_gold: u32,
    final_hit_points: f32,
    defeated: bool,
}

impl RunSummary {
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { .. } => self.ticks += 1,
                Event::LevelCompleted { .. } => self.levels_completed += 1,
                Event::EnemyKilled { .. } => self.kills += 1,
                Event::EnemyEscaped { .. } => self.escapes += 1,
                Event::TowerPlaced { .. } => self.towers_placed += 1,
                Event::TowerImproved { .. } => self.towers_improved += 1,
                Event::ChallengeAnswered { correct } => {
                    self.challenges_answered += 1;
                    if *correct {
                        self.challenges_correct += 1;
                    }
                }
                Event::UpgradePurchased { cost, .. } => {
                    self.upgrades_purchased += 1;
                    self.gold_spent += *cost;
                }
                _ => {}
            }
        }
    }

    pub(crate) fn finish(&mut self, frame: &Frame) {
        self.final_level = frame.wave.level;
        self.final_gold = frame.ledger.gold;
        self.final_hit_points = frame.ledger.hit_points;
        self.defeated = frame.defeated;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.defeated { "defeated" } else { "survived" };
        writeln!(f, "outcome:     {outcome} after {} ticks", self.ticks)?;
        writeln!(
            f,
            "level:       {} ({} completed)",
            self.final_level, self.levels_completed
        )?;
        writeln!(f, "enemies:     {} killed, {} escaped", self.kills, self.escapes)?;
        writeln!(
            f,
            "challenges:  {}/{} correct",
            self.challenges_correct, self.challenges_answered
        )?;
        writeln!(
            f,
            "towers:      {} placed, {} improved",
            self.towers_placed, self.towers_improved
        )?;
        writeln!(
            f,
            "upgrades:    {} bought for {} gold",
            self.upgrades_purchased, self.gold_spent
        )?;
        write!(
            f,
            "player:      {:.0} hp, {} gold",
            self.final_hit_points, self.final_gold
        )
    }
}
