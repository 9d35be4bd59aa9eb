//! Player hit points, armor, and gold.

use math_defence_core::{
    LedgerSnapshot, PurchaseError, ESCAPE_BASE_DAMAGE, GOLD_PER_KILL_STEP, PLAYER_STARTING_ARMOR,
    PLAYER_STARTING_HP,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Ledger {
    hit_points: f32,
    armor: f32,
    gold: u32,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self {
            hit_points: PLAYER_STARTING_HP,
            armor: PLAYER_STARTING_ARMOR,
            gold: 0,
        }
    }

    /// Subtracts the armor-mitigated escape damage and returns the amount lost.
    pub(crate) fn absorb_escape(&mut self) -> f32 {
        let damage = escape_damage(ESCAPE_BASE_DAMAGE, self.armor);
        self.hit_points -= damage;
        damage
    }

    /// Credits the reward for the `kill_number`-th kill of the level.
    pub(crate) fn credit_kill(&mut self, kill_number: u32) -> u32 {
        let reward = kill_reward(kill_number);
        self.gold = self.gold.saturating_add(reward);
        reward
    }

    pub(crate) fn spend(&mut self, cost: u32) -> Result<(), PurchaseError> {
        if self.gold < cost {
            return Err(PurchaseError::InsufficientGold {
                cost,
                available: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    pub(crate) fn is_defeated(&self) -> bool {
        self.hit_points <= 0.0
    }

    pub(crate) fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            hit_points: self.hit_points,
            armor: self.armor,
            gold: self.gold,
        }
    }
}

fn escape_damage(base: f32, armor: f32) -> f32 {
    (base - armor).max(1.0)
}

fn kill_reward(kill_number: u32) -> u32 {
    GOLD_PER_KILL_STEP.saturating_mul(kill_number)
}
