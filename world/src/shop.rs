//! Upgrade shop with four independent tracks.

use math_defence_core::{PurchaseError, ShopOffer, UpgradeLevels, UpgradeTrack};

use crate::economy::Ledger;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Shop {
    open: bool,
    levels: UpgradeLevels,
}

impl Shop {
    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the shop between open and closed and reports the new state.
    pub(crate) fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub(crate) fn levels(&self) -> &UpgradeLevels {
        &self.levels
    }

    /// Buys one level of `track`, returning the new level and the gold spent.
    pub(crate) fn purchase(
        &mut self,
        track: UpgradeTrack,
        ledger: &mut Ledger,
    ) -> Result<(u32, u32), PurchaseError> {
        if !self.open {
            return Err(PurchaseError::ShopClosed);
        }
        let level = self.levels.level_mut(track);
        let cost = track.cost_at(*level);
        ledger.spend(cost)?;
        *level += 1;
        Ok((*level, cost))
    }

    pub(crate) fn offers(&self) -> [ShopOffer; 4] {
        UpgradeTrack::ALL.map(|track| {
            let level = self.levels.level(track);
            ShopOffer {
                track,
                level,
                cost: track.cost_at(level),
            }
        })
    }
}
