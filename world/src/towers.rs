//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use math_defence_core::{
    TowerId, TowerImprovement, TowerSnapshot, TowerVariant, UpgradeLevels, SLOW_FACTOR,
    TOWER_SELECT_RADIUS,
};

use crate::{combat::Impact, status::StatusApplication};

/// Damage carried by flame and slow projectiles before upgrades.
const HEAVY_PROJECTILE_DAMAGE: f32 = 100.0;

/// State of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated to the tower.
    pub(crate) id: TowerId,
    /// Behaviour selected when the tower was built.
    pub(crate) variant: TowerVariant,
    /// Fixed position in the play area.
    pub(crate) position: Vec2,
    /// Targeting radius in pixels, grown by range improvements.
    pub(crate) range: f32,
    /// Base damage of standard shots before shop multipliers.
    pub(crate) damage: f32,
    /// Interval before fire-rate upgrades are applied.
    pub(crate) fire_interval: Duration,
    /// Time left before the tower may fire again.
    pub(crate) cooldown: Duration,
}

/// Everything a shot produces besides cooling the tower down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FireEffect {
    pub(crate) status: Option<StatusApplication>,
    pub(crate) projectile_speed: f32,
    pub(crate) impact: Impact,
}

impl TowerState {
    fn new(id: TowerId, blueprint: TowerBlueprint) -> Self {
        Self {
            id,
            variant: blueprint.variant,
            position: blueprint.position,
            range: blueprint.range,
            damage: blueprint.damage,
            fire_interval: blueprint.fire_interval,
            cooldown: Duration::ZERO,
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }

    /// Interval applied after each shot, fire-rate upgrades included.
    pub(crate) fn effective_interval(&self, upgrades: &UpgradeLevels) -> Duration {
        if self.variant.benefits_from_fire_rate() {
            self.fire_interval
                .mul_f32(upgrades.fire_interval_multiplier())
        } else {
            self.fire_interval
        }
    }

    /// Computes the outcome of firing at a target standing on `aim`.
    ///
    /// Upgrades are sampled at fire time so projectiles already in flight keep
    /// the values they launched with.
    pub(crate) fn fire(&self, aim: Vec2, game_level: u32, upgrades: &UpgradeLevels) -> FireEffect {
        let multiplier = upgrades.damage_multiplier();
        let (status, base_damage) = match self.variant {
            TowerVariant::Standard => (None, self.damage),
            TowerVariant::Flame { burn_duration } => (
                Some(StatusApplication::Burn {
                    duration: burn_duration,
                    level: game_level,
                }),
                HEAVY_PROJECTILE_DAMAGE,
            ),
            TowerVariant::Slow { pulse_duration } => (
                Some(StatusApplication::Slow {
                    duration: pulse_duration,
                    factor: SLOW_FACTOR,
                }),
                HEAVY_PROJECTILE_DAMAGE,
            ),
        };

        FireEffect {
            status,
            projectile_speed: self.variant.projectile_speed(),
            impact: Impact {
                point: aim,
                damage: base_damage * multiplier,
                penetration: upgrades.penetration(),
                area_radius: upgrades.area_radius(),
            },
        }
    }

    pub(crate) fn improve(&mut self, improvement: TowerImprovement) {
        match improvement {
            TowerImprovement::Damage => self.damage += TowerImprovement::DAMAGE_BONUS,
            TowerImprovement::Range => self.range += TowerImprovement::RANGE_BONUS,
            TowerImprovement::FireInterval => {
                self.fire_interval = self
                    .fire_interval
                    .saturating_sub(TowerImprovement::INTERVAL_REDUCTION)
                    .max(TowerImprovement::INTERVAL_FLOOR);
            }
        }
    }

    pub(crate) fn snapshot(&self, upgrades: &UpgradeLevels, selected: bool) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            variant: self.variant,
            position: self.position,
            range: self.range,
            damage: self.damage,
            fire_interval: self.effective_interval(upgrades),
            ready_in: self.cooldown,
            selected,
        }
    }
}

/// Construction parameters for a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TowerBlueprint {
    pub(crate) variant: TowerVariant,
    pub(crate) position: Vec2,
    pub(crate) range: f32,
    pub(crate) damage: f32,
    pub(crate) fire_interval: Duration,
}

impl TowerBlueprint {
    /// Standard tower handed out by challenge rewards.
    pub(crate) const fn standard(position: Vec2) -> Self {
        Self {
            variant: TowerVariant::Standard,
            position,
            range: 120.0,
            damage: 2.0,
            fire_interval: Duration::from_millis(700),
        }
    }

    /// Towers present when a session starts.
    pub(crate) fn starting_roster() -> [Self; 3] {
        [
            Self::standard(Vec2::new(150.0, 220.0)),
            Self {
                variant: TowerVariant::Flame {
                    burn_duration: Duration::from_millis(5_000),
                },
                position: Vec2::new(300.0, 220.0),
                range: 100.0,
                damage: 0.0,
                fire_interval: Duration::from_millis(200),
            },
            Self {
                variant: TowerVariant::Slow {
                    pulse_duration: Duration::from_millis(1_200),
                },
                position: Vec2::new(450.0, 220.0),
                range: 140.0,
                damage: 0.0,
                fire_interval: Duration::from_millis(1_500),
            },
        ]
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    pub(crate) fn insert(&mut self, blueprint: TowerBlueprint) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(id, TowerState::new(id, blueprint));
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn cool_down(&mut self, dt: Duration) {
        for tower in self.entries.values_mut() {
            tower.cooldown = tower.cooldown.saturating_sub(dt);
        }
    }

    /// Closest tower within the selection radius of `point`.
    pub(crate) fn nearest_within_select_radius(&self, point: Vec2) -> Option<TowerId> {
        let mut best: Option<(TowerId, f32)> = None;
        for tower in self.entries.values() {
            let distance = tower.position.distance(point);
            if distance >= TOWER_SELECT_RADIUS {
                continue;
            }
            if best.map_or(true, |(_, current)| distance < current) {
                best = Some((tower.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_roster() -> TowerRegistry {
        let mut registry = TowerRegistry::new();
        for blueprint in TowerBlueprint::starting_roster() {
            let _ = registry.insert(blueprint);
        }
        registry
    }

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let registry = registry_with_roster();
        let ids: Vec<_> = registry.iter().map(|tower| tower.id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn standard_shots_scale_with_upgrades() {
        let registry = registry_with_roster();
        let tower = registry.get(TowerId::new(0)).expect("standard tower");
        let upgrades = UpgradeLevels {
            damage: 5,
            fire_rate: 1,
            penetration: 2,
            area_of_effect: 1,
        };

        let effect = tower.fire(Vec2::new(10.0, 10.0), 4, &upgrades);

        assert!(effect.status.is_none());
        assert_eq!(effect.projectile_speed, 400.0);
        assert!((effect.impact.damage - 3.0).abs() < 1e-5);
        assert_eq!(effect.impact.penetration, 2.0);
        assert_eq!(effect.impact.area_radius, 4.0);
        assert_eq!(effect.impact.point, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn fire_rate_upgrade_does_not_compound_between_shots() {
        let registry = registry_with_roster();
        let tower = registry.get(TowerId::new(0)).expect("standard tower");
        let upgrades = UpgradeLevels {
            fire_rate: 2,
            ..UpgradeLevels::default()
        };

        let first = tower.effective_interval(&upgrades);
        let _ = tower.fire(Vec2::ZERO, 1, &upgrades);
        let second = tower.effective_interval(&upgrades);

        assert_eq!(first, second);
        assert!((first.as_secs_f32() - 0.567).abs() < 1e-3);
    }

    #[test]
    fn flame_shots_ignite_with_the_game_level() {
        let registry = registry_with_roster();
        let tower = registry.get(TowerId::new(1)).expect("flame tower");

        let effect = tower.fire(Vec2::ZERO, 3, &UpgradeLevels::default());

        assert_eq!(
            effect.status,
            Some(StatusApplication::Burn {
                duration: Duration::from_millis(5_000),
                level: 3,
            })
        );
        assert_eq!(effect.impact.damage, 100.0);
        assert_eq!(effect.projectile_speed, 800.0);
        assert_eq!(
            tower.effective_interval(&UpgradeLevels {
                fire_rate: 3,
                ..UpgradeLevels::default()
            }),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn slow_shots_halve_speed() {
        let registry = registry_with_roster();
        let tower = registry.get(TowerId::new(2)).expect("slow tower");

        let effect = tower.fire(Vec2::ZERO, 1, &UpgradeLevels::default());

        assert_eq!(
            effect.status,
            Some(StatusApplication::Slow {
                duration: Duration::from_millis(1_200),
                factor: 0.5,
            })
        );
        assert_eq!(effect.projectile_speed, 600.0);
    }

    #[test]
    fn interval_improvement_is_floored() {
        let mut registry = registry_with_roster();
        let flame = registry.get_mut(TowerId::new(1)).expect("flame tower");

        flame.improve(TowerImprovement::FireInterval);

        assert_eq!(flame.fire_interval, Duration::from_millis(150));
    }

    #[test]
    fn selection_prefers_the_closest_tower_inside_the_radius() {
        let registry = registry_with_roster();
        assert_eq!(
            registry.nearest_within_select_radius(Vec2::new(155.0, 225.0)),
            Some(TowerId::new(0))
        );
        assert_eq!(registry.nearest_within_select_radius(Vec2::new(220.0, 220.0)), None);
    }
}
