//! Damage resolution shared by every projectile impact.

use glam::Vec2;
use math_defence_core::IMPACT_HIT_RADIUS;

use crate::{enemies::EnemyPool, path::Path};

/// Payload a projectile delivers when it lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Impact {
    /// Point the projectile lands on.
    pub(crate) point: Vec2,
    /// Damage before armor mitigation.
    pub(crate) damage: f32,
    /// Armor ignored by the hit.
    pub(crate) penetration: f32,
    /// Splash radius; zero hits a single target.
    pub(crate) area_radius: f32,
}

/// Damage dealt to a target after armor mitigation.
///
/// Penetration never drives armor below zero and the result never drops
/// below one point.
#[must_use]
pub(crate) fn mitigated_damage(base_damage: f32, armor: f32, penetration: f32) -> f32 {
    let effective_armor = (armor - penetration).max(0.0);
    (base_damage - effective_armor).max(1.0)
}

/// Applies an impact to the enemies around its point and returns the hit count.
///
/// Single-target impacts damage the closest live enemy when it sits inside
/// [`IMPACT_HIT_RADIUS`]; splash impacts damage every live enemy inside
/// their radius.
pub(crate) fn resolve_impact(enemies: &mut EnemyPool, path: &Path, impact: Impact) -> usize {
    if impact.area_radius <= 0.0 {
        let mut closest: Option<(usize, f32)> = None;
        for (index, enemy) in enemies.iter().enumerate() {
            if !enemy.is_alive() {
                continue;
            }
            let distance = path.position_at(enemy.progress).distance(impact.point);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }

        let Some((index, distance)) = closest else {
            return 0;
        };
        if distance >= IMPACT_HIT_RADIUS {
            return 0;
        }
        if let Some(enemy) = enemies.iter_mut().nth(index) {
            enemy.hit_points -= mitigated_damage(impact.damage, enemy.armor, impact.penetration);
        }
        return 1;
    }

    let mut hits = 0;
    for enemy in enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
        if path.position_at(enemy.progress).distance(impact.point) <= impact.area_radius {
            enemy.hit_points -= mitigated_damage(impact.damage, enemy.armor, impact.penetration);
            hits += 1;
        }
    }
    hits
}
