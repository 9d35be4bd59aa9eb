//! Enemy storage, movement along the path, and casualty bookkeeping.

use std::time::Duration;

use math_defence_core::{EnemyId, EnemySnapshot, EnemyStats};

use crate::{
    path::Path,
    status::{StatusApplication, StatusEffects},
};

/// Enemy walking the path.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    /// Identifier allocated in spawn order.
    pub(crate) id: EnemyId,
    /// Current hit points; the enemy dies at zero or below.
    pub(crate) hit_points: f32,
    /// Hit points the enemy spawned with.
    pub(crate) max_hit_points: f32,
    /// Flat reduction applied to every projectile hit.
    pub(crate) armor: f32,
    /// Base speed in pixels per second.
    pub(crate) speed: f32,
    /// Segment index plus the fraction travelled along it.
    pub(crate) progress: f32,
    /// Burn and slow timers.
    pub(crate) status: StatusEffects,
}

impl Enemy {
    fn from_stats(id: EnemyId, stats: EnemyStats) -> Self {
        Self {
            id,
            hit_points: stats.hit_points,
            max_hit_points: stats.hit_points,
            armor: stats.armor.max(0.0),
            speed: stats.speed,
            progress: 0.0,
            status: StatusEffects::default(),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.hit_points > 0.0
    }

    fn effective_speed(&self) -> f32 {
        self.speed * self.status.speed_factor()
    }

    pub(crate) fn snapshot(&self, path: &Path) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: path.position_at(self.progress),
            progress: self.progress,
            hit_points: self.hit_points,
            max_hit_points: self.max_hit_points,
            burning: self.status.burning(),
            slowed: self.status.slowed(),
        }
    }
}

/// Live enemies kept in spawn order.
#[derive(Debug)]
pub(crate) struct EnemyPool {
    entries: Vec<Enemy>,
    next_enemy_id: EnemyId,
}

impl EnemyPool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    pub(crate) fn spawn(&mut self, stats: EnemyStats) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().wrapping_add(1));
        self.entries.push(Enemy::from_stats(id, stats));
        id
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.entries.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.entries.iter().find(|enemy| enemy.id == id)
    }

    pub(crate) fn apply_status(&mut self, id: EnemyId, application: StatusApplication) {
        if let Some(enemy) = self.entries.iter_mut().find(|enemy| enemy.id == id) {
            enemy.status.apply(application);
        }
    }

    /// Moves every enemy along `path` and removes those that reached its end.
    ///
    /// Movement uses the length of the segment the enemy starts the step on,
    /// so a single step may carry an enemy across a waypoint. Returns the
    /// escaped enemies in spawn order.
    pub(crate) fn advance(&mut self, path: &Path, dt: Duration) -> Vec<EnemyId> {
        let seconds = dt.as_secs_f32();
        let end = path.end_progress();
        let mut escaped = Vec::new();

        self.entries.retain_mut(|enemy| {
            let segment_length = path.segment_length_at(enemy.progress);
            let travelled = enemy.effective_speed() * seconds;
            let fraction = if segment_length > f32::EPSILON {
                travelled / segment_length
            } else {
                1.0
            };
            enemy.progress = (enemy.progress + fraction.max(0.0)).min(end);

            if enemy.progress >= end {
                escaped.push(enemy.id);
                return false;
            }
            true
        });

        escaped
    }

    /// Runs status timers and applies burn damage.
    pub(crate) fn process_status(&mut self, dt: Duration) {
        for enemy in self.entries.iter_mut().filter(|enemy| enemy.is_alive()) {
            let burn = enemy.status.advance(dt);
            enemy.hit_points -= burn;
        }
    }

    /// Removes enemies without hit points and returns them in spawn order.
    pub(crate) fn reap_dead(&mut self) -> Vec<EnemyId> {
        let mut dead = Vec::new();
        self.entries.retain(|enemy| {
            if enemy.is_alive() {
                return true;
            }
            dead.push(enemy.id);
            false
        });
        dead
    }

    /// Keeps progress inside a freshly installed path.
    pub(crate) fn clamp_progress(&mut self, end: f32) {
        for enemy in &mut self.entries {
            enemy.progress = enemy.progress.min(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn straight(length: f32) -> Path {
        Path::from_waypoints(vec![Vec2::ZERO, Vec2::new(length, 0.0)]).expect("valid path")
    }

    fn stats(speed: f32) -> EnemyStats {
        EnemyStats {
            hit_points: 150.0,
            armor: 3.0,
            speed,
        }
    }

    #[test]
    fn spawned_enemies_start_at_full_health() {
        let mut pool = EnemyPool::new();
        let first = pool.spawn(stats(10.0));
        let second = pool.spawn(stats(10.0));

        assert_eq!(first, EnemyId::new(0));
        assert_eq!(second, EnemyId::new(1));
        let enemy = pool.get(first).expect("enemy exists");
        assert_eq!(enemy.hit_points, enemy.max_hit_points);
        assert_eq!(enemy.progress, 0.0);
    }

    #[test]
    fn movement_scales_with_segment_length() {
        let path = straight(100.0);
        let mut pool = EnemyPool::new();
        let id = pool.spawn(stats(20.0));

        let escaped = pool.advance(&path, Duration::from_secs(1));

        assert!(escaped.is_empty());
        let enemy = pool.get(id).expect("enemy exists");
        assert!((enemy.progress - 0.2).abs() < 1e-6);
    }

    #[test]
    fn slowed_enemies_move_at_reduced_speed() {
        let path = straight(100.0);
        let mut pool = EnemyPool::new();
        let id = pool.spawn(stats(20.0));
        pool.apply_status(
            id,
            StatusApplication::Slow {
                duration: Duration::from_secs(5),
                factor: 0.5,
            },
        );

        let _ = pool.advance(&path, Duration::from_secs(1));

        let enemy = pool.get(id).expect("enemy exists");
        assert!((enemy.progress - 0.1).abs() < 1e-6);
    }

    #[test]
    fn enemies_reaching_the_end_escape() {
        let path = straight(10.0);
        let mut pool = EnemyPool::new();
        let fast = pool.spawn(stats(50.0));
        let slow = pool.spawn(stats(1.0));

        let escaped = pool.advance(&path, Duration::from_secs(1));

        assert_eq!(escaped, vec![fast]);
        assert_eq!(pool.len(), 1);
        assert!(pool.get(slow).is_some());
    }

    #[test]
    fn reaping_collects_only_dead_enemies() {
        let mut pool = EnemyPool::new();
        let doomed = pool.spawn(stats(10.0));
        let _ = pool.spawn(stats(10.0));
        if let Some(enemy) = pool.iter_mut().find(|enemy| enemy.id == doomed) {
            enemy.hit_points = 0.0;
        }

        assert_eq!(pool.reap_dead(), vec![doomed]);
        assert_eq!(pool.len(), 1);
    }
}
