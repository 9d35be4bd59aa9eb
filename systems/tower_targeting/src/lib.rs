#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use glam::Vec2;
use math_defence_core::{EnemyId, EnemyView, TowerTarget, TowerView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// Each tower picks the nearest live enemy within its range. Enemies at the
    /// same distance are resolved in spawn order. The output buffer is cleared
    /// before populating it with the latest assignments.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<TowerTarget>) {
        out.clear();

        if towers.iter().next().is_none() || enemies.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);
        if self.enemy_workspace.is_empty() {
            return;
        }

        for tower in towers.iter() {
            let max_distance_sq = tower.range * tower.range;
            let mut best: Option<BestCandidate> = None;

            for candidate in &self.enemy_workspace {
                let distance_sq = candidate.position.distance_squared(tower.position);
                if distance_sq > max_distance_sq {
                    continue;
                }

                let current = BestCandidate {
                    distance_sq,
                    enemy: candidate.id,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best_candidate) = best {
                out.push(TowerTarget {
                    tower: tower.id,
                    enemy: best_candidate.enemy,
                    distance: best_candidate.distance_sq.sqrt(),
                });
            }
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for snapshot in enemies.iter().filter(|snapshot| snapshot.hit_points > 0.0) {
            self.enemy_workspace.push(EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance_sq: f32,
    enemy: EnemyId,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.enemy < other.enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_defence_core::{EnemySnapshot, TowerId, TowerSnapshot, TowerVariant};
    use std::time::Duration;

    fn target_for(targets: &[TowerTarget], tower: TowerId) -> Option<EnemyId> {
        targets
            .iter()
            .find(|target| target.tower == tower)
            .map(|target| target.enemy)
    }

    fn tower_view(snapshots: Vec<TowerSnapshot>) -> TowerView {
        TowerView::from_snapshots(snapshots)
    }

    fn enemy_view(snapshots: Vec<EnemySnapshot>) -> EnemyView {
        EnemyView::from_snapshots(snapshots)
    }

    fn tower_snapshot(id: u32, position: (f32, f32), range: f32) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            variant: TowerVariant::Standard,
            position: Vec2::new(position.0, position.1),
            range,
            damage: 2.0,
            fire_interval: Duration::from_millis(700),
            ready_in: Duration::ZERO,
            selected: false,
        }
    }

    fn enemy_snapshot(id: u32, position: (f32, f32), hit_points: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: Vec2::new(position.0, position.1),
            progress: 0.0,
            hit_points,
            max_hit_points: 150.0,
            burning: false,
            slowed: false,
        }
    }

    #[test]
    fn targets_nearest_enemy_within_range() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (100.0, 100.0), 120.0)]);
        let enemies = enemy_view(vec![
            enemy_snapshot(2, (180.0, 100.0), 150.0),
            enemy_snapshot(3, (130.0, 140.0), 150.0),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tower, TowerId::new(1));
        assert_eq!(out[0].enemy, EnemyId::new(3));
        assert_eq!(out[0].distance, 50.0);
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 120.0)]);
        let enemies = enemy_view(vec![enemy_snapshot(1, (120.0, 0.0), 150.0)]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);
        assert_eq!(out.len(), 1);

        let enemies = enemy_view(vec![enemy_snapshot(1, (120.5, 0.0), 150.0)]);
        system.handle(&towers, &enemies, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn earlier_spawn_wins_distance_ties() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (200.0, 200.0), 120.0)]);
        let enemies = enemy_view(vec![
            enemy_snapshot(20, (240.0, 200.0), 150.0),
            enemy_snapshot(10, (160.0, 200.0), 150.0),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].enemy, EnemyId::new(10));
    }

    #[test]
    fn dead_enemies_are_never_targeted() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 120.0)]);
        let enemies = enemy_view(vec![
            enemy_snapshot(1, (10.0, 0.0), 0.0),
            enemy_snapshot(2, (90.0, 0.0), 40.0),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(target_for(&out, TowerId::new(1)), Some(EnemyId::new(2)));
    }

    #[test]
    fn each_tower_picks_independently() {
        let mut system = TowerTargeting::new();
        let towers = tower_view(vec![
            tower_snapshot(1, (0.0, 0.0), 120.0),
            tower_snapshot(2, (500.0, 0.0), 120.0),
            tower_snapshot(3, (250.0, 400.0), 50.0),
        ]);
        let enemies = enemy_view(vec![
            enemy_snapshot(1, (50.0, 0.0), 150.0),
            enemy_snapshot(2, (450.0, 0.0), 150.0),
        ]);

        let mut out = Vec::new();
        system.handle(&towers, &enemies, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(target_for(&out, TowerId::new(1)), Some(EnemyId::new(1)));
        assert_eq!(target_for(&out, TowerId::new(2)), Some(EnemyId::new(2)));
        assert_eq!(target_for(&out, TowerId::new(3)), None);
    }

    #[test]
    fn empty_collections_clear_previous_targets() {
        let mut system = TowerTargeting::new();
        let mut out = vec![TowerTarget {
            tower: TowerId::new(99),
            enemy: EnemyId::new(99),
            distance: 0.0,
        }];

        let towers = tower_view(vec![tower_snapshot(1, (0.0, 0.0), 120.0)]);
        system.handle(&towers, &enemy_view(Vec::new()), &mut out);
        assert!(out.is_empty());

        let enemies = enemy_view(vec![enemy_snapshot(1, (1.0, 1.0), 150.0)]);
        system.handle(&tower_view(Vec::new()), &enemies, &mut out);
        assert!(out.is_empty());
    }
}
