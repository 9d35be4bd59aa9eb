//! Projectiles travelling toward fixed impact points.

use std::time::Duration;

use glam::Vec2;
use math_defence_core::{ProjectileId, ProjectileSnapshot};

use crate::combat::Impact;

#[derive(Clone, Debug)]
struct Projectile {
    /// Identifier allocated at launch.
    id: ProjectileId,
    /// Current position of the projectile.
    position: Vec2,
    /// Travel speed in pixels per second.
    speed: f32,
    /// Payload resolved on landing, fixed at launch.
    impact: Impact,
}

/// Parameters of a freshly launched projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Launch {
    pub(crate) origin: Vec2,
    pub(crate) speed: f32,
    pub(crate) impact: Impact,
}

#[derive(Debug)]
pub(crate) struct ProjectileField {
    entries: Vec<Projectile>,
    next_projectile_id: ProjectileId,
}

impl ProjectileField {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    pub(crate) fn launch(&mut self, launch: Launch) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
        self.entries.push(Projectile {
            id,
            position: launch.origin,
            speed: launch.speed,
            impact: launch.impact,
        });
        id
    }

    /// Moves every projectile and removes those that land during `dt`.
    ///
    /// A projectile lands when the remaining distance does not exceed one
    /// step of travel. Landed impacts are returned in launch order.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<(ProjectileId, Impact)> {
        let seconds = dt.as_secs_f32();
        let mut landed = Vec::new();

        self.entries.retain_mut(|projectile| {
            let offset = projectile.impact.point - projectile.position;
            let remaining = offset.length();
            let step = projectile.speed * seconds;
            if remaining <= step || remaining == 0.0 {
                landed.push((projectile.id, projectile.impact));
                return false;
            }
            projectile.position += offset / remaining * step;
            true
        });

        landed
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.entries
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: projectile.position,
                impact_point: projectile.impact.point,
            })
            .collect()
    }
}
