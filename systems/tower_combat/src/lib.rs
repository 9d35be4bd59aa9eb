#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits tower firing commands from targeting data.

use math_defence_core::{Command, TowerId, TowerSnapshot, TowerTarget, TowerView};

/// Turns acquired targets into firing commands for towers that are ready.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with an empty command buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::FireTower` per target whose tower has finished cooling down.
    ///
    /// Targets naming a tower absent from `towers` are dropped; the world
    /// would reject them anyway.
    pub fn handle(&mut self, towers: TowerView, tower_targets: &[TowerTarget], out: &mut Vec<Command>) {
        let roster = towers.into_vec();
        self.scratch.clear();
        self.scratch.extend(
            tower_targets
                .iter()
                .filter(|target| is_ready(&roster, target.tower))
                .map(|target| Command::FireTower {
                    tower: target.tower,
                    target: target.enemy,
                }),
        );
        out.append(&mut self.scratch);
    }
}

fn is_ready(roster: &[TowerSnapshot], tower: TowerId) -> bool {
    roster
        .binary_search_by_key(&tower, |snapshot| snapshot.id)
        .map_or(false, |index| roster[index].ready_in.is_zero())
}
