#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Math Defence.

mod challenge;
mod combat;
mod economy;
mod enemies;
mod path;
mod projectiles;
mod shop;
mod status;
mod towers;
mod waves;

use std::time::Duration;

use glam::Vec2;
use math_defence_core::{
    Command, EnemyId, Event, FireError, LevelPlan, TowerId, TowerImprovement,
    DEFAULT_PLACEMENT_POINT,
};
use tracing::{debug, info};

pub use path::Path;

use crate::{
    challenge::ChallengeGate,
    combat::resolve_impact,
    economy::Ledger,
    enemies::EnemyPool,
    projectiles::{Launch, ProjectileField},
    shop::Shop,
    towers::{TowerBlueprint, TowerRegistry},
    waves::WaveDirector,
};

/// Represents the authoritative Math Defence world state.
#[derive(Debug)]
pub struct World {
    path: Path,
    enemies: EnemyPool,
    towers: TowerRegistry,
    projectiles: ProjectileField,
    ledger: Ledger,
    shop: Shop,
    challenge: ChallengeGate,
    waves: WaveDirector,
    selected: Option<TowerId>,
    placement_point: Option<Vec2>,
    tick_index: u64,
}

impl World {
    /// Creates a new Math Defence world awaiting its first level plan.
    #[must_use]
    pub fn new() -> Self {
        let mut towers = TowerRegistry::new();
        for blueprint in TowerBlueprint::starting_roster() {
            let _ = towers.insert(blueprint);
        }
        Self {
            path: Path::default_route(),
            enemies: EnemyPool::new(),
            towers,
            projectiles: ProjectileField::new(),
            ledger: Ledger::new(),
            shop: Shop::default(),
            challenge: ChallengeGate::default(),
            waves: WaveDirector::new(),
            selected: None,
            placement_point: None,
            tick_index: 0,
        }
    }

    fn complete_level(&mut self, completed: u32, out_events: &mut Vec<Event>) {
        info!(level = completed, "level completed");
        out_events.push(Event::LevelCompleted { level: completed });
        out_events.push(Event::LevelPlanRequested {
            level: self.waves.level(),
        });
    }

    fn begin_level(&mut self, plan: LevelPlan, out_events: &mut Vec<Event>) {
        if !self.waves.accepts_plan(&plan) {
            debug!(level = plan.level, "ignoring unexpected level plan");
            return;
        }

        match Path::from_waypoints(plan.waypoints.clone()) {
            Some(path) => {
                self.enemies.clamp_progress(path.end_progress());
                self.path = path;
            }
            None => debug!(level = plan.level, "level plan carried a degenerate path"),
        }

        let pause = self.waves.install_plan(&plan);
        info!(
            level = plan.level,
            kill_threshold = plan.kill_threshold,
            spawn_quota = plan.spawn_quota,
            "level started"
        );
        out_events.push(Event::LevelStarted {
            level: plan.level,
            kill_threshold: plan.kill_threshold,
            spawn_quota: plan.spawn_quota,
        });
        if let Some(duration) = pause {
            out_events.push(Event::InterLevelPauseStarted { duration });
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        let level = self.waves.level();
        let transitions = self.waves.advance(dt, self.enemies.len());
        if transitions.pause_ended {
            out_events.push(Event::InterLevelPauseEnded { skipped: false });
        }
        if transitions.level_completed {
            self.complete_level(level, out_events);
        }

        for enemy in self.enemies.advance(&self.path, dt) {
            let damage = self.ledger.absorb_escape();
            info!(enemy = enemy.get(), damage, "enemy escaped");
            out_events.push(Event::EnemyEscaped { enemy, damage });
        }
        if self.ledger.is_defeated() {
            self.waves.mark_defeated();
            info!(level = self.waves.level(), "player defeated");
            out_events.push(Event::PlayerDefeated {
                level: self.waves.level(),
            });
            return;
        }

        self.towers.cool_down(dt);
    }

    fn resolve_combat(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.enemies.process_status(dt);

        for (projectile, impact) in self.projectiles.advance(dt) {
            let hits = resolve_impact(&mut self.enemies, &self.path, impact);
            out_events.push(Event::ProjectileImpacted { projectile, hits });
        }

        for enemy in self.enemies.reap_dead() {
            let kill_number = self.waves.record_kill();
            let reward = self.ledger.credit_kill(kill_number);
            out_events.push(Event::EnemyKilled { enemy, reward });

            let level = self.waves.level();
            if self.waves.check_kill_threshold() {
                self.complete_level(level, out_events);
            }
        }
    }

    fn fire_tower(&mut self, tower: TowerId, target: EnemyId) -> Result<Event, FireError> {
        let upgrades = *self.shop.levels();
        let level = self.waves.level();
        let aim = self
            .enemies
            .get(target)
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| self.path.position_at(enemy.progress));
        let state = self.towers.get_mut(tower).ok_or(FireError::MissingTower)?;
        if !state.is_ready() {
            return Err(FireError::CoolingDown);
        }
        let aim = aim.ok_or(FireError::MissingTarget)?;

        let effect = state.fire(aim, level, &upgrades);
        state.cooldown = state.effective_interval(&upgrades);
        let origin = state.position;

        if let Some(status) = effect.status {
            self.enemies.apply_status(target, status);
        }
        let projectile = self.projectiles.launch(Launch {
            origin,
            speed: effect.projectile_speed,
            impact: effect.impact,
        });
        Ok(Event::TowerFired {
            tower,
            target,
            projectile,
        })
    }

    fn reward_correct_answer(&mut self, improvement: TowerImprovement, out_events: &mut Vec<Event>) {
        if let Some(tower) = self.selected {
            if let Some(state) = self.towers.get_mut(tower) {
                state.improve(improvement);
                info!(tower = tower.get(), ?improvement, "tower improved");
                out_events.push(Event::TowerImproved { tower, improvement });
                return;
            }
        }

        let position = self.placement_point.unwrap_or(DEFAULT_PLACEMENT_POINT);
        let blueprint = TowerBlueprint::standard(position);
        let tower = self.towers.insert(blueprint);
        info!(tower = tower.get(), x = position.x, y = position.y, "tower placed");
        out_events.push(Event::TowerPlaced {
            tower,
            variant: blueprint.variant,
            position,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.waves.is_defeated() && !matches!(command, Command::StartSession) {
        return;
    }

    match command {
        Command::StartSession => {
            *world = World::new();
            out_events.push(Event::LevelPlanRequested {
                level: world.waves.level(),
            });
        }
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::ResolveCombat { dt } => world.resolve_combat(dt, out_events),
        Command::BeginLevel { plan } => world.begin_level(plan, out_events),
        Command::SpawnEnemy { stats } => {
            if !world.waves.snapshot().accepts_spawns() {
                debug!(phase = ?world.waves.phase(), "ignoring spawn outside the spawning phase");
                return;
            }
            let enemy = world.enemies.spawn(stats);
            world.waves.record_spawn();
            out_events.push(Event::EnemySpawned { enemy, stats });
        }
        Command::FireTower { tower, target } => match world.fire_tower(tower, target) {
            Ok(event) => out_events.push(event),
            Err(reason) => {
                debug!(tower = tower.get(), %reason, "fire request rejected");
                out_events.push(Event::TowerFireRejected { tower, reason });
            }
        },
        Command::ClickPoint { point } => {
            let selected = world.towers.nearest_within_select_radius(point);
            world.selected = selected;
            out_events.push(Event::TowerSelectionChanged { tower: selected });
            if selected.is_none() {
                world.placement_point = Some(point);
                out_events.push(Event::PlacementPointRecorded { point });
            }
        }
        Command::OpenChallenge { question } => match world.challenge.open(question) {
            Ok(()) => out_events.push(Event::ChallengeOpened {
                prompt: question.to_string(),
            }),
            Err(reason) => {
                debug!(%reason, "challenge rejected");
                out_events.push(Event::ChallengeRejected { reason });
            }
        },
        Command::EditAnswer { edit } => {
            if let Err(reason) = world.challenge.edit(edit) {
                out_events.push(Event::ChallengeRejected { reason });
            }
        }
        Command::SubmitAnswer {
            answer,
            improvement,
        } => match world.challenge.submit(answer) {
            Ok(correct) => {
                out_events.push(Event::ChallengeAnswered { correct });
                if correct {
                    world.reward_correct_answer(improvement, out_events);
                }
            }
            Err(reason) => {
                debug!(%reason, "answer rejected");
                out_events.push(Event::ChallengeRejected { reason });
            }
        },
        Command::CancelChallenge => match world.challenge.cancel() {
            Ok(()) => out_events.push(Event::ChallengeCancelled),
            Err(reason) => out_events.push(Event::ChallengeRejected { reason }),
        },
        Command::ToggleShop => {
            let open = world.shop.toggle();
            if open && world.challenge.cancel().is_ok() {
                out_events.push(Event::ChallengeCancelled);
            }
            out_events.push(Event::ShopToggled { open });
        }
        Command::PurchaseUpgrade { track } => {
            match world.shop.purchase(track, &mut world.ledger) {
                Ok((level, cost)) => {
                    info!(?track, level, cost, "upgrade purchased");
                    out_events.push(Event::UpgradePurchased { track, level, cost });
                }
                Err(reason) => {
                    debug!(?track, %reason, "purchase rejected");
                    out_events.push(Event::UpgradeRejected { track, reason });
                }
            }
        }
        Command::SkipPause => {
            if world.waves.skip_pause() {
                out_events.push(Event::InterLevelPauseEnded { skipped: true });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use math_defence_core::{
        EnemyView, LedgerSnapshot, ProjectileSnapshot, Question, ShopOffer, TowerSnapshot,
        TowerView, UpgradeLevels, WavePhase, WaveSnapshot, DEFAULT_PLACEMENT_POINT,
    };

    use super::{Path, World};

    /// Provides read-only access to the path enemies follow.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Captures a read-only view of the enemies on the path.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| enemy.snapshot(&world.path))
                .collect(),
        )
    }

    /// Captures a read-only view of the towers in play.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        let upgrades = world.shop.levels();
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| tower.snapshot(upgrades, world.selected == Some(tower.id)))
                .collect(),
        )
    }

    /// Captures the projectiles currently in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world.projectiles.snapshots()
    }

    /// Captures the level state machine.
    #[must_use]
    pub fn wave(world: &World) -> WaveSnapshot {
        world.waves.snapshot()
    }

    /// Enemies still to spawn in the level plus those alive.
    #[must_use]
    pub fn remaining_enemies(world: &World) -> u32 {
        world.waves.remaining_enemies(world.enemies.len())
    }

    /// Reports whether no enemy is alive.
    #[must_use]
    pub fn field_is_clear(world: &World) -> bool {
        world.enemies.is_empty()
    }

    /// Captures the player's resources.
    #[must_use]
    pub fn ledger(world: &World) -> LedgerSnapshot {
        world.ledger.snapshot()
    }

    /// Purchased upgrade levels.
    #[must_use]
    pub fn upgrade_levels(world: &World) -> UpgradeLevels {
        *world.shop.levels()
    }

    /// Rows of the upgrade shop in display order.
    #[must_use]
    pub fn shop_offers(world: &World) -> [ShopOffer; 4] {
        world.shop.offers()
    }

    /// Reports whether the shop is open.
    #[must_use]
    pub fn shop_open(world: &World) -> bool {
        world.shop.is_open()
    }

    /// Prompt of the open challenge, if any.
    #[must_use]
    pub fn challenge_prompt(world: &World) -> Option<String> {
        challenge_question(world).map(|question| question.to_string())
    }

    /// Question of the open challenge, if any.
    #[must_use]
    pub fn challenge_question(world: &World) -> Option<Question> {
        world.challenge.question().copied()
    }

    /// Answer buffer of the open challenge, if any.
    #[must_use]
    pub fn answer_input(world: &World) -> Option<&str> {
        world
            .challenge
            .is_open()
            .then(|| world.challenge.input())
    }

    /// Snapshot of the tower currently selected by the player.
    #[must_use]
    pub fn selected_tower(world: &World) -> Option<TowerSnapshot> {
        let id = world.selected?;
        world
            .towers
            .get(id)
            .map(|tower| tower.snapshot(world.shop.levels(), true))
    }

    /// Point where the next reward tower will be placed.
    #[must_use]
    pub fn placement_point(world: &World) -> Vec2 {
        world.placement_point.unwrap_or(DEFAULT_PLACEMENT_POINT)
    }

    /// Level message together with its remaining display time.
    #[must_use]
    pub fn level_message(world: &World) -> Option<(&str, Duration)> {
        world
            .waves
            .message()
            .map(|message| (message.text.as_str(), message.remaining))
    }

    /// Whole seconds left in the inter-level pause, rounded up.
    #[must_use]
    pub fn inter_level_countdown(world: &World) -> Option<u64> {
        match world.waves.phase() {
            WavePhase::InterLevelPause { remaining } => {
                let millis = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
                Some(millis.div_ceil(1_000))
            }
            _ => None,
        }
    }

    /// Reports whether the player has been defeated.
    #[must_use]
    pub fn is_defeated(world: &World) -> bool {
        world.waves.is_defeated()
    }

    /// Number of ticks processed since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
