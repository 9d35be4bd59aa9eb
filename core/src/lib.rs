#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Math Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Math Defence.";

/// Width of the play area measured in pixels.
pub const PLAY_AREA_WIDTH: f32 = 800.0;
/// Height of the play area measured in pixels.
pub const PLAY_AREA_HEIGHT: f32 = 600.0;

/// Lower bound of the random base hit points rolled for a fresh enemy.
pub const ENEMY_BASE_HP_MIN: f32 = 100.0;
/// Upper bound of the random base hit points rolled for a fresh enemy.
pub const ENEMY_BASE_HP_MAX: f32 = 200.0;
/// Fractional hit point growth applied per level beyond the first.
pub const ENEMY_HP_SCALE_PER_LEVEL: f32 = 0.18;
/// Armor granted to enemies per level.
pub const ENEMY_ARMOR_PER_LEVEL: f32 = 0.5;
/// Minimum enemy speed in pixels per second before level scaling.
pub const ENEMY_SPEED_BASE: f32 = 10.0;
/// Width of the random speed band added on top of [`ENEMY_SPEED_BASE`].
pub const ENEMY_SPEED_RANDOM_SPAN: f32 = 40.0;
/// Speed added to enemies per level beyond the first.
pub const ENEMY_SPEED_PER_LEVEL: f32 = 2.0;

/// Smallest spawn quota a level may draw.
pub const SPAWN_QUOTA_MIN: u32 = 30;
/// Largest spawn quota a level may draw.
pub const SPAWN_QUOTA_MAX: u32 = 50;
/// Smallest kill threshold a level may draw.
pub const KILL_THRESHOLD_MIN: u32 = 20;
/// Largest kill threshold a level may draw.
pub const KILL_THRESHOLD_MAX: u32 = 30;

/// Spawn interval used by the first level.
pub const SPAWN_INTERVAL_BASE: Duration = Duration::from_millis(2_000);
/// Amount the spawn interval shrinks on every level advance.
pub const SPAWN_INTERVAL_DECAY: Duration = Duration::from_millis(150);
/// Floor below which the spawn interval never shrinks.
pub const SPAWN_INTERVAL_MIN: Duration = Duration::from_millis(600);

/// Length of the intermission between levels.
pub const INTER_LEVEL_PAUSE: Duration = Duration::from_secs(20);
/// How long the level-advance message stays visible.
pub const LEVEL_MESSAGE_DURATION: Duration = Duration::from_millis(3_000);

/// Player hit points at the start of a session.
pub const PLAYER_STARTING_HP: f32 = 100.0;
/// Flat armor mitigating escape damage.
pub const PLAYER_STARTING_ARMOR: f32 = 2.0;
/// Damage an escaping enemy deals before the player's armor is subtracted.
pub const ESCAPE_BASE_DAMAGE: f32 = 10.0;
/// Gold multiplier applied to the running kill count of a level.
pub const GOLD_PER_KILL_STEP: u32 = 10;

/// Radius around an impact point inside which a single-target shot connects.
pub const IMPACT_HIT_RADIUS: f32 = 18.0;
/// Radius around a click inside which a tower becomes selected.
pub const TOWER_SELECT_RADIUS: f32 = 18.0;
/// Placement point used for reward towers before the player clicks anywhere.
pub const DEFAULT_PLACEMENT_POINT: Vec2 = Vec2::new(100.0, 250.0);
/// Route walked during the opening level.
pub const DEFAULT_ROUTE: [Vec2; 6] = [
    Vec2::new(0.0, 300.0),
    Vec2::new(200.0, 300.0),
    Vec2::new(200.0, 100.0),
    Vec2::new(600.0, 100.0),
    Vec2::new(600.0, 400.0),
    Vec2::new(800.0, 400.0),
];
/// Point generated routes enter the play area from.
pub const ROUTE_ENTRY: Vec2 = Vec2::new(0.0, 300.0);
/// Point generated routes leave the play area through.
pub const ROUTE_EXIT: Vec2 = Vec2::new(800.0, 300.0);

/// Interval separating burn damage pulses.
pub const BURN_TICK: Duration = Duration::from_secs(1);
/// Damage a burn pulse deals per game level.
pub const BURN_DAMAGE_PER_LEVEL: f32 = 100.0;
/// Speed multiplier applied by a slow pulse.
pub const SLOW_FACTOR: f32 = 0.5;

/// Describes the lifecycle stage of the current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// The world waits for a level plan before it may spawn.
    AwaitingPlan,
    /// Enemies are still being released onto the path.
    Spawning,
    /// The spawn quota is exhausted and the field is being cleared.
    Draining,
    /// Timed intermission separating two levels.
    InterLevelPause {
        /// Time left before spawning resumes.
        remaining: Duration,
    },
    /// Terminal state entered once the player runs out of hit points.
    Defeated,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the world to a fresh session and requests the first level plan.
    StartSession,
    /// Advances the simulation clock, moving enemies and cooling towers.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Resolves status effects, projectile flight, and casualties for a tick.
    ResolveCombat {
        /// Duration of simulated time covered by the resolution step.
        dt: Duration,
    },
    /// Installs the parameters of a freshly planned level.
    BeginLevel {
        /// Randomised parameters describing the level.
        plan: LevelPlan,
    },
    /// Releases a new enemy at the start of the path.
    SpawnEnemy {
        /// Rolled statistics of the enemy.
        stats: EnemyStats,
    },
    /// Requests that a ready tower fires at the provided enemy.
    FireTower {
        /// Tower that should fire.
        tower: TowerId,
        /// Enemy selected as the target.
        target: EnemyId,
    },
    /// Reports a click inside the play area.
    ClickPoint {
        /// Position of the click in play-area pixels.
        point: Vec2,
    },
    /// Opens the math challenge with the provided question.
    OpenChallenge {
        /// Question the player has to answer.
        question: Question,
    },
    /// Edits the answer buffer of the open challenge.
    EditAnswer {
        /// Edit to apply to the buffer.
        edit: AnswerEdit,
    },
    /// Submits an answer to the open challenge.
    SubmitAnswer {
        /// Parsed answer, or `None` when the buffer held no valid integer.
        answer: Option<i64>,
        /// Improvement applied to the selected tower on a correct answer.
        improvement: TowerImprovement,
    },
    /// Abandons the open challenge without side effects.
    CancelChallenge,
    /// Opens or closes the upgrade shop.
    ToggleShop,
    /// Attempts to buy one level of the provided upgrade track.
    PurchaseUpgrade {
        /// Track the player wants to improve.
        track: UpgradeTrack,
    },
    /// Ends the inter-level pause immediately.
    SkipPause,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Asks the level planner for the parameters of the provided level.
    LevelPlanRequested {
        /// Level that needs a plan.
        level: u32,
    },
    /// Announces that a level started accepting spawns or its intermission.
    LevelStarted {
        /// Level that became active.
        level: u32,
        /// Kills required to advance past the level.
        kill_threshold: u32,
        /// Number of enemies the level releases.
        spawn_quota: u32,
    },
    /// Announces that the current level was completed.
    LevelCompleted {
        /// Level that was completed.
        level: u32,
    },
    /// Confirms that the inter-level pause began.
    InterLevelPauseStarted {
        /// Length of the pause.
        duration: Duration,
    },
    /// Confirms that the inter-level pause ended, either by timeout or skip.
    InterLevelPauseEnded {
        /// Indicates whether the pause was cut short by the player.
        skipped: bool,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Statistics the enemy was created with.
        stats: EnemyStats,
    },
    /// Reports that an enemy reached the end of the path alive.
    EnemyEscaped {
        /// Identifier of the escaped enemy.
        enemy: EnemyId,
        /// Hit points removed from the player after armor mitigation.
        damage: f32,
    },
    /// Reports that an enemy was destroyed.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Gold credited for the kill.
        reward: u32,
    },
    /// Confirms that a tower fired.
    TowerFired {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy the tower aimed at.
        target: EnemyId,
        /// Projectile launched by the shot.
        projectile: ProjectileId,
    },
    /// Reports that a fire request was rejected.
    TowerFireRejected {
        /// Tower named in the request.
        tower: TowerId,
        /// Specific reason the request failed.
        reason: FireError,
    },
    /// Reports that a projectile reached its impact point.
    ProjectileImpacted {
        /// Projectile that landed.
        projectile: ProjectileId,
        /// Number of enemies damaged by the impact.
        hits: usize,
    },
    /// Confirms a change in tower selection.
    TowerSelectionChanged {
        /// Newly selected tower, if any.
        tower: Option<TowerId>,
    },
    /// Confirms that the placement point moved.
    PlacementPointRecorded {
        /// New placement point.
        point: Vec2,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Variant of tower that was placed.
        variant: TowerVariant,
        /// Position of the tower.
        position: Vec2,
    },
    /// Confirms that a tower received a challenge reward.
    TowerImproved {
        /// Tower that was improved.
        tower: TowerId,
        /// Improvement applied to it.
        improvement: TowerImprovement,
    },
    /// Confirms that a challenge opened.
    ChallengeOpened {
        /// Prompt shown to the player.
        prompt: String,
    },
    /// Reports that a challenge command was rejected.
    ChallengeRejected {
        /// Specific reason the command failed.
        reason: ChallengeError,
    },
    /// Reports the outcome of a submitted answer.
    ChallengeAnswered {
        /// Indicates whether the answer matched.
        correct: bool,
    },
    /// Confirms that an open challenge was closed without an answer.
    ChallengeCancelled,
    /// Confirms that the shop opened or closed.
    ShopToggled {
        /// Indicates whether the shop is now open.
        open: bool,
    },
    /// Confirms that an upgrade was bought.
    UpgradePurchased {
        /// Track that was improved.
        track: UpgradeTrack,
        /// Level of the track after the purchase.
        level: u32,
        /// Gold spent on the purchase.
        cost: u32,
    },
    /// Reports that a purchase was rejected.
    UpgradeRejected {
        /// Track named in the request.
        track: UpgradeTrack,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Announces that the player ran out of hit points.
    PlayerDefeated {
        /// Level during which the defeat happened.
        level: u32,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Statistics rolled for an enemy at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Starting and maximum hit points.
    pub hit_points: f32,
    /// Flat armor subtracted from incoming damage.
    pub armor: f32,
    /// Travel speed along the path in pixels per second.
    pub speed: f32,
}

impl EnemyStats {
    /// Computes enemy statistics for a level from two unit random rolls.
    ///
    /// `hp_roll` and `speed_roll` are expected in `[0, 1)` and select a point
    /// inside the base hit point and speed bands before level scaling.
    #[must_use]
    pub fn for_level(level: u32, hp_roll: f32, speed_roll: f32) -> Self {
        let level = level.max(1);
        let beyond_first = (level - 1) as f32;
        let base_hp = ENEMY_BASE_HP_MIN + hp_roll * (ENEMY_BASE_HP_MAX - ENEMY_BASE_HP_MIN);
        Self {
            hit_points: base_hp * (1.0 + beyond_first * ENEMY_HP_SCALE_PER_LEVEL),
            armor: level as f32 * ENEMY_ARMOR_PER_LEVEL,
            speed: ENEMY_SPEED_BASE
                + speed_roll * ENEMY_SPEED_RANDOM_SPAN
                + beyond_first * ENEMY_SPEED_PER_LEVEL,
        }
    }
}

/// Randomised parameters describing a single level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelPlan {
    /// Level the plan applies to.
    pub level: u32,
    /// Kills required to advance past the level.
    pub kill_threshold: u32,
    /// Number of enemies the level releases.
    pub spawn_quota: u32,
    /// Waypoints enemies follow during the level.
    pub waypoints: Vec<Vec2>,
}

/// Tower behaviours, each carrying only the parameters it needs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TowerVariant {
    /// Fires plain projectiles scaled by the tower's own damage.
    Standard,
    /// Ignites its target and launches a heavy projectile.
    Flame {
        /// How long the burn lasts on the target.
        burn_duration: Duration,
    },
    /// Slows its target and launches a heavy projectile.
    Slow {
        /// How long the slow lasts on the target.
        pulse_duration: Duration,
    },
}

impl TowerVariant {
    /// Travel speed of projectiles launched by the variant in pixels per second.
    #[must_use]
    pub const fn projectile_speed(self) -> f32 {
        match self {
            Self::Standard => 400.0,
            Self::Flame { .. } => 800.0,
            Self::Slow { .. } => 600.0,
        }
    }

    /// Reports whether the fire-rate upgrade track shortens this variant's interval.
    #[must_use]
    pub const fn benefits_from_fire_rate(self) -> bool {
        matches!(self, Self::Standard)
    }
}

/// Improvements a correct challenge answer may grant to the selected tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerImprovement {
    /// Adds one point of base damage.
    Damage,
    /// Extends the targeting range by twenty pixels.
    Range,
    /// Shortens the fire interval by one hundred milliseconds.
    FireInterval,
}

impl TowerImprovement {
    /// Base damage granted by [`TowerImprovement::Damage`].
    pub const DAMAGE_BONUS: f32 = 1.0;
    /// Range granted by [`TowerImprovement::Range`].
    pub const RANGE_BONUS: f32 = 20.0;
    /// Interval removed by [`TowerImprovement::FireInterval`].
    pub const INTERVAL_REDUCTION: Duration = Duration::from_millis(100);
    /// Floor for intervals shortened by [`TowerImprovement::FireInterval`].
    pub const INTERVAL_FLOOR: Duration = Duration::from_millis(150);
}

/// Independent upgrade tracks sold by the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeTrack {
    /// Multiplies projectile damage by ten percent per level.
    Damage,
    /// Shortens the standard fire interval by ten percent per level.
    FireRate,
    /// Ignores one point of enemy armor per level.
    Penetration,
    /// Widens the impact splash by four pixels per level.
    AreaOfEffect,
}

impl UpgradeTrack {
    /// Every track in shop order.
    pub const ALL: [UpgradeTrack; 4] = [
        Self::Damage,
        Self::FireRate,
        Self::Penetration,
        Self::AreaOfEffect,
    ];

    /// Resolves a shop row index into a track.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Gold cost of the first level of the track.
    #[must_use]
    pub const fn base_cost(self) -> u32 {
        match self {
            Self::Damage => 50,
            Self::FireRate => 40,
            Self::Penetration => 60,
            Self::AreaOfEffect => 80,
        }
    }

    /// Gold cost of buying the next level when the track sits at `level`.
    #[must_use]
    pub const fn cost_at(self, level: u32) -> u32 {
        self.base_cost().saturating_mul(level.saturating_add(1))
    }

    /// Label shown next to the track in the shop.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Damage => "Damage +10%",
            Self::FireRate => "Fire Rate +10%",
            Self::Penetration => "Armor Penetration +1",
            Self::AreaOfEffect => "AOE Radius +4px",
        }
    }
}

/// Purchased levels of every upgrade track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeLevels {
    /// Level of [`UpgradeTrack::Damage`].
    pub damage: u32,
    /// Level of [`UpgradeTrack::FireRate`].
    pub fire_rate: u32,
    /// Level of [`UpgradeTrack::Penetration`].
    pub penetration: u32,
    /// Level of [`UpgradeTrack::AreaOfEffect`].
    pub area_of_effect: u32,
}

impl UpgradeLevels {
    /// Current level of the provided track.
    #[must_use]
    pub const fn level(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Damage => self.damage,
            UpgradeTrack::FireRate => self.fire_rate,
            UpgradeTrack::Penetration => self.penetration,
            UpgradeTrack::AreaOfEffect => self.area_of_effect,
        }
    }

    /// Mutable access to the level of the provided track.
    pub fn level_mut(&mut self, track: UpgradeTrack) -> &mut u32 {
        match track {
            UpgradeTrack::Damage => &mut self.damage,
            UpgradeTrack::FireRate => &mut self.fire_rate,
            UpgradeTrack::Penetration => &mut self.penetration,
            UpgradeTrack::AreaOfEffect => &mut self.area_of_effect,
        }
    }

    /// Multiplier applied to projectile damage.
    #[must_use]
    pub fn damage_multiplier(&self) -> f32 {
        1.0 + 0.10 * self.damage as f32
    }

    /// Multiplier applied to the base fire interval of towers that benefit from it.
    #[must_use]
    pub fn fire_interval_multiplier(&self) -> f32 {
        0.90_f32.powi(i32::try_from(self.fire_rate).unwrap_or(i32::MAX))
    }

    /// Armor ignored by projectiles.
    #[must_use]
    pub fn penetration(&self) -> f32 {
        self.penetration as f32
    }

    /// Splash radius of projectiles; zero means single-target.
    #[must_use]
    pub fn area_radius(&self) -> f32 {
        4.0 * self.area_of_effect as f32
    }
}

/// Arithmetic operators used by challenge questions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Integer division that always divides evenly.
    Divide,
}

impl Operator {
    /// Symbol shown in the prompt.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// A challenge question together with its expected answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Question {
    left: i64,
    operator: Operator,
    right: i64,
}

impl Question {
    /// Creates a question from its operands.
    ///
    /// Division by zero is never produced by the generators; it is answered
    /// with zero rather than panicking.
    #[must_use]
    pub const fn new(left: i64, operator: Operator, right: i64) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }

    /// Left operand.
    #[must_use]
    pub const fn left(&self) -> i64 {
        self.left
    }

    /// Operator joining the operands.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// Right operand.
    #[must_use]
    pub const fn right(&self) -> i64 {
        self.right
    }

    /// Expected answer.
    #[must_use]
    pub fn answer(&self) -> i64 {
        match self.operator {
            Operator::Add => self.left + self.right,
            Operator::Subtract => self.left - self.right,
            Operator::Multiply => self.left * self.right,
            Operator::Divide => self.left.checked_div(self.right).unwrap_or(0),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator.symbol(), self.right)
    }
}

/// Edits applicable to the answer buffer of an open challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerEdit {
    /// Appends a decimal digit; values above nine are ignored.
    Digit(u8),
    /// Removes the last character.
    Backspace,
    /// Types a minus sign; only accepted into an empty buffer.
    Minus,
}

/// Reasons a fire request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum FireError {
    /// The tower has not finished cooling down.
    #[error("tower is still cooling down")]
    CoolingDown,
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
    /// The target is gone or already dead.
    #[error("target is no longer alive")]
    MissingTarget,
}

/// Reasons a shop purchase may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PurchaseError {
    /// Purchases are only accepted while the shop is open.
    #[error("shop is closed")]
    ShopClosed,
    /// The player cannot afford the next level.
    #[error("upgrade costs {cost} gold but only {available} is available")]
    InsufficientGold {
        /// Gold required.
        cost: u32,
        /// Gold held by the player.
        available: u32,
    },
}

/// Reasons a challenge command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ChallengeError {
    /// A challenge is already open.
    #[error("a challenge is already open")]
    AlreadyOpen,
    /// No challenge is open.
    #[error("no challenge is open")]
    NotOpen,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Position along the path in play-area pixels.
    pub position: Vec2,
    /// Progress scalar along the path.
    pub progress: f32,
    /// Remaining hit points.
    pub hit_points: f32,
    /// Hit points the enemy spawned with.
    pub max_hit_points: f32,
    /// Indicates whether a burn is active.
    pub burning: bool,
    /// Indicates whether a slow is active.
    pub slowed: bool,
}

/// Read-only snapshot describing all enemies on the path.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Behaviour of the tower.
    pub variant: TowerVariant,
    /// Position of the tower.
    pub position: Vec2,
    /// Targeting range in pixels.
    pub range: f32,
    /// Base damage before upgrades.
    pub damage: f32,
    /// Interval the tower waits after firing, upgrades included.
    pub fire_interval: Duration,
    /// Time left before the tower may fire again.
    pub ready_in: Duration,
    /// Indicates whether the player selected the tower.
    pub selected: bool,
}

/// Read-only snapshot describing all towers in play.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Current position.
    pub position: Vec2,
    /// Point the projectile will land on.
    pub impact_point: Vec2,
}

/// Target assignment computed for a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that acquired the target.
    pub tower: TowerId,
    /// Enemy selected by the tower.
    pub enemy: EnemyId,
    /// Distance between the tower and the enemy in pixels.
    pub distance: f32,
}

/// Read-only snapshot of the level state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSnapshot {
    /// Current level.
    pub level: u32,
    /// Stage of the level lifecycle.
    pub phase: WavePhase,
    /// Kills recorded during the level.
    pub kills: u32,
    /// Kills required to advance.
    pub kill_threshold: u32,
    /// Enemies released during the level.
    pub spawned: u32,
    /// Enemies the level releases in total.
    pub spawn_quota: u32,
    /// Delay separating two spawns.
    pub spawn_interval: Duration,
}

impl WaveSnapshot {
    /// Reports whether the level still accepts spawns.
    #[must_use]
    pub fn accepts_spawns(&self) -> bool {
        self.phase == WavePhase::Spawning && self.spawned < self.spawn_quota
    }
}

/// Read-only snapshot of the player's resources.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LedgerSnapshot {
    /// Remaining hit points.
    pub hit_points: f32,
    /// Flat armor against escapes.
    pub armor: f32,
    /// Gold available for the shop.
    pub gold: u32,
}

/// A single row of the upgrade shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShopOffer {
    /// Track sold by the row.
    pub track: UpgradeTrack,
    /// Purchased level of the track.
    pub level: u32,
    /// Gold required for the next level.
    pub cost: u32,
}
