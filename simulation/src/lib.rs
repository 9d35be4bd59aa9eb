#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick driver that owns the Math Defence world and its pure systems.
//!
//! A [`Simulation`] advances one explicit time step per [`Simulation::step`]
//! call and accepts discrete player inputs through [`Simulation::submit`].
//! Rendering collaborators read everything they draw from
//! [`Simulation::frame`].

use std::time::Duration;

use glam::Vec2;
use math_defence_core::{
    AnswerEdit, Command, EnemySnapshot, Event, LedgerSnapshot, ProjectileSnapshot, ShopOffer,
    TowerSnapshot, TowerTarget, UpgradeTrack, WaveSnapshot,
};
use math_defence_system_challenge::{self as challenge, Challenges};
use math_defence_system_spawning::{self as spawning, Spawning};
use math_defence_system_tower_combat::TowerCombat;
use math_defence_system_tower_targeting::TowerTargeting;
use math_defence_system_waves::{self as waves, LevelPlanner};
use math_defence_world::{self as world, query, World};
use tracing::debug;

/// Seeds mixed into the session seed so each system draws its own stream.
const SPAWNING_STREAM: u64 = 0x5350_4157_4e49_4e47;
const PLANNER_STREAM: u64 = 0x504c_414e_4e45_5253;
const CHALLENGE_STREAM: u64 = 0x4348_414c_4c45_4e47;

/// Parameters fixed for the lifetime of a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Seed every random-consuming system derives its generator from.
    pub seed: u64,
}

impl SimulationConfig {
    /// Creates a configuration using the provided seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

/// Discrete player inputs accepted between steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// Selects the nearest tower or records a placement point.
    PointClicked(Vec2),
    /// Opens a challenge sized to the current level.
    OpenChallenge,
    /// Edits the answer buffer of the open challenge.
    EditAnswer(AnswerEdit),
    /// Submits the answer buffer of the open challenge.
    SubmitAnswer,
    /// Abandons the open challenge.
    CancelChallenge,
    /// Opens or closes the upgrade shop.
    ToggleShop,
    /// Buys the upgrade at the given shop row.
    PurchaseUpgrade(usize),
    /// Ends the inter-level pause immediately.
    SkipPause,
}

/// Open challenge as presented to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeFrame {
    /// Question text such as `7 * 6`.
    pub prompt: String,
    /// Characters typed so far.
    pub input: String,
}

/// Level message with its remaining display time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageFrame {
    /// Message text.
    pub text: String,
    /// Time left before the message clears.
    pub remaining: Duration,
}

/// Read-only snapshot of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Waypoints of the current path.
    pub path: Vec<Vec2>,
    /// Enemies on the path in spawn order.
    pub enemies: Vec<EnemySnapshot>,
    /// Towers in play.
    pub towers: Vec<TowerSnapshot>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Level state machine.
    pub wave: WaveSnapshot,
    /// Enemies still to spawn plus those alive.
    pub remaining_enemies: u32,
    /// Player resources.
    pub ledger: LedgerSnapshot,
    /// Open challenge, if any.
    pub challenge: Option<ChallengeFrame>,
    /// Whether the shop overlay is open.
    pub shop_open: bool,
    /// Shop rows with their current levels and costs.
    pub shop: [ShopOffer; 4],
    /// Level message, while it is displayed.
    pub message: Option<MessageFrame>,
    /// Whole seconds left in the inter-level pause.
    pub countdown: Option<u64>,
    /// Whether the player has been defeated.
    pub defeated: bool,
    /// Ticks processed since the session started.
    pub tick: u64,
}

/// Owns the world and drives its systems one step at a time.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    planner: LevelPlanner,
    targeting: TowerTargeting,
    combat: TowerCombat,
    challenges: Challenges,
    targets: Vec<TowerTarget>,
}

impl Simulation {
    /// Creates a simulation and starts its first level.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        let mut simulation = Self {
            world: World::new(),
            spawning: Spawning::new(spawning::Config::new(config.seed ^ SPAWNING_STREAM)),
            planner: LevelPlanner::new(waves::Config::new(config.seed ^ PLANNER_STREAM)),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            challenges: Challenges::new(challenge::Config::new(config.seed ^ CHALLENGE_STREAM)),
            targets: Vec::new(),
        };
        let mut events = Vec::new();
        simulation.run(Command::StartSession, &mut events);
        simulation
    }

    /// Provides read-only access to the world for detailed queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances the simulation by `dt`, appending every emitted event to `out_events`.
    ///
    /// Within a step the world first advances timers and movement, then the
    /// systems spawn enemies and fire towers, and finally status effects and
    /// projectile impacts are resolved.
    pub fn step(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let first = out_events.len();
        self.run(Command::Tick { dt }, out_events);

        let mut commands = Vec::new();
        let wave = query::wave(&self.world);
        self.spawning
            .handle(&out_events[first..], &wave, &mut commands);
        for command in commands.drain(..) {
            self.run(command, out_events);
        }

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(&towers, &enemies, &mut self.targets);
        self.combat.handle(towers, &self.targets, &mut commands);
        for command in commands.drain(..) {
            self.run(command, out_events);
        }

        self.run(Command::ResolveCombat { dt }, out_events);
    }

    /// Applies a player input, appending the resulting events to `out_events`.
    pub fn submit(&mut self, input: Input, out_events: &mut Vec<Event>) {
        let mut commands = Vec::new();
        match input {
            Input::PointClicked(point) => commands.push(Command::ClickPoint { point }),
            Input::OpenChallenge => {
                self.challenges
                    .open(query::wave(&self.world).level, &mut commands);
            }
            Input::EditAnswer(edit) => commands.push(Command::EditAnswer { edit }),
            Input::SubmitAnswer => {
                let typed = query::answer_input(&self.world).unwrap_or_default();
                self.challenges.submit(typed, &mut commands);
            }
            Input::CancelChallenge => commands.push(Command::CancelChallenge),
            Input::ToggleShop => commands.push(Command::ToggleShop),
            Input::PurchaseUpgrade(index) => match UpgradeTrack::from_index(index) {
                Some(track) => commands.push(Command::PurchaseUpgrade { track }),
                None => debug!(index, "ignoring purchase of an unknown shop row"),
            },
            Input::SkipPause => commands.push(Command::SkipPause),
        }

        for command in commands {
            self.run(command, out_events);
        }
    }

    /// Captures the state a renderer draws each frame.
    #[must_use]
    pub fn frame(&self) -> Frame {
        let world = &self.world;
        let challenge = query::challenge_prompt(world).map(|prompt| ChallengeFrame {
            prompt,
            input: query::answer_input(world).unwrap_or_default().to_owned(),
        });
        let message = query::level_message(world).map(|(text, remaining)| MessageFrame {
            text: text.to_owned(),
            remaining,
        });

        Frame {
            path: query::path(world).waypoints().to_vec(),
            enemies: query::enemy_view(world).into_vec(),
            towers: query::tower_view(world).into_vec(),
            projectiles: query::projectiles(world),
            wave: query::wave(world),
            remaining_enemies: query::remaining_enemies(world),
            ledger: query::ledger(world),
            challenge,
            shop_open: query::shop_open(world),
            shop: query::shop_offers(world),
            message,
            countdown: query::inter_level_countdown(world),
            defeated: query::is_defeated(world),
            tick: query::tick_index(world),
        }
    }

    /// Applies `command` and answers level plan requests until the world settles.
    fn run(&mut self, command: Command, out_events: &mut Vec<Event>) {
        let mut pending = vec![command];
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            self.planner.handle(&events, &mut pending);
            out_events.append(&mut events);
        }
    }
}
