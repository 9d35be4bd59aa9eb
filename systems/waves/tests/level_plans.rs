use std::time::Duration;

use math_defence_core::{
    Command, EnemyStats, Event, LevelPlan, WavePhase, DEFAULT_ROUTE, INTER_LEVEL_PAUSE,
};
use math_defence_system_waves::{Config, LevelPlanner};
use math_defence_world::{self as world, query, World};

fn pump(world: &mut World, planner: &mut LevelPlanner, command: Command) -> Vec<Event> {
    let mut log = Vec::new();
    let mut events = Vec::new();
    world::apply(world, command, &mut events);

    while !events.is_empty() {
        let mut commands = Vec::new();
        planner.handle(&events, &mut commands);
        log.append(&mut events);
        for command in commands {
            world::apply(world, command, &mut events);
        }
    }
    log
}

fn started(events: &[Event]) -> Option<(u32, u32, u32)> {
    events.iter().find_map(|event| match event {
        Event::LevelStarted {
            level,
            kill_threshold,
            spawn_quota,
        } => Some((*level, *kill_threshold, *spawn_quota)),
        _ => None,
    })
}

#[test]
fn session_start_installs_a_randomised_opening_level() {
    for seed in 0..32 {
        let mut world = World::new();
        let mut planner = LevelPlanner::new(Config::new(seed));
        let events = pump(&mut world, &mut planner, Command::StartSession);

        let (level, kill_threshold, spawn_quota) = started(&events).expect("level 1 started");
        assert_eq!(level, 1);
        assert!((20..=30).contains(&kill_threshold));
        assert!((30..=50).contains(&spawn_quota));
        assert_eq!(query::wave(&world).phase, WavePhase::Spawning);
        assert_eq!(query::path(&world).waypoints(), DEFAULT_ROUTE.as_slice());
    }
}

#[test]
fn completed_level_is_followed_by_a_generated_level_and_pause() {
    let mut world = World::new();
    let mut planner = LevelPlanner::new(Config::new(0xfeed));
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSession, &mut events);
    world::apply(
        &mut world,
        Command::BeginLevel {
            plan: LevelPlan {
                level: 1,
                kill_threshold: 20,
                spawn_quota: 1,
                waypoints: DEFAULT_ROUTE.to_vec(),
            },
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            stats: EnemyStats::for_level(1, 0.0, 1.0),
        },
        &mut events,
    );
    assert_eq!(query::wave(&world).phase, WavePhase::Draining);

    let mut next_level = None;
    for _ in 0..200 {
        let events = pump(
            &mut world,
            &mut planner,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
        );
        if let Some(started) = started(&events) {
            assert!(events.contains(&Event::LevelCompleted { level: 1 }));
            assert!(events.contains(&Event::InterLevelPauseStarted {
                duration: INTER_LEVEL_PAUSE,
            }));
            next_level = Some(started);
            break;
        }
    }

    let (level, kill_threshold, spawn_quota) = next_level.expect("level 2 started");
    assert_eq!(level, 2);
    assert!((20..=30).contains(&kill_threshold));
    assert!((30..=50).contains(&spawn_quota));
    assert!(matches!(
        query::wave(&world).phase,
        WavePhase::InterLevelPause { .. }
    ));
    assert_eq!(query::inter_level_countdown(&world), Some(20));

    let waypoints = query::path(&world).waypoints();
    assert_ne!(waypoints, DEFAULT_ROUTE.as_slice());
    assert!((5..=9).contains(&waypoints.len()));

    let (message, _) = query::level_message(&world).expect("level message shown");
    assert_eq!(
        message,
        format!("Level 2 - New path generated! Next threshold: {kill_threshold} kills")
    );
}
