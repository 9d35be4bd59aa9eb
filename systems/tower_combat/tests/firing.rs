use std::time::Duration;

use math_defence_core::{Command, EnemyStats, Event, LevelPlan, TowerId, DEFAULT_ROUTE};
use math_defence_system_tower_combat::TowerCombat;
use math_defence_system_tower_targeting::TowerTargeting;
use math_defence_world::{self as world, query, World};

fn world_with_enemy_in_range() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSession, &mut events);
    world::apply(
        &mut world,
        Command::BeginLevel {
            plan: LevelPlan {
                level: 1,
                kill_threshold: 20,
                spawn_quota: 30,
                waypoints: DEFAULT_ROUTE.to_vec(),
            },
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            stats: EnemyStats::for_level(1, 0.5, 0.0),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(10),
        },
        &mut events,
    );
    world
}

fn fire_commands(world: &World, combat: &mut TowerCombat) -> Vec<Command> {
    let mut targeting = TowerTargeting::new();
    let mut targets = Vec::new();
    targeting.handle(&query::tower_view(world), &query::enemy_view(world), &mut targets);

    let mut commands = Vec::new();
    combat.handle(query::tower_view(world), &targets, &mut commands);
    commands
}

#[test]
fn ready_tower_fires_and_then_cools_down() {
    let mut world = world_with_enemy_in_range();
    let mut combat = TowerCombat::new();

    let commands = fire_commands(&world, &mut combat);
    assert_eq!(commands.len(), 1);

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert!(matches!(
        events.as_slice(),
        [Event::TowerFired { tower, .. }] if *tower == TowerId::new(0)
    ));
    assert_eq!(query::projectiles(&world).len(), 1);

    assert!(fire_commands(&world, &mut combat).is_empty());
}

#[test]
fn projectile_lands_and_mitigated_damage_applies() {
    let mut world = world_with_enemy_in_range();
    let mut combat = TowerCombat::new();
    let mut events = Vec::new();
    for command in fire_commands(&world, &mut combat) {
        world::apply(&mut world, command, &mut events);
    }

    events.clear();
    world::apply(
        &mut world,
        Command::ResolveCombat {
            dt: Duration::from_secs(1),
        },
        &mut events,
    );

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileImpacted { hits: 1, .. })));
    assert!(query::projectiles(&world).is_empty());
    let enemy = query::enemy_view(&world)
        .into_vec()
        .pop()
        .expect("enemy survives a single shot");
    assert!((enemy.hit_points - 148.5).abs() < 1e-3);
}
