use std::{collections::HashMap, time::Duration};

use math_defence_core::{AnswerEdit, EnemyId, Event, PurchaseError, UpgradeTrack, WavePhase};
use math_defence_simulation::{Input, Simulation, SimulationConfig};

const FRAME: Duration = Duration::from_micros(16_667);

fn run(simulation: &mut Simulation, steps: usize, log: &mut Vec<Event>) {
    for _ in 0..steps {
        simulation.step(FRAME, log);
    }
}

fn answer(prompt: &str) -> i64 {
    let parts: Vec<&str> = prompt.split(' ').collect();
    let left: i64 = parts[0].parse().expect("left operand");
    let right: i64 = parts[2].parse().expect("right operand");
    match parts[1] {
        "+" => left + right,
        "-" => left - right,
        "*" => left * right,
        "/" => left / right,
        other => panic!("unexpected operator {other}"),
    }
}

fn type_answer(simulation: &mut Simulation, value: i64, log: &mut Vec<Event>) {
    if value < 0 {
        simulation.submit(Input::EditAnswer(AnswerEdit::Minus), log);
    }
    for digit in value.unsigned_abs().to_string().bytes() {
        simulation.submit(Input::EditAnswer(AnswerEdit::Digit(digit - b'0')), log);
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let mut first = Simulation::new(SimulationConfig::new(42));
    let mut second = Simulation::new(SimulationConfig::new(42));
    let mut first_log = Vec::new();
    let mut second_log = Vec::new();

    run(&mut first, 3_000, &mut first_log);
    run(&mut second, 3_000, &mut second_log);

    assert_eq!(first_log, second_log);
    assert_eq!(first.frame(), second.frame());
    assert!(first_log
        .iter()
        .any(|event| matches!(event, Event::EnemySpawned { .. })));
}

#[test]
fn enemy_progress_never_decreases_and_stays_on_the_path() {
    let mut simulation = Simulation::new(SimulationConfig::new(7));
    let mut last_progress: HashMap<EnemyId, f32> = HashMap::new();
    let mut log = Vec::new();

    for _ in 0..6_000 {
        simulation.step(FRAME, &mut log);
        let frame = simulation.frame();
        let end = (frame.path.len() - 1) as f32;
        for enemy in &frame.enemies {
            assert!(enemy.progress <= end);
            assert!(enemy.hit_points <= enemy.max_hit_points);
            if let Some(previous) = last_progress.insert(enemy.id, enemy.progress) {
                assert!(
                    enemy.progress >= previous.min(end),
                    "enemy {:?} moved backwards",
                    enemy.id
                );
            }
        }
    }
}

#[test]
fn kill_rewards_climb_by_ten_and_reset_each_level() {
    let mut simulation = Simulation::new(SimulationConfig::new(3));
    let mut log = Vec::new();
    run(&mut simulation, 20_000, &mut log);

    let mut expected = 10;
    let mut total = 0;
    for event in &log {
        match event {
            Event::EnemyKilled { reward, .. } => {
                assert_eq!(*reward, expected);
                total += reward;
                expected += 10;
            }
            Event::LevelCompleted { .. } => expected = 10,
            _ => {}
        }
    }
    assert!(total > 0, "towers never killed anything");
    assert_eq!(simulation.frame().ledger.gold, total);
}

#[test]
fn every_new_level_starts_from_clean_counters() {
    let mut simulation = Simulation::new(SimulationConfig::new(11));
    let mut levels_started = 0;

    for _ in 0..40_000 {
        let mut log = Vec::new();
        simulation.step(FRAME, &mut log);
        if simulation.frame().defeated {
            break;
        }
        for event in &log {
            if let Event::LevelStarted {
                level,
                kill_threshold,
                spawn_quota,
            } = event
            {
                levels_started += 1;
                assert!((20..=30).contains(kill_threshold));
                assert!((30..=50).contains(spawn_quota));
                if *level > 1 {
                    let wave = simulation.frame().wave;
                    assert_eq!(wave.kills, 0);
                    assert!(matches!(wave.phase, WavePhase::InterLevelPause { .. }));
                    simulation.submit(Input::SkipPause, &mut Vec::new());
                    let wave = simulation.frame().wave;
                    assert_eq!(wave.spawned, 0);
                    assert_eq!(wave.phase, WavePhase::Spawning);
                }
            }
        }
    }

    assert!(levels_started >= 1 || simulation.frame().defeated);
}

#[test]
fn answering_correctly_places_a_tower_at_the_last_click() {
    let mut simulation = Simulation::new(SimulationConfig::new(5));
    let mut log = Vec::new();
    let point = glam::Vec2::new(520.0, 460.0);

    simulation.submit(Input::PointClicked(point), &mut log);
    simulation.submit(Input::OpenChallenge, &mut log);
    simulation.submit(Input::OpenChallenge, &mut log);
    let challenge = simulation.frame().challenge.expect("challenge open");
    assert!(log.iter().any(|event| matches!(
        event,
        Event::ChallengeRejected { .. }
    )));

    type_answer(&mut simulation, answer(&challenge.prompt), &mut log);
    log.clear();
    simulation.submit(Input::SubmitAnswer, &mut log);
    simulation.submit(Input::SubmitAnswer, &mut log);

    assert_eq!(log[0], Event::ChallengeAnswered { correct: true });
    assert!(matches!(
        log[1],
        Event::TowerPlaced { position, .. } if position == point
    ));
    assert!(matches!(log[2], Event::ChallengeRejected { .. }));
    assert_eq!(log.len(), 3);

    let frame = simulation.frame();
    assert!(frame.challenge.is_none());
    assert_eq!(frame.towers.len(), 4);
}

#[test]
fn empty_shop_purchases_are_rejected() {
    let mut simulation = Simulation::new(SimulationConfig::new(5));
    let mut log = Vec::new();

    simulation.submit(Input::ToggleShop, &mut log);
    log.clear();
    simulation.submit(Input::PurchaseUpgrade(3), &mut log);

    assert_eq!(
        log,
        vec![Event::UpgradeRejected {
            track: UpgradeTrack::AreaOfEffect,
            reason: PurchaseError::InsufficientGold {
                cost: 80,
                available: 0,
            },
        }]
    );
    let frame = simulation.frame();
    assert!(frame.shop_open);
    assert_eq!(frame.shop[3].cost, 80);
}
