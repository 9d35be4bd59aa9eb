//! Scripted player that exercises challenges, the shop, and pauses.

use glam::Vec2;
use math_defence_core::{AnswerEdit, Event, PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use math_defence_simulation::{Input, Simulation};
use math_defence_world::query;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::AutoplayConfig;

/// Distance from a waypoint at which reward towers are requested.
const PLACEMENT_OFFSET: f32 = 40.0;
const AUTOPILOT_STREAM: u64 = 0x4155_544f;

#[derive(Debug)]
pub(crate) struct Autopilot {
    config: AutoplayConfig,
    rng: ChaCha8Rng,
}

impl Autopilot {
    pub(crate) fn new(config: AutoplayConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed ^ AUTOPILOT_STREAM),
        }
    }

    /// Reacts to the state reached after step `tick`.
    pub(crate) fn act(&mut self, tick: u64, simulation: &mut Simulation, out_events: &mut Vec<Event>) {
        if query::is_defeated(simulation.world()) {
            return;
        }

        if self.config.skip_pauses && query::inter_level_countdown(simulation.world()).is_some() {
            simulation.submit(Input::SkipPause, out_events);
        }

        if tick > 0 && tick % self.config.challenge_every == 0 {
            self.attempt_challenge(simulation, out_events);
        }

        if self.config.buy_upgrades {
            buy_cheapest_upgrade(simulation, out_events);
        }
    }

    fn attempt_challenge(&mut self, simulation: &mut Simulation, out_events: &mut Vec<Event>) {
        let waypoints = query::path(simulation.world()).waypoints();
        let anchor = waypoints[self.rng.gen_range(0..waypoints.len())];
        let point = (anchor + Vec2::new(0.0, PLACEMENT_OFFSET))
            .clamp(Vec2::ZERO, Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT));
        simulation.submit(Input::PointClicked(point), out_events);

        simulation.submit(Input::OpenChallenge, out_events);
        let Some(question) = query::challenge_question(simulation.world()) else {
            return;
        };

        let correct = self.rng.gen_bool(self.config.accuracy);
        let answer = if correct {
            question.answer()
        } else {
            question.answer() + 1
        };
        debug!(%question, answer, "answering challenge");

        for edit in answer_edits(answer) {
            simulation.submit(Input::EditAnswer(edit), out_events);
        }
        simulation.submit(Input::SubmitAnswer, out_events);
    }
}

fn buy_cheapest_upgrade(simulation: &mut Simulation, out_events: &mut Vec<Event>) {
    let gold = query::ledger(simulation.world()).gold;
    let cheapest = query::shop_offers(simulation.world())
        .iter()
        .enumerate()
        .filter(|(_, offer)| offer.cost <= gold)
        .min_by_key(|(_, offer)| offer.cost)
        .map(|(index, _)| index);

    if let Some(index) = cheapest {
        simulation.submit(Input::ToggleShop, out_events);
        simulation.submit(Input::PurchaseUpgrade(index), out_events);
        simulation.submit(Input::ToggleShop, out_events);
    }
}

/// Keystrokes that type `answer` into an empty buffer.
fn answer_edits(answer: i64) -> Vec<AnswerEdit> {
    let mut edits = Vec::new();
    if answer < 0 {
        edits.push(AnswerEdit::Minus);
    }
    edits.extend(
        answer
            .unsigned_abs()
            .to_string()
            .bytes()
            .map(|digit| AnswerEdit::Digit(digit - b'0')),
    );
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_defence_simulation::SimulationConfig;

    #[test]
    fn negative_answers_start_with_a_minus() {
        assert_eq!(
            answer_edits(-40),
            vec![AnswerEdit::Minus, AnswerEdit::Digit(4), AnswerEdit::Digit(0)]
        );
        assert_eq!(answer_edits(7), vec![AnswerEdit::Digit(7)]);
    }

    #[test]
    fn perfect_accuracy_always_earns_a_reward() {
        let config = AutoplayConfig {
            accuracy: 1.0,
            challenge_every: 1,
            buy_upgrades: false,
            skip_pauses: false,
        };
        let mut autopilot = Autopilot::new(config, 17);
        let mut simulation = Simulation::new(SimulationConfig::new(17));
        let mut events = Vec::new();

        for tick in 1..=5 {
            autopilot.act(tick, &mut simulation, &mut events);
        }

        let answered: Vec<bool> = events
            .iter()
            .filter_map(|event| match event {
                Event::ChallengeAnswered { correct } => Some(*correct),
                _ => None,
            })
            .collect();
        assert_eq!(answered, vec![true; 5]);
        assert!(query::challenge_question(simulation.world()).is_none());
    }
}
