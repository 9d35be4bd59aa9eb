#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Math challenge system that writes questions and rolls answer rewards.

use math_defence_core::{Command, Operator, Question, TowerImprovement};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the challenge system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system translating player intent into challenge commands.
#[derive(Debug)]
pub struct Challenges {
    rng: ChaCha8Rng,
}

impl Challenges {
    /// Creates a new challenge system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Writes a question matching the difficulty of `level`.
    pub fn open(&mut self, level: u32, out: &mut Vec<Command>) {
        out.push(Command::OpenChallenge {
            question: self.question_for_level(level),
        });
    }

    /// Submits the typed answer buffer together with a freshly rolled reward.
    ///
    /// Buffers that do not parse as an integer are submitted as absent
    /// answers, which the world treats as incorrect.
    pub fn submit(&mut self, input: &str, out: &mut Vec<Command>) {
        out.push(Command::SubmitAnswer {
            answer: parse_answer(input),
            improvement: self.roll_improvement(),
        });
    }

    fn roll_improvement(&mut self) -> TowerImprovement {
        let roll: f32 = self.rng.gen();
        if roll < 0.33 {
            TowerImprovement::Damage
        } else if roll < 0.66 {
            TowerImprovement::Range
        } else {
            TowerImprovement::FireInterval
        }
    }

    fn question_for_level(&mut self, level: u32) -> Question {
        match level {
            0..=2 => {
                let left = self.rng.gen_range(1..=12);
                let right = self.rng.gen_range(1..=12);
                let operator = self.pick(&[Operator::Add, Operator::Subtract]);
                Question::new(left, operator, right)
            }
            3..=5 => {
                let left = self.rng.gen_range(1..=20);
                let right = self.rng.gen_range(1..=20);
                let operator =
                    self.pick(&[Operator::Add, Operator::Subtract, Operator::Multiply]);
                Question::new(left, operator, right)
            }
            6..=9 => {
                let left = self.rng.gen_range(2..=19);
                let right = self.rng.gen_range(2..=19);
                let operator =
                    self.pick(&[Operator::Add, Operator::Subtract, Operator::Multiply]);
                Question::new(left, operator, right)
            }
            _ => {
                let operator = self.pick(&[
                    Operator::Add,
                    Operator::Subtract,
                    Operator::Multiply,
                    Operator::Divide,
                ]);
                if operator == Operator::Divide {
                    let divisor = self.rng.gen_range(2..=19);
                    let quotient = self.rng.gen_range(2..=13);
                    Question::new(divisor * quotient, operator, divisor)
                } else {
                    let left = self.rng.gen_range(5..=49);
                    let right = self.rng.gen_range(5..=49);
                    Question::new(left, operator, right)
                }
            }
        }
    }

    fn pick(&mut self, operators: &[Operator]) -> Operator {
        operators[self.rng.gen_range(0..operators.len())]
    }
}

/// Parses an answer buffer into an integer, ignoring surrounding whitespace.
#[must_use]
pub fn parse_answer(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}
