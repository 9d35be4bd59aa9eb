//! Math challenge prompt state.

use math_defence_core::{AnswerEdit, ChallengeError, Question};

#[derive(Clone, Debug, Default)]
pub(crate) struct ChallengeGate {
    question: Option<Question>,
    input: String,
}

impl ChallengeGate {
    pub(crate) fn is_open(&self) -> bool {
        self.question.is_some()
    }

    pub(crate) fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn open(&mut self, question: Question) -> Result<(), ChallengeError> {
        if self.is_open() {
            return Err(ChallengeError::AlreadyOpen);
        }
        self.question = Some(question);
        self.input.clear();
        Ok(())
    }

    pub(crate) fn edit(&mut self, edit: AnswerEdit) -> Result<(), ChallengeError> {
        if !self.is_open() {
            return Err(ChallengeError::NotOpen);
        }
        match edit {
            AnswerEdit::Digit(digit) => {
                if let Some(character) = char::from_digit(u32::from(digit), 10) {
                    self.input.push(character);
                }
            }
            AnswerEdit::Backspace => {
                let _ = self.input.pop();
            }
            AnswerEdit::Minus => {
                if self.input.is_empty() {
                    self.input.push('-');
                }
            }
        }
        Ok(())
    }

    /// Closes the gate and reports whether `answer` matched.
    pub(crate) fn submit(&mut self, answer: Option<i64>) -> Result<bool, ChallengeError> {
        let question = self.question.take().ok_or(ChallengeError::NotOpen)?;
        self.input.clear();
        Ok(answer == Some(question.answer()))
    }

    pub(crate) fn cancel(&mut self) -> Result<(), ChallengeError> {
        if self.question.take().is_none() {
            return Err(ChallengeError::NotOpen);
        }
        self.input.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_defence_core::Operator;

    fn open_gate() -> ChallengeGate {
        let mut gate = ChallengeGate::default();
        gate.open(Question::new(7, Operator::Add, 5))
            .expect("gate starts closed");
        gate
    }

    #[test]
    fn only_one_challenge_may_be_open() {
        let mut gate = open_gate();
        assert_eq!(
            gate.open(Question::new(1, Operator::Add, 1)),
            Err(ChallengeError::AlreadyOpen)
        );
        assert_eq!(gate.question(), Some(&Question::new(7, Operator::Add, 5)));
    }

    #[test]
    fn input_buffer_accepts_digits_backspace_and_leading_minus() {
        let mut gate = open_gate();
        for edit in [
            AnswerEdit::Minus,
            AnswerEdit::Digit(1),
            AnswerEdit::Minus,
            AnswerEdit::Digit(2),
            AnswerEdit::Digit(42),
            AnswerEdit::Digit(9),
            AnswerEdit::Backspace,
        ] {
            gate.edit(edit).expect("gate is open");
        }
        assert_eq!(gate.input(), "-12");
    }

    #[test]
    fn submission_closes_the_gate() {
        let mut gate = open_gate();
        assert_eq!(gate.submit(Some(12)), Ok(true));
        assert!(!gate.is_open());
        assert_eq!(gate.submit(Some(12)), Err(ChallengeError::NotOpen));
    }

    #[test]
    fn wrong_or_missing_answers_fail() {
        let mut gate = open_gate();
        assert_eq!(gate.submit(Some(11)), Ok(false));

        let mut gate = open_gate();
        assert_eq!(gate.submit(None), Ok(false));
    }

    #[test]
    fn cancelling_requires_an_open_gate() {
        let mut gate = open_gate();
        assert_eq!(gate.cancel(), Ok(()));
        assert_eq!(gate.cancel(), Err(ChallengeError::NotOpen));
    }
}
