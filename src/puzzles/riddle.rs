//! Corrupted message gate: answer nine number riddles in order.
//!
//! Answers are picked from a shuffled 1-9 keypad. Any wrong press throws
//! the player back to the first riddle with a fresh shuffle, after a short
//! pause the session schedules.

use serde::Serialize;

use crate::rng::{shuffle, RandomSource};

pub struct Riddle {
    pub text: &'static str,
    pub answer: u8,
}

pub const RIDDLES: [Riddle; 9] = [
    Riddle { text: "Number of sides on a triangle.", answer: 3 },
    Riddle { text: "Colors in a rainbow.", answer: 7 },
    Riddle { text: "The loneliest number.", answer: 1 },
    Riddle { text: "Legs on a spider.", answer: 8 },
    Riddle { text: "Points on a five-pointed star.", answer: 5 },
    Riddle { text: "A pair of anything has this many.", answer: 2 },
    Riddle { text: "Seasons in a year.", answer: 4 },
    Riddle { text: "The square root of eighty-one.", answer: 9 },
    Riddle { text: "Sides on a hexagon.", answer: 6 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiddleOutcome {
    Ignored,
    Correct { answered: usize },
    /// Last riddle answered. Reported once per engine.
    Completed,
    WrongAnswer,
}

#[derive(Clone, Debug)]
pub struct RiddleGame {
    answered: usize,
    choices: [u8; 9],
    error: bool,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RiddleSnapshot {
    pub answered: usize,
    pub total: usize,
    pub riddle: Option<&'static str>,
    pub choices: [u8; 9],
    pub error: bool,
    pub completed: bool,
}

impl RiddleGame {
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        let mut game = Self {
            answered: 0,
            choices: [1, 2, 3, 4, 5, 6, 7, 8, 9],
            error: false,
            completed: false,
        };
        game.reshuffle(rng);
        game
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn choices(&self) -> [u8; 9] {
        self.choices
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn current(&self) -> Option<&'static Riddle> {
        RIDDLES.get(self.answered)
    }

    /// Presses are ignored while a wrong answer is on screen, after the
    /// last riddle is solved, and for numbers not on the keypad.
    pub fn press(&mut self, number: u8) -> RiddleOutcome {
        if self.error || self.completed || !(1..=9).contains(&number) {
            return RiddleOutcome::Ignored;
        }
        let Some(riddle) = self.current() else {
            return RiddleOutcome::Ignored;
        };
        if number != riddle.answer {
            self.error = true;
            return RiddleOutcome::WrongAnswer;
        }
        self.answered += 1;
        if self.answered == RIDDLES.len() {
            self.completed = true;
            RiddleOutcome::Completed
        } else {
            RiddleOutcome::Correct {
                answered: self.answered,
            }
        }
    }

    /// New keypad order, back to the first riddle.
    pub fn reshuffle(&mut self, rng: &mut dyn RandomSource) {
        self.choices = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        shuffle(&mut self.choices, rng);
        self.answered = 0;
        self.error = false;
    }

    pub fn snapshot(&self) -> RiddleSnapshot {
        RiddleSnapshot {
            answered: self.answered,
            total: RIDDLES.len(),
            riddle: self.current().map(|r| r.text),
            choices: self.choices,
            error: self.error,
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    fn answers() -> Vec<u8> {
        RIDDLES.iter().map(|r| r.answer).collect()
    }

    #[test]
    fn answers_cover_one_to_nine() {
        let mut a = answers();
        a.sort_unstable();
        assert_eq!(a, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn correct_run_completes_once() {
        let mut g = RiddleGame::new(&mut SeededRandom::new(3));
        let all = answers();
        for (i, &a) in all[..8].iter().enumerate() {
            assert_eq!(g.press(a), RiddleOutcome::Correct { answered: i + 1 });
        }
        assert_eq!(g.press(all[8]), RiddleOutcome::Completed);
        assert_eq!(g.press(all[8]), RiddleOutcome::Ignored);
        assert_eq!(g.snapshot().riddle, None);
    }

    #[test]
    fn wrong_answer_holds_until_reshuffle() {
        let mut rng = SeededRandom::new(5);
        let mut g = RiddleGame::new(&mut rng);
        g.press(3);
        g.press(7);
        assert_eq!(g.press(9), RiddleOutcome::WrongAnswer);
        assert!(g.is_error());
        assert_eq!(g.answered(), 2);
        assert_eq!(g.press(1), RiddleOutcome::Ignored);
        g.reshuffle(&mut rng);
        assert_eq!(g.answered(), 0);
        assert!(!g.is_error());
        assert_eq!(g.current().map(|r| r.answer), Some(3));
    }

    #[test]
    fn numbers_off_the_keypad_are_ignored() {
        let mut g = RiddleGame::new(&mut SeededRandom::new(9));
        for &a in &answers()[..4] {
            g.press(a);
        }
        assert_eq!(g.press(0), RiddleOutcome::Ignored);
        assert_eq!(g.press(10), RiddleOutcome::Ignored);
        assert_eq!(g.press(255), RiddleOutcome::Ignored);
        assert_eq!(g.answered(), 4);
        assert!(!g.is_error());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::rng::SeededRandom;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_choices_always_a_permutation(seed in any::<u64>(), rounds in 1usize..6) {
            let mut rng = SeededRandom::new(seed);
            let mut g = RiddleGame::new(&mut rng);
            for _ in 0..rounds {
                let mut c = g.choices();
                c.sort_unstable();
                prop_assert_eq!(c, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
                g.reshuffle(&mut rng);
            }
        }

        #[test]
        fn prop_wrong_answer_resets_to_zero(seed in any::<u64>(), progress in 0usize..9, wrong in 1u8..=9) {
            let mut rng = SeededRandom::new(seed);
            let mut g = RiddleGame::new(&mut rng);
            for r in &RIDDLES[..progress] {
                g.press(r.answer);
            }
            prop_assume!(wrong != RIDDLES[progress].answer);
            prop_assert_eq!(g.press(wrong), RiddleOutcome::WrongAnswer);
            g.reshuffle(&mut rng);
            prop_assert_eq!(g.answered(), 0);
            let mut c = g.choices();
            c.sort_unstable();
            prop_assert_eq!(c, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        }
    }
}
