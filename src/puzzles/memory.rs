//! Contacts recovery: a Simon-style sequence memory game.
//!
//! `Idle -> Showing -> AwaitingInput -> (LevelCleared -> Showing | Failed | Won)`
//!
//! Each level appends one button the sequence does not already contain,
//! plays the whole sequence back, then waits for the player to repeat it.
//! A wrong press fails the round; the session resets it after a pause.

use serde::Serialize;

use crate::config::MemoryConfig;
use crate::rng::RandomSource;

/// Buttons on the 3x3 pad, indexed 0..9.
pub const BUTTON_COUNT: usize = 9;

/// Rejection-sampling draws before falling back to the lowest free button.
const MAX_DRAWS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryStatus {
    Idle,
    Showing,
    AwaitingInput,
    /// Level repeated correctly; the next step is about to be drawn.
    LevelCleared,
    Failed,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOutcome {
    Ignored,
    /// Correct so far, more presses needed.
    Progress,
    LevelCleared,
    Won,
    Failed,
}

#[derive(Clone, Debug)]
pub struct MemoryGame {
    level: u32,
    winning_level: u32,
    sequence: Vec<u8>,
    input: Vec<u8>,
    status: MemoryStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    pub level: u32,
    pub status: MemoryStatus,
    pub sequence_len: usize,
    pub entered: usize,
    pub highlighted: Option<u8>,
}

impl MemoryGame {
    pub fn new(winning_level: u32) -> Self {
        Self {
            level: 1,
            winning_level,
            sequence: Vec::new(),
            input: Vec::new(),
            status: MemoryStatus::Idle,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> MemoryStatus {
        self.status
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// The player's "restore" button. Only works from Idle.
    pub fn start(&mut self, rng: &mut dyn RandomSource) -> bool {
        if self.status != MemoryStatus::Idle {
            return false;
        }
        self.extend(rng)
    }

    /// Draw the next step and begin playback. From Idle this is level 1;
    /// after a cleared level it moves up one.
    pub fn extend(&mut self, rng: &mut dyn RandomSource) -> bool {
        match self.status {
            MemoryStatus::Idle => {}
            MemoryStatus::LevelCleared => self.level += 1,
            _ => return false,
        }
        if self.sequence.len() >= BUTTON_COUNT {
            return false;
        }
        let next = draw_unused(&self.sequence, rng);
        self.sequence.push(next);
        self.input.clear();
        self.status = MemoryStatus::Showing;
        true
    }

    /// Playback has finished; the pad opens for input.
    pub fn finish_playback(&mut self) {
        if self.status == MemoryStatus::Showing {
            self.status = MemoryStatus::AwaitingInput;
        }
    }

    pub fn press(&mut self, button: u8) -> MemoryOutcome {
        if self.status != MemoryStatus::AwaitingInput || usize::from(button) >= BUTTON_COUNT {
            return MemoryOutcome::Ignored;
        }
        let pos = self.input.len();
        self.input.push(button);
        if self.sequence.get(pos) != Some(&button) {
            self.status = MemoryStatus::Failed;
            return MemoryOutcome::Failed;
        }
        if self.input.len() < self.sequence.len() {
            return MemoryOutcome::Progress;
        }
        if self.level >= self.winning_level {
            self.status = MemoryStatus::Won;
            MemoryOutcome::Won
        } else {
            self.status = MemoryStatus::LevelCleared;
            MemoryOutcome::LevelCleared
        }
    }

    /// Back to level 1 with nothing drawn.
    pub fn reset(&mut self) {
        self.level = 1;
        self.sequence.clear();
        self.input.clear();
        self.status = MemoryStatus::Idle;
    }

    /// Total playback time for the current sequence. Input opens after this.
    pub fn playback_ms(&self, config: &MemoryConfig) -> u64 {
        self.sequence.len() as u64 * config.step_ms + config.tail_ms
    }

    /// Which button is lit `elapsed_ms` into playback. Step `i` lights at
    /// `(i + 1) * step_ms` for `highlight_ms`.
    pub fn highlighted_at(&self, elapsed_ms: u64, config: &MemoryConfig) -> Option<u8> {
        if self.status != MemoryStatus::Showing {
            return None;
        }
        self.sequence.iter().enumerate().find_map(|(i, &button)| {
            let on = (i as u64 + 1) * config.step_ms;
            (elapsed_ms >= on && elapsed_ms < on + config.highlight_ms).then_some(button)
        })
    }

    pub fn snapshot(&self, highlighted: Option<u8>) -> MemorySnapshot {
        MemorySnapshot {
            level: self.level,
            status: self.status,
            sequence_len: self.sequence.len(),
            entered: self.input.len(),
            highlighted,
        }
    }
}

fn draw_unused(taken: &[u8], rng: &mut dyn RandomSource) -> u8 {
    for _ in 0..MAX_DRAWS {
        let candidate = rng.below(BUTTON_COUNT as u32) as u8;
        if !taken.contains(&candidate) {
            return candidate;
        }
    }
    (0..BUTTON_COUNT as u8)
        .find(|b| !taken.contains(b))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRandom, SeededRandom};

    fn play_level(game: &mut MemoryGame) -> MemoryOutcome {
        game.finish_playback();
        let seq = game.sequence().to_vec();
        let mut last = MemoryOutcome::Ignored;
        for b in seq {
            last = game.press(b);
        }
        last
    }

    #[test]
    fn start_only_from_idle() {
        let mut g = MemoryGame::new(5);
        let mut rng = ScriptedRandom::new(vec![4]);
        assert!(g.start(&mut rng));
        assert_eq!(g.status(), MemoryStatus::Showing);
        assert_eq!(g.sequence(), &[4]);
        assert!(!g.start(&mut rng));
    }

    #[test]
    fn input_ignored_during_playback() {
        let mut g = MemoryGame::new(5);
        g.start(&mut ScriptedRandom::new(vec![2]));
        assert_eq!(g.press(2), MemoryOutcome::Ignored);
        g.finish_playback();
        assert_eq!(g.press(2), MemoryOutcome::LevelCleared);
    }

    #[test]
    fn rejection_sampling_skips_used_buttons() {
        let mut g = MemoryGame::new(5);
        let mut rng = ScriptedRandom::new(vec![3, 3, 3, 7]);
        g.start(&mut rng);
        play_level(&mut g);
        g.extend(&mut rng);
        assert_eq!(g.sequence(), &[3, 7]);
        assert_eq!(g.level(), 2);
    }

    #[test]
    fn stubborn_source_falls_back_to_free_button() {
        let mut g = MemoryGame::new(5);
        let mut rng = ScriptedRandom::new(vec![0]);
        g.start(&mut rng);
        play_level(&mut g);
        g.extend(&mut rng);
        assert_eq!(g.sequence(), &[0, 1]);
    }

    #[test]
    fn wrong_press_fails() {
        let mut g = MemoryGame::new(5);
        g.start(&mut ScriptedRandom::new(vec![5]));
        g.finish_playback();
        assert_eq!(g.press(6), MemoryOutcome::Failed);
        assert_eq!(g.status(), MemoryStatus::Failed);
        assert_eq!(g.press(5), MemoryOutcome::Ignored);
        g.reset();
        assert_eq!(g.level(), 1);
        assert!(g.sequence().is_empty());
        assert!(g.input().is_empty());
        assert_eq!(g.status(), MemoryStatus::Idle);
    }

    #[test]
    fn winning_level_reports_won() {
        let mut g = MemoryGame::new(3);
        let mut rng = SeededRandom::new(11);
        g.start(&mut rng);
        assert_eq!(play_level(&mut g), MemoryOutcome::LevelCleared);
        g.extend(&mut rng);
        assert_eq!(play_level(&mut g), MemoryOutcome::LevelCleared);
        g.extend(&mut rng);
        assert_eq!(play_level(&mut g), MemoryOutcome::Won);
        assert_eq!(g.status(), MemoryStatus::Won);
        assert!(!g.extend(&mut rng));
    }

    #[test]
    fn partial_input_is_progress() {
        let mut g = MemoryGame::new(5);
        let mut rng = ScriptedRandom::new(vec![1, 8]);
        g.start(&mut rng);
        play_level(&mut g);
        g.extend(&mut rng);
        g.finish_playback();
        assert_eq!(g.press(1), MemoryOutcome::Progress);
        assert_eq!(g.press(8), MemoryOutcome::LevelCleared);
    }

    #[test]
    fn playback_timing() {
        let config = MemoryConfig::default();
        let mut g = MemoryGame::new(5);
        let mut rng = ScriptedRandom::new(vec![2, 6]);
        g.start(&mut rng);
        play_level(&mut g);
        g.extend(&mut rng);
        assert_eq!(g.playback_ms(&config), 2 * 600 + 500);
        assert_eq!(g.highlighted_at(0, &config), None);
        assert_eq!(g.highlighted_at(600, &config), Some(2));
        assert_eq!(g.highlighted_at(899, &config), Some(2));
        assert_eq!(g.highlighted_at(900, &config), None);
        assert_eq!(g.highlighted_at(1250, &config), Some(6));
        g.finish_playback();
        assert_eq!(g.highlighted_at(1250, &config), None);
    }
}
