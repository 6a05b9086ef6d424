//! Puzzle engines and the closed set of puzzles a screen can host.

pub mod browser;
pub mod lock;
pub mod memory;
pub mod minesweeper;
pub mod riddle;
pub mod sudoku;

use serde::Serialize;

use crate::config::GameConfig;
use crate::rng::RandomSource;

use browser::{AnagramMatcher, BrowserSnapshot};
use memory::{MemoryGame, MemorySnapshot};
use minesweeper::{MineField, MinesweeperSnapshot};
use riddle::{RiddleGame, RiddleSnapshot};
use sudoku::{SudokuBoard, SudokuSnapshot};

/// The puzzles hosted on in-phone screens. The PIN lock lives on the
/// session itself since it outlives every visit to the lock screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    Memory,
    Sudoku,
    Minesweeper,
    Riddle,
    Browser,
}

/// Engine state for the puzzle on screen.
#[derive(Clone, Debug)]
pub enum PuzzleState {
    Memory(MemoryGame),
    Sudoku(SudokuBoard),
    Minesweeper(MineField),
    Riddle(RiddleGame),
    Browser(AnagramMatcher),
}

/// A live engine and its identity. A new identity is handed out every
/// time a puzzle screen is entered, so deferred events aimed at an older
/// visit can be told apart.
#[derive(Clone, Debug)]
pub struct ActivePuzzle {
    pub id: u64,
    pub state: PuzzleState,
    /// Tick at which the current memory playback started.
    pub playback_started: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PuzzleSnapshot {
    Memory(MemorySnapshot),
    Sudoku(SudokuSnapshot),
    Minesweeper(MinesweeperSnapshot),
    Riddle(RiddleSnapshot),
    Browser(BrowserSnapshot),
}

impl ActivePuzzle {
    pub fn create(
        kind: PuzzleKind,
        id: u64,
        config: &GameConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let state = match kind {
            PuzzleKind::Memory => PuzzleState::Memory(MemoryGame::new(config.memory.winning_level)),
            PuzzleKind::Sudoku => PuzzleState::Sudoku(SudokuBoard::new()),
            PuzzleKind::Minesweeper => {
                PuzzleState::Minesweeper(MineField::new(&config.minesweeper.mines))
            }
            PuzzleKind::Riddle => PuzzleState::Riddle(RiddleGame::new(rng)),
            PuzzleKind::Browser => PuzzleState::Browser(AnagramMatcher::new(&config.browser)),
        };
        Self {
            id,
            state,
            playback_started: None,
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        match self.state {
            PuzzleState::Memory(_) => PuzzleKind::Memory,
            PuzzleState::Sudoku(_) => PuzzleKind::Sudoku,
            PuzzleState::Minesweeper(_) => PuzzleKind::Minesweeper,
            PuzzleState::Riddle(_) => PuzzleKind::Riddle,
            PuzzleState::Browser(_) => PuzzleKind::Browser,
        }
    }

    /// `now` and the tick length locate the memory playback cursor.
    pub fn snapshot(&self, now: u64, config: &GameConfig) -> PuzzleSnapshot {
        match &self.state {
            PuzzleState::Memory(game) => {
                let highlighted = self.playback_started.and_then(|start| {
                    let elapsed_ms = (now.saturating_sub(start) as f64
                        * config.clock.ms_per_tick()) as u64;
                    game.highlighted_at(elapsed_ms, &config.memory)
                });
                PuzzleSnapshot::Memory(game.snapshot(highlighted))
            }
            PuzzleState::Sudoku(board) => PuzzleSnapshot::Sudoku(board.snapshot()),
            PuzzleState::Minesweeper(field) => PuzzleSnapshot::Minesweeper(field.snapshot()),
            PuzzleState::Riddle(game) => PuzzleSnapshot::Riddle(game.snapshot()),
            PuzzleState::Browser(matcher) => PuzzleSnapshot::Browser(matcher.snapshot()),
        }
    }
}
