//! Game configuration.
//!
//! Every constant the game runs on lives here so a build can be re-tuned
//! without touching engine code. `GameConfig::default()` is the shipped
//! game. Sections use `#[serde(default)]`, so a JSON file only needs the
//! keys it overrides:
//!
//! ```json
//! { "lock": { "pin": "1234" }, "battery": { "start_charge": 30 } }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::puzzles::minesweeper::GRID_SIZE;
use crate::puzzles::memory::BUTTON_COUNT;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub lock: LockConfig,
    pub memory: MemoryConfig,
    pub riddle: RiddleConfig,
    pub browser: BrowserConfig,
    pub minesweeper: MinesweeperConfig,
    pub battery: BatteryConfig,
    pub clock: ClockConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub pin: String,
    pub recovery_passphrase: String,
    /// Consecutive wrong PINs before "Forgot PIN?" is offered.
    pub attempts_before_reset: u32,
    /// How long a wrong PIN stays on screen before the entry clears.
    pub error_clear_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            pin: "0925".into(),
            recovery_passphrase: "MARS0909".into(),
            attempts_before_reset: 3,
            error_clear_ms: 800,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub winning_level: u32,
    /// Spacing between highlighted steps during playback.
    pub step_ms: u64,
    /// How long each step stays lit.
    pub highlight_ms: u64,
    /// Pause after the last step before input opens.
    pub tail_ms: u64,
    pub next_level_delay_ms: u64,
    pub failure_reset_ms: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            winning_level: 5,
            step_ms: 600,
            highlight_ms: 300,
            tail_ms: 500,
            next_level_delay_ms: 1000,
            failure_reset_ms: 1500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiddleConfig {
    pub reshuffle_delay_ms: u64,
    pub solved_delay_ms: u64,
}

impl Default for RiddleConfig {
    fn default() -> Self {
        Self {
            reshuffle_delay_ms: 800,
            solved_delay_ms: 1500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub clue: String,
    /// What the in-fiction anagram solver reveals.
    pub solution: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            clue: "ODL STCYA TSATOIN".into(),
            solution: "OLD STACY STATION".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinesweeperConfig {
    /// Mine coordinates as `(row, col)`.
    pub mines: Vec<(usize, usize)>,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            mines: vec![(0, 2), (1, 4), (3, 1), (4, 3)],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    pub start_charge: u32,
    /// Real time per charge unit.
    pub drain_interval_ms: u64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            start_charge: 15,
            drain_interval_ms: 28_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub ticks_per_sec: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { ticks_per_sec: 10 }
    }
}

impl ClockConfig {
    /// Convert a duration to whole ticks, rounding up so a delay never fires early.
    pub fn ms_to_ticks(&self, ms: u64) -> u64 {
        let per_sec = u64::from(self.ticks_per_sec.max(1));
        (ms * per_sec).div_ceil(1000)
    }

    pub fn ms_per_tick(&self) -> f64 {
        1000.0 / f64::from(self.ticks_per_sec.max(1))
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lock.pin.len() != 4 || !self.lock.pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidPin);
        }
        if self.lock.recovery_passphrase.trim().is_empty() {
            return Err(ConfigError::BlankPassphrase);
        }
        if self.lock.attempts_before_reset == 0 {
            return Err(ConfigError::Zero { field: "lock.attempts_before_reset" });
        }

        let max = BUTTON_COUNT as u32;
        if self.memory.winning_level == 0 || self.memory.winning_level > max {
            return Err(ConfigError::WinningLevel {
                got: self.memory.winning_level,
                max,
            });
        }
        if self.memory.step_ms == 0 {
            return Err(ConfigError::Zero { field: "memory.step_ms" });
        }

        if self.browser.clue.chars().all(char::is_whitespace) {
            return Err(ConfigError::BlankClue);
        }

        let mut seen = HashSet::new();
        for &(row, col) in &self.minesweeper.mines {
            if row >= GRID_SIZE || col >= GRID_SIZE {
                return Err(ConfigError::MineOutOfBounds { row, col, size: GRID_SIZE });
            }
            if !seen.insert((row, col)) {
                return Err(ConfigError::DuplicateMine { row, col });
            }
        }
        if seen.len() >= GRID_SIZE * GRID_SIZE {
            return Err(ConfigError::NoSafeCells);
        }

        if self.battery.start_charge == 0 {
            return Err(ConfigError::Zero { field: "battery.start_charge" });
        }
        if self.battery.drain_interval_ms == 0 {
            return Err(ConfigError::Zero { field: "battery.drain_interval_ms" });
        }
        if self.clock.ticks_per_sec == 0 {
            return Err(ConfigError::Zero { field: "clock.ticks_per_sec" });
        }
        Ok(())
    }
}
