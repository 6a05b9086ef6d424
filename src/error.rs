//! Error and failure types.
//!
//! [`Failure`] is not a fault: it is the typed result of a puzzle attempt
//! that did not work out, carried to the player through the snapshot.
//! [`ConfigError`] is the only real error the core can produce.

use serde::Serialize;
use thiserror::Error;

/// A player-facing puzzle failure. The `Display` text is what the phone shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Failure {
    #[error("Incorrect PIN")]
    WrongPin,
    #[error("Incorrect. Please try again.")]
    WrongPassphrase,
    /// Riddle answered out of order.
    #[error("Wrong answer. Starting over...")]
    WrongAnswer,
    /// Memory game input diverged from the shown pattern.
    #[error("Data corrupted. Resetting...")]
    SequenceBroken,
    #[error("The file was corrupted. Restarting decryption...")]
    MineHit,
    #[error("The solution is not valid. Please check your numbers.")]
    InvalidSolution,
    #[error("No results found for your query.")]
    NoResults,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pin must be exactly 4 ASCII digits")]
    InvalidPin,

    #[error("recovery passphrase must not be blank")]
    BlankPassphrase,

    #[error("anagram clue must contain at least one non-space character")]
    BlankClue,

    #[error("winning level must be between 1 and {max}, got {got}")]
    WinningLevel { got: u32, max: u32 },

    #[error("mine at ({row}, {col}) is outside the {size}x{size} board")]
    MineOutOfBounds { row: usize, col: usize, size: usize },

    #[error("mine at ({row}, {col}) is listed twice")]
    DuplicateMine { row: usize, col: usize },

    #[error("mine layout must leave at least one safe cell")]
    NoSafeCells,

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_are_player_facing() {
        assert_eq!(Failure::WrongPin.to_string(), "Incorrect PIN");
        assert_eq!(
            Failure::NoResults.to_string(),
            "No results found for your query."
        );
    }

    #[test]
    fn failure_serializes_snake_case() {
        let json = serde_json::to_string(&Failure::MineHit).unwrap();
        assert_eq!(json, "\"mine_hit\"");
    }

    #[test]
    fn config_error_formats_fields() {
        let err = ConfigError::MineOutOfBounds { row: 7, col: 1, size: 5 };
        assert_eq!(err.to_string(), "mine at (7, 1) is outside the 5x5 board");
    }
}
