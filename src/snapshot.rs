//! Everything the presentation layer needs to draw one frame.

use serde::Serialize;

use crate::error::Failure;
use crate::puzzles::lock::LockSnapshot;
use crate::puzzles::PuzzleSnapshot;
use crate::screen::Screen;
use crate::unlock::UnlockState;

/// One-off message for the player, shown over the current screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    Failure { failure: Failure, message: String },
    /// The browser's anagram solver output.
    SolverHint { text: String },
    Voicemail,
}

impl From<Failure> for Notice {
    fn from(failure: Failure) -> Self {
        Notice::Failure {
            failure,
            message: failure.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub unlock: UnlockState,
    pub lock: LockSnapshot,
    /// Error under the recovery question, if the last answer was wrong.
    pub recovery_error: Option<Failure>,
    pub puzzle: Option<PuzzleSnapshot>,
    pub countdown_remaining: u32,
    pub notice: Option<Notice>,
    /// The scrambled station name, while the decrypted note is open.
    pub revealed_clue: Option<String>,
    /// Bumped on every restart.
    pub generation: u64,
    pub tick: u64,
}

impl Snapshot {
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
