//! Core of a locked-phone mystery game.
//!
//! A lock screen gates an in-fiction phone whose apps hide five small
//! puzzles. The core owns every piece of game state: which screen is
//! showing, the narrative unlock flags, each puzzle's board, and the
//! battery countdown. A presentation layer feeds it [`input::Intent`]s and
//! re-renders from the [`snapshot::Snapshot`] returned after each one.

pub mod config;
pub mod countdown;
pub mod error;
pub mod input;
pub mod logutil;
pub mod puzzles;
pub mod rng;
pub mod scheduler;
pub mod screen;
pub mod session;
pub mod snapshot;
pub mod time;
pub mod unlock;

pub use config::GameConfig;
pub use error::{ConfigError, Failure};
pub use input::Intent;
pub use screen::{NavAction, Screen};
pub use session::Session;
pub use snapshot::Snapshot;
pub use unlock::{PhoneLock, UnlockState};
