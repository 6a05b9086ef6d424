//! Lock screen: PIN pad plus the "Forgot PIN?" recovery question.
//!
//! The PIN compares exactly. The recovery passphrase is trimmed and
//! uppercased before comparison. Wrong PINs count toward the threshold
//! that offers recovery; the count survives a successful unlock and is
//! only cleared by a session restart.

use serde::Serialize;

use crate::config::LockConfig;
use crate::error::Failure;

pub const PIN_LENGTH: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinOutcome {
    /// Digit ignored: entry full or waiting for an error to clear.
    Ignored,
    /// Digit accepted, fewer than four entered.
    Pending,
    Accepted,
    /// Fourth digit completed a wrong PIN. The entry stays visible until
    /// [`PassphraseLock::clear_error`] runs.
    Rejected,
}

#[derive(Clone, Debug)]
pub struct PassphraseLock {
    pin: String,
    recovery_passphrase: String,
    attempts_before_reset: u32,
    entry: String,
    failed_attempts: u32,
    error: Option<Failure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LockSnapshot {
    pub entered_digits: usize,
    pub failed_attempts: u32,
    pub reset_offered: bool,
    pub error: Option<Failure>,
}

impl PassphraseLock {
    pub fn new(config: &LockConfig) -> Self {
        Self {
            pin: config.pin.clone(),
            recovery_passphrase: config.recovery_passphrase.trim().to_uppercase(),
            attempts_before_reset: config.attempts_before_reset,
            entry: String::with_capacity(PIN_LENGTH),
            failed_attempts: 0,
            error: None,
        }
    }

    /// Exact comparison against the PIN. A miss counts as a failed attempt.
    pub fn check_pin(&mut self, candidate: &str) -> bool {
        if candidate == self.pin {
            return true;
        }
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        false
    }

    /// Recovery answer check: case-insensitive, surrounding whitespace ignored.
    /// No lockout on this path.
    pub fn check_recovery_passphrase(&self, candidate: &str) -> bool {
        candidate.trim().to_uppercase() == self.recovery_passphrase
    }

    pub fn press_digit(&mut self, digit: u8) -> PinOutcome {
        if digit > 9 || self.error.is_some() || self.entry.len() >= PIN_LENGTH {
            return PinOutcome::Ignored;
        }
        self.entry.push(char::from(b'0' + digit));
        if self.entry.len() < PIN_LENGTH {
            return PinOutcome::Pending;
        }
        let candidate = self.entry.clone();
        if self.check_pin(&candidate) {
            self.entry.clear();
            PinOutcome::Accepted
        } else {
            self.error = Some(Failure::WrongPin);
            PinOutcome::Rejected
        }
    }

    pub fn delete_digit(&mut self) {
        if self.error.is_none() {
            self.entry.pop();
        }
    }

    /// Drop the wrong entry and its error message.
    pub fn clear_error(&mut self) {
        self.entry.clear();
        self.error = None;
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// "Forgot PIN?" becomes available after enough consecutive misses.
    pub fn reset_offered(&self) -> bool {
        self.failed_attempts >= self.attempts_before_reset
    }

    pub fn snapshot(&self) -> LockSnapshot {
        LockSnapshot {
            entered_digits: self.entry.len(),
            failed_attempts: self.failed_attempts,
            reset_offered: self.reset_offered(),
            error: self.error,
        }
    }
}
