//! Narrative progress flags and the rules that tie them to screens.

use serde::Serialize;

use crate::screen::Screen;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneLock {
    #[default]
    Locked,
    Unlocked,
    /// The player gave up on the PIN and is answering the recovery question.
    AwaitingReset,
}

/// Photos the gallery can open full-screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoId {
    TrainTicket,
    Shadow,
    /// Recovered from the locked album by solving the Sudoku.
    StationMap,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UnlockState {
    pub phone: PhoneLock,
    contacts_restored: bool,
    unknown_message_recovered: bool,
    pub selected_photo: Option<PhotoId>,
}

impl UnlockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts_restored(&self) -> bool {
        self.contacts_restored
    }

    pub fn unknown_message_recovered(&self) -> bool {
        self.unknown_message_recovered
    }

    /// One-way. Only a session restart clears it.
    pub fn restore_contacts(&mut self) {
        self.contacts_restored = true;
    }

    /// One-way. Only a session restart clears it.
    pub fn recover_unknown_message(&mut self) {
        self.unknown_message_recovered = true;
    }

    pub fn is_unlocked(&self) -> bool {
        self.phone == PhoneLock::Unlocked
    }

    /// Whether the flags allow `screen` to be shown at all.
    pub fn permits(&self, screen: Screen) -> bool {
        match screen {
            Screen::Lock | Screen::EndScreenTimeout => true,
            Screen::ResetPassphrase => self.phone == PhoneLock::AwaitingReset,
            Screen::ConversationUnknown => self.is_unlocked() && self.unknown_message_recovered,
            Screen::EndScreenGood | Screen::EndScreenSecret => {
                self.is_unlocked() && self.contacts_restored
            }
            _ => self.is_unlocked(),
        }
    }
}
