//! Screen navigation.
//!
//! A static, total transition table: every `(Screen, NavAction)` pair
//! either names a target or is a no-op. Navigation has no side effects;
//! the session applies any flag changes first and then asks where to go.

use serde::{Deserialize, Serialize};

use crate::puzzles::PuzzleKind;
use crate::unlock::{PhotoId, UnlockState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Lock,
    ResetPassphrase,
    Home,
    MessagesApp,
    ConversationMom,
    ConversationRiya,
    ConversationUnknown,
    PhotosApp,
    PhotoView,
    NotesApp,
    NoteReminder,
    NotePasswords,
    /// The decrypted note; shows the scrambled station name.
    NoteUrgent,
    /// Hosts the memory game until contacts are restored.
    ContactsApp,
    SudokuPuzzle,
    MinesweeperPuzzle,
    /// Riddle gate in front of the unknown sender's thread.
    RiddlePuzzle,
    BrowserApp,
    EndScreenGood,
    EndScreenSecret,
    EndScreenTimeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum App {
    Messages,
    Photos,
    Notes,
    Contacts,
    Browser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contact {
    Mom,
    Riya,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Note {
    Reminder,
    Passwords,
}

/// Photos a player can pick from the gallery grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryPhoto {
    TrainTicket,
    Shadow,
}

impl From<GalleryPhoto> for PhotoId {
    fn from(p: GalleryPhoto) -> Self {
        match p {
            GalleryPhoto::TrainTicket => PhotoId::TrainTicket,
            GalleryPhoto::Shadow => PhotoId::Shadow,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Back,
    OpenApp(App),
    OpenThread(Contact),
    OpenPhoto(GalleryPhoto),
    OpenLockedAlbum,
    OpenNote(Note),
    OpenLockedNote,
    Call(Contact),
    ForgotPin,
    PinAccepted,
    PassphraseAccepted,
    PuzzleSolved(PuzzleKind),
    BatteryDepleted,
}

impl Screen {
    pub fn is_end(self) -> bool {
        matches!(
            self,
            Screen::EndScreenGood | Screen::EndScreenSecret | Screen::EndScreenTimeout
        )
    }

    /// Where `Back` leads, if anywhere.
    pub fn parent(self) -> Option<Screen> {
        match self {
            Screen::ResetPassphrase => Some(Screen::Lock),
            Screen::MessagesApp
            | Screen::PhotosApp
            | Screen::NotesApp
            | Screen::ContactsApp
            | Screen::BrowserApp => Some(Screen::Home),
            Screen::ConversationMom
            | Screen::ConversationRiya
            | Screen::ConversationUnknown
            | Screen::RiddlePuzzle => Some(Screen::MessagesApp),
            Screen::PhotoView | Screen::SudokuPuzzle => Some(Screen::PhotosApp),
            Screen::NoteReminder
            | Screen::NotePasswords
            | Screen::NoteUrgent
            | Screen::MinesweeperPuzzle => Some(Screen::NotesApp),
            Screen::Lock
            | Screen::Home
            | Screen::EndScreenGood
            | Screen::EndScreenSecret
            | Screen::EndScreenTimeout => None,
        }
    }

    /// The puzzle engine that runs while this screen is showing.
    pub fn hosted_puzzle(self, unlock: &UnlockState) -> Option<PuzzleKind> {
        match self {
            Screen::ContactsApp if !unlock.contacts_restored() => Some(PuzzleKind::Memory),
            Screen::SudokuPuzzle => Some(PuzzleKind::Sudoku),
            Screen::MinesweeperPuzzle => Some(PuzzleKind::Minesweeper),
            Screen::RiddlePuzzle => Some(PuzzleKind::Riddle),
            Screen::BrowserApp => Some(PuzzleKind::Browser),
            _ => None,
        }
    }
}

/// Next screen for `action` taken on `current`. Unknown pairs and targets
/// the unlock flags do not permit leave the screen unchanged.
pub fn navigate(current: Screen, action: NavAction, unlock: &UnlockState) -> Screen {
    let target = match (current, action) {
        (_, NavAction::BatteryDepleted) => Some(Screen::EndScreenTimeout),
        (_, NavAction::Back) => current.parent(),

        (Screen::Lock, NavAction::PinAccepted) => Some(Screen::Home),
        (Screen::Lock, NavAction::ForgotPin) => Some(Screen::ResetPassphrase),
        (Screen::ResetPassphrase, NavAction::PassphraseAccepted) => Some(Screen::Home),

        (Screen::Home, NavAction::OpenApp(app)) => Some(match app {
            App::Messages => Screen::MessagesApp,
            App::Photos => Screen::PhotosApp,
            App::Notes => Screen::NotesApp,
            App::Contacts => Screen::ContactsApp,
            App::Browser => Screen::BrowserApp,
        }),

        (Screen::MessagesApp, NavAction::OpenThread(contact)) => Some(match contact {
            Contact::Mom => Screen::ConversationMom,
            Contact::Riya => Screen::ConversationRiya,
            Contact::Unknown if unlock.unknown_message_recovered() => Screen::ConversationUnknown,
            Contact::Unknown => Screen::RiddlePuzzle,
        }),

        (Screen::PhotosApp, NavAction::OpenPhoto(_)) => Some(Screen::PhotoView),
        (Screen::PhotosApp, NavAction::OpenLockedAlbum) => Some(Screen::SudokuPuzzle),

        (Screen::NotesApp, NavAction::OpenNote(Note::Reminder)) => Some(Screen::NoteReminder),
        (Screen::NotesApp, NavAction::OpenNote(Note::Passwords)) => Some(Screen::NotePasswords),
        (Screen::NotesApp, NavAction::OpenLockedNote) => Some(Screen::MinesweeperPuzzle),

        (Screen::ContactsApp, NavAction::Call(Contact::Riya)) => Some(Screen::EndScreenGood),
        (Screen::ContactsApp, NavAction::Call(Contact::Unknown)) => Some(Screen::EndScreenSecret),

        (Screen::SudokuPuzzle, NavAction::PuzzleSolved(PuzzleKind::Sudoku)) => {
            Some(Screen::PhotoView)
        }
        (Screen::MinesweeperPuzzle, NavAction::PuzzleSolved(PuzzleKind::Minesweeper)) => {
            Some(Screen::NoteUrgent)
        }
        (Screen::RiddlePuzzle, NavAction::PuzzleSolved(PuzzleKind::Riddle)) => {
            Some(Screen::ConversationUnknown)
        }

        _ => None,
    };

    match target {
        Some(next) if unlock.permits(next) => next,
        _ => current,
    }
}
