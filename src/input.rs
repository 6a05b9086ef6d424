//! Player intents and the line-oriented command form used by the driver.
//!
//! The presentation layer normally builds [`Intent`]s directly from taps.
//! [`Command::parse`] accepts the same vocabulary as text, one command per
//! line, e.g. `digit 0`, `open messages`, `mine 2 3`, `tick 10`.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::screen::{GalleryPhoto, NavAction, Note};

/// A discrete user action forwarded by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    PressDigit(u8),
    DeleteDigit,
    /// The "Forgot PIN?" link, once it is offered.
    ForgotPin,
    SubmitPassphrase(String),
    Navigate(NavAction),

    StartMemoryGame,
    PressMemoryButton(u8),

    SelectSudokuCell(usize, usize),
    EnterSudokuDigit(u8),
    ClearSudokuCell,
    CheckSudoku,

    PressMineCell(usize, usize),
    ToggleFlagMode,
    RestartMinesweeper,

    PressRiddleAnswer(u8),

    SubmitBrowserQuery(String),
    OpenSearchResult,
    CloseArticle,
    AskAnagramSolver,

    Restart,
}

/// A driver line: an intent, or a request to let time pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Tick(u64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: String,
        expected: &'static str,
    },
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };
        if word.is_empty() {
            return Err(CommandError::Empty);
        }
        let args: Vec<&str> = rest.split_whitespace().collect();
        let bad = |expected| CommandError::BadArgument {
            command: word.to_string(),
            expected,
        };

        let intent = match word {
            "tick" => {
                let n = match args.as_slice() {
                    [] => 1,
                    [n] => n.parse().map_err(|_| bad("a tick count"))?,
                    _ => return Err(bad("a tick count")),
                };
                return Ok(Command::Tick(n));
            }

            "digit" => Intent::PressDigit(one_number(&args, 9).ok_or_else(|| bad("a digit 0-9"))?),
            "del" | "delete" => Intent::DeleteDigit,
            "forgot" => Intent::ForgotPin,
            "passphrase" => Intent::SubmitPassphrase(rest.to_string()),

            "back" => Intent::Navigate(NavAction::Back),
            "open" => Intent::Navigate(NavAction::OpenApp(named(&args).ok_or_else(|| bad("an app name"))?)),
            "thread" => Intent::Navigate(NavAction::OpenThread(
                named(&args).ok_or_else(|| bad("mom, riya or unknown"))?,
            )),
            "call" => Intent::Navigate(NavAction::Call(
                named(&args).ok_or_else(|| bad("mom, riya or unknown"))?,
            )),
            "photo" => Intent::Navigate(NavAction::OpenPhoto(
                named::<GalleryPhoto>(&args).ok_or_else(|| bad("train_ticket or shadow"))?,
            )),
            "album" => Intent::Navigate(NavAction::OpenLockedAlbum),
            "note" => Intent::Navigate(NavAction::OpenNote(
                named::<Note>(&args).ok_or_else(|| bad("reminder or passwords"))?,
            )),
            "locked-note" => Intent::Navigate(NavAction::OpenLockedNote),

            "simon" => Intent::StartMemoryGame,
            "button" => Intent::PressMemoryButton(one_number(&args, 8).ok_or_else(|| bad("a button 0-8"))?),

            "cell" => {
                let (r, c) = two_numbers(&args).ok_or_else(|| bad("a row and a column"))?;
                Intent::SelectSudokuCell(r, c)
            }
            "sudoku" => Intent::EnterSudokuDigit(one_number(&args, 9).ok_or_else(|| bad("a digit"))?),
            "sudoku-clear" => Intent::ClearSudokuCell,
            "check" => Intent::CheckSudoku,

            "mine" => {
                let (r, c) = two_numbers(&args).ok_or_else(|| bad("a row and a column"))?;
                Intent::PressMineCell(r, c)
            }
            "flag" => Intent::ToggleFlagMode,
            "mine-restart" => Intent::RestartMinesweeper,

            "riddle" => Intent::PressRiddleAnswer(
                one_number(&args, 9)
                    .filter(|&n| n >= 1)
                    .ok_or_else(|| bad("a number 1-9"))?,
            ),

            "search" => Intent::SubmitBrowserQuery(rest.to_string()),
            "result" => Intent::OpenSearchResult,
            "close-article" => Intent::CloseArticle,
            "solver" => Intent::AskAnagramSolver,

            "restart" => Intent::Restart,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Command::Intent(intent))
    }
}

fn one_number(args: &[&str], max: u8) -> Option<u8> {
    match args {
        [n] => n.parse().ok().filter(|&n| n <= max),
        _ => None,
    }
}

fn two_numbers(args: &[&str]) -> Option<(usize, usize)> {
    match args {
        [a, b] => Some((a.parse().ok()?, b.parse().ok()?)),
        _ => None,
    }
}

/// Parse a snake_case name into one of the navigation enums.
fn named<T: DeserializeOwned>(args: &[&str]) -> Option<T> {
    match args {
        [name] => serde_json::from_value(serde_json::Value::String(name.to_lowercase())).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{App, Contact};

    fn intent(line: &str) -> Intent {
        match Command::parse(line) {
            Ok(Command::Intent(i)) => i,
            other => panic!("{:?} parsed as {:?}", line, other),
        }
    }

    #[test]
    fn parses_lock_commands() {
        assert_eq!(intent("digit 7"), Intent::PressDigit(7));
        assert_eq!(intent("del"), Intent::DeleteDigit);
        assert_eq!(intent("forgot"), Intent::ForgotPin);
        assert_eq!(
            intent("passphrase  mars 0909 "),
            Intent::SubmitPassphrase("mars 0909".into())
        );
    }

    #[test]
    fn parses_navigation() {
        assert_eq!(intent("open Messages"), Intent::Navigate(NavAction::OpenApp(App::Messages)));
        assert_eq!(
            intent("thread unknown"),
            Intent::Navigate(NavAction::OpenThread(Contact::Unknown))
        );
        assert_eq!(
            intent("photo train_ticket"),
            Intent::Navigate(NavAction::OpenPhoto(GalleryPhoto::TrainTicket))
        );
        assert_eq!(intent("call riya"), Intent::Navigate(NavAction::Call(Contact::Riya)));
        assert_eq!(intent("locked-note"), Intent::Navigate(NavAction::OpenLockedNote));
        assert_eq!(intent("back"), Intent::Navigate(NavAction::Back));
    }

    #[test]
    fn parses_puzzle_commands() {
        assert_eq!(intent("mine 2 3"), Intent::PressMineCell(2, 3));
        assert_eq!(intent("cell 0 1"), Intent::SelectSudokuCell(0, 1));
        assert_eq!(intent("button 8"), Intent::PressMemoryButton(8));
        assert_eq!(intent("riddle 3"), Intent::PressRiddleAnswer(3));
        assert_eq!(intent("search odl stcya"), Intent::SubmitBrowserQuery("odl stcya".into()));
    }

    #[test]
    fn tick_defaults_to_one() {
        assert_eq!(Command::parse("tick"), Ok(Command::Tick(1)));
        assert_eq!(Command::parse("tick 280"), Ok(Command::Tick(280)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(Command::parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert!(matches!(Command::parse("digit 12"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("open camera"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("mine 2"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("button 9"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("riddle 0"), Err(CommandError::BadArgument { .. })));
        assert!(matches!(Command::parse("riddle 10"), Err(CommandError::BadArgument { .. })));
    }
}
