//! The session: one playthrough of the phone, from lock screen to an ending.
//!
//! Owns the current screen, the unlock flags, the PIN lock, whichever
//! puzzle engine the screen hosts, and the battery countdown. Intents are
//! applied synchronously through [`Session::handle`]; time moves only
//! through [`Session::tick`], which drains the battery and fires deferred
//! puzzle follow-ups.

use log::{debug, info, warn};

use crate::config::GameConfig;
use crate::countdown::{Countdown, Drain};
use crate::error::Failure;
use crate::input::Intent;
use crate::logutil::escape_log;
use crate::puzzles::browser::{AnagramMatcher, SearchOutcome};
use crate::puzzles::lock::{PassphraseLock, PinOutcome};
use crate::puzzles::memory::{MemoryGame, MemoryOutcome, MemoryStatus};
use crate::puzzles::minesweeper::{MineField, PressOutcome};
use crate::puzzles::riddle::RiddleOutcome;
use crate::puzzles::sudoku::{SudokuBoard, SudokuVerdict};
use crate::puzzles::{ActivePuzzle, PuzzleKind, PuzzleState};
use crate::rng::{RandomSource, SeededRandom};
use crate::scheduler::{Deferred, Scheduler, Ticket};
use crate::screen::{navigate, Contact, NavAction, Screen};
use crate::snapshot::{Notice, Snapshot};
use crate::time::GameTime;
use crate::unlock::{PhoneLock, PhotoId, UnlockState};

/// Follow-ups that fire a fixed delay after the intent that caused them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredEvent {
    ClearPinError,
    MemoryInputOpens,
    MemoryNextLevel,
    MemoryReset,
    RiddleReshuffle,
    RiddleSolved,
}

pub struct Session {
    config: GameConfig,
    screen: Screen,
    unlock: UnlockState,
    lock: PassphraseLock,
    recovery_error: Option<Failure>,
    puzzle: Option<ActivePuzzle>,
    countdown: Countdown,
    scheduler: Scheduler<DeferredEvent>,
    clock: GameTime,
    now: u64,
    generation: u64,
    next_engine_id: u64,
    notice: Option<Notice>,
    rng: Box<dyn RandomSource>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self::with_random(config, Box::new(SeededRandom::from_entropy()))
    }

    pub fn with_random(config: GameConfig, rng: Box<dyn RandomSource>) -> Self {
        Self {
            screen: Screen::Lock,
            unlock: UnlockState::new(),
            lock: PassphraseLock::new(&config.lock),
            recovery_error: None,
            puzzle: None,
            countdown: Countdown::new(&config.battery, &config.clock),
            scheduler: Scheduler::new(),
            clock: GameTime::new(&config.clock),
            now: 0,
            generation: 0,
            next_engine_id: 0,
            notice: None,
            rng,
            config,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn unlock(&self) -> &UnlockState {
        &self.unlock
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_puzzle(&self) -> Option<&ActivePuzzle> {
        self.puzzle.as_ref()
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    /// Apply one intent and return the resulting state.
    pub fn handle(&mut self, intent: Intent) -> Snapshot {
        self.notice = None;
        if intent == Intent::Restart {
            self.restart();
        } else if self.screen == Screen::EndScreenTimeout {
            debug!("ignoring {:?}: battery is dead", intent);
        } else if !self.apply(&intent) {
            debug!("ignoring {:?} on {:?}", intent, self.screen);
        }
        self.snapshot()
    }

    /// Advance game time by `ticks`, one tick at a time, so deferred
    /// events and battery drain interleave in order.
    pub fn tick(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.now += 1;
            while let Some(deferred) = self.scheduler.pop_due(self.now) {
                self.fire(deferred);
            }
            if self.countdown.advance(1) == Drain::Depleted {
                self.time_out();
            }
        }
    }

    /// Feed a wall-clock timestamp from the host and run the ticks it covers.
    pub fn update(&mut self, now_ms: f64) {
        let ticks = self.clock.update(now_ms);
        self.tick(ticks);
    }

    /// Feed a timestamp and run every tick since the last one, however long
    /// the gap. Used by hosts that only report time when input arrives.
    pub fn catch_up(&mut self, now_ms: f64) {
        let ticks = self.clock.catch_up(now_ms);
        self.tick(ticks);
    }

    /// Back to the lock screen with every flag, puzzle, and the battery
    /// reset. Pending follow-ups stay queued but can no longer match.
    pub fn restart(&mut self) {
        self.generation += 1;
        info!("restart: generation {}", self.generation);
        self.screen = Screen::Lock;
        self.unlock = UnlockState::new();
        self.lock = PassphraseLock::new(&self.config.lock);
        self.recovery_error = None;
        self.puzzle = None;
        self.countdown.reset();
        self.notice = None;
        self.clock.resync();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen: self.screen,
            unlock: self.unlock.clone(),
            lock: self.lock.snapshot(),
            recovery_error: self.recovery_error,
            puzzle: self
                .puzzle
                .as_ref()
                .map(|p| p.snapshot(self.now, &self.config)),
            countdown_remaining: self.countdown.remaining(),
            notice: self.notice.clone(),
            revealed_clue: (self.screen == Screen::NoteUrgent)
                .then(|| self.config.browser.clue.clone()),
            generation: self.generation,
            tick: self.now,
        }
    }

    fn apply(&mut self, intent: &Intent) -> bool {
        match intent {
            Intent::PressDigit(d) => self.press_digit(*d),
            Intent::DeleteDigit if self.screen == Screen::Lock => {
                self.lock.delete_digit();
                true
            }
            Intent::ForgotPin if self.screen == Screen::Lock && self.lock.reset_offered() => {
                self.unlock.phone = PhoneLock::AwaitingReset;
                self.go(NavAction::ForgotPin)
            }
            Intent::SubmitPassphrase(text) => self.submit_passphrase(text),
            Intent::Navigate(action) => self.navigate_by_player(*action),

            Intent::StartMemoryGame => self.start_memory(),
            Intent::PressMemoryButton(b) => self.press_memory(*b),

            Intent::SelectSudokuCell(r, c) => self.with_sudoku(|b| b.select_cell(*r, *c)),
            Intent::EnterSudokuDigit(d) => self.with_sudoku(|b| b.enter_digit(*d)),
            Intent::ClearSudokuCell => self.with_sudoku(|b| b.delete_digit()),
            Intent::CheckSudoku => self.check_sudoku(),

            Intent::PressMineCell(r, c) => self.press_mine(*r, *c),
            Intent::ToggleFlagMode => self.with_minefield(|f| {
                f.toggle_flag_mode();
                true
            }),
            Intent::RestartMinesweeper => self.with_minefield(|f| {
                f.restart();
                true
            }),

            Intent::PressRiddleAnswer(n) => self.press_riddle(*n),

            Intent::SubmitBrowserQuery(query) => self.search(query),
            Intent::OpenSearchResult => self.with_browser(|m| m.open_article()),
            Intent::CloseArticle => self.with_browser(|m| m.close_article()),
            Intent::AskAnagramSolver => self.ask_solver(),

            _ => false,
        }
    }

    // Navigation

    fn navigate_by_player(&mut self, action: NavAction) -> bool {
        match action {
            // Only the session itself reports these.
            NavAction::ForgotPin
            | NavAction::PinAccepted
            | NavAction::PassphraseAccepted
            | NavAction::PuzzleSolved(_)
            | NavAction::BatteryDepleted => false,
            NavAction::Call(Contact::Mom)
                if self.screen == Screen::ContactsApp && self.unlock.contacts_restored() =>
            {
                self.notice = Some(Notice::Voicemail);
                true
            }
            NavAction::OpenPhoto(photo) => {
                let moved = self.go(action);
                if moved {
                    self.unlock.selected_photo = Some(photo.into());
                }
                moved
            }
            _ => self.go(action),
        }
    }

    /// Run `action` through the transition table. Returns whether the
    /// screen changed.
    fn go(&mut self, action: NavAction) -> bool {
        let next = navigate(self.screen, action, &self.unlock);
        if next == self.screen {
            return false;
        }
        info!("screen {:?} -> {:?} ({:?})", self.screen, next, action);
        self.screen = next;
        if next == Screen::Lock && self.unlock.phone == PhoneLock::AwaitingReset {
            self.unlock.phone = PhoneLock::Locked;
            self.recovery_error = None;
        }
        self.sync_puzzle();
        true
    }

    /// Make the live engine match what the screen hosts. Entering a puzzle
    /// screen always builds a fresh engine; leaving it drops the old one.
    fn sync_puzzle(&mut self) {
        let wanted = self.screen.hosted_puzzle(&self.unlock);
        if self.puzzle.as_ref().map(ActivePuzzle::kind) == wanted {
            return;
        }
        self.puzzle = match wanted {
            Some(kind) => {
                self.next_engine_id += 1;
                debug!("new {:?} engine #{}", kind, self.next_engine_id);
                Some(ActivePuzzle::create(
                    kind,
                    self.next_engine_id,
                    &self.config,
                    self.rng.as_mut(),
                ))
            }
            None => None,
        };
    }

    fn time_out(&mut self) {
        warn!("battery depleted on {:?}", self.screen);
        self.go(NavAction::BatteryDepleted);
    }

    // Deferred events

    fn defer(&mut self, delay_ms: u64, engine: Option<u64>, event: DeferredEvent) {
        let due = self.now + self.config.clock.ms_to_ticks(delay_ms);
        let ticket = Ticket {
            session: self.generation,
            engine,
        };
        self.scheduler.schedule(due, ticket, event);
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        if ticket.session != self.generation {
            return false;
        }
        match ticket.engine {
            Some(id) => self.puzzle.as_ref().is_some_and(|p| p.id == id),
            None => true,
        }
    }

    fn fire(&mut self, deferred: Deferred<DeferredEvent>) {
        if !self.is_current(deferred.ticket) {
            debug!(
                "dropping stale {:?} (ticket {:?}, generation {})",
                deferred.event, deferred.ticket, self.generation
            );
            return;
        }
        match deferred.event {
            DeferredEvent::ClearPinError => self.lock.clear_error(),
            DeferredEvent::MemoryInputOpens => {
                if let Some(puzzle) = self.puzzle.as_mut() {
                    if let PuzzleState::Memory(game) = &mut puzzle.state {
                        game.finish_playback();
                        puzzle.playback_started = None;
                    }
                }
            }
            DeferredEvent::MemoryNextLevel => {
                self.with_memory(|game, rng| game.extend(rng));
                self.begin_playback();
            }
            DeferredEvent::MemoryReset => {
                if let Some(puzzle) = self.puzzle.as_mut() {
                    if let PuzzleState::Memory(game) = &mut puzzle.state {
                        game.reset();
                        puzzle.playback_started = None;
                    }
                }
            }
            DeferredEvent::RiddleReshuffle => {
                if let Some(PuzzleState::Riddle(game)) = self.puzzle.as_mut().map(|p| &mut p.state) {
                    game.reshuffle(self.rng.as_mut());
                }
            }
            DeferredEvent::RiddleSolved => {
                self.unlock.recover_unknown_message();
                info!("unknown sender's message recovered");
                self.go(NavAction::PuzzleSolved(PuzzleKind::Riddle));
            }
        }
    }

    // Lock screen

    fn press_digit(&mut self, digit: u8) -> bool {
        if self.screen != Screen::Lock {
            return false;
        }
        match self.lock.press_digit(digit) {
            PinOutcome::Ignored => false,
            PinOutcome::Pending => true,
            PinOutcome::Accepted => {
                info!("pin accepted");
                self.unlock.phone = PhoneLock::Unlocked;
                self.go(NavAction::PinAccepted)
            }
            PinOutcome::Rejected => {
                info!("wrong pin, {} failed attempts", self.lock.failed_attempts());
                self.notice = Some(Failure::WrongPin.into());
                self.defer(self.config.lock.error_clear_ms, None, DeferredEvent::ClearPinError);
                true
            }
        }
    }

    fn submit_passphrase(&mut self, text: &str) -> bool {
        if self.screen != Screen::ResetPassphrase {
            return false;
        }
        if self.lock.check_recovery_passphrase(text) {
            info!("recovery passphrase accepted");
            self.recovery_error = None;
            self.unlock.phone = PhoneLock::Unlocked;
            return self.go(NavAction::PassphraseAccepted);
        }
        debug!("wrong recovery passphrase ({} chars)", text.chars().count());
        self.recovery_error = Some(Failure::WrongPassphrase);
        self.notice = Some(Failure::WrongPassphrase.into());
        true
    }

    // Memory game

    fn with_memory<R>(
        &mut self,
        f: impl FnOnce(&mut MemoryGame, &mut dyn RandomSource) -> R,
    ) -> Option<R> {
        match self.puzzle.as_mut().map(|p| &mut p.state) {
            Some(PuzzleState::Memory(game)) => Some(f(game, self.rng.as_mut())),
            _ => None,
        }
    }

    /// Stamp the playback start and schedule the pad to open once the
    /// whole sequence has been shown.
    fn begin_playback(&mut self) {
        let now = self.now;
        let Some(puzzle) = self.puzzle.as_mut() else {
            return;
        };
        let PuzzleState::Memory(game) = &puzzle.state else {
            return;
        };
        if game.status() != MemoryStatus::Showing {
            return;
        }
        let playback_ms = game.playback_ms(&self.config.memory);
        puzzle.playback_started = Some(now);
        let id = puzzle.id;
        self.defer(playback_ms, Some(id), DeferredEvent::MemoryInputOpens);
    }

    fn start_memory(&mut self) -> bool {
        if self.with_memory(|game, rng| game.start(rng)) != Some(true) {
            return false;
        }
        info!("memory game started");
        self.begin_playback();
        true
    }

    fn press_memory(&mut self, button: u8) -> bool {
        let Some(puzzle) = self.puzzle.as_mut() else {
            return false;
        };
        let id = puzzle.id;
        let PuzzleState::Memory(game) = &mut puzzle.state else {
            return false;
        };
        let level = game.level();
        match game.press(button) {
            MemoryOutcome::Ignored => false,
            MemoryOutcome::Progress => true,
            MemoryOutcome::LevelCleared => {
                info!("memory level {} cleared", level);
                self.defer(
                    self.config.memory.next_level_delay_ms,
                    Some(id),
                    DeferredEvent::MemoryNextLevel,
                );
                true
            }
            MemoryOutcome::Failed => {
                info!("memory sequence broken at level {}", level);
                self.notice = Some(Failure::SequenceBroken.into());
                self.defer(
                    self.config.memory.failure_reset_ms,
                    Some(id),
                    DeferredEvent::MemoryReset,
                );
                true
            }
            MemoryOutcome::Won => {
                info!("contacts restored");
                self.unlock.restore_contacts();
                self.sync_puzzle();
                true
            }
        }
    }

    // Sudoku

    fn with_sudoku(&mut self, f: impl FnOnce(&mut SudokuBoard) -> bool) -> bool {
        match self.puzzle.as_mut().map(|p| &mut p.state) {
            Some(PuzzleState::Sudoku(board)) => f(board),
            _ => false,
        }
    }

    fn check_sudoku(&mut self) -> bool {
        let verdict = match self.puzzle.as_ref().map(|p| &p.state) {
            Some(PuzzleState::Sudoku(board)) if board.is_complete() => board.check_solution(),
            _ => return false,
        };
        match verdict {
            SudokuVerdict::Solved => {
                info!("sudoku solved, map recovered");
                self.unlock.selected_photo = Some(PhotoId::StationMap);
                self.go(NavAction::PuzzleSolved(PuzzleKind::Sudoku))
            }
            SudokuVerdict::InvalidSolution => {
                self.notice = Some(Failure::InvalidSolution.into());
                true
            }
        }
    }

    // Minesweeper

    fn with_minefield(
        &mut self,
        f: impl FnOnce(&mut MineField) -> bool,
    ) -> bool {
        match self.puzzle.as_mut().map(|p| &mut p.state) {
            Some(PuzzleState::Minesweeper(field)) => f(field),
            _ => false,
        }
    }

    fn press_mine(&mut self, row: usize, col: usize) -> bool {
        let outcome = match self.puzzle.as_mut().map(|p| &mut p.state) {
            Some(PuzzleState::Minesweeper(field)) => field.press(row, col),
            _ => return false,
        };
        match outcome {
            PressOutcome::Ignored => false,
            PressOutcome::FlagToggled | PressOutcome::Revealed(_) => true,
            PressOutcome::MineHit => {
                info!("mine hit at ({}, {})", row, col);
                self.notice = Some(Failure::MineHit.into());
                true
            }
            PressOutcome::Won => {
                info!("minesweeper cleared, note decrypted");
                self.go(NavAction::PuzzleSolved(PuzzleKind::Minesweeper))
            }
        }
    }

    // Riddles

    fn press_riddle(&mut self, number: u8) -> bool {
        let Some(puzzle) = self.puzzle.as_mut() else {
            return false;
        };
        let id = puzzle.id;
        let PuzzleState::Riddle(game) = &mut puzzle.state else {
            return false;
        };
        match game.press(number) {
            RiddleOutcome::Ignored => false,
            RiddleOutcome::Correct { answered } => {
                debug!("riddle {} answered", answered);
                true
            }
            RiddleOutcome::WrongAnswer => {
                self.notice = Some(Failure::WrongAnswer.into());
                self.defer(
                    self.config.riddle.reshuffle_delay_ms,
                    Some(id),
                    DeferredEvent::RiddleReshuffle,
                );
                true
            }
            RiddleOutcome::Completed => {
                info!("all riddles answered");
                self.defer(
                    self.config.riddle.solved_delay_ms,
                    Some(id),
                    DeferredEvent::RiddleSolved,
                );
                true
            }
        }
    }

    // Browser

    fn with_browser(
        &mut self,
        f: impl FnOnce(&mut AnagramMatcher) -> bool,
    ) -> bool {
        match self.puzzle.as_mut().map(|p| &mut p.state) {
            Some(PuzzleState::Browser(matcher)) => f(matcher),
            _ => false,
        }
    }

    fn search(&mut self, query: &str) -> bool {
        let outcome = match self.puzzle.as_mut().map(|p| &mut p.state) {
            Some(PuzzleState::Browser(matcher)) => matcher.search(query),
            _ => return false,
        };
        info!("search \"{}\": {:?}", escape_log(query), outcome);
        if outcome == SearchOutcome::NotFound {
            self.notice = Some(Failure::NoResults.into());
        }
        true
    }

    fn ask_solver(&mut self) -> bool {
        let hint = match self.puzzle.as_ref().map(|p| &p.state) {
            Some(PuzzleState::Browser(matcher)) => matcher.solver_hint().map(str::to_string),
            _ => None,
        };
        match hint {
            Some(text) => {
                self.notice = Some(Notice::SolverHint { text });
                true
            }
            None => false,
        }
    }
}
