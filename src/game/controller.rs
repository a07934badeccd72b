use std::fmt;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, trace};

use super::config::{ConfigError, GameConfig};
use super::countdown::{Countdown, CountdownPoll};
use super::deck::{Card, Deck, Symbol};
use super::error::GameError;
use super::intro::{IntroAction, IntroScript};
use super::selection::{PAIR, Selection};

/// Identifies one playthrough. Deferred work carries the generation it was
/// scheduled for and is refused once a restart has moved on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Generation {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered so that "before `Success`" is a plain comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Init,
    Ready,
    Checking,
    Success,
    Failed,
}

impl Status {
    pub fn is_over(self) -> bool {
        matches!(self, Status::Success | Status::Failed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapRejection {
    NotReady(Status),
    Matched,
    AlreadySelected,
    FaceUp,
    SelectionFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored(TapRejection),
    Flipped(usize),
    /// Second card of the turn; the game is now `Checking` and
    /// [`Game::resolve_pair`] must run after the settle delay.
    PairSelected([usize; PAIR]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Matched { pair: [usize; PAIR], won: bool },
    Mismatched { pair: [usize; PAIR] },
}

/// Read-only view handed to the renderer.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub generation: Generation,
    pub status: Status,
    pub attempts: u32,
    pub cards: Vec<Card>,
    pub selection: Vec<usize>,
    pub remaining_secs: Option<u64>,
}

pub struct Game {
    config: GameConfig,
    symbols: Vec<Symbol>,
    deck: Deck,
    status: Status,
    selection: Selection,
    attempts: u32,
    countdown: Countdown,
    generation: Generation,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Game, ConfigError> {
        config.validate()?;
        let symbols = config.symbol_set();
        let deck = Deck::build(&symbols, rng);
        Ok(Game {
            config,
            symbols,
            deck,
            status: Status::Init,
            selection: Selection::new(),
            attempts: 0,
            countdown: Countdown::default(),
            generation: Generation(1),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.countdown.deadline()
    }

    pub fn intro_script(&self) -> IntroScript {
        IntroScript::from_config(&self.config.intro)
    }

    /// Throws away the current playthrough and deals a new face-down board.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation = self.generation.next();
        self.deck = Deck::build(&self.symbols, rng);
        self.selection = Selection::new();
        self.attempts = 0;
        self.countdown = Countdown::default();
        self.status = Status::Init;
        debug!(generation = %self.generation, "game restarted");
    }

    pub fn apply_intro<R: Rng + ?Sized>(
        &mut self,
        generation: Generation,
        action: IntroAction,
        now: Instant,
        rng: &mut R,
    ) -> Result<(), GameError> {
        self.ensure_current(generation)?;
        self.ensure_status(Status::Init)?;
        match action {
            IntroAction::RevealAll => self.deck = self.deck.all_revealed(),
            IntroAction::Shuffle => self.deck = self.deck.shuffled(rng),
            IntroAction::Finish => {
                self.deck = self.deck.all_hidden();
                self.countdown.start(now, self.config.countdown());
                self.status = Status::Ready;
                debug!(generation = %self.generation, "intro finished, board open");
            }
        }
        self.check_win();
        Ok(())
    }

    /// Out-of-range indices are reported; every other refused tap is
    /// `Ok(TapOutcome::Ignored)` and leaves the game untouched.
    pub fn tap(&mut self, index: usize) -> Result<TapOutcome, GameError> {
        if self.status != Status::Ready {
            trace!(index, status = ?self.status, "tap ignored");
            return Ok(TapOutcome::Ignored(TapRejection::NotReady(self.status)));
        }
        let Some(card) = self.deck.get(index) else {
            return Err(GameError::OutOfRangeIndex {
                index,
                len: self.deck.len(),
            });
        };

        let rejection = if card.matched {
            Some(TapRejection::Matched)
        } else if self.selection.contains(index) {
            Some(TapRejection::AlreadySelected)
        } else if !card.face_down {
            Some(TapRejection::FaceUp)
        } else if self.selection.is_full() {
            Some(TapRejection::SelectionFull)
        } else {
            None
        };
        if let Some(rejection) = rejection {
            trace!(index, ?rejection, "tap ignored");
            return Ok(TapOutcome::Ignored(rejection));
        }

        self.deck = self.deck.revealed(&[index]);
        self.selection.push(index)?;

        if self.selection.is_full() {
            let pair = self.selection.pair()?;
            self.status = Status::Checking;
            debug!(?pair, "pair selected");
            Ok(TapOutcome::PairSelected(pair))
        } else {
            Ok(TapOutcome::Flipped(index))
        }
    }

    /// Settles the pending pair. Scheduled once per `PairSelected`.
    pub fn resolve_pair(&mut self, generation: Generation) -> Result<Resolution, GameError> {
        self.ensure_current(generation)?;
        self.ensure_status(Status::Checking)?;
        debug_assert_eq!(self.selection.len(), PAIR, "checking without a full selection");

        let pair = match self.selection.pair() {
            Ok(pair) => pair,
            Err(err) => {
                error!(%err, selection = ?self.selection.indices(), "broken selection buffer");
                self.deck = self.deck.hidden(self.selection.indices());
                self.selection.clear();
                self.status = Status::Ready;
                return Err(err);
            }
        };

        let symbols = self.deck.symbols();
        let is_match = match (symbols.get(pair[0]), symbols.get(pair[1])) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        self.deck = if is_match {
            self.deck.with_matched(&pair)
        } else {
            self.deck.hidden(&pair)
        };
        self.selection.clear();
        self.attempts = self.attempts.saturating_add(1);
        self.status = Status::Ready;
        let won = self.check_win();

        debug!(?pair, is_match, attempts = self.attempts, "pair resolved");
        Ok(if is_match {
            Resolution::Matched { pair, won }
        } else {
            Resolution::Mismatched { pair }
        })
    }

    /// Countdown ran out. Returns whether the game was lost by it.
    pub fn time_expired(&mut self, generation: Generation) -> Result<bool, GameError> {
        self.ensure_current(generation)?;
        if self.check_win() {
            return Ok(false);
        }
        if matches!(self.status, Status::Ready | Status::Checking) {
            self.status = Status::Failed;
            self.countdown.pause();
            debug!(generation = %self.generation, attempts = self.attempts, "time is up");
            return Ok(true);
        }
        Ok(false)
    }

    /// Advances the countdown and reports its expiry to the state machine.
    pub fn tick(&mut self, generation: Generation, now: Instant) -> Result<CountdownPoll, GameError> {
        self.ensure_current(generation)?;
        let poll = self.countdown.poll(now);
        if poll == CountdownPoll::Expired {
            self.time_expired(generation)?;
        }
        Ok(poll)
    }

    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        self.countdown
            .remaining(now)
            .map(|left| left.as_millis().div_ceil(1000) as u64)
    }

    pub fn snapshot(&self, now: Instant) -> Snapshot {
        Snapshot {
            generation: self.generation,
            status: self.status,
            attempts: self.attempts,
            cards: self.deck.cards().to_vec(),
            selection: self.selection.indices().to_vec(),
            remaining_secs: self.remaining_secs(now),
        }
    }

    fn check_win(&mut self) -> bool {
        if self.status == Status::Success {
            return true;
        }
        if self.status == Status::Failed || !self.deck.all_matched() {
            return false;
        }
        self.status = Status::Success;
        self.countdown.pause();
        debug!(generation = %self.generation, attempts = self.attempts, "board cleared");
        true
    }

    fn ensure_current(&self, generation: Generation) -> Result<(), GameError> {
        if generation == self.generation {
            Ok(())
        } else {
            Err(GameError::StaleCallback {
                expected: self.generation,
                got: generation,
            })
        }
    }

    fn ensure_status(&self, expected: Status) -> Result<(), GameError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(GameError::NotInStatus {
                expected,
                actual: self.status,
            })
        }
    }
}
