pub mod config;
pub mod controller;
pub mod countdown;
pub mod deck;
pub mod error;
pub mod intro;
pub mod selection;

pub use config::{ConfigError, GameConfig, IntroTimings};
pub use controller::{Game, Generation, Resolution, Snapshot, Status, TapOutcome, TapRejection};
pub use countdown::{Countdown, CountdownPoll};
pub use deck::{Card, CardFace, CardKey, Deck, Symbol};
pub use error::GameError;
pub use intro::{IntroAction, IntroScript, IntroStep};
pub use selection::Selection;
