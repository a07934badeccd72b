use thiserror::Error;

use super::controller::{Generation, Status};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("card index {index} is outside a deck of {len}")]
    OutOfRangeIndex { index: usize, len: usize },
    #[error("selection holds {0} cards, expected exactly two")]
    InvalidSelectionSize(usize),
    #[error("callback from game {got} arrived after game {expected} started")]
    StaleCallback { expected: Generation, got: Generation },
    #[error("expected status {expected:?}, game is {actual:?}")]
    NotInStatus { expected: Status, actual: Status },
}

impl GameError {
    /// Errors that only mean "this deferred work no longer applies".
    pub fn is_stale(&self) -> bool {
        matches!(self, GameError::StaleCallback { .. } | GameError::NotInStatus { .. })
    }
}
