use super::error::GameError;

pub const PAIR: usize = 2;

/// Cards flipped this turn and not yet resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Selection {
            indices: Vec::with_capacity(PAIR),
        }
    }

    /// Returns the new length.
    pub fn push(&mut self, index: usize) -> Result<usize, GameError> {
        if self.indices.len() >= PAIR {
            return Err(GameError::InvalidSelectionSize(self.indices.len() + 1));
        }
        if !self.indices.contains(&index) {
            self.indices.push(index);
        }
        Ok(self.indices.len())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn is_full(&self) -> bool {
        self.indices.len() >= PAIR
    }

    pub fn pair(&self) -> Result<[usize; PAIR], GameError> {
        match self.indices.as_slice() {
            &[a, b] => Ok([a, b]),
            other => Err(GameError::InvalidSelectionSize(other.len())),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_at_most_two() {
        let mut selection = Selection::new();
        assert_eq!(selection.push(4), Ok(1));
        assert_eq!(selection.push(2), Ok(2));
        assert!(selection.is_full());
        assert_eq!(selection.push(9), Err(GameError::InvalidSelectionSize(3)));
        assert_eq!(selection.pair(), Ok([4, 2]));
    }

    #[test]
    fn duplicate_index_is_not_added() {
        let mut selection = Selection::new();
        selection.push(1).unwrap();
        assert_eq!(selection.push(1), Ok(1));
        assert_eq!(selection.pair(), Err(GameError::InvalidSelectionSize(1)));
    }

    #[test]
    fn clear_empties() {
        let mut selection = Selection::new();
        selection.push(0).unwrap();
        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.contains(0));
    }
}
