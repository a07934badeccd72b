use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Pictorial identity of a card. Two cards in a deck share each symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Symbol(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

/// Stable display identity; differs between the two cards of a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardKey(u64);

impl CardKey {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: Symbol,
    pub key: CardKey,
    pub face_down: bool,
    pub matched: bool,
}

/// What a card shows on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace<'a> {
    Hidden,
    Shown(&'a Symbol),
    Matched(&'a Symbol),
}

impl Card {
    pub fn face(&self) -> CardFace<'_> {
        if self.matched {
            CardFace::Matched(&self.id)
        } else if self.face_down {
            CardFace::Hidden
        } else {
            CardFace::Shown(&self.id)
        }
    }
}

/// Ordered cards on the board.
///
/// Every operation returns a fresh `Deck` and leaves `self` untouched, so a
/// holder of an older deck never observes later flips.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Two face-down cards per symbol, in random order.
    pub fn build<R: Rng + ?Sized>(symbols: &[Symbol], rng: &mut R) -> Deck {
        let base = u64::from(rng.random::<u32>()) << 32;
        let mut cards = Vec::with_capacity(symbols.len() * 2);
        for symbol in symbols {
            for _ in 0..2 {
                cards.push(Card {
                    id: symbol.clone(),
                    key: CardKey(base | cards.len() as u64),
                    face_down: true,
                    matched: false,
                });
            }
        }
        cards.shuffle(rng);
        Deck { cards }
    }

    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        Deck { cards }
    }

    #[must_use]
    pub fn revealed(&self, indices: &[usize]) -> Deck {
        self.update(indices, |card| card.face_down = false)
    }

    /// Matched cards stay face-up.
    #[must_use]
    pub fn hidden(&self, indices: &[usize]) -> Deck {
        self.update(indices, |card| {
            if !card.matched {
                card.face_down = true;
            }
        })
    }

    #[must_use]
    pub fn with_matched(&self, indices: &[usize]) -> Deck {
        self.update(indices, |card| {
            card.matched = true;
            card.face_down = false;
        })
    }

    #[must_use]
    pub fn all_revealed(&self) -> Deck {
        let indices: Vec<usize> = (0..self.len()).collect();
        self.revealed(&indices)
    }

    #[must_use]
    pub fn all_hidden(&self) -> Deck {
        let indices: Vec<usize> = (0..self.len()).collect();
        self.hidden(&indices)
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.matched)
    }

    pub fn symbols(&self) -> Vec<&Symbol> {
        self.cards.iter().map(|card| &card.id).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    // Indices past the end are skipped.
    fn update(&self, indices: &[usize], apply: impl Fn(&mut Card)) -> Deck {
        let mut cards = self.cards.clone();
        for &index in indices {
            if let Some(card) = cards.get_mut(index) {
                apply(card);
            }
        }
        Deck { cards }
    }
}
