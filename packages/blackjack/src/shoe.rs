use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Card, Error, Rank, Suit};

pub const CARDS_PER_DECK: usize = 52;

/// The working stack of cards. The top of the shoe is the end of the vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
}

impl Shoe {
    /// Build `decks` full decks in suit/rank order, unshuffled.
    pub fn build(decks: u8) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * CARDS_PER_DECK);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Self { cards, decks }
    }

    /// Build and shuffle in one go.
    pub fn fresh<R: Rng + ?Sized>(decks: u8, rng: &mut R) -> Self {
        let mut shoe = Self::build(decks);
        shoe.shuffle(rng);
        debug!("Built and shuffled a {decks}-deck shoe ({} cards)", shoe.len());
        shoe
    }

    /// A stacked shoe. The last card of `cards` is dealt first.
    ///
    /// The deck count is raised if needed so that `len() <= capacity()` holds.
    pub fn from_cards(cards: Vec<Card>, decks: u8) -> Self {
        let needed = cards.len().div_ceil(CARDS_PER_DECK);
        let decks = decks.max(u8::try_from(needed).unwrap_or(u8::MAX));
        Self { cards, decks }
    }

    /// Fisher-Yates: walk backwards and swap each slot with a uniformly chosen
    /// slot at or below it.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    pub fn deal_top(&mut self) -> Result<Card, Error> {
        self.cards.pop().ok_or(Error::EmptyShoe)
    }

    /// Take one copy of `card` out of the shoe, wherever it sits.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        match self.cards.iter().rposition(|c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn decks(&self) -> u8 {
        self.decks
    }

    pub fn capacity(&self) -> usize {
        self.decks as usize * CARDS_PER_DECK
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
