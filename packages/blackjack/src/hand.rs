use serde::{Deserialize, Serialize};

use crate::Card;

/// Index of the dealer's hole card.
pub const HOLE_CARD_INDEX: usize = 1;

/// What the player is allowed to see of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Every card counts.
    Revealed,
    /// The dealer's hole card is unknown and left out of the total.
    HoleCardHidden,
}

impl Visibility {
    pub fn is_visible(&self, index: usize) -> bool {
        !(matches!(self, Visibility::HoleCardHidden) && index == HOLE_CARD_INDEX)
    }
}

pub fn card_value(card: &Card) -> u8 {
    card.value()
}

/// Calculate the value of a blackjack hand. Totals past `u8::MAX` saturate.
pub fn calculate_hand_value(cards: &[Card], visibility: Visibility) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for (idx, card) in cards.iter().enumerate() {
        if !visibility.is_visible(idx) {
            continue;
        }
        if card.is_ace() {
            aces += 1;
        }
        total += u16::from(card_value(card));
    }

    // Adjust for aces
    while total > 21 && aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        aces -= 1;
    }

    u8::try_from(total).unwrap_or(u8::MAX)
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { u16::from(c.value()) })
        .sum();
    cards.iter().any(Card::is_ace)
        && hard + 10 == u16::from(calculate_hand_value(cards, Visibility::Revealed))
}

pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards, Visibility::Revealed) > 21
}

/// Check if a hand is blackjack (21 with 2 cards)
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && calculate_hand_value(cards, Visibility::Revealed) == 21
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn value(&self, visibility: Visibility) -> u8 {
        calculate_hand_value(&self.cards, visibility)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
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
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}
