mod card;
mod error;
mod game_state;
mod hand;
mod odds;
mod presentation;
mod rules;
mod shoe;

pub use card::{Card, Rank, Suit};
pub use error::Error;
pub use game_state::{GameSession, RoundOutcome, RoundPhase, RoundState, ShoeSource, OPENING_CARDS};
pub use hand::{
    calculate_hand_value, card_value, is_blackjack, is_busted, is_soft_hand, Hand, Visibility,
    HOLE_CARD_INDEX,
};
pub use odds::{bust_probability, win_lose_probability, Odds, Percent, WinLose};
pub use presentation::{Intent, Presentation, TableView};
pub use rules::{TableRules, MAX_DECKS};
pub use shoe::{Shoe, CARDS_PER_DECK};
