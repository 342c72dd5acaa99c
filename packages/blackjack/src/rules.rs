use serde::{Deserialize, Serialize};

use crate::Error;

pub const MAX_DECKS: u8 = 8;

/// Configurable table rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRules {
    /// Number of decks in a fresh shoe
    pub num_decks: u8,

    /// Dealer keeps drawing while below this value (soft or hard)
    pub dealer_stands_on: u8,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            num_decks: 8,
            dealer_stands_on: 17,
        }
    }
}

impl TableRules {
    pub fn new(num_decks: u8, dealer_stands_on: u8) -> Result<Self, Error> {
        let rules = Self {
            num_decks,
            dealer_stands_on,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Six-deck shoe, common in casinos
    pub fn six_deck() -> Self {
        Self {
            num_decks: 6,
            ..Self::default()
        }
    }

    pub fn single_deck() -> Self {
        Self {
            num_decks: 1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_decks == 0 || self.num_decks > MAX_DECKS {
            return Err(Error::InvalidRules(format!(
                "number of decks must be between 1 and {MAX_DECKS}, got {}",
                self.num_decks
            )));
        }
        if !(12..=21).contains(&self.dealer_stands_on) {
            return Err(Error::InvalidRules(format!(
                "dealer must stand on a value between 12 and 21, got {}",
                self.dealer_stands_on
            )));
        }
        Ok(())
    }
}
