//! Hints shown to the player, computed from the cards actually left in the shoe.
//!
//! Both estimates look one card ahead only. The win/lose figure asks whether a
//! single extra dealer card would leave the dealer under the player without
//! busting; it is a quick proxy, not the full outcome distribution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hand::{calculate_hand_value, card_value, Visibility};
use crate::{Card, Shoe};

const SCALE: u64 = 10_000;

/// A percentage kept in hundredths (0..=10000), so `50.25%` is `Percent(5025)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Percent(u16);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(SCALE as u16);

    /// `hits / total` rounded half-up to two decimals. `None` when `total` is zero.
    pub fn from_ratio(hits: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let hits = hits.min(total) as u64;
        let total = total as u64;
        let hundredths = (hits * SCALE * 2 + total) / (total * 2);
        Some(Self(hundredths as u16))
    }

    /// `100% - self`, exact.
    pub fn complement(self) -> Self {
        Self(Self::HUNDRED.0 - self.0)
    }

    pub fn hundredths(self) -> u16 {
        self.0
    }

    /// Formats `None` as `n/a`.
    pub fn display_or_na(value: Option<Self>) -> String {
        value.map_or_else(|| "n/a".to_string(), |p| p.to_string())
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLose {
    pub win: Percent,
    pub lose: Percent,
}

/// Every hint the table shows. `None` means the shoe is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Odds {
    pub bust: Option<Percent>,
    pub next_win: Option<Percent>,
    pub player_win: Option<Percent>,
    pub player_lose: Option<Percent>,
}

impl Odds {
    pub fn estimate(
        player_hand: &[Card],
        dealer_hand: &[Card],
        dealer_visibility: Visibility,
        shoe: &Shoe,
    ) -> Self {
        let bust = bust_probability(player_hand, shoe);
        let win_lose = win_lose_probability(player_hand, dealer_hand, dealer_visibility, shoe);
        Self {
            bust,
            next_win: bust.map(Percent::complement),
            player_win: win_lose.map(|wl| wl.win),
            player_lose: win_lose.map(|wl| wl.lose),
        }
    }
}

/// Share of the shoe that would put the player over 21 if drawn next.
///
/// The drawn card is taken at its face value, Aces at 11.
pub fn bust_probability(player_hand: &[Card], shoe: &Shoe) -> Option<Percent> {
    let player_value = calculate_hand_value(player_hand, Visibility::Revealed);
    let busting = shoe
        .cards()
        .iter()
        .filter(|card| card_value(card).saturating_add(player_value) > 21)
        .count();
    Percent::from_ratio(busting, shoe.len())
}

/// Share of the shoe that, dealt to the dealer, would leave the dealer at or
/// under 21 and strictly below the player.
pub fn win_lose_probability(
    player_hand: &[Card],
    dealer_hand: &[Card],
    dealer_visibility: Visibility,
    shoe: &Shoe,
) -> Option<WinLose> {
    let player_value = calculate_hand_value(player_hand, Visibility::Revealed);
    let dealer_value = calculate_hand_value(dealer_hand, dealer_visibility);
    let favorable = shoe
        .cards()
        .iter()
        .filter(|card| {
            let hypothetical = card_value(card).saturating_add(dealer_value);
            hypothetical <= 21 && hypothetical < player_value
        })
        .count();
    let win = Percent::from_ratio(favorable, shoe.len())?;
    Some(WinLose {
        win,
        lose: win.complement(),
    })
}
