use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hand::Visibility;
use crate::{Card, Error, Hand, Intent, Odds, Presentation, Shoe, TableRules, TableView};

/// Cards dealt at the start of every round: two to the player, two to the dealer.
pub const OPENING_CARDS: usize = 4;

/// Where the cards of a new round come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoeSource {
    /// Keep dealing from whatever is left of the current shoe
    Carried,
    /// Build and shuffle a full shoe first
    Fresh,
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    AwaitingAction,
    PlayerBusted,
    RoundResolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerBust,
    DealerBust,
    PlayerWin,
    DealerWin,
    Push,
}

impl RoundOutcome {
    /// Compare final values. The player's bust is checked before the dealer's.
    pub fn resolve(player_value: u8, dealer_value: u8) -> Self {
        if player_value > 21 {
            RoundOutcome::PlayerBust
        } else if dealer_value > 21 {
            RoundOutcome::DealerBust
        } else if dealer_value > player_value {
            RoundOutcome::DealerWin
        } else if dealer_value < player_value {
            RoundOutcome::PlayerWin
        } else {
            RoundOutcome::Push
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RoundOutcome::PlayerBust => "Player busts! Dealer wins!",
            RoundOutcome::DealerBust => "Dealer busts! Player wins!",
            RoundOutcome::PlayerWin => "Player wins!",
            RoundOutcome::DealerWin => "Dealer wins!",
            RoundOutcome::Push => "It's a tie!",
        }
    }

    pub fn player_won(&self) -> bool {
        matches!(self, RoundOutcome::DealerBust | RoundOutcome::PlayerWin)
    }
}

/// Hands and flags of the round in progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    game_over: bool,
    player_stood: bool,
    outcome: Option<RoundOutcome>,
}

impl RoundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn has_player_stood(&self) -> bool {
        self.player_stood
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn phase(&self) -> RoundPhase {
        match self.outcome {
            None => RoundPhase::AwaitingAction,
            Some(RoundOutcome::PlayerBust) => RoundPhase::PlayerBusted,
            Some(_) => RoundPhase::RoundResolved,
        }
    }

    /// The hole card stays hidden until the player stands.
    pub fn dealer_visibility(&self) -> Visibility {
        if self.player_stood {
            Visibility::Revealed
        } else {
            Visibility::HoleCardHidden
        }
    }

    pub fn player_value(&self) -> u8 {
        self.player_hand.value(Visibility::Revealed)
    }

    /// Dealer value as far as the player can see it.
    pub fn dealer_value(&self) -> u8 {
        self.dealer_hand.value(self.dealer_visibility())
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        debug_assert!(!self.game_over, "a round can only end once");
        self.game_over = true;
        self.outcome = Some(outcome);
    }
}

/// One player at one table. Owns the shoe, the round and the random source;
/// nothing outside the session mutates them.
pub struct GameSession<R: Rng> {
    rules: TableRules,
    shoe: Shoe,
    round: RoundState,
    rng: R,
    round_number: u64,
    last_error: Option<Error>,
}

impl<R: Rng> GameSession<R> {
    /// Build a fresh shoe and deal the first round.
    pub fn new(rules: TableRules, mut rng: R) -> Result<Self, Error> {
        rules.validate()?;
        let shoe = Shoe::fresh(rules.num_decks, &mut rng);
        Self::with_shoe(rules, shoe, rng)
    }

    /// Deal the first round from a given shoe.
    pub fn with_shoe(rules: TableRules, shoe: Shoe, rng: R) -> Result<Self, Error> {
        rules.validate()?;
        let mut session = Self {
            rules,
            shoe,
            round: RoundState::new(),
            rng,
            round_number: 0,
            last_error: None,
        };
        session.start_new_round(ShoeSource::Carried)?;
        Ok(session)
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_number(&self) -> u64 {
        self.round_number
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.round.is_game_over()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.round.outcome()
    }

    /// Empty both hands and deal player, player, dealer, dealer.
    ///
    /// A carried shoe too short for the opening deal is replaced by a fresh one.
    pub fn start_new_round(&mut self, source: ShoeSource) -> Result<(), Error> {
        match source {
            ShoeSource::Fresh => self.replace_shoe(),
            ShoeSource::Carried if self.shoe.len() < OPENING_CARDS => {
                warn!(
                    "Only {} card(s) left in the shoe, shuffling a fresh {}-deck shoe",
                    self.shoe.len(),
                    self.rules.num_decks
                );
                self.replace_shoe();
            }
            ShoeSource::Carried => {}
        }

        self.round = RoundState::new();
        self.last_error = None;
        self.round_number += 1;

        for _ in 0..2 {
            let card = self.shoe.deal_top()?;
            self.round.player_hand.add_card(card);
        }
        for _ in 0..2 {
            let card = self.shoe.deal_top()?;
            self.round.dealer_hand.add_card(card);
        }

        let player_cards: Vec<String> = self
            .round
            .player_hand
            .cards()
            .iter()
            .map(Card::to_display)
            .collect();
        info!(
            "Round {} dealt: player {} ({}), dealer shows {}, {} cards left",
            self.round_number,
            player_cards.join(" "),
            self.round.player_value(),
            self.round.dealer_value(),
            self.shoe.len()
        );

        // Two cards can never bust, but keep the check in one place
        self.check_player_bust();
        Ok(())
    }

    /// Fresh shoe, then a new round dealt from it.
    pub fn request_new_shoe(&mut self) -> Result<(), Error> {
        self.start_new_round(ShoeSource::Fresh)
    }

    /// Deal the player one card. Ignored once the round is over.
    pub fn hit(&mut self) -> Result<(), Error> {
        if self.round.is_game_over() {
            debug!("Hit ignored, round {} is over", self.round_number);
            return Ok(());
        }

        let card = self.shoe.deal_top()?;
        self.round.player_hand.add_card(card);
        debug!("Player hits: {} (total {})", card, self.round.player_value());

        self.check_player_bust();
        Ok(())
    }

    /// End the player's turn, let the dealer draw out and settle the round.
    /// Ignored once the round is over.
    ///
    /// The dealer draws against a copy of the shoe, so running out of cards
    /// leaves the round exactly as it was.
    pub fn stand(&mut self) -> Result<(), Error> {
        if self.round.is_game_over() {
            debug!("Stand ignored, round {} is over", self.round_number);
            return Ok(());
        }

        let mut shoe = self.shoe.clone();
        let mut dealer_hand = self.round.dealer_hand.clone();
        while dealer_hand.value(Visibility::Revealed) < self.rules.dealer_stands_on {
            let card = shoe.deal_top()?;
            debug!("Dealer draws {card}");
            dealer_hand.add_card(card);
        }

        self.shoe = shoe;
        self.round.dealer_hand = dealer_hand;
        self.round.player_stood = true;

        let player_value = self.round.player_value();
        let dealer_value = self.round.dealer_value();
        let outcome = RoundOutcome::resolve(player_value, dealer_value);
        info!(
            "Round {}: player {player_value}, dealer {dealer_value}: {}",
            self.round_number,
            outcome.message()
        );
        self.round.finish(outcome);
        Ok(())
    }

    /// Apply one intent and push the refreshed table to `view`.
    ///
    /// A refused action is still presented, with the error as status text.
    pub fn handle<P: Presentation + ?Sized>(
        &mut self,
        intent: Intent,
        view: &mut P,
    ) -> Result<(), Error> {
        let result = match intent {
            Intent::Hit => self.hit(),
            Intent::Stand => self.stand(),
            Intent::Reset => self.start_new_round(ShoeSource::Carried),
            Intent::NewShoe => self.request_new_shoe(),
        };
        if let Err(err) = &result {
            warn!("{intent:?} refused: {err}");
        }
        self.last_error = result.as_ref().err().cloned();
        self.present(view);
        result
    }

    pub fn present<P: Presentation + ?Sized>(&self, view: &mut P) {
        self.snapshot().present(view);
    }

    pub fn snapshot(&self) -> TableView {
        let round = &self.round;
        let visibility = round.dealer_visibility();
        TableView {
            player_hand: round.player_hand.cards().to_vec(),
            dealer_hand: round.dealer_hand.cards().to_vec(),
            hide_dealer_second_card: !round.has_player_stood(),
            player_score: round.player_value(),
            dealer_score: round.dealer_value(),
            status: self.status_text(),
            odds: Odds::estimate(
                round.player_hand.cards(),
                round.dealer_hand.cards(),
                visibility,
                &self.shoe,
            ),
            cards_left: self.shoe.len(),
            game_over: round.is_game_over(),
        }
    }

    fn status_text(&self) -> String {
        if let Some(err) = &self.last_error {
            return err.to_string();
        }
        self.round
            .outcome()
            .map(|outcome| outcome.message().to_string())
            .unwrap_or_default()
    }

    fn replace_shoe(&mut self) {
        self.shoe = Shoe::fresh(self.rules.num_decks, &mut self.rng);
        info!("New {}-deck shoe shuffled ({} cards)", self.rules.num_decks, self.shoe.len());
    }

    fn check_player_bust(&mut self) {
        if !self.round.is_game_over() && self.round.player_value() > 21 {
            info!(
                "Round {}: player busts with {}",
                self.round_number,
                self.round.player_value()
            );
            self.round.finish(RoundOutcome::PlayerBust);
        }
    }
}

#[cfg(test)]
mod tests;
