use serde::{Deserialize, Serialize};

use crate::{Card, Odds, Percent};

/// Something that shows the table to a human. The session pushes a full
/// refresh through these calls after every intent it handles.
pub trait Presentation {
    fn render(&mut self, player_hand: &[Card], dealer_hand: &[Card], hide_dealer_second_card: bool);

    fn set_status_text(&mut self, message: &str);

    fn set_scores(&mut self, player_value: u8, dealer_value: u8);

    fn set_probabilities(
        &mut self,
        bust: Option<Percent>,
        next_win: Option<Percent>,
        player_win: Option<Percent>,
        player_lose: Option<Percent>,
    );

    fn set_cards_left(&mut self, count: usize);

    /// Lets a view grey out hit/stand once the round is decided.
    fn set_round_over(&mut self, _game_over: bool) {}
}

/// What the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Hit,
    Stand,
    /// New round with the shoe carried over from the last one
    Reset,
    /// New round with a freshly built and shuffled shoe
    NewShoe,
}

/// Everything a view needs to draw the table, as of the last handled intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub hide_dealer_second_card: bool,
    pub player_score: u8,
    pub dealer_score: u8,
    pub status: String,
    pub odds: Odds,
    pub cards_left: usize,
    pub game_over: bool,
}

impl TableView {
    pub fn present<P: Presentation + ?Sized>(&self, view: &mut P) {
        view.render(&self.player_hand, &self.dealer_hand, self.hide_dealer_second_card);
        view.set_status_text(&self.status);
        view.set_scores(self.player_score, self.dealer_score);
        view.set_probabilities(
            self.odds.bust,
            self.odds.next_win,
            self.odds.player_win,
            self.odds.player_lose,
        );
        view.set_cards_left(self.cards_left);
        view.set_round_over(self.game_over);
    }
}
