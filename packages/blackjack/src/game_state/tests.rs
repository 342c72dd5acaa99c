use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::{calculate_hand_value, Percent, Rank, Suit};

fn c(rank: Rank) -> Card {
    Card::new(rank, Suit::Hearts)
}

/// Shoe dealt in the given order (first element is on top).
fn stacked(deal_order: &[Rank]) -> Shoe {
    Shoe::from_cards(deal_order.iter().rev().copied().map(c).collect(), 1)
}

fn session(deal_order: &[Rank]) -> GameSession<StdRng> {
    GameSession::with_shoe(
        TableRules::default(),
        stacked(deal_order),
        StdRng::seed_from_u64(0),
    )
    .unwrap()
}

#[derive(Default)]
struct Recorder {
    player: Vec<Card>,
    dealer: Vec<Card>,
    hidden: bool,
    status: String,
    scores: (u8, u8),
    bust: Option<Percent>,
    next_win: Option<Percent>,
    win: Option<Percent>,
    lose: Option<Percent>,
    cards_left: usize,
    round_over: bool,
    renders: usize,
}

impl Presentation for Recorder {
    fn render(&mut self, player_hand: &[Card], dealer_hand: &[Card], hide_dealer_second_card: bool) {
        self.player = player_hand.to_vec();
        self.dealer = dealer_hand.to_vec();
        self.hidden = hide_dealer_second_card;
        self.renders += 1;
    }

    fn set_status_text(&mut self, message: &str) {
        self.status = message.to_string();
    }

    fn set_scores(&mut self, player_value: u8, dealer_value: u8) {
        self.scores = (player_value, dealer_value);
    }

    fn set_probabilities(
        &mut self,
        bust: Option<Percent>,
        next_win: Option<Percent>,
        player_win: Option<Percent>,
        player_lose: Option<Percent>,
    ) {
        self.bust = bust;
        self.next_win = next_win;
        self.win = player_win;
        self.lose = player_lose;
    }

    fn set_cards_left(&mut self, count: usize) {
        self.cards_left = count;
    }

    fn set_round_over(&mut self, game_over: bool) {
        self.round_over = game_over;
    }
}

#[test]
fn test_new_session_deals_from_full_shoe() {
    let game = GameSession::new(TableRules::default(), StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(game.shoe().len(), 412);
    assert_eq!(game.round().player_hand.len(), 2);
    assert_eq!(game.round().dealer_hand.len(), 2);
    assert_eq!(game.phase(), RoundPhase::AwaitingAction);
    assert!(!game.is_game_over());
    assert!(!game.round().has_player_stood());
    assert_eq!(game.round_number(), 1);
}

#[test]
fn test_new_session_rejects_invalid_rules() {
    let rules = TableRules {
        num_decks: 0,
        ..TableRules::default()
    };
    assert!(matches!(
        GameSession::new(rules, StdRng::seed_from_u64(1)),
        Err(Error::InvalidRules(_))
    ));
}

#[test]
fn test_opening_deal_order_is_player_player_dealer_dealer() {
    let game = session(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
    assert_eq!(game.round().player_hand.cards(), &[c(Rank::Two), c(Rank::Three)]);
    assert_eq!(game.round().dealer_hand.cards(), &[c(Rank::Four), c(Rank::Five)]);
    assert_eq!(game.shoe().len(), 1);
}

#[test]
fn test_hit_deals_exactly_one_card() {
    let mut game = session(&[Rank::Two, Rank::Three, Rank::Ten, Rank::Seven, Rank::Four, Rank::Nine]);
    game.hit().unwrap();
    assert_eq!(game.round().player_hand.len(), 3);
    assert_eq!(game.round().player_hand.cards()[2], c(Rank::Four));
    assert_eq!(game.shoe().len(), 1);
    assert_eq!(game.phase(), RoundPhase::AwaitingAction);
}

#[test]
fn test_hit_past_21_busts_player() {
    let mut game = session(&[Rank::King, Rank::Six, Rank::Ten, Rank::Seven, Rank::Queen]);
    game.hit().unwrap();
    assert_eq!(game.round().player_value(), 26);
    assert!(game.is_game_over());
    assert_eq!(game.phase(), RoundPhase::PlayerBusted);
    assert_eq!(game.outcome(), Some(RoundOutcome::PlayerBust));
    assert_eq!(game.snapshot().status, "Player busts! Dealer wins!");
}

#[test]
fn test_actions_after_bust_are_ignored() {
    let mut game = session(&[Rank::King, Rank::Six, Rank::Ten, Rank::Seven, Rank::Queen, Rank::Two, Rank::Three]);
    game.hit().unwrap();
    let cards_left = game.shoe().len();

    game.hit().unwrap();
    game.stand().unwrap();

    assert_eq!(game.shoe().len(), cards_left);
    assert_eq!(game.round().player_hand.len(), 3);
    assert!(!game.round().has_player_stood());
    assert_eq!(game.outcome(), Some(RoundOutcome::PlayerBust));
}

#[test]
fn test_stand_dealer_on_12_draws_until_17() {
    // player 18, dealer 10 + 2, then 3 and 4 come out
    let mut game = session(&[
        Rank::Ten,
        Rank::Eight,
        Rank::Ten,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::King,
    ]);
    game.stand().unwrap();

    let dealer = game.round().dealer_hand.cards();
    assert_eq!(dealer.len(), 4);
    assert_eq!(game.round().dealer_value(), 19);
    assert_eq!(game.shoe().len(), 1);
    assert!(game.is_game_over());
    assert_eq!(game.phase(), RoundPhase::RoundResolved);
    assert_eq!(game.outcome(), Some(RoundOutcome::DealerWin));
}

#[test]
fn test_stand_dealer_on_17_does_not_draw() {
    let mut game = session(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Seven, Rank::Two]);
    game.stand().unwrap();
    assert_eq!(game.round().dealer_hand.len(), 2);
    assert_eq!(game.shoe().len(), 1);
    assert_eq!(game.outcome(), Some(RoundOutcome::PlayerWin));
    assert_eq!(game.snapshot().status, "Player wins!");
}

#[test]
fn test_dealer_stands_on_soft_17() {
    let mut game = session(&[Rank::Ten, Rank::Seven, Rank::Ace, Rank::Six, Rank::Two]);
    game.stand().unwrap();
    assert_eq!(game.round().dealer_hand.len(), 2);
    assert_eq!(game.outcome(), Some(RoundOutcome::Push));
    assert_eq!(game.snapshot().status, "It's a tie!");
}

#[test]
fn test_dealer_bust() {
    let mut game = session(&[Rank::Ten, Rank::Two, Rank::Ten, Rank::Six, Rank::King]);
    game.stand().unwrap();
    assert_eq!(game.round().dealer_value(), 26);
    assert_eq!(game.outcome(), Some(RoundOutcome::DealerBust));
    assert!(game.outcome().unwrap().player_won());
    assert_eq!(game.snapshot().status, "Dealer busts! Player wins!");
}

#[test]
fn test_stand_ends_round_once() {
    let mut game = session(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Seven, Rank::Two]);
    game.stand().unwrap();
    let snapshot = game.snapshot();
    game.stand().unwrap();
    game.hit().unwrap();
    assert_eq!(game.snapshot(), snapshot);
}

#[test]
fn test_hit_on_empty_shoe_is_refused() {
    let mut game = session(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    assert!(game.shoe().is_empty());

    let before = game.round().clone();
    assert_eq!(game.hit(), Err(Error::EmptyShoe));
    assert_eq!(game.round(), &before);
}

#[test]
fn test_stand_running_out_mid_draw_leaves_round_untouched() {
    // dealer on 6 needs more than the single card left
    let mut game = session(&[Rank::Ten, Rank::Eight, Rank::Two, Rank::Four, Rank::Three]);
    let before = game.round().clone();

    assert_eq!(game.stand(), Err(Error::EmptyShoe));
    assert_eq!(game.round(), &before);
    assert!(!game.round().has_player_stood());
    assert_eq!(game.shoe().len(), 1);
    assert_eq!(game.phase(), RoundPhase::AwaitingAction);
}

#[test]
fn test_reset_carries_the_shoe() {
    let mut game = GameSession::new(TableRules::default(), StdRng::seed_from_u64(3)).unwrap();
    game.stand().unwrap();
    let left = game.shoe().len();
    let next_cards: Vec<Card> = game.shoe().cards().iter().rev().take(4).copied().collect();

    game.start_new_round(ShoeSource::Carried).unwrap();

    assert_eq!(game.shoe().len(), left - 4);
    assert_eq!(game.round().player_hand.cards(), &next_cards[..2]);
    assert_eq!(game.round().dealer_hand.cards(), &next_cards[2..]);
    assert!(!game.is_game_over());
    assert!(!game.round().has_player_stood());
    assert_eq!(game.round_number(), 2);
}

#[test]
fn test_new_shoe_starts_from_full_shoe() {
    let mut game = GameSession::new(TableRules::default(), StdRng::seed_from_u64(4)).unwrap();
    game.hit().unwrap();
    game.stand().unwrap();
    game.request_new_shoe().unwrap();
    assert_eq!(game.shoe().len(), 412);
    assert_eq!(game.shoe().decks(), 8);
    assert_eq!(game.phase(), RoundPhase::AwaitingAction);
}

#[test]
fn test_short_carried_shoe_is_replaced() {
    let mut game = session(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Seven, Rank::Two]);
    game.stand().unwrap();
    assert_eq!(game.shoe().len(), 1);

    game.start_new_round(ShoeSource::Carried).unwrap();
    assert_eq!(game.shoe().len(), 8 * 52 - 4);
}

#[test]
fn test_rules_control_deck_count_and_threshold() {
    let rules = TableRules::new(2, 15).unwrap();
    let mut game = GameSession::with_shoe(
        rules,
        stacked(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Five, Rank::Two]),
        StdRng::seed_from_u64(5),
    )
    .unwrap();
    game.stand().unwrap();
    assert_eq!(game.round().dealer_hand.len(), 2);
    assert_eq!(game.outcome(), Some(RoundOutcome::PlayerWin));

    game.request_new_shoe().unwrap();
    assert_eq!(game.shoe().len(), 2 * 52 - 4);
}

#[test]
fn test_snapshot_hides_hole_card_until_stand() {
    let mut game = session(&[Rank::Ten, Rank::Eight, Rank::Nine, Rank::Queen, Rank::Two]);

    let before = game.snapshot();
    assert!(before.hide_dealer_second_card);
    assert_eq!(before.dealer_score, 9);
    assert_eq!(before.player_score, 18);
    assert_eq!(before.status, "");
    assert!(!before.game_over);

    game.stand().unwrap();
    let after = game.snapshot();
    assert!(!after.hide_dealer_second_card);
    assert_eq!(after.dealer_score, 19);
    assert!(after.game_over);
}

#[test]
fn test_snapshot_odds_follow_visibility() {
    // player 18, dealer shows 9, one 2 left: 9 + 2 = 11 < 18
    let game = session(&[Rank::Ten, Rank::Eight, Rank::Nine, Rank::Queen, Rank::Two]);
    let odds = game.snapshot().odds;
    assert_eq!(odds.bust, Some(Percent::ZERO));
    assert_eq!(odds.next_win, Some(Percent::HUNDRED));
    assert_eq!(odds.player_win, Some(Percent::HUNDRED));
    assert_eq!(odds.player_lose, Some(Percent::ZERO));
}

#[test]
fn test_handle_presents_every_intent() {
    let mut game = GameSession::new(TableRules::default(), StdRng::seed_from_u64(6)).unwrap();
    let mut view = Recorder::default();

    game.handle(Intent::Hit, &mut view).unwrap();
    assert_eq!(view.renders, 1);
    assert_eq!(view.player.len(), 3);
    assert_eq!(view.cards_left, 411);

    game.handle(Intent::Stand, &mut view).unwrap();
    assert!(view.round_over);
    // a bust on the hit above ends the round before the dealer reveals
    assert_eq!(view.hidden, !game.round().has_player_stood());
    assert!(!view.status.is_empty());

    game.handle(Intent::Reset, &mut view).unwrap();
    assert!(!view.round_over);
    assert!(view.hidden);
    assert_eq!(view.status, "");
    assert_eq!(view.player.len(), 2);
    assert_eq!(view.dealer.len(), 2);
    assert_eq!(view.scores.0, game.round().player_value());

    game.handle(Intent::NewShoe, &mut view).unwrap();
    assert_eq!(view.cards_left, 412);
    assert_eq!(view.renders, 4);
    assert!(view.bust.is_some());
    assert_eq!(
        view.win.unwrap().hundredths() + view.lose.unwrap().hundredths(),
        10_000
    );
    assert_eq!(
        view.bust.unwrap().hundredths() + view.next_win.unwrap().hundredths(),
        10_000
    );
}

#[test]
fn test_handle_reports_refused_action() {
    let mut game = session(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    let mut view = Recorder::default();

    assert_eq!(game.handle(Intent::Hit, &mut view), Err(Error::EmptyShoe));
    assert_eq!(view.status, Error::EmptyShoe.to_string());
    assert_eq!(view.cards_left, 0);
    assert_eq!(view.bust, None);
    assert_eq!(view.win, None);
    assert_eq!(view.player.len(), 2);

    // a fresh shoe clears the message
    game.handle(Intent::NewShoe, &mut view).unwrap();
    assert_eq!(view.status, "");
    assert_eq!(view.cards_left, 412);
}

#[test]
fn test_dealer_never_draws_at_or_above_17() {
    let mut game = GameSession::new(TableRules::default(), StdRng::seed_from_u64(7)).unwrap();
    for _ in 0..300 {
        if game.stand().is_err() {
            game.request_new_shoe().unwrap();
            continue;
        }
        let dealer = game.round().dealer_hand.cards();
        assert!(calculate_hand_value(dealer, Visibility::Revealed) >= 17);
        for drawn in 3..=dealer.len() {
            // the hand before each draw was below 17
            assert!(calculate_hand_value(&dealer[..drawn - 1], Visibility::Revealed) < 17);
        }
        game.start_new_round(ShoeSource::Carried).unwrap();
    }
}

#[test]
fn test_outcome_resolution_table() {
    assert_eq!(RoundOutcome::resolve(22, 18), RoundOutcome::PlayerBust);
    assert_eq!(RoundOutcome::resolve(22, 23), RoundOutcome::PlayerBust);
    assert_eq!(RoundOutcome::resolve(18, 23), RoundOutcome::DealerBust);
    assert_eq!(RoundOutcome::resolve(18, 19), RoundOutcome::DealerWin);
    assert_eq!(RoundOutcome::resolve(20, 19), RoundOutcome::PlayerWin);
    assert_eq!(RoundOutcome::resolve(19, 19), RoundOutcome::Push);
}
