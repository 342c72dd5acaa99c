use blackjack::{Card, Intent, Percent, Presentation, TableRules};
use crossterm::event::KeyCode;

use crate::tui_logger::LogBuffer;

/// Lines kept in the on-screen log
const MAX_LOG_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Intent),
    ToggleLog,
    Quit,
}

pub fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Up => Some(Command::Play(Intent::Hit)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            Some(Command::Play(Intent::Stand))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Play(Intent::Reset)),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::Play(Intent::NewShoe)),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::ToggleLog),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// What is on screen. Only the game session writes to it, through
/// [`Presentation`].
pub struct App {
    pub rules: TableRules,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub hide_hole_card: bool,
    pub status: String,
    pub player_score: u8,
    pub dealer_score: u8,
    pub bust: Option<Percent>,
    pub next_win: Option<Percent>,
    pub player_win: Option<Percent>,
    pub player_lose: Option<Percent>,
    pub cards_left: usize,
    pub round_over: bool,
    pub logs: Vec<String>,
    pub log_visible: bool,
    log_buffer: LogBuffer,
}

impl App {
    pub fn new(rules: TableRules, log_buffer: LogBuffer) -> App {
        App {
            rules,
            player_cards: Vec::new(),
            dealer_cards: Vec::new(),
            hide_hole_card: true,
            status: String::new(),
            player_score: 0,
            dealer_score: 0,
            bust: None,
            next_win: None,
            player_win: None,
            player_lose: None,
            cards_left: 0,
            round_over: false,
            logs: vec![format!(
                "Welcome! {} decks, dealer stands on {}",
                rules.num_decks, rules.dealer_stands_on
            )],
            log_visible: true,
            log_buffer,
        }
    }

    pub fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.remove(0);
        }
    }

    pub fn shoe_capacity(&self) -> usize {
        self.rules.num_decks as usize * blackjack::CARDS_PER_DECK
    }
}

impl Presentation for App {
    fn render(&mut self, player_hand: &[Card], dealer_hand: &[Card], hide_dealer_second_card: bool) {
        self.player_cards = player_hand.to_vec();
        self.dealer_cards = dealer_hand.to_vec();
        self.hide_hole_card = hide_dealer_second_card;
    }

    fn set_status_text(&mut self, message: &str) {
        self.status = message.to_string();
    }

    fn set_scores(&mut self, player_value: u8, dealer_value: u8) {
        self.player_score = player_value;
        self.dealer_score = dealer_value;
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
        self.player_win = player_win;
        self.player_lose = player_lose;
    }

    fn set_cards_left(&mut self, count: usize) {
        self.cards_left = count;
    }

    fn set_round_over(&mut self, game_over: bool) {
        self.round_over = game_over;
    }
}
