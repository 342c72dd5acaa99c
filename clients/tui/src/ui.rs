use blackjack::{Card, Percent, Suit};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

fn suit_color(suit: Suit) -> Color {
    match suit {
        Suit::Hearts => Color::Red,
        Suit::Diamonds => Color::from_u32(0xFF_A5_00), // Orange
        Suit::Clubs => Color::Magenta,                 // Purple
        Suit::Spades => Color::Black,
    }
}

/// One span per card, the hole card as `??` while it is face down.
pub fn card_spans(cards: &[Card], hide_second: bool) -> Vec<Span<'static>> {
    cards
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            if hide_second && idx == blackjack::HOLE_CARD_INDEX {
                Span::styled("?? ", Style::default().fg(Color::White).bg(Color::Gray))
            } else {
                Span::styled(
                    format!("{} ", card.to_display()),
                    Style::default().fg(suit_color(card.suit)).bg(Color::Gray),
                )
            }
        })
        .collect()
}

fn key_hints(app: &App) -> Line<'static> {
    let active = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(Color::DarkGray);
    let (play, round) = if app.round_over { (idle, active) } else { (active, idle) };

    Line::from(vec![
        Span::styled("↑/h", play),
        Span::raw(" Hit  "),
        Span::styled("↓/s", play),
        Span::raw(" Stand  "),
        Span::styled("r", round),
        Span::raw(" Reset  "),
        Span::styled("n", round),
        Span::raw(" New shoe  "),
        Span::styled("l", Style::default().fg(Color::Yellow)),
        Span::raw(" Log  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ])
}

fn odds_line(label: &str, value: Option<Percent>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<26}"), Style::default().fg(Color::Gray)),
        Span::styled(
            Percent::display_or_na(value),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn draw(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Title bar
                Constraint::Min(10),   // Table
                Constraint::Length(3), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(format!(
        "Blackjack - {} deck(s), dealer stands on {}",
        app.rules.num_decks, app.rules.dealer_stands_on
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    let (game_container, log_area) = if app.log_visible {
        let main_horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(main_chunks[1]);
        (main_horizontal[0], Some(main_horizontal[1]))
    } else {
        (main_chunks[1], None)
    };

    // Dealer on top, player below, odds at the bottom
    let game_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(35),
                Constraint::Percentage(35),
                Constraint::Min(7),
            ]
            .as_ref(),
        )
        .split(game_container);

    let dealer_height = game_area[0].height.saturating_sub(2);
    let mut dealer_lines = vec![Line::from(""); (dealer_height / 2) as usize];
    dealer_lines.push(Line::from(card_spans(&app.dealer_cards, app.hide_hole_card)));
    let dealer_title = if app.hide_hole_card {
        format!(" Dealer Hand (showing {}) ", app.dealer_score)
    } else {
        format!(" Dealer Hand ({}) ", app.dealer_score)
    };
    let dealer_block = Paragraph::new(dealer_lines)
        .block(Block::default().title(dealer_title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(dealer_block, game_area[0]);

    let player_height = game_area[1].height.saturating_sub(2);
    let mut player_lines = vec![Line::from(""); (player_height.saturating_sub(2) / 2) as usize];
    player_lines.push(Line::from(card_spans(&app.player_cards, false)));
    player_lines.push(Line::from(""));
    player_lines.push(key_hints(app));
    let player_style = if app.round_over && app.player_score > 21 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let player_block = Paragraph::new(player_lines)
        .block(
            Block::default()
                .title(Span::styled(format!(" Your Hand ({}) ", app.player_score), player_style))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);
    f.render_widget(player_block, game_area[1]);

    let odds_lines = vec![
        odds_line("Bust on next card:", app.bust),
        odds_line("Next card is safe:", app.next_win),
        odds_line("Dealer stays under you:", app.player_win),
        odds_line("Dealer reaches you:", app.player_lose),
        Line::from(vec![
            Span::styled(format!("{:<26}", "Cards left:"), Style::default().fg(Color::Gray)),
            Span::raw(format!("{} / {}", app.cards_left, app.shoe_capacity())),
        ]),
    ];
    let odds_block = Paragraph::new(odds_lines)
        .block(Block::default().title(" Odds ").borders(Borders::ALL));
    f.render_widget(odds_block, game_area[2]);

    if let Some(log_area) = log_area {
        let log_frame_height = log_area.height.saturating_sub(2) as usize;
        let log_start_idx = app.logs.len().saturating_sub(log_frame_height);

        let log_lines: Vec<Line> = app
            .logs
            .iter()
            .skip(log_start_idx)
            .map(|log| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::DarkGray)),
                    Span::raw(log.clone()),
                ])
            })
            .collect();

        let logs_widget = Paragraph::new(log_lines)
            .block(
                Block::default()
                    .title(" Game Log ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(logs_widget, log_area);
    }

    let status_style = if app.round_over {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let status_bar = Paragraph::new(app.status.as_str())
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[2]);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use blackjack::{GameSession, Rank, TableRules};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn presented_app() -> (App, GameSession<ChaCha20Rng>) {
        let buffer = Arc::new(Mutex::new(VecDeque::new()));
        let mut app = App::new(TableRules::default(), buffer);
        let session =
            GameSession::new(TableRules::default(), ChaCha20Rng::seed_from_u64(3)).unwrap();
        session.present(&mut app);
        (app, session)
    }

    #[test]
    fn test_card_spans_hide_hole_card() {
        let cards = [
            Card::new(Rank::Ten, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Two, Suit::Clubs),
        ];
        let hidden: Vec<String> = card_spans(&cards, true)
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(hidden, vec!["10♥ ", "?? ", "2♣ "]);

        let shown = card_spans(&cards, false);
        assert_eq!(shown[1].content, "A♠ ");
        assert_eq!(shown[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_draw_shows_table() {
        let (app, session) = presented_app();
        let text = screen(&app);

        assert!(text.contains("Dealer Hand (showing"));
        assert!(text.contains("??"));
        assert!(text.contains(&format!("Your Hand ({})", session.round().player_value())));
        assert!(text.contains("412 / 416"));
        assert!(text.contains("Game Log"));
    }

    #[test]
    fn test_draw_reveals_after_stand() {
        let (mut app, mut session) = presented_app();
        app.log_visible = false;
        session.handle(blackjack::Intent::Stand, &mut app).unwrap();
        let text = screen(&app);

        assert!(!text.contains("??"));
        assert!(!text.contains("Game Log"));
        assert!(text.contains(session.outcome().unwrap().message()));
    }
}
