use blackjack::{
    calculate_hand_value, Card, Error, Hand, Odds, Percent, Shoe, TableRules, Visibility,
};
use clap::Parser;
use log::{debug, warn};

#[derive(Parser)]
#[command(
    name = "odds-calc",
    about = "Show the bust and win/lose hints for a hand against a fresh shoe"
)]
struct Args {
    /// Player cards, e.g. "10h 6s" or "A♠,7d"
    #[arg(long, value_delimiter = ' ', num_args = 1..)]
    player: Vec<String>,

    /// Dealer cards; the second one is the hole card
    #[arg(long, value_delimiter = ' ', num_args = 1..)]
    dealer: Vec<String>,

    /// Number of decks in the shoe before the cards above were dealt
    #[arg(long, default_value_t = TableRules::default().num_decks)]
    decks: u8,

    /// Count the dealer's hole card, as after the player stands
    #[arg(long, default_value_t = false)]
    revealed: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let rules = TableRules::new(args.decks, TableRules::default().dealer_stands_on)
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });

    let (player, dealer) = match (parse_cards(&args.player), parse_cards(&args.dealer)) {
        (Ok(player), Ok(dealer)) => (player, dealer),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    if player.is_empty() {
        eprintln!("At least one player card is required (--player \"10h 6s\")");
        std::process::exit(1);
    }

    let (shoe, missing) = remaining_shoe(rules.num_decks, player.iter().chain(dealer.iter()));
    for card in &missing {
        warn!("{card} is not left in a {}-deck shoe, ignoring it for the shoe count", rules.num_decks);
    }
    debug!("{} cards left after removing known cards", shoe.len());

    let visibility = if args.revealed {
        Visibility::Revealed
    } else {
        Visibility::HoleCardHidden
    };

    eprintln!("Configuration:");
    eprintln!("  Decks:         {}", rules.num_decks);
    eprintln!("  Cards left:    {}", shoe.len());
    eprintln!("  Hole card:     {}", if args.revealed { "revealed" } else { "hidden" });

    let odds = Odds::estimate(&player, &dealer, visibility, &shoe);

    println!(
        "Player:         {} ({}{})",
        describe(&player),
        calculate_hand_value(&player, Visibility::Revealed),
        hand_note(&Hand::from(player.clone()))
    );
    println!(
        "Dealer:         {} ({})",
        describe(&dealer),
        calculate_hand_value(&dealer, visibility)
    );
    println!("Bust if hit:    {}", Percent::display_or_na(odds.bust));
    println!("Safe if hit:    {}", Percent::display_or_na(odds.next_win));
    println!("Player win:     {}", Percent::display_or_na(odds.player_win));
    println!("Player lose:    {}", Percent::display_or_na(odds.player_lose));
}

/// Card arguments may be split by spaces, commas or both.
fn parse_cards(raw: &[String]) -> Result<Vec<Card>, Error> {
    raw.iter()
        .flat_map(|s| s.split(','))
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<Card>)
        .collect()
}

/// A full shoe minus the known cards, and the known cards it could not supply.
fn remaining_shoe<'a>(decks: u8, known: impl Iterator<Item = &'a Card>) -> (Shoe, Vec<Card>) {
    let mut shoe = Shoe::build(decks);
    let missing = known.filter(|card| !shoe.remove_card(card)).copied().collect();
    (shoe, missing)
}

fn hand_note(hand: &Hand) -> &'static str {
    if hand.is_blackjack() {
        ", blackjack"
    } else if hand.is_soft() {
        ", soft"
    } else {
        ""
    }
}

fn describe(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_display)
        .collect::<Vec<_>>()
        .join(" ")
}
