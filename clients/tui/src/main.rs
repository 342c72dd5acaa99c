use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{error::Error, io, time::Duration};

use blackjack::{GameSession, TableRules};
use log::LevelFilter;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

mod app;
use app::{command_for, App, Command};

mod tui_logger;
use tui_logger::TuiLogger;

mod ui;

#[derive(Parser, Debug)]
#[command(name = "blackjack-tui", about = "Single-player blackjack in the terminal")]
struct Args {
    /// Decks in the shoe (1-8)
    #[arg(long, env = "BLACKJACK_DECKS", default_value_t = 8)]
    decks: u8,

    /// Dealer draws until reaching at least this value
    #[arg(long, env = "BLACKJACK_DEALER_STANDS_ON", default_value_t = 17)]
    dealer_stands_on: u8,

    /// Seed for a reproducible shoe
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    /// Lowest log level shown in the log panel
    #[arg(long, env = "BLACKJACK_LOG_LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let rules = TableRules::new(args.decks, args.dealer_stands_on)?;

    let (logger, log_buffer) = TuiLogger::new(args.log_level);
    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(args.log_level))?;

    let rng = match args.seed {
        Some(seed) => {
            log::info!("Using seed {seed}");
            ChaCha20Rng::seed_from_u64(seed)
        }
        None => ChaCha20Rng::from_entropy(),
    };
    let session = GameSession::new(rules, rng)?;

    let mut app = App::new(rules, log_buffer);
    session.present(&mut app);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, session);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut session: GameSession<ChaCha20Rng>,
) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        app.sync_logs();
        terminal.draw(|f| ui::draw(f, &app))?;

        // Poll with a timeout so log lines show up without a key press
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match command_for(key.code) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::ToggleLog) => app.log_visible = !app.log_visible,
            // A refused action is already logged and shown in the status bar
            Some(Command::Play(intent)) => {
                let _ = session.handle(intent, &mut app);
            }
            None => {}
        }
    }
}
