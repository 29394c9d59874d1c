use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::constants::HIGH_SCORE_FILE;
use flappy::driver;
use flappy::logging::init_logging;
use flappy::{FileScoreStore, GameConfig, GameSession, ScoreStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

fn main() -> io::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config = GameConfig::load();
    log::debug!("Config: {:?}", config);

    let mut store = FileScoreStore::new().unwrap_or_else(|e| {
        log::warn!("No save directory ({}), using ./{}", e, HIGH_SCORE_FILE);
        FileScoreStore::at(HIGH_SCORE_FILE)
    });
    let high_score = store.load();
    log::info!(
        "Starting with high score {} from {}",
        high_score,
        store.path().display()
    );

    // Bad pipe geometry should stop us here, not at some random spawn
    let mut session = match GameSession::try_new(config, high_score, 0) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            eprintln!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };
    // Session time is measured from here
    let clock_start = Instant::now();
    let mut rng = rand::thread_rng();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = driver::run(&mut terminal, &mut session, &mut store, &mut rng, clock_start);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Game loop failed: {}", e);
    }
    result
}
