//! Fixed-rate frame driver: input, update, render, sixty times a second.

use crate::constants::FRAME_INTERVAL_MS;
use crate::game::{process_input, process_tick, GameInput, GameSession, TickEvents};
use crate::high_score::ScoreStore;
use crate::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// What a key press asks the driver to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(GameInput),
    Quit,
}

/// Map a terminal key event to a command. Unbound keys map to `None`.
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => {
            Some(Command::Input(GameInput::Flap))
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Input(GameInput::Restart)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Advance one frame and persist the high score if it rose.
///
/// A failed write is logged and otherwise ignored; the in-memory high score
/// stays correct and the next rise will try again.
pub fn step_frame<S: ScoreStore, R: Rng>(
    session: &mut GameSession,
    store: &mut S,
    now_ms: u64,
    rng: &mut R,
) -> TickEvents {
    let events = process_tick(session, now_ms, rng);

    if events.new_high_score {
        if let Err(e) = store.save(session.high_score) {
            log::warn!("Failed to save high score {}: {}", session.high_score, e);
        }
    }

    events
}

/// Apply a command to the session. Returns false when the player quits.
pub fn apply_command(session: &mut GameSession, command: Command, now_ms: u64) -> bool {
    match command {
        Command::Quit => {
            log::info!("Quit with score {}", session.score);
            false
        }
        Command::Input(input) => {
            let was_over = session.is_game_over();
            process_input(session, input, now_ms);
            if was_over && !session.is_game_over() {
                log::info!("Restarted (high score {})", session.high_score);
            }
            true
        }
    }
}

/// Run the game until the player quits.
///
/// Each frame drains input until the frame deadline, then updates and draws.
/// A frame that overruns pushes the schedule back rather than bunching
/// updates to catch up.
pub fn run<B: Backend, S: ScoreStore, R: Rng>(
    terminal: &mut Terminal<B>,
    session: &mut GameSession,
    store: &mut S,
    rng: &mut R,
    clock_start: Instant,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let elapsed_ms = || clock_start.elapsed().as_millis() as u64;
    let mut deadline = Instant::now();

    loop {
        deadline += frame_interval;
        let now = Instant::now();
        if deadline < now {
            deadline = now;
        }

        // Poll for input until the frame is due
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key_event) = event::read()? {
                if let Some(command) = map_key(&key_event) {
                    if !apply_command(session, command, elapsed_ms()) {
                        return Ok(());
                    }
                }
            }
        }

        step_frame(session, store, elapsed_ms(), rng);

        terminal.draw(|frame| ui::draw_game(frame, session))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::{GamePhase, Pipe};
    use crate::high_score::MemoryScoreStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> u32 {
            0
        }

        fn save(&mut self, _score: u32) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_key_mapping() {
        let flap = Some(Command::Input(GameInput::Flap));
        assert_eq!(map_key(&press(KeyCode::Char(' '))), flap);
        assert_eq!(map_key(&press(KeyCode::Up)), flap);
        assert_eq!(
            map_key(&press(KeyCode::Char('r'))),
            Some(Command::Input(GameInput::Restart))
        );
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&key), Some(Command::Quit));
        assert_eq!(map_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = press(KeyCode::Char(' '));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(&key), None);
    }

    #[test]
    fn test_apply_command() {
        let mut session = GameSession::new(GameConfig::default(), 0, 0);
        assert!(!apply_command(&mut session, Command::Quit, 0));
        assert!(apply_command(
            &mut session,
            Command::Input(GameInput::Flap),
            0
        ));
        assert!((session.bird.velocity - (-7.0)).abs() < f64::EPSILON);

        session.phase = GamePhase::GameOver;
        assert!(apply_command(
            &mut session,
            Command::Input(GameInput::Restart),
            50
        ));
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_step_frame_persists_on_change_only() {
        let config = GameConfig::default();
        let mut session = GameSession::new(config.clone(), 0, 0);
        let mut store = MemoryScoreStore::default();
        let mut rng = create_test_rng();
        session.pipes.push(Pipe::with_gap_center(0.0, 300.0, &config));

        step_frame(&mut session, &mut store, 16, &mut rng);
        assert_eq!(store.score, 1);
        assert_eq!(store.writes, 1);

        session.bird.y = 300.0;
        step_frame(&mut session, &mut store, 32, &mut rng);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_step_frame_survives_write_failure() {
        let config = GameConfig::default();
        let mut session = GameSession::new(config.clone(), 0, 0);
        let mut store = BrokenStore;
        let mut rng = create_test_rng();
        session.pipes.push(Pipe::with_gap_center(0.0, 300.0, &config));

        let events = step_frame(&mut session, &mut store, 16, &mut rng);

        assert!(events.new_high_score);
        assert_eq!(session.high_score, 1);
        assert!(!session.is_game_over());
    }
}
