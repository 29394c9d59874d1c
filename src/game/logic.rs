//! Per-frame game logic: input, pipe lifecycle, collisions and scoring.

use super::types::{GamePhase, GameSession, Pipe};
use crate::constants::WINDOW_HEIGHT;
use rand::Rng;

/// Player commands the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Upward impulse. Ignored after a crash.
    Flap,
    /// Start over. Only accepted after a crash.
    Restart,
}

/// What happened during one call to [`process_tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// A pipe was appended this frame.
    pub spawned: bool,
    /// Pipes passed this frame.
    pub scored: u32,
    /// Pipes removed for leaving the viewport.
    pub culled: usize,
    /// The session moved to `GameOver` this frame.
    pub crashed: bool,
    /// `high_score` rose this frame.
    pub new_high_score: bool,
}

/// Apply a player command.
pub fn process_input(session: &mut GameSession, input: GameInput, now_ms: u64) {
    match (input, session.phase) {
        (GameInput::Flap, GamePhase::Playing) => {
            session.bird.flap(session.config.flap_strength);
        }
        (GameInput::Restart, GamePhase::GameOver) => {
            session.restart(now_ms);
        }
        _ => {}
    }
}

/// Advance the session by one frame.
///
/// Order: bird physics, spawn check, then for each pipe move / score /
/// collide, cull, and finally the ceiling and floor check. Nothing moves once
/// the session is over.
pub fn process_tick<R: Rng>(session: &mut GameSession, now_ms: u64, rng: &mut R) -> TickEvents {
    let mut events = TickEvents::default();
    if session.phase == GamePhase::GameOver {
        return events;
    }

    session.bird.update(session.config.gravity);

    // Spawn timer restarts at "now", so frame jitter is absorbed rather than
    // caught up.
    if now_ms.saturating_sub(session.last_pipe_ms) > session.config.pipe_spawn_ms {
        session.pipes.push(Pipe::spawn(&session.config, rng));
        session.last_pipe_ms = now_ms;
        events.spawned = true;
    }

    let bird_x = session.bird.x();
    let body = session.bird.rect();
    let mut hit_pipe = false;
    for pipe in &mut session.pipes {
        pipe.update(session.config.pipe_speed);
        if pipe.check_passed(bird_x) {
            session.score += 1;
            events.scored += 1;
        }
        if pipe.collides_with(&body) {
            hit_pipe = true;
        }
    }

    let before = session.pipes.len();
    session.pipes.retain(|p| !p.is_offscreen());
    events.culled = before - session.pipes.len();

    let bird = &session.bird;
    let out_of_bounds = bird.y < 0.0 || bird.y + bird.size > WINDOW_HEIGHT;

    if hit_pipe || out_of_bounds {
        session.phase = GamePhase::GameOver;
        events.crashed = true;
        log::info!(
            "Crashed into {} with score {}",
            if hit_pipe { "a pipe" } else { "the bounds" },
            session.score
        );
    }

    if session.score > session.high_score {
        session.high_score = session.score;
        events.new_high_score = true;
        log::debug!("New high score: {}", session.high_score);
    }

    events
}
