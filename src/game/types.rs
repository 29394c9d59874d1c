//! Flappy Bird data structures.
//!
//! All positions are in logical viewport units: x grows rightward from the
//! left edge, y grows downward from the top edge.

use crate::config::GameConfig;
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use rand::Rng;
use std::io;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge don't intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }
}

/// The player-controlled bird.
#[derive(Debug, Clone)]
pub struct Bird {
    /// Fixed horizontal position.
    x: f64,
    /// Top edge of the body.
    pub y: f64,
    /// Vertical velocity in units/frame (positive = downward).
    pub velocity: f64,
    pub size: f64,
}

impl Bird {
    /// A bird one third of the way across, vertically centred, at rest.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: (WINDOW_WIDTH / 3.0).floor(),
            y: (WINDOW_HEIGHT / 2.0).floor(),
            velocity: 0.0,
            size: config.bird_size,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Replace the current velocity with the flap impulse.
    pub fn flap(&mut self, strength: f64) {
        self.velocity = strength;
    }

    /// One frame of motion. Gravity lands before the position moves.
    pub fn update(&mut self, gravity: f64) {
        self.velocity += gravity;
        self.y += self.velocity;
    }

    /// Bounding box at the current position.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// A top + bottom pipe pair with a gap between them.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge; both halves share it.
    pub x: f64,
    pub width: f64,
    /// Vertical centre of the gap.
    pub gap_y: f64,
    /// Height of the top half, measured from the ceiling.
    pub top_height: f64,
    /// Height of the bottom half, measured up from the floor.
    pub bottom_height: f64,
    /// Whether the bird has passed this pipe (for scoring).
    pub passed: bool,
}

impl Pipe {
    /// Spawn a pipe at the right edge with a random gap centre.
    pub fn spawn<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let gap_y = rng.gen_range(config.gap_center_min..=config.gap_center_max);
        Self::with_gap_center(WINDOW_WIDTH, gap_y as f64, config)
    }

    /// Build a pipe with a known gap centre.
    ///
    /// `top_height + pipe_gap + bottom_height` always equals the window height.
    pub fn with_gap_center(x: f64, gap_y: f64, config: &GameConfig) -> Self {
        let top_height = gap_y - config.pipe_gap / 2.0;
        let bottom_height = WINDOW_HEIGHT - (top_height + config.pipe_gap);
        debug_assert!(
            top_height >= 0.0 && bottom_height >= 0.0,
            "gap centre {} does not fit a {} gap",
            gap_y,
            config.pipe_gap
        );

        Self {
            x,
            width: config.pipe_width,
            gap_y,
            top_height,
            bottom_height,
            passed: false,
        }
    }

    pub fn update(&mut self, speed: f64) {
        self.x -= speed;
    }

    pub fn right_edge(&self) -> f64 {
        self.x + self.width
    }

    /// Fully left of the viewport.
    pub fn is_offscreen(&self) -> bool {
        self.right_edge() < 0.0
    }

    /// Mark the pipe passed once its right edge is left of `player_x`.
    ///
    /// Returns true only on the call that flips `passed`, so each pipe can
    /// score at most once.
    pub fn check_passed(&mut self, player_x: f64) -> bool {
        if !self.passed && self.right_edge() < player_x {
            self.passed = true;
            return true;
        }
        false
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            self.x,
            WINDOW_HEIGHT - self.bottom_height,
            self.width,
            self.bottom_height,
        )
    }

    pub fn collides_with(&self, body: &Rect) -> bool {
        self.top_rect().intersects(body) || self.bottom_rect().intersects(body)
    }
}

/// Session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// One play-through plus the best score seen so far.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub bird: Bird,
    /// Active pipes in spawn order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Never decreases while the process runs.
    pub high_score: u32,
    pub phase: GamePhase,
    /// Timestamp (ms) of the most recent spawn, or of session start.
    pub last_pipe_ms: u64,
}

impl GameSession {
    /// Fresh session at `now_ms`.
    ///
    /// # Panics
    ///
    /// `config` must pass [`GameConfig::validate`]. An inverted gap band
    /// panics at the first spawn. Use [`GameSession::try_new`] for a config
    /// that has not been checked yet.
    pub fn new(config: GameConfig, high_score: u32, now_ms: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid game config");
        Self {
            bird: Bird::new(&config),
            config,
            pipes: Vec::new(),
            score: 0,
            high_score,
            phase: GamePhase::Playing,
            last_pipe_ms: now_ms,
        }
    }

    /// Validate `config`, then start a fresh session at `now_ms`.
    pub fn try_new(config: GameConfig, high_score: u32, now_ms: u64) -> io::Result<Self> {
        config.validate()?;
        Ok(Self::new(config, high_score, now_ms))
    }

    /// Discard this play-through and start over, keeping the high score.
    pub fn restart(&mut self, now_ms: u64) {
        let config = self.config.clone();
        *self = Self::new(config, self.high_score, now_ms);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Number of active pipes already behind the bird.
    pub fn passed_count(&self) -> usize {
        self.pipes.iter().filter(|p| p.passed).count()
    }
}
