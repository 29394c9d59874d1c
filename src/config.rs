//! Tunable game parameters, loaded from `~/.flappy/config.json`.
//!
//! Every field is optional in the file; anything missing falls back to the
//! defaults in `constants`. The viewport itself is fixed and not configurable.

use crate::constants::*;
use crate::utils::persistence::{load_json_file_or_default, load_json_or_default};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Physics and obstacle parameters for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Downward velocity gained per frame.
    pub gravity: f64,
    /// Velocity assigned on flap (negative = upward).
    pub flap_strength: f64,
    /// Leftward pipe movement per frame.
    pub pipe_speed: f64,
    /// Minimum milliseconds between pipe spawns.
    pub pipe_spawn_ms: u64,
    /// Vertical opening between top and bottom pipe.
    pub pipe_gap: f64,
    pub pipe_width: f64,
    /// Inclusive band the gap centre is drawn from.
    pub gap_center_min: u32,
    pub gap_center_max: u32,
    /// Width and height of the square bird.
    pub bird_size: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            pipe_speed: PIPE_SPEED,
            pipe_spawn_ms: PIPE_SPAWN_MS,
            pipe_gap: PIPE_GAP,
            pipe_width: PIPE_WIDTH,
            gap_center_min: GAP_CENTER_MIN,
            gap_center_max: GAP_CENTER_MAX,
            bird_size: BIRD_SIZE,
        }
    }
}

impl GameConfig {
    /// Load from `~/.flappy/config.json`, falling back to defaults.
    ///
    /// A missing or malformed file is logged at info level, so set up logging
    /// first.
    pub fn load() -> Self {
        load_json_or_default(CONFIG_FILE)
    }

    /// Load from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        load_json_file_or_default(path)
    }

    /// Check that pipes built from this config always fit the viewport.
    ///
    /// A bad gap band would otherwise only show up as a negative pipe height
    /// at some random spawn, so this is meant to run once at startup.
    pub fn validate(&self) -> io::Result<()> {
        let half_gap = self.pipe_gap / 2.0;

        if !is_positive(self.pipe_gap) {
            return Err(invalid("pipe_gap must be positive"));
        }
        if !is_positive(self.pipe_width) {
            return Err(invalid("pipe_width must be positive"));
        }
        if !is_positive(self.pipe_speed) {
            return Err(invalid("pipe_speed must be positive"));
        }
        if !is_positive(self.bird_size) {
            return Err(invalid("bird_size must be positive"));
        }
        if self.bird_size >= self.pipe_gap {
            return Err(invalid(format!(
                "bird_size ({}) does not fit through pipe_gap ({})",
                self.bird_size, self.pipe_gap
            )));
        }
        if self.pipe_spawn_ms == 0 {
            return Err(invalid("pipe_spawn_ms must be non-zero"));
        }
        if self.gap_center_min > self.gap_center_max {
            return Err(invalid(format!(
                "gap_center_min ({}) exceeds gap_center_max ({})",
                self.gap_center_min, self.gap_center_max
            )));
        }
        if (self.gap_center_min as f64) - half_gap < 0.0 {
            return Err(invalid(format!(
                "gap centre {} leaves no room for a top pipe with gap {}",
                self.gap_center_min, self.pipe_gap
            )));
        }
        if (self.gap_center_max as f64) + half_gap > WINDOW_HEIGHT {
            return Err(invalid(format!(
                "gap centre {} leaves no room for a bottom pipe with gap {}",
                self.gap_center_max, self.pipe_gap
            )));
        }

        Ok(())
    }
}

/// False for zero, negatives and NaN.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg.into())
}
