// Viewport (logical units)
pub const WINDOW_WIDTH: f64 = 400.0;
pub const WINDOW_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 100.0;

// Frame timing
pub const FRAMES_PER_SECOND: u64 = 60;
pub const FRAME_INTERVAL_MS: u64 = 1000 / FRAMES_PER_SECOND;

// Bird physics (per frame)
pub const GRAVITY: f64 = 0.25;
pub const FLAP_STRENGTH: f64 = -7.0;
pub const BIRD_SIZE: f64 = 30.0;

// Pipes
pub const PIPE_SPEED: f64 = 3.0;
pub const PIPE_SPAWN_MS: u64 = 1500;
pub const PIPE_GAP: f64 = 150.0;
pub const PIPE_WIDTH: f64 = 50.0;
/// Gap centre is drawn from this inclusive band, 200 units clear of either edge.
pub const GAP_CENTER_MIN: u32 = 200;
pub const GAP_CENTER_MAX: u32 = 400;

// Save files under ~/.flappy/
pub const HIGH_SCORE_FILE: &str = "high_score.txt";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";
