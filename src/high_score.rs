//! Best-score storage.
//!
//! The store holds one non-negative integer. Reads never fail from the
//! caller's point of view: anything unreadable counts as 0.

use crate::constants::HIGH_SCORE_FILE;
use crate::utils::persistence::{read_u32_or_default, save_path, write_u32};
use std::io;
use std::path::{Path, PathBuf};

/// Read-or-default / write contract for the persisted high score.
pub trait ScoreStore {
    /// Stored high score, or 0 if there is none or it can't be read.
    fn load(&self) -> u32;

    /// Replace the stored high score.
    fn save(&mut self, score: u32) -> io::Result<()>;
}

/// High score kept as plain decimal text in a file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Store at `~/.flappy/high_score.txt`.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            path: save_path(HIGH_SCORE_FILE)?,
        })
    }

    /// Store at an explicit path. The parent directory must already exist.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        read_u32_or_default(&self.path)
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        write_u32(&self.path, score)
    }
}

/// In-memory store for headless sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub score: u32,
    /// Number of successful `save` calls.
    pub writes: u32,
}

impl MemoryScoreStore {
    pub fn with_score(score: u32) -> Self {
        Self { score, writes: 0 }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.score
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.score = score;
        self.writes += 1;
        Ok(())
    }
}
