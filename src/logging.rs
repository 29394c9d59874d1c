//! File-backed logging.
//!
//! The terminal belongs to the game while it runs, so log records go to
//! `~/.flappy/flappy.log` instead of stderr. Filter with `RUST_LOG`
//! (default `info`).

use crate::constants::LOG_FILE;
use crate::utils::persistence::save_path;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

/// Start logging to the log file. Returns the file path on success.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
