//! Terminal rendering.

pub mod game_common;
pub mod game_scene;

use crate::game::GameSession;
use ratatui::Frame;

/// Draw one frame of the game across the whole terminal.
pub fn draw_game(frame: &mut Frame, session: &GameSession) {
    let area = frame.size();
    game_scene::render_game_scene(frame, area, session);
}
