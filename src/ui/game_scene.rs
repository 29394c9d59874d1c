//! Flappy Bird scene rendering.
//!
//! Uses a cell buffer for per-character color control. The 400×600 logical
//! viewport is scaled onto whatever cells the play field has, shapes are
//! painted back to front, and the buffer is stamped row-by-row as Paragraph
//! widgets.

use super::game_common::{create_game_layout, render_status_bar};
use crate::constants::{GROUND_HEIGHT, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::game::{GamePhase, GameSession, Rect as GameRect};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

const SKY: Color = Color::Rgb(135, 206, 235);
const PIPE: Color = Color::Rgb(0, 255, 0);
const BIRD: Color = Color::Rgb(255, 255, 0);
const GROUND: Color = Color::Rgb(101, 67, 33);
const TEXT: Color = Color::Black;

pub const GAME_OVER_PROMPT: &str = "Game Over! Press R to restart";

/// Render the whole game: frame, play field and status bar.
pub fn render_game_scene(frame: &mut Frame, area: Rect, session: &GameSession) {
    let layout = create_game_layout(frame, area, " Flappy Bird ", Color::Cyan, 4);

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session);
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    fn solid(bg: Color) -> Self {
        Self { ch: ' ', fg: bg, bg }
    }
}

/// Play-field cells plus the logical→cell scale.
struct Canvas {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    x_scale: f64,
    y_scale: f64,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::solid(SKY); width as usize]; height as usize],
            width: width as usize,
            height: height as usize,
            x_scale: width as f64 / WINDOW_WIDTH,
            y_scale: height as f64 / WINDOW_HEIGHT,
        }
    }

    /// Paint a logical rectangle, clipped to the play field.
    fn fill(&mut self, rect: &GameRect, color: Color) {
        let cols = cell_span(rect.left(), rect.right(), self.x_scale, self.width);
        let rows = cell_span(rect.top(), rect.bottom(), self.y_scale, self.height);
        for row in rows {
            for col in cols.clone() {
                self.cells[row][col] = Cell::solid(color);
            }
        }
    }

    /// Write text over whatever background is already there.
    fn text(&mut self, row: usize, col: usize, text: &str) {
        if row >= self.height {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let col = col + i;
            if col >= self.width {
                break;
            }
            let cell = &mut self.cells[row][col];
            cell.ch = ch;
            cell.fg = TEXT;
        }
    }

    fn centered_text(&mut self, row: usize, text: &str) {
        let len = text.chars().count();
        let col = self.width.saturating_sub(len) / 2;
        self.text(row, col, text);
    }
}

/// Map the logical interval `[start, end)` to cell indices.
///
/// Anything with positive extent that is on screen covers at least one cell,
/// so a thin pipe never vanishes at small terminal sizes.
fn cell_span(start: f64, end: f64, scale: f64, limit: usize) -> Range<usize> {
    if end <= start || end <= 0.0 {
        return 0..0;
    }
    let lo = (start * scale).round().max(0.0);
    let hi = (end * scale).round().min(limit as f64);
    if lo >= limit as f64 {
        return 0..0;
    }
    let lo = lo as usize;
    let hi = (hi.max(0.0) as usize).max(lo + 1).min(limit);
    lo..hi
}

/// Render the play field in draw order: sky, pipes, bird, ground, HUD text
/// and, after a crash, the restart prompt.
fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let mut canvas = Canvas::new(area.width, area.height);

    for pipe in &session.pipes {
        canvas.fill(&pipe.top_rect(), PIPE);
        canvas.fill(&pipe.bottom_rect(), PIPE);
    }

    canvas.fill(&session.bird.rect(), BIRD);

    canvas.fill(
        &GameRect::new(
            0.0,
            WINDOW_HEIGHT - GROUND_HEIGHT,
            WINDOW_WIDTH,
            GROUND_HEIGHT,
        ),
        GROUND,
    );

    canvas.text(0, 1, &format!("Score: {}", session.score));
    canvas.text(1, 1, &format!("High Score: {}", session.high_score));

    if session.phase == GamePhase::GameOver {
        canvas.centered_text(canvas.height / 2, GAME_OVER_PROMPT);
    }

    // ── Render buffer to terminal ─────────────────────────────────────
    for (row_idx, row_data) in canvas.cells.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let line = Paragraph::new(Line::from(spans));
        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(line, row_area);
    }
}

/// Render the status bar below the play field.
fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &GameSession) {
    match session.phase {
        GamePhase::Playing => render_status_bar(
            frame,
            area,
            "Fly through the gaps!",
            Color::Green,
            &[("[Space/Up]", "Flap"), ("[Q/Esc]", "Quit")],
        ),
        GamePhase::GameOver => render_status_bar(
            frame,
            area,
            &format!("Crashed with {} points", session.score),
            Color::Red,
            &[("[R]", "Restart"), ("[Q/Esc]", "Quit")],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Pipe;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(session: &GameSession, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_game_scene(frame, area, session);
            })
            .unwrap();
        terminal
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn count_bg(terminal: &Terminal<TestBackend>, color: Color) -> usize {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .filter(|cell| cell.bg == color)
            .count()
    }

    #[test]
    fn test_cell_span_scaling() {
        // 40 cells across 400 units
        assert_eq!(cell_span(0.0, 400.0, 0.1, 40), 0..40);
        assert_eq!(cell_span(100.0, 150.0, 0.1, 40), 10..15);
        // Clipped at both ends
        assert_eq!(cell_span(-50.0, 20.0, 0.1, 40), 0..2);
        assert_eq!(cell_span(380.0, 450.0, 0.1, 40), 38..40);
    }

    #[test]
    fn test_cell_span_thin_and_hidden_shapes() {
        // Too thin to cover a full cell still gets one
        assert_eq!(cell_span(100.0, 102.0, 0.1, 40), 10..11);
        // Off screen or empty
        assert_eq!(cell_span(-60.0, -10.0, 0.1, 40), 0..0);
        assert_eq!(cell_span(410.0, 460.0, 0.1, 40), 0..0);
        assert_eq!(cell_span(50.0, 50.0, 0.1, 40), 0..0);
    }

    #[test]
    fn test_hud_shows_scores() {
        let mut session = GameSession::new(GameConfig::default(), 12, 0);
        session.score = 3;
        let terminal = render(&session, 42, 34);
        let text = screen_text(&terminal);
        assert!(text.contains("Score: 3"));
        assert!(text.contains("High Score: 12"));
        assert!(!text.contains(GAME_OVER_PROMPT));
    }

    #[test]
    fn test_game_over_prompt_only_after_crash() {
        let mut session = GameSession::new(GameConfig::default(), 0, 0);
        session.phase = GamePhase::GameOver;
        let terminal = render(&session, 42, 34);
        let text = screen_text(&terminal);
        assert!(text.contains(GAME_OVER_PROMPT));
        assert!(text.contains("Restart"));
    }

    #[test]
    fn test_pipes_bird_and_ground_are_painted() {
        let config = GameConfig::default();
        let mut session = GameSession::new(config.clone(), 0, 0);
        let terminal = render(&session, 42, 34);
        assert_eq!(count_bg(&terminal, PIPE), 0);
        assert!(count_bg(&terminal, BIRD) > 0);
        assert!(count_bg(&terminal, GROUND) > 0);

        session
            .pipes
            .push(Pipe::with_gap_center(250.0, 300.0, &config));
        let terminal = render(&session, 42, 34);
        assert!(count_bg(&terminal, PIPE) > 0);
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let session = GameSession::new(GameConfig::default(), 0, 0);
        render(&session, 8, 5);
        render(&session, 1, 1);
    }
}
