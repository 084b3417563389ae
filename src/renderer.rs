use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::config::{
    GLYPH_COLLISION, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GridSize,
};
use crate::game::{Cell, GameState};
use crate::input::Direction;

const SNAKE_STYLE: Style = Style::new().fg(Color::Green);
const HEAD_STYLE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);
const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);
const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    render_to_buffer(state, area, frame.buffer_mut());
}

/// Draws the score line, the board and, after a loss, the game-over banner.
pub fn render_to_buffer(state: &GameState, area: Rect, buf: &mut Buffer) {
    let [score_area, board_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    Paragraph::new(Line::from(format!(" Score: {}", state.score()))).render(score_area, buf);

    let block = Block::bordered();
    let inner = block.inner(board_area);
    block.render(board_area, buf);
    render_cells(state, inner, buf);

    if state.is_lost() {
        Paragraph::new(Line::from(" Game over! [Enter] restart, [Q] quit"))
            .style(Style::new().add_modifier(Modifier::BOLD))
            .render(status_area, buf);
    }
}

fn render_cells(state: &GameState, inner: Rect, buf: &mut Buffer) {
    let bounds = state.bounds();
    for y in 0..bounds.height {
        for x in 0..bounds.width {
            let Some((tx, ty)) = logical_to_terminal(inner, bounds, x, y) else {
                continue;
            };

            let (glyph, style) = match state.classify(x, y) {
                Cell::Empty => continue,
                Cell::Food => (GLYPH_FOOD, FOOD_STYLE),
                Cell::Snake if state.is_head(x, y) && state.is_lost() => {
                    (GLYPH_COLLISION, COLLISION_STYLE)
                }
                Cell::Snake if state.is_head(x, y) => (head_glyph(state.heading()), HEAD_STYLE),
                Cell::Snake => (GLYPH_SNAKE_BODY, SNAKE_STYLE),
            };
            buf.set_string(tx, ty, glyph, style);
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, x: u16, y: u16) -> Option<(u16, u16)> {
    if x >= bounds.width || y >= bounds.height {
        return None;
    }

    let tx = inner.x.checked_add(x)?;
    let ty = inner.y.checked_add(y)?;
    if tx >= inner.right() || ty >= inner.bottom() {
        return None;
    }

    Some((tx, ty))
}
