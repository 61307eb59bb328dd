use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL, GRID_SIZE, Theme,
};
use crate::game::GameState;
use crate::grid::{Direction, Position};

/// Renders the bordered play field centered in `area` and returns the rect
/// it occupied, so menus can be stacked over it.
pub fn render_board(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) -> Rect {
    let board = board_area(area);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    board
}

/// Centers the fixed-size board inside the available area.
fn board_area(area: Rect) -> Rect {
    let grid = GRID_SIZE as u16;
    let width = (grid * CELL_WIDTH + 2).min(area.width);
    let height = (grid + 2).min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let tail = state.snake.tail();

    let buffer = frame.buffer_mut();
    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(state.direction),
                Style::new()
                    .fg(theme.snake_head)
                    .bg(theme.play_bg)
                    .add_modifier(Modifier::BOLD),
            );
        } else if *segment == tail {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_TAIL,
                Style::new().fg(theme.snake_tail).bg(theme.play_bg),
            );
        } else {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_BODY,
                Style::new().fg(theme.snake_body).bg(theme.play_bg),
            );
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

/// Maps a logical cell to the terminal column/row of its left character.
/// Cells outside the visible inner rect map to `None` and are skipped.
fn logical_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    if position.x < 0 || position.y < 0 {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::logical_to_terminal;
    use crate::config::CELL_WIDTH;
    use crate::grid::Position;

    #[test]
    fn cells_map_to_two_column_slots() {
        let inner = Rect::new(5, 3, 40, 20);

        assert_eq!(logical_to_terminal(inner, Position::new(0, 0)), Some((5, 3)));
        assert_eq!(
            logical_to_terminal(inner, Position::new(3, 2)),
            Some((5 + 3 * CELL_WIDTH, 5))
        );
    }

    #[test]
    fn offscreen_cells_are_skipped() {
        let inner = Rect::new(0, 0, 40, 20);

        assert_eq!(logical_to_terminal(inner, Position::new(-1, 0)), None);
        assert_eq!(logical_to_terminal(inner, Position::new(0, -1)), None);
        assert_eq!(logical_to_terminal(inner, Position::new(20, 0)), None);
        assert_eq!(logical_to_terminal(inner, Position::new(0, 20)), None);
    }

    #[test]
    fn cells_clipped_by_a_small_terminal_are_skipped() {
        let inner = Rect::new(0, 0, 10, 4);

        assert!(logical_to_terminal(inner, Position::new(4, 0)).is_some());
        assert_eq!(logical_to_terminal(inner, Position::new(5, 0)), None);
        assert_eq!(logical_to_terminal(inner, Position::new(0, 4)), None);
    }
}
