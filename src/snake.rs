use std::collections::VecDeque;

use crate::grid::Position;

/// Snake body with the head at the front of the deque.
///
/// Advancing never mutates in place: each tick derives a new body from the
/// previous one, so an older game state stays valid after stepping.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a snake from explicit segments, head first.
    #[must_use]
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake needs at least one segment");
        Self { body }
    }

    /// Returns a new snake advanced to `new_head`.
    ///
    /// With `grow` set the old tail is kept and the body lengthens by one.
    #[must_use]
    pub fn advanced(&self, new_head: Position, grow: bool) -> Self {
        let mut body = VecDeque::with_capacity(self.body.len() + 1);
        body.push_back(new_head);
        body.extend(self.body.iter().copied());
        if !grow {
            let _ = body.pop_back();
        }
        Self { body }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true when `position` hits any segment behind the head.
    ///
    /// The check runs before the tail moves, so the tail cell still blocks.
    #[must_use]
    pub fn collides_with_body(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Snake;
    use crate::grid::Position;

    fn three_cell_snake() -> Snake {
        Snake::from_segments([
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ])
    }

    #[test]
    fn advanced_moves_head_and_drops_tail() {
        let snake = three_cell_snake();

        let moved = snake.advanced(Position::new(6, 5), false);

        assert_eq!(moved.head(), Position::new(6, 5));
        assert_eq!(moved.len(), 3);
        assert!(moved.occupies(Position::new(5, 5)));
        assert!(moved.occupies(Position::new(4, 5)));
        assert!(!moved.occupies(Position::new(3, 5)));
    }

    #[test]
    fn advanced_with_growth_keeps_tail() {
        let snake = three_cell_snake();

        let grown = snake.advanced(Position::new(6, 5), true);

        assert_eq!(grown.len(), 4);
        assert_eq!(grown.head(), Position::new(6, 5));
        assert_eq!(grown.tail(), Position::new(3, 5));
    }

    #[test]
    fn advanced_leaves_the_original_untouched() {
        let snake = three_cell_snake();

        let _ = snake.advanced(Position::new(6, 5), false);

        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.len(), 3);
        assert!(snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn body_collision_skips_the_head_cell() {
        let snake = three_cell_snake();

        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(snake.collides_with_body(Position::new(3, 5)));
        assert!(!snake.collides_with_body(Position::new(6, 5)));
    }

    #[test]
    fn single_segment_snake_has_no_body_to_hit() {
        let snake = Snake::from_segments([Position::new(2, 2)]);

        assert!(!snake.collides_with_body(Position::new(2, 2)));
        assert!(!snake.collides_with_body(Position::new(3, 2)));
    }

    #[test]
    fn occupies_covers_every_segment() {
        let snake = three_cell_snake();

        for segment in snake.segments() {
            assert!(snake.occupies(*segment));
        }
        assert!(!snake.occupies(Position::new(0, 0)));
    }
}
