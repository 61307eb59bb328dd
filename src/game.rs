use std::time::Duration;

use rand::Rng;

use crate::config::{
    BASE_TICK_INTERVAL_MS, GRID_SIZE, MIN_TICK_INTERVAL_MS, POINTS_PER_FOOD, SPEEDUP_MS,
    SPEEDUP_POINTS,
};
use crate::food::place_food;
use crate::grid::{Direction, GameMode, Position, direction_change_is_valid, is_wall_collision, next_head};
use crate::snake::Snake;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOutcome {
    WallCollision,
    SelfCollision,
    /// The snake covered every cell and no food could be placed.
    BoardFull,
}

/// Complete state of one game, treated as an immutable value.
///
/// Stepping borrows the current state and returns the successor; the old
/// state stays intact for rendering, diffing, or replay.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub game_over: bool,
    pub mode: GameMode,
    pub outcome: Option<GameOutcome>,
}

impl GameState {
    /// Creates the opening state: a three-segment snake on the center row,
    /// heading right, with food placed on a free cell.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Self {
        let center = GRID_SIZE / 2;
        let snake = Snake::from_segments([
            Position::new(center, center),
            Position::new(center - 1, center),
            Position::new(center - 2, center),
        ]);
        let food = place_food(rng, &snake).expect("fresh board always has free cells");

        Self {
            snake,
            food,
            direction: Direction::Right,
            score: 0,
            game_over: false,
            mode,
            outcome: None,
        }
    }

    /// Advances the game by one movement tick and returns the new state.
    ///
    /// A `requested` direction is applied only when it is not a reversal of
    /// the current heading. A move that dies leaves every other field as it
    /// was, so the losing move is never committed to the board. A finished
    /// game is absorbing and steps to itself.
    #[must_use]
    pub fn step<R: Rng + ?Sized>(&self, requested: Option<Direction>, rng: &mut R) -> Self {
        if self.game_over {
            return self.clone();
        }

        let heading = match requested {
            Some(next) if direction_change_is_valid(self.direction, next) => next,
            _ => self.direction,
        };

        let new_head = next_head(self.snake.head(), heading, self.mode);

        if self.mode == GameMode::Walls && is_wall_collision(new_head) {
            return Self {
                game_over: true,
                outcome: Some(GameOutcome::WallCollision),
                ..self.clone()
            };
        }

        if self.snake.collides_with_body(new_head) {
            return Self {
                game_over: true,
                outcome: Some(GameOutcome::SelfCollision),
                ..self.clone()
            };
        }

        let ate_food = new_head == self.food;
        let snake = self.snake.advanced(new_head, ate_food);
        let score = if ate_food {
            self.score + POINTS_PER_FOOD
        } else {
            self.score
        };

        let (food, game_over, outcome) = if ate_food {
            match place_food(rng, &snake) {
                Some(food) => (food, false, None),
                // Nowhere left to put food: the snake owns the board.
                None => (self.food, true, Some(GameOutcome::BoardFull)),
            }
        } else {
            (self.food, false, None)
        };

        Self {
            snake,
            food,
            direction: heading,
            score,
            game_over,
            mode: self.mode,
            outcome,
        }
    }
}

/// Tick interval for the current score.
///
/// Every `SPEEDUP_POINTS` points shave `SPEEDUP_MS` off the base interval,
/// floored at `MIN_TICK_INTERVAL_MS`.
#[must_use]
pub fn tick_interval_for_score(score: u32) -> Duration {
    let levels = u64::from(score / SPEEDUP_POINTS);
    let reduced = BASE_TICK_INTERVAL_MS.saturating_sub(levels * SPEEDUP_MS);
    Duration::from_millis(reduced.max(MIN_TICK_INTERVAL_MS))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{GameOutcome, GameState, tick_interval_for_score};
    use crate::config::{GRID_SIZE, POINTS_PER_FOOD};
    use crate::grid::{Direction, GameMode, Position};
    use crate::snake::Snake;

    fn walls_state(segments: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState {
            snake: Snake::from_segments(segments),
            food,
            direction,
            score: 0,
            game_over: false,
            mode: GameMode::Walls,
            outcome: None,
        }
    }

    #[test]
    fn opening_state_has_three_segments_heading_right() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::new(GameMode::Walls, &mut rng);
        let center = GRID_SIZE / 2;

        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(center, center));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn step_moves_one_cell_and_keeps_length() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = GameState::new(GameMode::Walls, &mut rng);

        let next = state.step(None, &mut rng);

        assert_eq!(next.snake.head().x, state.snake.head().x + 1);
        assert_eq!(next.snake.len(), state.snake.len());
        assert_eq!(next.score, 0);
        assert!(!next.game_over);
    }

    #[test]
    fn step_leaves_the_previous_state_intact() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::new(GameMode::Walls, &mut rng);
        let before = state.clone();

        let _ = state.step(Some(Direction::Up), &mut rng);

        assert_eq!(state, before);
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = GameState::new(GameMode::Walls, &mut rng);
        assert_eq!(state.direction, Direction::Right);

        let next = state.step(Some(Direction::Left), &mut rng);

        assert_eq!(next.direction, Direction::Right);
        assert_eq!(next.snake.head().x, state.snake.head().x + 1);
    }

    #[test]
    fn perpendicular_turn_is_applied() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState::new(GameMode::Walls, &mut rng);
        let head = state.snake.head();

        let next = state.step(Some(Direction::Up), &mut rng);

        assert_eq!(next.direction, Direction::Up);
        assert_eq!(next.snake.head(), Position::new(head.x, head.y - 1));
    }

    #[test]
    fn eating_food_grows_snake_and_scores() {
        let mut rng = StdRng::seed_from_u64(6);
        let state = walls_state(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
            ],
            Direction::Right,
            Position::new(6, 5),
        );

        let next = state.step(None, &mut rng);

        assert_eq!(next.score, POINTS_PER_FOOD);
        assert_eq!(next.snake.len(), 4);
        assert_eq!(next.snake.head(), Position::new(6, 5));
        assert_ne!(next.food, Position::new(6, 5));
        assert!(!next.snake.occupies(next.food));
    }

    #[test]
    fn missing_food_keeps_score_and_food() {
        let mut rng = StdRng::seed_from_u64(7);
        let food = Position::new(0, 0);
        let state = walls_state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            food,
        );

        let next = state.step(None, &mut rng);

        assert_eq!(next.food, food);
        assert_eq!(next.score, 0);
    }

    #[test]
    fn walls_mode_kills_at_the_edge() {
        let mut rng = StdRng::seed_from_u64(8);
        let state = walls_state(
            vec![Position::new(GRID_SIZE - 1, 5), Position::new(GRID_SIZE - 2, 5)],
            Direction::Right,
            Position::new(0, 0),
        );

        let next = state.step(None, &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::WallCollision));
    }

    #[test]
    fn fatal_move_is_not_committed() {
        let mut rng = StdRng::seed_from_u64(9);
        let state = walls_state(
            vec![Position::new(5, 0), Position::new(5, 1)],
            Direction::Up,
            Position::new(0, 0),
        );

        let next = state.step(Some(Direction::Up), &mut rng);

        assert!(next.game_over);
        assert_eq!(next.snake, state.snake);
        assert_eq!(next.direction, state.direction);
        assert_eq!(next.score, state.score);
        assert_eq!(next.food, state.food);
    }

    #[test]
    fn passthrough_mode_wraps_at_the_edge() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut state = walls_state(
            vec![Position::new(GRID_SIZE - 1, 5), Position::new(GRID_SIZE - 2, 5)],
            Direction::Right,
            Position::new(0, 0),
        );
        state.mode = GameMode::Passthrough;

        let next = state.step(None, &mut rng);

        assert!(!next.game_over);
        assert_eq!(next.snake.head(), Position::new(0, 5));
    }

    #[test]
    fn running_into_the_body_is_fatal() {
        let mut rng = StdRng::seed_from_u64(11);
        // Head at (2,2) with the body curling back under it.
        let state = walls_state(
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Up,
            Position::new(9, 9),
        );

        let next = state.step(Some(Direction::Right), &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::SelfCollision));
    }

    #[test]
    fn chasing_the_tail_cell_is_fatal() {
        let mut rng = StdRng::seed_from_u64(12);
        // The tail at (3,2) has not moved when the check runs.
        let state = walls_state(
            vec![
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Up,
            Position::new(9, 9),
        );

        let next = state.step(Some(Direction::Right), &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::SelfCollision));
    }

    #[test]
    fn finished_game_is_absorbing() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut state = walls_state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(0, 0),
        );
        state.game_over = true;
        state.outcome = Some(GameOutcome::WallCollision);

        let next = state.step(Some(Direction::Up), &mut rng);

        assert_eq!(next, state);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut rng = StdRng::seed_from_u64(14);
        // Snake covers all but one cell; the food sits on that last cell.
        let mut segments = Vec::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if !(x == 0 && y == 0) {
                    segments.push(Position::new(x, y));
                }
            }
        }
        // Head right of the gap, moving left into it.
        segments.retain(|p| *p != Position::new(1, 0));
        segments.insert(0, Position::new(1, 0));
        let state = walls_state(segments, Direction::Left, Position::new(0, 0));

        let next = state.step(None, &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::BoardFull));
        assert_eq!(next.score, POINTS_PER_FOOD);
        assert_eq!(next.snake.len(), GRID_SIZE as usize * GRID_SIZE as usize);
    }

    #[test]
    fn speed_curve_flattens_at_the_floor() {
        assert_eq!(tick_interval_for_score(0).as_millis(), 150);
        assert_eq!(tick_interval_for_score(40).as_millis(), 150);
        assert_eq!(tick_interval_for_score(50).as_millis(), 140);
        assert_eq!(tick_interval_for_score(120).as_millis(), 130);
        assert_eq!(tick_interval_for_score(500).as_millis(), 50);
        assert_eq!(tick_interval_for_score(10_000).as_millis(), 50);
    }
}
