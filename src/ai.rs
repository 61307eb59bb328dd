use crate::config::GRID_SIZE;
use crate::game::GameState;
use crate::grid::{Direction, GameMode, Position, is_wall_collision, next_head};

/// Candidate moves, in the order ties are resolved.
const CANDIDATES: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Picks the next move for the spectator AI.
///
/// One-step greedy: drop the reversal and every move that dies on the next
/// tick, then take the candidate whose resulting head cell is closest to
/// the food. Ties keep the earliest candidate. When no safe move remains
/// the current heading is returned and the game ends on the next step.
#[must_use]
pub fn select_move(state: &GameState) -> Direction {
    let head = state.snake.head();

    CANDIDATES
        .iter()
        .copied()
        .filter(|&candidate| candidate != state.direction.opposite())
        .filter_map(|candidate| {
            let next = next_head(head, candidate, state.mode);
            if state.mode == GameMode::Walls && is_wall_collision(next) {
                return None;
            }
            if state.snake.collides_with_body(next) {
                return None;
            }
            Some((candidate, distance(next, state.food, state.mode)))
        })
        .min_by_key(|&(_, dist)| dist)
        .map(|(candidate, _)| candidate)
        .unwrap_or(state.direction)
}

/// Distance between two cells under the session's wall behavior.
fn distance(a: Position, b: Position, mode: GameMode) -> i32 {
    match mode {
        GameMode::Walls => (a.x - b.x).abs() + (a.y - b.y).abs(),
        GameMode::Passthrough => toroidal_axis(a.x - b.x) + toroidal_axis(a.y - b.y),
    }
}

fn toroidal_axis(delta: i32) -> i32 {
    let direct = delta.abs();
    direct.min(GRID_SIZE - direct)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::select_move;
    use crate::game::GameState;
    use crate::grid::{Direction, GameMode, Position};
    use crate::snake::Snake;

    fn state(
        segments: Vec<Position>,
        direction: Direction,
        food: Position,
        mode: GameMode,
    ) -> GameState {
        GameState {
            snake: Snake::from_segments(segments),
            food,
            direction,
            score: 0,
            game_over: false,
            mode,
            outcome: None,
        }
    }

    #[test]
    fn heads_straight_for_the_food() {
        let state = state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(5, 2),
            GameMode::Walls,
        );

        assert_eq!(select_move(&state), Direction::Up);
    }

    #[test]
    fn never_picks_the_reversal_even_when_food_is_behind() {
        // Food directly behind the head; UP, DOWN and RIGHT tie instead.
        let state = state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(0, 5),
            GameMode::Walls,
        );

        let selected = select_move(&state);

        assert_ne!(selected, Direction::Left);
        assert_eq!(selected, Direction::Up);
    }

    #[test]
    fn wall_behavior_decides_the_edge_move() {
        let segments = vec![Position::new(19, 10), Position::new(18, 10)];
        let food = Position::new(0, 10);

        // Walls: stepping right dies, so the detour along the edge wins.
        let walls = state(
            segments.clone(),
            Direction::Right,
            food,
            GameMode::Walls,
        );
        assert_eq!(select_move(&walls), Direction::Up);

        // Pass-through: stepping right wraps straight onto the food.
        let passthrough = state(segments, Direction::Right, food, GameMode::Passthrough);
        assert_eq!(select_move(&passthrough), Direction::Right);
    }

    #[test]
    fn detours_around_its_own_body() {
        // Body hooks over the head and blocks UP, the straight-line move.
        let state = state(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 4),
                Position::new(5, 4),
                Position::new(6, 4),
            ],
            Direction::Right,
            Position::new(5, 0),
            GameMode::Walls,
        );

        assert_eq!(select_move(&state), Direction::Down);
    }

    #[test]
    fn trapped_snake_keeps_its_heading() {
        // Cornered at (0,0): walls above and left, body right and below.
        let state = state(
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0),
            ],
            Direction::Up,
            Position::new(9, 9),
            GameMode::Walls,
        );

        assert_eq!(select_move(&state), Direction::Up);
    }

    #[test]
    fn closes_the_distance_every_step_on_an_open_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = state(
            vec![Position::new(2, 2), Position::new(1, 2)],
            Direction::Right,
            Position::new(10, 9),
            GameMode::Walls,
        );

        // Manhattan distance 15; the greedy walk shrinks it by one per step
        // and lands on the food with the fifteenth move.
        for _ in 0..15 {
            let before = manhattan(state.snake.head(), state.food);
            let food = state.food;
            state = state.step(Some(select_move(&state)), &mut rng);
            if state.food == food {
                assert_eq!(manhattan(state.snake.head(), state.food), before - 1);
            }
        }

        assert_eq!(state.score, 10);
        assert!(!state.game_over);
    }

    fn manhattan(a: Position, b: Position) -> i32 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    #[test]
    fn equal_candidates_resolve_in_declaration_order() {
        // DOWN and RIGHT both close on the diagonal food; DOWN is declared first.
        let state = state(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(7, 7),
            GameMode::Walls,
        );

        assert_eq!(select_move(&state), Direction::Down);
    }
}
