use rand::Rng;

use crate::config::GRID_SIZE;
use crate::grid::Position;
use crate::snake::Snake;

/// Random placement attempts before falling back to a free-cell scan.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Picks a food cell that no snake segment occupies.
///
/// Samples uniformly at random for up to `MAX_PLACEMENT_ATTEMPTS` draws,
/// then enumerates the remaining free cells and draws one directly.
/// Returns `None` when the snake covers the whole board.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, snake: &Snake) -> Option<Position> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let candidates = free_cells(snake);
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

fn free_cells(snake: &Snake) -> Vec<Position> {
    let mut cells = Vec::new();
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let position = Position::new(x, y);
            if !snake.occupies(position) {
                cells.push(position);
            }
        }
    }
    cells
}
