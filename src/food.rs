use rand::Rng;
use rand::seq::IteratorRandom;

use crate::config::GridBounds;
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to scanning every free cell.
pub const MAX_RANDOM_SPAWN_ATTEMPTS: usize = 64;

/// Picks a food cell inside `area` that no snake segment occupies.
///
/// Draws cells uniformly first. When every draw lands on the snake, scans
/// the whole area and picks uniformly among the free cells. Returns `None`
/// only when the snake covers the entire area.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    area: GridBounds,
    snake: &Snake,
) -> Option<Position> {
    for _ in 0..MAX_RANDOM_SPAWN_ATTEMPTS {
        let candidate = Position::new(
            rng.gen_range(area.min_x..=area.max_x),
            rng.gen_range(area.min_y..=area.max_y),
        );
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    log::warn!(
        "food placement missed {MAX_RANDOM_SPAWN_ATTEMPTS} random draws, scanning {} cells",
        area.total_cells()
    );

    area.cells()
        .filter(|cell| !snake.occupies(*cell))
        .choose(rng)
}
