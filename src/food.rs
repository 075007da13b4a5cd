use rand::Rng;

use crate::config::Arena;
use crate::snake::{Position, Snake};

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Places food on a free playable cell, or `None` when the snake fills
    /// the arena.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, arena: Arena, snake: &Snake) -> Option<Self> {
        spawn_position(rng, arena, snake).map(Self::new)
    }
}

/// Picks a playable cell not occupied by the snake, uniformly at random.
///
/// Candidates are enumerated in row-major order, so a generator that always
/// yields zero picks the first free cell.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    arena: Arena,
    snake: &Snake,
) -> Option<Position> {
    let candidates: Vec<Position> = arena
        .playable_cells()
        .filter(|position| !snake.occupies(*position))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
