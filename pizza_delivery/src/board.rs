use rand::seq::IteratorRandom;
use rand::Rng;

use crate::{Cell, CellSet};

/// The pending deliveries and the obstacles on the board.
///
/// Team positions are not part of the board, they live in the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Board {
    pub deliveries: CellSet,
    /// Obstacles are never removed once placed.
    pub obstacles: CellSet,
}

impl Board {
    /// A board with `delivery_count` freshly generated deliveries and no obstacles.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        delivery_count: usize,
        team_positions: CellSet,
    ) -> Self {
        let deliveries = generate_deliveries(
            rng,
            delivery_count,
            CellSet::new(),
            CellSet::new(),
            team_positions,
        );
        Self {
            deliveries,
            obstacles: CellSet::new(),
        }
    }

    pub fn is_delivery(&self, cell: Cell) -> bool {
        self.deliveries.contains(cell)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(cell)
    }
}

/// Cells where a new delivery or obstacle may appear: everything except the
/// center, the team positions and the cells in `taken`.
pub fn free_cells(taken: CellSet, team_positions: CellSet) -> CellSet {
    CellSet::full()
        .remove(Cell::CENTER)
        .difference(taken)
        .difference(team_positions)
}

/// Tops up `existing` to `target_count` deliveries.
///
/// New deliveries are picked uniformly among the free cells, i.e. not the
/// center, not an existing delivery, not an obstacle and not a team position.
/// If there are not enough free cells, the set is filled as far as possible.
pub fn generate_deliveries<R: Rng + ?Sized>(
    rng: &mut R,
    target_count: usize,
    existing: CellSet,
    obstacles: CellSet,
    team_positions: CellSet,
) -> CellSet {
    let mut deliveries = existing;
    while deliveries.len() < target_count {
        let free = free_cells(deliveries | obstacles, team_positions);
        match free.into_iter().choose(rng) {
            Some(cell) => deliveries = deliveries.insert(cell),
            None => break,
        }
    }
    deliveries
}

/// Picks a cell for one new obstacle.
///
/// Obstacles never land on the center, a delivery, another obstacle or a team.
/// Returns `None` once the free cells have shrunk to `reserve`, so that there
/// is always room left to regenerate deliveries.
pub fn generate_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    deliveries: CellSet,
    obstacles: CellSet,
    team_positions: CellSet,
    reserve: usize,
) -> Option<Cell> {
    let free = free_cells(deliveries | obstacles, team_positions);
    if free.len() <= reserve {
        return None;
    }
    free.into_iter().choose(rng)
}
