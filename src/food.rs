use std::collections::HashSet;

use log::warn;
use rand::Rng;

use crate::cell::Cell;
use crate::grid::Grid;

/// Random samples tried before falling back to a free-cell scan.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1024;

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Moves the food to a free interior cell.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: Grid, occupied: &HashSet<Cell>) {
        self.position = relocate(rng, grid, occupied);
    }
}

/// Picks a uniformly random interior cell that is not in `occupied`.
///
/// Sampling is bounded by [`MAX_PLACEMENT_ATTEMPTS`]; after that the free
/// interior cells are enumerated and one is drawn from them.
///
/// # Panics
///
/// Panics when every interior cell is occupied.
#[must_use]
pub fn relocate<R: Rng + ?Sized>(rng: &mut R, grid: Grid, occupied: &HashSet<Cell>) -> Cell {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = grid.random_interior_cell(rng);
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }

    warn!(
        "food placement fell back to a free-cell scan ({} of {} interior cells occupied)",
        occupied.len(),
        grid.interior_cells()
    );

    let candidates: Vec<Cell> = grid
        .interior()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    assert!(
        !candidates.is_empty(),
        "relocate: no free interior cells on the board ({}×{})",
        grid.width,
        grid.height,
    );

    candidates[rng.gen_range(0..candidates.len())]
}
