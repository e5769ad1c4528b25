use rand::Rng;

use crate::cell::Cell;

/// Logical grid dimensions in cells.
///
/// The outermost ring of cells is wall: it is part of the grid but a snake
/// head entering it collides, and food is never placed on it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    pub width: u16,
    pub height: u16,
}

impl Grid {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && cell.col < i32::from(self.width)
            && cell.row < i32::from(self.height)
    }

    /// Returns true when the cell lies on the outermost ring.
    #[must_use]
    pub fn is_boundary(self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.col == 0
                || cell.row == 0
                || cell.col == i32::from(self.width) - 1
                || cell.row == i32::from(self.height) - 1)
    }

    /// Returns true for cells inside the boundary ring.
    #[must_use]
    pub fn is_interior(self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_boundary(cell)
    }

    /// Returns the number of cells strictly inside the boundary ring.
    #[must_use]
    pub fn interior_cells(self) -> usize {
        usize::from(self.width.saturating_sub(2)) * usize::from(self.height.saturating_sub(2))
    }

    /// Iterates interior cells row by row.
    pub fn interior(self) -> impl Iterator<Item = Cell> {
        let cols = 1..i32::from(self.width) - 1;
        (1..i32::from(self.height) - 1)
            .flat_map(move |row| cols.clone().map(move |col| Cell::new(col, row)))
    }

    /// Samples a uniformly random interior cell.
    ///
    /// The grid must have an interior (both dimensions at least 3).
    pub fn random_interior_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        debug_assert!(self.interior_cells() > 0);

        Cell::new(
            rng.gen_range(1..i32::from(self.width) - 1),
            rng.gen_range(1..i32::from(self.height) - 1),
        )
    }
}
