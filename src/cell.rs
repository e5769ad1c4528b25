use serde::{Deserialize, Serialize};

use crate::heading::Heading;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so that a candidate head one step past the edge
/// is still representable; such a cell is simply not contained by the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the neighbouring cell one step in `heading`.
    #[must_use]
    pub fn offset(self, heading: Heading) -> Self {
        let (dc, dr) = heading.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }
}
