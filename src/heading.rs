use serde::{Deserialize, Serialize};

/// Cardinal movement directions for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true when `other` would reverse this heading in place.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        other == self.opposite()
    }

    /// Column/row delta of one step in this heading.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Heading;

    #[test]
    fn opposite_heading_is_correct() {
        assert_eq!(Heading::Up.opposite(), Heading::Down);
        assert_eq!(Heading::Down.opposite(), Heading::Up);
        assert_eq!(Heading::Left.opposite(), Heading::Right);
        assert_eq!(Heading::Right.opposite(), Heading::Left);
    }

    #[test]
    fn reversal_detection() {
        assert!(Heading::Right.is_opposite(Heading::Left));
        assert!(Heading::Up.is_opposite(Heading::Down));

        assert!(!Heading::Up.is_opposite(Heading::Left));
        assert!(!Heading::Up.is_opposite(Heading::Up));
    }

    #[test]
    fn left_and_right_move_in_opposite_columns() {
        let (left_dc, _) = Heading::Left.delta();
        let (right_dc, _) = Heading::Right.delta();

        assert_eq!(left_dc, -1);
        assert_eq!(right_dc, 1);
    }
}
