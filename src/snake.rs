use std::collections::{HashSet, VecDeque};

use crate::cell::Cell;
use crate::grid::Grid;
use crate::heading::Heading;

/// What the candidate head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    Body,
}

/// Whether the snake survived its move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Alive,
    Collided(Collision),
}

/// Result of one [`Snake::advance`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AdvanceResult {
    pub outcome: Outcome,
    /// True when the new head landed on the food and the body grew.
    pub consumed: bool,
}

impl AdvanceResult {
    #[must_use]
    pub fn is_collision(self) -> bool {
        matches!(self.outcome, Outcome::Collided(_))
    }
}

/// Snake body (front is head) plus the heading it moved in last tick and
/// the heading requested for the next one.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    current_heading: Heading,
    pending_heading: Heading,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn new(segments: Vec<Cell>, heading: Heading) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            current_heading: heading,
            pending_heading: heading,
        }
    }

    /// Requests a heading for the next tick.
    ///
    /// A request that reverses the heading used on the last tick is dropped
    /// silently. Otherwise the latest request wins.
    pub fn set_heading(&mut self, requested: Heading) {
        if self.current_heading.is_opposite(requested) {
            return;
        }
        self.pending_heading = requested;
    }

    /// Applies one movement step.
    ///
    /// On collision the body is left untouched. Otherwise the candidate head
    /// is prepended and the tail is dropped unless the head landed on `food`.
    pub fn advance(&mut self, grid: Grid, food: Cell) -> AdvanceResult {
        self.current_heading = self.pending_heading;
        let candidate = self.head().offset(self.current_heading);
        let grows = candidate == food;

        if let Some(collision) = self.collision_at(grid, candidate, grows) {
            return AdvanceResult {
                outcome: Outcome::Collided(collision),
                consumed: false,
            };
        }

        self.body.push_front(candidate);
        if !grows {
            let _ = self.body.pop_back();
        }

        AdvanceResult {
            outcome: Outcome::Alive,
            consumed: grows,
        }
    }

    /// Tests `candidate` against the wall ring and the body.
    ///
    /// The tail only counts when the snake grows this tick, since otherwise
    /// it is vacated by the same move.
    fn collision_at(&self, grid: Grid, candidate: Cell, grows: bool) -> Option<Collision> {
        if !grid.contains(candidate) || grid.is_boundary(candidate) {
            return Some(Collision::Wall);
        }

        let checked = if grows {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(checked).any(|segment| *segment == candidate) {
            return Some(Collision::Body);
        }

        None
    }

    /// Returns the head position the next tick would produce.
    #[must_use]
    pub fn candidate_head(&self) -> Cell {
        self.head().offset(self.pending_heading)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns the set of cells covered by the body.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Heading applied on the most recent tick.
    #[must_use]
    pub fn current_heading(&self) -> Heading {
        self.current_heading
    }

    /// Heading that the next tick will apply.
    #[must_use]
    pub fn pending_heading(&self) -> Heading {
        self.pending_heading
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
