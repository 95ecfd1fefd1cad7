use rand::Rng;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The square field the snake moves within
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,
}

impl Grid {
    pub(crate) fn new(size: u16) -> Grid {
        Grid { size }
    }

    /// Number of cells along each side
    pub(crate) fn size(self) -> u16 {
        self.size
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    /// Return a cell chosen uniformly at random from the whole grid
    pub(super) fn random_cell<R: Rng>(self, rng: &mut R) -> Position {
        Position::new(rng.random_range(0..self.size), rng.random_range(0..self.size))
    }

    /// Pick a cell for the food that is not occupied by any of the given
    /// snake segments.
    ///
    /// This samples cells until it finds a free one, so it never returns if
    /// the snake covers the entire grid.
    pub(super) fn place_food<R: Rng>(self, snake: &VecDeque<Position>, rng: &mut R) -> Position {
        loop {
            let candidate = self.random_cell(rng);
            if !snake.contains(&candidate) {
                return candidate;
            }
        }
    }
}
