use super::direction::Direction;
use super::grid::Grid;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The first of `segments`, kept apart so that it never has to be
    /// looked up in a possibly-empty deque
    head: Position,

    /// The cells occupied by the snake, head first
    pub(super) segments: VecDeque<Position>,

    /// The direction applied on the most recent tick
    pub(super) direction: Direction,

    /// The direction to apply on the next tick
    pub(super) pending: Direction,
}

impl Snake {
    /// Create the snake that every round starts with: three segments ending
    /// at [`INITIAL_SNAKE`][consts::INITIAL_SNAKE], facing right
    pub(super) fn new() -> Snake {
        let [head, ..] = consts::INITIAL_SNAKE;
        Snake {
            head,
            segments: VecDeque::from(consts::INITIAL_SNAKE),
            direction: Direction::Right,
            pending: Direction::Right,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the cells occupied by the snake, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(super) fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Set the direction for the next tick.  Requests to turn back on the
    /// direction of the last tick are refused; returns whether the request
    /// was accepted.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.pending = direction;
            true
        }
    }

    /// Commit the pending direction and return where the head would move to
    /// within `grid`, or `None` if that's into a wall
    pub(super) fn next_head(&mut self, grid: Grid) -> Option<Position> {
        self.direction = self.pending;
        self.direction.advance(self.head(), grid)
    }

    pub(super) fn push_head(&mut self, pos: Position) {
        self.head = pos;
        self.segments.push_front(pos);
    }

    /// Remove the last segment.  Only called after `push_head()`, so the
    /// head itself is never removed.
    pub(super) fn drop_tail(&mut self) {
        if self.segments.len() > 1 {
            let _ = self.segments.pop_back();
        }
    }

    /// Replace the body with `cells`, head first
    #[cfg(test)]
    pub(super) fn set_segments<const N: usize>(&mut self, cells: [Position; N]) {
        if let Some(&head) = cells.first() {
            self.head = head;
            self.segments = VecDeque::from(cells);
        }
    }
}
