use super::grid::Grid;
use super::snake::Snake;
use super::speed::Speed;
use rand::Rng;
use ratatui::layout::Position;

/// The result of advancing a round by one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The snake moved forwards one cell
    Moved,
    /// The snake moved onto the food and grew; the tick interval needs to be
    /// recalculated
    Ate,
    /// The snake hit a wall or itself.  The snake's cells, the food, and the
    /// score are left as they were before the tick.
    Collided,
}

/// Everything that is reset when a new round starts
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Round {
    pub(super) snake: Snake,
    pub(super) food: Position,
    pub(super) score: u32,
    pub(super) speed: Speed,
}

impl Round {
    pub(super) fn new<R: Rng>(grid: Grid, rng: &mut R) -> Round {
        let snake = Snake::new();
        let food = grid.place_food(snake.segments(), rng);
        Round {
            snake,
            food,
            score: 0,
            speed: Speed::INITIAL,
        }
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Position {
        self.food
    }

    /// Move the snake one cell, eating & growing or colliding as appropriate.
    pub(super) fn advance<R: Rng>(&mut self, grid: Grid, rng: &mut R) -> Outcome {
        let Some(head) = self.snake.next_head(grid) else {
            return Outcome::Collided;
        };
        // The whole body counts, including the tail cell that is about to be
        // vacated.
        if self.snake.occupies(head) {
            return Outcome::Collided;
        }
        self.snake.push_head(head);
        if head == self.food {
            self.score += 1;
            self.speed = Speed::for_score(self.score);
            self.food = grid.place_food(self.snake.segments(), rng);
            Outcome::Ate
        } else {
            self.snake.drop_tail();
            Outcome::Moved
        }
    }
}
