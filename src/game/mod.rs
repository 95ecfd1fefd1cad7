mod direction;
mod grid;
mod round;
mod snake;
mod speed;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::Grid;
use self::round::{Outcome, Round};
pub(crate) use self::speed::Speed;
use crate::consts;
use crate::highscore::{ErrorChain, HighScoreStore, SaveError};
use crate::ticker::Ticker;
use crate::util::{center_rect, get_display_area};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
    Frame,
};
use std::fmt;
use std::time::{Duration, Instant};

/// A single game session: the current (or most recent) round, the tick timer
/// driving it, and the high score.
#[derive(Debug)]
pub(crate) struct GameSession<S, R = rand::rngs::ThreadRng> {
    grid: Grid,
    rng: R,
    store: S,
    high_score: u32,
    state: GameState,
    /// `None` until the first round is started; afterwards, the last round
    /// stays here after it ends so that it can still be drawn.
    round: Option<Round>,
    ticker: Ticker,
    status: Status,
    save_error: Option<SaveError>,
}

impl<S: HighScoreStore> GameSession<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: Grid, store: S) -> Self {
        GameSession::new_with_rng(grid, store, rand::rng())
    }
}

impl<S: HighScoreStore, R: Rng> GameSession<S, R> {
    pub(crate) fn new_with_rng(grid: Grid, store: S, rng: R) -> GameSession<S, R> {
        let high_score = store.read();
        GameSession {
            grid,
            rng,
            store,
            high_score,
            state: GameState::Stopped,
            round: None,
            ticker: Ticker::new(),
            status: Status::Welcome,
            save_error: None,
        }
    }

    /// Begin a new round, discarding any round in progress
    pub(crate) fn start(&mut self) {
        let round = Round::new(self.grid, &mut self.rng);
        log::info!(
            "Starting new round on a {0}x{0} grid; food at ({1}, {2})",
            self.grid.size(),
            round.food.x,
            round.food.y
        );
        self.ticker.start(round.speed.tick_interval(), Instant::now());
        self.round = Some(round);
        self.high_score = self.store.read();
        self.state = GameState::Running;
        self.status = Status::Running;
    }

    /// Request that the snake turn in the given direction on the next tick.
    /// Ignored unless a round is running or if `direction` is the reverse of
    /// the snake's current direction.
    pub(crate) fn request_direction(&mut self, direction: Direction) {
        if self.state != GameState::Running {
            return;
        }
        if let Some(round) = self.round.as_mut() {
            if !round.snake.turn(direction) {
                log::trace!("Ignoring request to reverse direction to {direction:?}");
            }
        }
    }

    /// Pause a running round, resume a paused one, or start a new one if
    /// nothing is in progress
    pub(crate) fn toggle_pause(&mut self) {
        match self.state {
            GameState::Stopped => self.start(),
            GameState::Running => self.pause(),
            GameState::Paused => self.resume(),
        }
    }

    /// Pause the round if it's running
    pub(crate) fn pause(&mut self) {
        if self.state == GameState::Running {
            log::info!("Pausing game");
            self.ticker.stop();
            self.state = GameState::Paused;
            self.status = Status::Paused;
        }
    }

    fn resume(&mut self) {
        log::info!("Resuming game");
        self.ticker.start(self.speed().tick_interval(), Instant::now());
        self.state = GameState::Running;
        self.status = Status::Running;
    }

    /// Time until the tick timer next fires, or `None` if the timer is not
    /// running
    pub(crate) fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.remaining(now)
    }

    /// Run a tick if the tick timer is due
    pub(crate) fn on_timer(&mut self, now: Instant) {
        if self.ticker.fire(now) {
            self.tick();
        }
    }

    fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        match round.advance(self.grid, &mut self.rng) {
            Outcome::Moved => (),
            Outcome::Ate => {
                let interval = round.speed.tick_interval();
                log::debug!(
                    "Ate food; score = {}, speed = {}, tick interval = {interval:?}",
                    round.score,
                    round.speed
                );
                self.ticker.start(interval, Instant::now());
            }
            Outcome::Collided => {
                let (score, length) = (round.score, round.snake.len());
                self.game_over(score, length);
            }
        }
    }

    fn game_over(&mut self, score: u32, length: usize) {
        log::info!("Game over; final score: {score}, snake length: {length}");
        self.ticker.stop();
        self.state = GameState::Stopped;
        self.status = Status::GameOver;
        let best = self.store.read();
        if score > best {
            log::info!("New high score: {score} (previous: {best})");
            if let Err(e) = self.store.write(score) {
                log::error!("{e}: {}", ErrorChain(&e));
                self.save_error = Some(e);
            }
            self.high_score = score;
        } else {
            self.high_score = best;
        }
    }

    /// Return the error from the most recent failed attempt to save the high
    /// score, if it hasn't been taken already
    pub(crate) fn take_save_error(&mut self) -> Option<SaveError> {
        self.save_error.take()
    }
}

impl<S, R> GameSession<S, R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn score(&self) -> u32 {
        self.round.as_ref().map_or(0, |r| r.score)
    }

    pub(crate) fn speed(&self) -> Speed {
        self.round.as_ref().map_or(Speed::INITIAL, |r| r.speed)
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.high_score
    }

    /// The round in progress or, if stopped, the one that last ended
    pub(crate) fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }
}

impl<S, R> Widget for &GameSession<S, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [hud_area, board_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {}   High Score: {}   Speed: {}",
                self.score(),
                self.high_score(),
                self.speed()
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(hud_area, buf);

        let size = self.grid.size();
        let block_size = Size {
            width: size.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
            height: size.saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        if let Some(round) = self.round() {
            let mut board = Canvas {
                area: block_area.inner(Margin::new(1, 1)),
                buf,
            };
            board.draw_cell(round.food(), consts::FOOD_SYMBOL, consts::FOOD_STYLE);
            for &pos in round.snake().segments().iter().skip(1) {
                board.draw_cell(pos, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
            }
            if self.state() == GameState::Stopped {
                board.draw_cell(
                    round.snake().head(),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            } else {
                board.draw_cell(
                    round.snake().head(),
                    consts::SNAKE_SYMBOL,
                    consts::SNAKE_HEAD_STYLE,
                );
            }
        }

        Line::from(format!(" {}", self.status())).render(status_area, buf);
    }
}

/// Draws grid cells into a buffer region, [`consts::CELL_WIDTH`] columns per
/// cell
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (x, ch) in (x..).zip(symbol.chars()) {
            if !self.area.contains(Position { x, y }) {
                break;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    /// No round in progress; either nothing has been played yet or the last
    /// round ended in a collision
    Stopped,
    Running,
    Paused,
}

/// The message shown below the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Welcome,
    Running,
    Paused,
    GameOver,
}

impl Status {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Status::Welcome => "Press Enter or Space to play.",
            Status::Running => "Running. Use arrows or WASD. Press Space to pause.",
            Status::Paused => "Paused. Press Space to resume.",
            Status::GameOver => "Game over. Press Enter or Space to try again.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
