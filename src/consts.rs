//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default number of cells along each side of the square grid
pub(crate) const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest permitted grid size.  The fixed starting snake needs room to
/// move at least one cell to the right.
pub(crate) const MIN_GRID_SIZE: u16 = 12;

/// Largest grid size that fits inside [`DISPLAY_SIZE`]
pub(crate) const MAX_GRID_SIZE: u16 = 20;

/// Number of terminal columns used to draw a single grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// The snake at the start of every round, head first
pub(crate) const INITIAL_SNAKE: [Position; 3] = [
    Position { x: 10, y: 10 },
    Position { x: 9, y: 10 },
    Position { x: 8, y: 10 },
];

/// Tick interval at a speed of 1.0
pub(crate) const BASE_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// The tick interval never drops below this
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(70);

/// Speed gained per point scored
pub(crate) const SPEED_STEP: f64 = 0.05;

/// Maximum speed multiplier
pub(crate) const MAX_SPEED: f64 = 2.5;

/// Key under which the high score is stored
pub(crate) const HIGH_SCORE_KEY: &str = "snake-high-score";

/// Glyphs for a snake segment
pub(crate) const SNAKE_SYMBOL: &str = "██";

/// Glyphs for the food
pub(crate) const FOOD_SYMBOL: &str = "██";

/// Glyphs for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
