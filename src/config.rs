use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ConfigError};
use crate::snake::{DEFAULT_INITIAL_LENGTH, Position};

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Points a board cell spans on each axis by default.
pub const DEFAULT_GRID_UNIT: i32 = 20;

/// Default board: 40×20 cells of [`DEFAULT_GRID_UNIT`] points.
pub const DEFAULT_BOARD_WIDTH: i32 = 39 * DEFAULT_GRID_UNIT;
pub const DEFAULT_BOARD_HEIGHT: i32 = 19 * DEFAULT_GRID_UNIT;

/// Cells kept free of food along every wall.
pub const DEFAULT_FOOD_MARGIN: i32 = 1;

/// Shortest snake a session may start with.
pub const MIN_INITIAL_LENGTH: usize = 3;

/// Score granted per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Playable area in presentation points, as supplied by the front end.
///
/// Only whole grid cells inside `[origin, origin + extent]` are playable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: i32,
    pub height: i32,
    pub grid_unit: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            grid_unit: DEFAULT_GRID_UNIT,
        }
    }
}

impl BoardConfig {
    /// Builds a board with its origin at `(0, 0)` spanning `columns × rows` cells.
    #[must_use]
    pub fn from_cells(columns: u16, rows: u16, grid_unit: i32) -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: (i32::from(columns) - 1).max(0) * grid_unit,
            height: (i32::from(rows) - 1).max(0) * grid_unit,
            grid_unit,
        }
    }

    /// Converts the point-space rectangle into inclusive grid bounds.
    pub fn grid_bounds(&self) -> Result<GridBounds, ConfigError> {
        if self.grid_unit <= 0 {
            return Err(ConfigError::NonPositiveGridUnit(self.grid_unit));
        }
        if self.width < 0 {
            return Err(ConfigError::NegativeExtent {
                axis: Axis::X,
                value: self.width,
            });
        }
        if self.height < 0 {
            return Err(ConfigError::NegativeExtent {
                axis: Axis::Y,
                value: self.height,
            });
        }

        let (min_x, max_x) = cell_range(self.origin_x, self.width, self.grid_unit)
            .ok_or(ConfigError::NoCellsOnAxis { axis: Axis::X })?;
        let (min_y, max_y) = cell_range(self.origin_y, self.height, self.grid_unit)
            .ok_or(ConfigError::NoCellsOnAxis { axis: Axis::Y })?;

        Ok(GridBounds {
            min_x,
            max_x,
            min_y,
            max_y,
            grid_unit: self.grid_unit,
        })
    }
}

fn cell_range(origin: i32, extent: i32, unit: i32) -> Option<(i32, i32)> {
    let unit = i64::from(unit);
    let start = i64::from(origin);
    let end = start + i64::from(extent);

    let first = -((-start).div_euclid(unit));
    let last = end.div_euclid(unit);
    if first > last {
        return None;
    }

    Some((i32::try_from(first).ok()?, i32::try_from(last).ok()?))
}

/// Inclusive playable rectangle in grid cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub grid_unit: i32,
}

impl GridBounds {
    /// Returns true when `position` lies inside the bounds (edges included).
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }

    #[must_use]
    pub fn columns(self) -> i64 {
        i64::from(self.max_x) - i64::from(self.min_x) + 1
    }

    #[must_use]
    pub fn rows(self) -> i64 {
        i64::from(self.max_y) - i64::from(self.min_y) + 1
    }

    /// Returns the total number of cells in the bounds.
    #[must_use]
    pub fn total_cells(self) -> i64 {
        self.columns() * self.rows()
    }

    /// Shrinks the bounds by `margin` cells on every side.
    ///
    /// Returns `None` when nothing is left.
    #[must_use]
    pub fn inset(self, margin: i32) -> Option<Self> {
        let inset = Self {
            min_x: self.min_x.checked_add(margin)?,
            max_x: self.max_x.checked_sub(margin)?,
            min_y: self.min_y.checked_add(margin)?,
            max_y: self.max_y.checked_sub(margin)?,
            grid_unit: self.grid_unit,
        };

        (inset.min_x <= inset.max_x && inset.min_y <= inset.max_y).then_some(inset)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| Position::new(x, y)))
    }

    /// Head cell for a fresh snake of `length` segments trailing to the left.
    ///
    /// The head sits at the board centre, pushed right when the tail would
    /// otherwise leave the board.
    pub fn start_position(self, length: usize) -> Result<Position, ConfigError> {
        let too_long = ConfigError::SnakeDoesNotFit {
            length,
            columns: self.columns(),
        };
        let trailing = i64::try_from(length.saturating_sub(1)).map_err(|_| too_long.clone())?;

        let centre_x = i64::from(self.min_x) + (self.columns() - 1) / 2;
        let centre_y = i64::from(self.min_y) + (self.rows() - 1) / 2;
        let head_x = centre_x.max(i64::from(self.min_x) + trailing);
        if head_x > i64::from(self.max_x) {
            return Err(too_long);
        }

        Ok(Position::new(
            i32::try_from(head_x).map_err(|_| too_long)?,
            i32::try_from(centre_y).unwrap_or(self.min_y),
        ))
    }
}

/// Everything needed to start one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub board: BoardConfig,
    pub initial_length: usize,
    pub food_margin: i32,
    pub tick_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            initial_length: DEFAULT_INITIAL_LENGTH,
            food_margin: DEFAULT_FOOD_MARGIN,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SessionConfig {
    /// Validates the configuration and returns the playable grid bounds.
    pub fn validate(&self) -> Result<GridBounds, ConfigError> {
        let bounds = self.board.grid_bounds()?;

        if self.initial_length < MIN_INITIAL_LENGTH {
            return Err(ConfigError::InitialLengthTooShort {
                actual: self.initial_length,
                minimum: MIN_INITIAL_LENGTH,
            });
        }
        bounds.start_position(self.initial_length)?;

        self.food_area(bounds)?;

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(bounds)
    }

    /// Returns the sub-rectangle of `bounds` where food may spawn.
    pub fn food_area(&self, bounds: GridBounds) -> Result<GridBounds, ConfigError> {
        if self.food_margin < 0 {
            return Err(ConfigError::NegativeFoodMargin(self.food_margin));
        }

        bounds.inset(self.food_margin).ok_or(ConfigError::EmptyFoodArea {
            margin: self.food_margin,
        })
    }

    /// Fixed period between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Axis, ConfigError};
    use crate::snake::Position;

    use super::{BoardConfig, GridBounds, SessionConfig};

    fn bounds(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> GridBounds {
        GridBounds {
            min_x,
            max_x,
            min_y,
            max_y,
            grid_unit: 1,
        }
    }

    #[test]
    fn default_board_is_forty_by_twenty_cells() {
        let bounds = BoardConfig::default()
            .grid_bounds()
            .expect("default board should be valid");

        assert_eq!(bounds.columns(), 40);
        assert_eq!(bounds.rows(), 20);
        assert_eq!((bounds.min_x, bounds.min_y), (0, 0));
    }

    #[test]
    fn partial_cells_at_the_edges_are_not_playable() {
        let board = BoardConfig {
            origin_x: 5,
            origin_y: -25,
            width: 50,
            height: 40,
            grid_unit: 10,
        };

        let bounds = board.grid_bounds().expect("board should be valid");

        assert_eq!((bounds.min_x, bounds.max_x), (1, 5));
        assert_eq!((bounds.min_y, bounds.max_y), (-2, 1));
    }

    #[test]
    fn invalid_boards_fail_fast() {
        let zero_unit = BoardConfig {
            grid_unit: 0,
            ..BoardConfig::default()
        };
        assert_eq!(
            zero_unit.grid_bounds(),
            Err(ConfigError::NonPositiveGridUnit(0))
        );

        let negative_height = BoardConfig {
            height: -1,
            ..BoardConfig::default()
        };
        assert_eq!(
            negative_height.grid_bounds(),
            Err(ConfigError::NegativeExtent {
                axis: Axis::Y,
                value: -1
            })
        );

        let sliver = BoardConfig {
            origin_x: 1,
            width: 5,
            grid_unit: 10,
            ..BoardConfig::default()
        };
        assert_eq!(
            sliver.grid_bounds(),
            Err(ConfigError::NoCellsOnAxis { axis: Axis::X })
        );
    }

    #[test]
    fn bounds_contain_their_edges() {
        let bounds = bounds(0, 10, 0, 8);

        assert!(bounds.contains(Position::new(0, 0)));
        assert!(bounds.contains(Position::new(10, 8)));
        assert!(!bounds.contains(Position::new(11, 8)));
        assert!(!bounds.contains(Position::new(3, -1)));
    }

    #[test]
    fn inset_shrinks_every_side() {
        let inner = bounds(0, 9, 0, 5).inset(1).expect("room left");
        assert_eq!(inner, bounds(1, 8, 1, 4));

        assert!(bounds(0, 2, 0, 2).inset(2).is_none());
    }

    #[test]
    fn start_position_keeps_tail_on_board() {
        assert_eq!(
            bounds(0, 39, 0, 19).start_position(3),
            Ok(Position::new(19, 9))
        );
        assert_eq!(bounds(0, 3, 0, 3).start_position(4), Ok(Position::new(3, 1)));
        assert!(matches!(
            bounds(0, 3, 0, 3).start_position(5),
            Err(ConfigError::SnakeDoesNotFit { length: 5, .. })
        ));
    }

    #[test]
    fn session_config_rejects_short_snakes_and_bad_margins() {
        let short = SessionConfig {
            initial_length: 2,
            ..SessionConfig::default()
        };
        assert!(matches!(
            short.validate(),
            Err(ConfigError::InitialLengthTooShort { actual: 2, .. })
        ));

        let negative_margin = SessionConfig {
            food_margin: -1,
            ..SessionConfig::default()
        };
        assert_eq!(
            negative_margin.validate(),
            Err(ConfigError::NegativeFoodMargin(-1))
        );

        let huge_margin = SessionConfig {
            food_margin: 10,
            ..SessionConfig::default()
        };
        assert_eq!(
            huge_margin.validate(),
            Err(ConfigError::EmptyFoodArea { margin: 10 })
        );
    }

    #[test]
    fn missing_settings_fields_fall_back_to_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "initialLength": 5, "board": { "gridUnit": 10 } }"#)
                .expect("partial config should parse");

        assert_eq!(config.initial_length, 5);
        assert_eq!(config.board.grid_unit, 10);
        assert_eq!(config.board.width, super::DEFAULT_BOARD_WIDTH);
        assert_eq!(config.tick_interval_ms, super::DEFAULT_TICK_INTERVAL_MS);
    }
}
