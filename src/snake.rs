use std::collections::VecDeque;

use crate::input::{Direction, direction_change_is_valid};

/// Segment count of a freshly created snake.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one grid unit away in `direction`.
    ///
    /// Returns `None` when that cell is outside the `i32` coordinate range.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Squared euclidean distance in grid units.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

/// Ordered snake body (front is head) and its heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    /// Creates a snake with its head at `start`, facing `Right`.
    ///
    /// The remaining segments trail one cell apart to the left of the head.
    /// A zero `length` yields a head-only snake.
    #[must_use]
    pub fn new(start: Position, length: usize) -> Self {
        let body = (0..length.max(1))
            .map(|offset| {
                let offset = i32::try_from(offset).unwrap_or(i32::MAX);
                Position::new(start.x.saturating_sub(offset), start.y)
            })
            .collect();

        Self {
            body,
            direction: Direction::Right,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            direction,
        })
    }

    /// Advances the snake one cell in its current direction.
    ///
    /// Every non-head segment takes the position its predecessor held before
    /// the move. Pushing the new head and dropping the old tail produces
    /// exactly that shift.
    ///
    /// Returns `false` and leaves the body untouched when the head would step
    /// outside the `i32` coordinate range.
    pub fn move_forward(&mut self) -> bool {
        let Some(next_head) = self.next_head_position() else {
            return false;
        };
        self.body.push_front(next_head);
        let _ = self.body.pop_back();
        true
    }

    /// Returns the head position the next move will produce.
    #[must_use]
    pub fn next_head_position(&self) -> Option<Position> {
        self.head().step(self.direction)
    }

    /// Turns the snake unless `direction` would reverse it in place.
    ///
    /// The new heading is only read by the next [`Snake::move_forward`].
    pub fn change_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.direction, direction) {
            return;
        }
        self.direction = direction;
    }

    /// Appends a segment on top of the current tail and returns its position.
    ///
    /// The duplicate cell separates from the old tail on the next move,
    /// leaving the body one segment longer.
    pub fn grow(&mut self) -> Position {
        let tail = self.tail();
        self.body.push_back(tail);
        tail
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty: both constructors guarantee a head.
        self.body.front().copied().unwrap_or(Position::new(0, 0))
    }

    /// Returns the last segment, which is the head for a one-cell snake.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or_else(|| self.head())
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
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

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
