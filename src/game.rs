use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GridBounds, POINTS_PER_FOOD, SessionConfig};
use crate::error::{ConfigError, GameError};
use crate::food::spawn_position;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell food may use.
    BoardFull,
}

/// What happened during one tick, for the presentation layer to react to.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickEvents {
    /// Cell of the food the head landed on.
    pub ate_food: Option<Position>,
    pub died: bool,
    /// Cell where the new tail segment was appended.
    pub grew_segment_at: Option<Position>,
    /// Cell of the replacement food.
    pub new_food_at: Option<Position>,
    pub death_reason: Option<DeathReason>,
}

impl TickEvents {
    fn game_over(reason: Option<DeathReason>) -> Self {
        Self {
            died: true,
            death_reason: reason,
            ..Self::default()
        }
    }
}

/// Complete mutable state of one play, from first tick to game over.
///
/// Restarting means building a new session; nothing is ever reset in place.
#[derive(Debug, Clone)]
pub struct GameSession {
    snake: Snake,
    food: Option<Position>,
    score: u32,
    is_over: bool,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    bounds: GridBounds,
    food_area: GridBounds,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session seeded from system entropy.
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(config: SessionConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, rng: StdRng) -> Result<Self, GameError> {
        let bounds = config.validate()?;
        let start = bounds.start_position(config.initial_length)?;
        let snake = Snake::new(start, config.initial_length);

        let mut session = Self::assemble(&config, bounds, snake, rng)?;
        session.spawn_food()?;

        log::info!(
            "new session on a {}x{} board, snake of {} at ({}, {})",
            bounds.columns(),
            bounds.rows(),
            config.initial_length,
            start.x,
            start.y
        );
        Ok(session)
    }

    /// Creates a session from an explicit snake and food layout.
    ///
    /// Every segment and the food must lie on the board. The snake length is
    /// not checked against the configured initial length.
    pub fn with_layout(
        config: SessionConfig,
        snake: Snake,
        food: Option<Position>,
        seed: u64,
    ) -> Result<Self, GameError> {
        let bounds = config.board.grid_bounds()?;
        if let Some(outside) = snake.segments().find(|segment| !bounds.contains(**segment)) {
            return Err(ConfigError::SegmentOutOfBounds(*outside).into());
        }
        if let Some(food) = food.filter(|food| !bounds.contains(*food)) {
            return Err(ConfigError::FoodOutOfBounds(food).into());
        }

        let mut session = Self::assemble(&config, bounds, snake, StdRng::seed_from_u64(seed))?;
        session.food = food;
        Ok(session)
    }

    fn assemble(
        config: &SessionConfig,
        bounds: GridBounds,
        snake: Snake,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            snake,
            food: None,
            score: 0,
            is_over: false,
            death_reason: None,
            tick_count: 0,
            bounds,
            food_area: config.food_area(bounds)?,
            rng,
        })
    }

    /// Advances the simulation by one step.
    ///
    /// Order: move, eat, self-collision, wall collision. A finished session
    /// ignores ticks and keeps reporting `died`. When no free cell is left for
    /// the next food, the meal still counts and the game ends with
    /// [`DeathReason::BoardFull`].
    pub fn tick(&mut self) -> TickEvents {
        if self.is_over {
            return TickEvents::game_over(self.death_reason);
        }

        self.tick_count += 1;
        let mut events = TickEvents::default();
        if !self.snake.move_forward() {
            return self.finish(events, DeathReason::WallCollision);
        }
        let head = self.snake.head();

        if self.food == Some(head) {
            events.ate_food = self.food.take();
            events.grew_segment_at = Some(self.snake.grow());
            self.score += POINTS_PER_FOOD;
            log::debug!(
                "ate food at ({}, {}), length {}, score {}",
                head.x,
                head.y,
                self.snake.len(),
                self.score
            );

            match self.spawn_food() {
                Ok(position) => events.new_food_at = Some(position),
                Err(_) => return self.finish(events, DeathReason::BoardFull),
            }
        }

        if self.snake.head_overlaps_body() {
            return self.finish(events, DeathReason::SelfCollision);
        }
        if !self.bounds.contains(head) {
            return self.finish(events, DeathReason::WallCollision);
        }

        events
    }

    fn finish(&mut self, mut events: TickEvents, reason: DeathReason) -> TickEvents {
        self.is_over = true;
        self.death_reason = Some(reason);
        events.died = true;
        events.death_reason = Some(reason);
        log::info!(
            "game over after {} ticks: {reason:?}, score {}",
            self.tick_count,
            self.score
        );
        events
    }

    /// Requests a heading change for the next move. Ignored once the game is over.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.is_over {
            return;
        }
        self.snake.change_direction(direction);
    }

    /// Places fresh food on a free cell and returns it.
    pub fn spawn_food(&mut self) -> Result<Position, GameError> {
        let Some(position) = spawn_position(&mut self.rng, self.food_area, &self.snake) else {
            log::warn!(
                "no free cell for food, snake covers {} cells",
                self.snake.len()
            );
            self.food = None;
            return Err(GameError::BoardFull);
        };

        self.food = Some(position);
        Ok(position)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Body cells from head to tail, for redraw.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments().copied()
    }

    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of ticks that advanced the simulation.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
