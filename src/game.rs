use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{GameConfig, GridSize, INITIAL_SNAKE_LENGTH};
use crate::error::GameError;
use crate::food::FoodSet;
use crate::input::Direction;
use crate::snake::{Coord, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Lost,
}

impl GameStatus {
    /// Returns true once the snake has run into itself.
    #[must_use]
    pub fn is_lost(self) -> bool {
        self == Self::Lost
    }
}

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Snake,
    Food,
}

/// Owned summary of a game at one point in time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameSnapshot {
    pub head: Coord,
    pub heading: Direction,
    pub snake_len: usize,
    pub food_count: usize,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: FoodSet,
    score: u32,
    tick_count: u64,
    status: GameStatus,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from the operating system's entropy source.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;

        let bounds = config.bounds();
        let snake = Snake::centered(bounds, INITIAL_SNAKE_LENGTH, Direction::Left);
        let mut food = FoodSet::new();
        food.spawn(&mut rng, bounds, &snake, config.initial_food)?;

        info!(
            width = bounds.width,
            height = bounds.height,
            food = food.len(),
            "new game"
        );

        Ok(Self {
            snake,
            food,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            config,
            rng,
        })
    }

    /// Advances simulation by one gameplay tick and returns the resulting status.
    ///
    /// Once lost, further ticks change nothing and keep reporting
    /// [`GameStatus::Lost`]. On the losing tick the head still moves into the
    /// occupied cell before the loss is reported.
    ///
    /// Fails only when food has to be placed and the grid has no free cell.
    pub fn tick(&mut self) -> Result<GameStatus, GameError> {
        if self.status.is_lost() {
            return Ok(self.status);
        }

        self.tick_count += 1;
        self.snake.reset_steering();

        let bounds = self.bounds();
        let next = self.snake.next_head_position(bounds);
        let mut ate_food = false;
        let mut low_on_food = false;

        match self.classify_coord(next) {
            Cell::Snake => {
                self.status = GameStatus::Lost;
                info!(
                    at = %next,
                    score = self.score,
                    length = self.snake.len(),
                    ticks = self.tick_count,
                    "snake ran into itself"
                );
            }
            Cell::Food => {
                ate_food = true;
                self.score = self.score.saturating_add(self.config.score_per_food);
                self.food.remove(next);
                low_on_food = self.food.len() < self.config.low_water_mark;
                debug!(at = %next, score = self.score, "ate food");
            }
            Cell::Empty => {}
        }

        self.snake.push_head(next);
        if !ate_food {
            let _ = self.snake.pop_tail();
        }

        if low_on_food {
            let batch = self.rng.gen_range(0..=self.config.low_water_refill_max);
            self.spawn_food(batch)?;
            debug!(batch, food = self.food.len(), "topped up food below low-water mark");
        }

        if self.food.is_empty() {
            let batch = self.rng.gen_range(0..=self.config.empty_refill_max);
            self.spawn_food(batch)?;
            debug!(batch, "refilled empty board");
        }

        Ok(self.status)
    }

    /// Requests a heading change for the next tick.
    ///
    /// Ignored after a loss, after a change was already accepted since the last
    /// tick, and when `direction` would reverse the snake onto its own neck.
    /// Returns whether the heading changed.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status.is_lost() {
            return false;
        }
        self.snake.steer(direction)
    }

    /// Classifies the cell at `(x, y)`. Cells outside the grid are empty.
    #[must_use]
    pub fn classify(&self, x: u16, y: u16) -> Cell {
        self.classify_coord(Coord::new(x, y))
    }

    fn classify_coord(&self, position: Coord) -> Cell {
        if self.snake.occupies(position) {
            Cell::Snake
        } else if self.food.contains(position) {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    /// Returns true iff `(x, y)` is the snake's head.
    #[must_use]
    pub fn is_head(&self, x: u16, y: u16) -> bool {
        self.snake.head() == Coord::new(x, y)
    }

    #[must_use]
    pub fn head(&self) -> Coord {
        self.snake.head()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.status.is_lost()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.bounds()
    }

    /// Returns an owned summary of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            head: self.head(),
            heading: self.heading(),
            snake_len: self.snake.len(),
            food_count: self.food.len(),
            score: self.score,
            tick_count: self.tick_count,
            status: self.status,
        }
    }

    fn spawn_food(&mut self, count: usize) -> Result<(), GameError> {
        let bounds = self.bounds();
        self.food.spawn(&mut self.rng, bounds, &self.snake, count)
    }
}
