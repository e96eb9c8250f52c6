use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{
    config::GameConfig,
    direction::Direction,
    geometry::{Grid, Vec2},
    snake::Snake,
};

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInfo {
    /// Whether the snake finished a step and started the next one
    pub step_completed: bool,
    /// Whether the snake ate the food this frame
    pub ate_food: bool,
}

/// A running game: the snake, the food and the random source placing it
pub struct GameSession {
    config: GameConfig,
    snake: Snake,
    food: Vec2,
    rng: StdRng,
    seed: u64,
}

impl GameSession {
    /// Start a session whose food placement is driven by `seed`
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let grid = config.grid();
        let mut rng = StdRng::seed_from_u64(seed);
        let food = grid.random_cell(&mut rng);
        let snake = Snake::new(grid, config.velocity);

        Self {
            config,
            snake,
            food,
            rng,
            seed,
        }
    }

    /// Seed derived from the wall clock, in whole seconds
    pub fn seed_from_clock() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }

    /// Steer the snake
    pub fn on_input(&mut self, direction: Direction) {
        self.snake.request_direction(direction);
    }

    /// Advance the game by `delta_time` seconds
    pub fn frame_update(&mut self, delta_time: f32) -> FrameInfo {
        let Self { snake, food, rng, .. } = self;

        let mut ate_food = false;
        let step_completed = snake.tick(delta_time, |snake| {
            ate_food = on_food_reached(snake, food, rng);
        });

        FrameInfo {
            step_completed,
            ate_food,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Vec2 {
        self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Grow the snake if its freshly recycled head sits on the food.
///
/// The new segment goes where the tail just left, and the food moves to a
/// random tile. Occupied tiles are fair game for the food.
fn on_food_reached(snake: &mut Snake, food: &mut Vec2, rng: &mut StdRng) -> bool {
    if snake.head().current_position != *food {
        return false;
    }

    let consumed = *food;
    *food = relocate_food(snake.grid(), consumed, rng);

    let vacated = snake.head().previous_position;
    snake.grow(vacated);

    debug!(
        "food eaten at ({}, {}), moved to ({}, {}), length {}",
        consumed.x,
        consumed.y,
        food.x,
        food.y,
        snake.len()
    );

    true
}

/// Pick a random tile other than the one just eaten
fn relocate_food<R: Rng + ?Sized>(grid: Grid, consumed: Vec2, rng: &mut R) -> Vec2 {
    loop {
        let candidate = grid.random_cell(rng);
        if candidate != consumed || grid.cell_count() < 2 {
            return candidate;
        }
    }
}
