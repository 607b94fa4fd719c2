use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use super::action::{Action, Direction};
use super::config::GameConfig;
use super::grid::{Cell, Grid};
use super::state::{CollisionKind, GameState, Phase, Snake};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// The head landed on the food this tick.
    pub ate_food: bool,
    /// Set when the tick ended the session.
    pub collision: Option<CollisionKind>,
    /// A bomb was placed this tick.
    pub bomb_spawned: bool,
}

/// Classify a finalized head position. Checks run Wall, then SelfHit, then
/// Bomb; the first match wins. `rest` is the post-move body without the
/// head, so a head entering the cell the tail just vacated is not a hit.
pub fn classify(
    grid: Grid,
    head: Cell,
    rest: &[Cell],
    bombs: &HashSet<Cell>,
) -> Option<CollisionKind> {
    if !grid.contains(head) {
        return Some(CollisionKind::Wall);
    }
    if rest.contains(&head) {
        return Some(CollisionKind::SelfHit);
    }
    if bombs.contains(&head) {
        return Some(CollisionKind::Bomb);
    }
    None
}

/// Runs the simulation: movement, growth, spawning, and collision handling.
///
/// Generic over the RNG so tests can drive it with a seeded generator.
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh session: length-1 snake at the grid center heading
    /// right, fresh food, no bombs, score zero.
    pub fn reset(&mut self) -> GameState {
        let grid = self.config.grid();
        let snake = Snake::new(grid.center(), Direction::Right);
        let food = self.spawn_food(grid);
        GameState::new(snake, food, grid)
    }

    /// Advance the session by one tick. Only a `Running` session moves;
    /// any other phase returns an empty outcome untouched.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if state.phase != Phase::Running {
            return outcome;
        }

        if let Action::Steer(requested) = action {
            if let Some(current) = state.snake.heading {
                if requested.axis() != current.axis() {
                    state.snake.heading = Some(requested);
                }
            }
        }

        let Some(heading) = state.snake.heading else {
            return outcome;
        };
        let new_head = state.snake.head().step(heading);

        outcome.ate_food = new_head == state.food;
        state.snake.advance(new_head, outcome.ate_food);
        if outcome.ate_food {
            state.score += 1;
            state.food = self.spawn_food(state.grid);
            debug!(score = state.score, "food eaten");
        }

        outcome.collision = classify(state.grid, new_head, state.snake.rest(), &state.bombs);
        if let Some(kind) = outcome.collision {
            state.phase = Phase::GameOver { cause: kind };
            info!(?kind, score = state.score, "session over");
        }

        // The bomb roll runs every tick, even the one that ends the session.
        let chance = self.config.bomb_chance();
        if chance > 0.0 && self.rng.gen_bool(chance) {
            self.spawn_bombs(state, 1);
            outcome.bomb_spawned = true;
            debug!(bombs = state.bombs.len(), "bomb spawned");
        }

        outcome
    }

    /// Uniformly random in-bounds cell. Placement is a bare draw: the food
    /// may land on the snake or on a bomb.
    pub fn spawn_food(&mut self, grid: Grid) -> Cell {
        Cell::new(
            self.rng.gen_range(0..grid.width),
            self.rng.gen_range(0..grid.height),
        )
    }

    /// Place `count` bombs on cells free of the snake, the food, and each
    /// other, by rejection sampling. Retries are unbounded: the caller must
    /// leave at least `count` cells unoccupied or this never returns.
    pub fn spawn_bombs(&mut self, state: &mut GameState, count: usize) {
        let mut occupied: HashSet<Cell> = state.snake.body.iter().copied().collect();
        occupied.insert(state.food);

        let mut placed = 0;
        while placed < count {
            let cell = Cell::new(
                self.rng.gen_range(0..state.grid.width),
                self.rng.gen_range(0..state.grid.height),
            );
            if occupied.insert(cell) {
                state.bombs.insert(cell);
                placed += 1;
            }
        }
    }
}
