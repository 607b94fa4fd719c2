use std::collections::HashSet;

use super::action::Direction;
use super::grid::{Cell, Grid};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the grid.
    Wall,
    /// Head landed on the snake's own body.
    SelfHit,
    /// Head landed on a bomb.
    Bomb,
}

impl CollisionKind {
    /// Reason line shown on the game-over overlay.
    pub fn message(&self) -> &'static str {
        match self {
            CollisionKind::Wall => "You hit the wall!",
            CollisionKind::SelfHit => "You ran into yourself!",
            CollisionKind::Bomb => "BOOM! You hit a bomb!",
        }
    }
}

/// Lifecycle of one play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Suspended; carries the heading to restore on resume.
    Paused { resume_direction: Direction },
    /// Terminal until an external restart.
    GameOver { cause: CollisionKind },
}

/// The snake: body cells head-first, plus its active heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at index 0. Never empty.
    pub body: Vec<Cell>,
    /// `None` exactly while the session is paused, so a stray tick cannot
    /// advance the body.
    pub heading: Option<Direction>,
}

impl Snake {
    /// A length-1 snake at `start`.
    pub fn new(start: Cell, heading: Direction) -> Self {
        Self {
            body: vec![start],
            heading: Some(heading),
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Body segments excluding the head; the slice self-collisions are
    /// checked against.
    pub fn rest(&self) -> &[Cell] {
        &self.body[1..]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Prepend the new head; unless growing, pop the tail so the vacated
    /// cell is free before any collision check runs.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}

/// The single mutable source of truth for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    /// Cumulative within a session, never cleared until restart.
    pub bombs: HashSet<Cell>,
    pub score: u32,
    pub phase: Phase,
    pub grid: Grid,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, grid: Grid) -> Self {
        Self {
            snake,
            food,
            bombs: HashSet::new(),
            score: 0,
            phase: Phase::Running,
            grid,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    /// Suspend a running session, parking the heading inside the phase.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(direction) = self.snake.heading.take() {
            self.phase = Phase::Paused {
                resume_direction: direction,
            };
        }
    }

    /// Resume a paused session with the exact pre-pause heading.
    pub fn resume(&mut self) {
        if let Phase::Paused { resume_direction } = self.phase {
            self.snake.heading = Some(resume_direction);
            self.phase = Phase::Running;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        let grid = Grid::from_canvas(200, 200, 10);
        GameState::new(Snake::new(grid.center(), Direction::Right), Cell::new(0, 0), grid)
    }

    #[test]
    fn snake_advances_and_pops_tail() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);
        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.body, vec![Cell::new(6, 5)]);

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.body, vec![Cell::new(7, 5), Cell::new(6, 5)]);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.rest(), &[Cell::new(6, 5)]);
    }

    #[test]
    fn rest_excludes_the_head() {
        let mut snake = Snake::new(Cell::new(3, 3), Direction::Right);
        snake.advance(Cell::new(4, 3), true);
        assert!(snake.occupies(Cell::new(4, 3)));
        assert!(!snake.rest().contains(&Cell::new(4, 3)));
    }

    #[test]
    fn pause_parks_the_heading() {
        let mut state = running_state();
        state.pause();
        assert!(state.is_paused());
        assert_eq!(state.snake.heading, None);
    }

    #[test]
    fn resume_restores_the_exact_heading() {
        let mut state = running_state();
        state.snake.heading = Some(Direction::Down);
        state.pause();
        state.resume();
        assert!(state.is_running());
        assert_eq!(state.snake.heading, Some(Direction::Down));
    }

    #[test]
    fn pause_is_a_noop_after_game_over() {
        let mut state = running_state();
        state.phase = Phase::GameOver {
            cause: CollisionKind::Wall,
        };
        state.pause();
        assert!(state.is_over());
        assert_eq!(state.snake.heading, Some(Direction::Right));
    }

    #[test]
    fn overlay_messages() {
        assert_eq!(CollisionKind::Wall.message(), "You hit the wall!");
        assert_eq!(CollisionKind::SelfHit.message(), "You ran into yourself!");
        assert_eq!(CollisionKind::Bomb.message(), "BOOM! You hit a bomb!");
    }
}
