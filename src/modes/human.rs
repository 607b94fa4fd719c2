use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::info;

use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::input::{Controls, InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Keyboard-driven play: owns the session, the tick scheduler, and the
/// terminal for the lifetime of the process.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    controls: Controls,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            controls: Controls::new(),
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(config = ?self.engine.config(), "session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The one pending-tick handle. Pause and game over disable its
        // branch; resume and restart reset its deadline, which is the only
        // way a stale tick gets cancelled.
        let next_tick = sleep(self.tick_delay());
        tokio::pin!(next_tick);

        loop {
            if self.state.is_running() {
                self.stats.update();
            }
            terminal
                .draw(|frame| self.renderer.render(frame, &self.state, &self.stats))
                .context("Failed to draw frame")?;

            tokio::select! {
                // Keyboard events land in the pending slot before the next
                // tick can read it.
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            next_tick.as_mut().reset(Instant::now() + self.tick_delay());
                        }
                    }
                }

                // Game logic tick, rearmed with a score-dependent delay.
                _ = next_tick.as_mut(), if self.state.is_running() => {
                    self.tick();
                    next_tick.as_mut().reset(Instant::now() + self.tick_delay());
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Returns true when the pending tick must be rescheduled (resume or
    /// restart).
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.controls.steer(&self.state, direction);
                false
            }
            KeyAction::TogglePause => self.controls.toggle_pause(&mut self.state),
            KeyAction::Restart => {
                self.restart();
                true
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    fn tick(&mut self) {
        let action = self
            .controls
            .take_pending()
            .map(Action::Steer)
            .unwrap_or(Action::Continue);

        let outcome = self.engine.step(&mut self.state, action);

        if outcome.collision.is_some() && self.stats.on_game_over(self.state.score) {
            info!(score = self.state.score, "new high score");
        }
    }

    fn restart(&mut self) {
        self.state = self.engine.reset();
        self.controls.clear();
        self.stats.on_game_start();
        info!("session restarted");
    }

    fn tick_delay(&self) -> Duration {
        self.engine.config().tick_delay(self.state.score)
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Phase};

    #[test]
    fn initialization_starts_a_running_session() {
        let mode = HumanMode::new(GameConfig::default());
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.len(), 1);
    }

    #[test]
    fn restart_wipes_the_board_but_keeps_the_high_score() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.state.score = 10;
        mode.state.phase = Phase::GameOver {
            cause: crate::game::CollisionKind::Wall,
        };
        mode.stats.on_game_over(mode.state.score);

        mode.restart();

        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert!(mode.state.bombs.is_empty());
        assert_eq!(mode.stats.high_score, 10);
    }

    #[test]
    fn tick_consumes_the_pending_turn() {
        let mut mode = HumanMode::new(GameConfig::default());
        mode.state.food = Cell::new(0, 0);
        mode.controls.steer(&mode.state, Direction::Down);

        mode.tick();

        assert_eq!(mode.state.snake.heading, Some(Direction::Down));
        assert_eq!(mode.controls.take_pending(), None);
    }

    #[test]
    fn game_over_tick_folds_the_score_into_the_high_score() {
        let mut mode = HumanMode::new(GameConfig::default());
        // Park the snake against the right wall, heading out.
        mode.state.snake.body = vec![Cell::new(19, 10)];
        mode.state.score = 7;
        mode.state.food = Cell::new(0, 0);

        mode.tick();

        assert!(mode.state.is_over());
        assert_eq!(mode.stats.high_score, 7);
        assert_eq!(mode.stats.games_played, 1);
    }
}
