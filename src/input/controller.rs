use tracing::debug;

use crate::game::{Direction, GameState, Phase};

/// Funnels vetted key actions into the session.
///
/// Holds the single pending-direction slot the next tick will read. Steering
/// is vetted here at key time against the active heading, so two quick
/// presses between ticks can never fold the snake back on itself.
#[derive(Debug, Default)]
pub struct Controls {
    pending: Option<Direction>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a turn. Accepted only while the session runs and only onto
    /// the other axis; everything else leaves the slot unchanged.
    pub fn steer(&mut self, state: &GameState, requested: Direction) {
        if !state.is_running() {
            return;
        }
        let Some(current) = state.snake.heading else {
            return;
        };
        if requested.axis() != current.axis() {
            self.pending = Some(requested);
        }
    }

    /// Flip paused <-> running. Pausing parks the heading inside the phase
    /// and drops any pending turn; resuming restores the heading unchanged.
    /// Returns true when the session just resumed, so the caller can arm
    /// the next tick immediately.
    pub fn toggle_pause(&mut self, state: &mut GameState) -> bool {
        match state.phase {
            Phase::Running => {
                state.pause();
                self.pending = None;
                debug!("paused");
                false
            }
            Phase::Paused { .. } => {
                state.resume();
                debug!("resumed");
                true
            }
            Phase::GameOver { .. } => false,
        }
    }

    /// Hand the pending turn to the step function, emptying the slot.
    pub fn take_pending(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    /// Forget any buffered turn (session restart).
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
