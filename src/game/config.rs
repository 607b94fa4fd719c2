use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Cell sizes the canvas can be divided into. Any other requested size is
/// snapped to the nearest member of this set.
pub const ALLOWED_CELL_SIZES: [u32; 6] = [5, 10, 20, 25, 40, 50];

/// Tick delay at score zero, in milliseconds.
pub const BASE_SPEED_MS: u64 = 120;

/// Floor for the tick delay, in milliseconds.
pub const MIN_SPEED_MS: u64 = 30;

/// Difficulty above which bombs start appearing.
pub const BOMB_DIFFICULTY_THRESHOLD: f64 = 10.0;

/// Upper bound on the per-tick bomb spawn probability.
pub const MAX_BOMB_CHANCE: f64 = 0.1;

/// Per-session configuration, fixed once a session starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Edge length of one grid cell in pixels, from `ALLOWED_CELL_SIZES`.
    pub cell_size: u32,
    /// Scalar raising both the speed ramp and the bomb frequency.
    pub difficulty: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            cell_size: 20,
            difficulty: 25.0,
        }
    }
}

impl GameConfig {
    /// Create a configuration, snapping `cell_size` to the allowed set.
    pub fn new(canvas_width: u32, canvas_height: u32, cell_size: u32, difficulty: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            cell_size: snap_cell_size(cell_size),
            difficulty,
        }
    }

    /// The grid this configuration divides the canvas into.
    pub fn grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }

    /// How many milliseconds of delay each food shaves off the tick.
    pub fn speed_factor(&self) -> f64 {
        1.0 + self.difficulty / 10.0
    }

    /// Delay before the next tick: shrinks linearly with score down to the floor.
    pub fn tick_delay(&self, score: u32) -> Duration {
        let ms = (BASE_SPEED_MS as f64 - f64::from(score) * self.speed_factor())
            .max(MIN_SPEED_MS as f64);
        Duration::from_millis(ms as u64)
    }

    /// Per-tick probability of a bomb spawning. Zero at or below the
    /// difficulty threshold, then linear in difficulty up to the cap.
    pub fn bomb_chance(&self) -> f64 {
        if self.difficulty > BOMB_DIFFICULTY_THRESHOLD {
            (self.difficulty / 5000.0).min(MAX_BOMB_CHANCE)
        } else {
            0.0
        }
    }
}

/// Nearest allowed cell size; the smaller value wins a distance tie.
pub fn snap_cell_size(requested: u32) -> u32 {
    ALLOWED_CELL_SIZES
        .iter()
        .copied()
        .min_by_key(|size| size.abs_diff(requested))
        .unwrap_or(ALLOWED_CELL_SIZES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_makes_a_20x20_grid() {
        let grid = GameConfig::default().grid();
        assert_eq!((grid.width, grid.height), (20, 20));
    }

    #[test]
    fn cell_size_snaps_to_nearest_allowed() {
        assert_eq!(snap_cell_size(5), 5);
        assert_eq!(snap_cell_size(7), 5);
        assert_eq!(snap_cell_size(8), 10);
        assert_eq!(snap_cell_size(23), 25);
        assert_eq!(snap_cell_size(44), 40);
        assert_eq!(snap_cell_size(1000), 50);
        assert_eq!(snap_cell_size(0), 5);
    }

    #[test]
    fn tick_delay_shrinks_with_score_to_the_floor() {
        let config = GameConfig::new(400, 400, 20, 0.0);
        assert_eq!(config.tick_delay(0), Duration::from_millis(120));
        assert_eq!(config.tick_delay(50), Duration::from_millis(70));
        assert_eq!(config.tick_delay(90), Duration::from_millis(30));
        assert_eq!(config.tick_delay(1000), Duration::from_millis(30));
    }

    #[test]
    fn speed_factor_is_linear_in_difficulty() {
        assert_eq!(GameConfig::new(400, 400, 20, 0.0).speed_factor(), 1.0);
        assert_eq!(GameConfig::new(400, 400, 20, 10.0).speed_factor(), 2.0);
        assert_eq!(GameConfig::new(400, 400, 20, 25.0).speed_factor(), 3.5);
    }

    #[test]
    fn bomb_chance_thresholds_and_caps() {
        assert_eq!(GameConfig::new(400, 400, 20, 0.0).bomb_chance(), 0.0);
        assert_eq!(GameConfig::new(400, 400, 20, 10.0).bomb_chance(), 0.0);
        assert_eq!(GameConfig::new(400, 400, 20, 50.0).bomb_chance(), 0.01);
        assert_eq!(GameConfig::new(400, 400, 20, 500.0).bomb_chance(), MAX_BOMB_CHANCE);
        assert_eq!(GameConfig::new(400, 400, 20, 9999.0).bomb_chance(), MAX_BOMB_CHANCE);
    }
}
