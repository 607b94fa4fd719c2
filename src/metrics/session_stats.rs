use std::time::{Duration, Instant};

/// Counters that outlive a single session but not the process.
pub struct SessionStats {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best score across restarts; never persisted to disk.
    pub high_score: u32,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Fold a finished session in. Returns true when `final_score` set a
    /// new high score.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            true
        } else {
            false
        }
    }

    /// Session clock as mm:ss for the header.
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
