//! Game clock owned by the world and lent to actions each tick.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    /// Seconds of game time since the clock was created.
    pub time: f64,
    /// Game time at which the current game started.
    pub start_time: f64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds.max(0.0);
    }

    /// Seconds since the game started.
    pub fn elapsed(&self) -> f64 {
        self.time - self.start_time
    }

    /// Restart the game at the current time.
    pub fn start_game(&mut self) {
        self.start_time = self.time;
    }
}
