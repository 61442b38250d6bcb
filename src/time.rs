// Clock state shared between the GTP loop and the search.
//
// Allocation per move:
// - No main time, or less than two byoyomi periods left: spend max(byoyomi, 1s)
// - Otherwise: left_time / (55 + max(50 - move_count, 0)), so the opening gets less

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeManager {
    pub main_time: f64,
    pub byoyomi: f64,
    pub left_time: f64,
}

impl Default for TimeManager {
    fn default() -> Self { Self::new(0.0, 5.0) }
}

impl TimeManager {
    pub fn new(main_time: f64, byoyomi: f64) -> Self {
        Self { main_time, byoyomi, left_time: main_time }
    }

    /// `time_settings`: resets the remaining time to the new main time.
    pub fn set_time_settings(&mut self, main_time: f64, byoyomi: f64) {
        self.main_time = main_time;
        self.left_time = main_time;
        self.byoyomi = byoyomi;
    }

    pub fn set_left_time(&mut self, left_time: f64) { self.left_time = left_time; }

    /// Seconds the search may spend on the next move.
    pub fn think_time(&self, move_count: usize) -> f64 {
        if self.main_time == 0.0 || self.left_time < self.byoyomi * 2.0 {
            self.byoyomi.max(1.0)
        } else {
            let moves_ahead = 55.0 + 50usize.saturating_sub(move_count) as f64;
            self.left_time / moves_ahead
        }
    }

    pub fn consume(&mut self, elapsed: f64) {
        self.left_time = (self.left_time - elapsed).max(0.0);
    }
}
