// Score, level and countdown state for one scene. Counters live in memory
// and ride the per-tick snapshot; persistence belongs to whoever consumes
// the updates.

/// Wall-clock countdown driven by tick deltas. Cancellable and resettable;
/// a reset can never deliver an expiry from before the reset because the
/// remaining time is the only pending state.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    start_seconds: f32,
    remaining: f32,
    running: bool,
}

impl Countdown {
    pub fn new(start_seconds: f32) -> Self {
        Self {
            start_seconds,
            remaining: start_seconds,
            running: true,
        }
    }

    /// Advances by `dt`; returns true exactly on the tick the countdown
    /// reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            return true;
        }
        false
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        if self.remaining > 0.0 {
            self.running = true;
        }
    }

    /// Restores the full duration and starts counting again.
    pub fn restart(&mut self) {
        self.remaining = self.start_seconds;
        self.running = true;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

pub struct Session {
    pub score: u64,
    pub level: u32,
    pub countdown: Countdown,
}

impl Session {
    pub fn new(countdown_seconds: f32) -> Self {
        Self {
            score: 0,
            level: 1,
            countdown: Countdown::new(countdown_seconds),
        }
    }

    /// Adds (or subtracts) points; the score never goes below zero.
    pub fn add_score(&mut self, points: i64) {
        self.score = self.score.saturating_add_signed(points);
    }

    /// Sets the level (minimum 1) and restarts the countdown, mirroring the
    /// level-change flow of the menu surface.
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.countdown.restart();
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
        self.countdown.restart();
    }
}
