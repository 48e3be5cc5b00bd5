//! Spawn cadence for the round loop.

/// Fixed-cadence timer deciding when the playfield attempts a spawn.
///
/// Due immediately after construction or reset. After a successful spawn
/// the caller re-arms it for a full interval; after a skipped spawn (no
/// free slot) the caller defers, and the next frame tries again.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundScheduler {
    interval: f32,
    until_next: f32,
}

impl RoundScheduler {
    /// Scheduler with `interval` seconds between spawns.
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            until_next: 0.0,
        }
    }

    /// Let `dt` seconds pass. Returns `true` when a spawn attempt is due.
    pub fn poll(&mut self, dt: f32) -> bool {
        self.until_next -= dt;
        self.until_next <= 0.0
    }

    /// Wait a full interval before the next attempt.
    pub fn rearm(&mut self) {
        self.until_next = self.interval;
    }

    /// Retry on the next poll.
    pub fn defer(&mut self) {
        self.until_next = 0.0;
    }

    /// Make the next poll due, as after construction.
    pub fn reset(&mut self) {
        self.until_next = 0.0;
    }

    /// Seconds between spawns.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds until the next attempt is due (zero or negative when due).
    pub fn until_next(&self) -> f32 {
        self.until_next
    }
}
