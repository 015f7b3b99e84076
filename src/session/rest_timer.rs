//! Rest countdown between sets.

/// Countdown timer advanced once per second by the session clock.
///
/// Stops on its own when it reaches zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestTimer {
    /// Seconds left; zero when not running
    remaining: u32,
    /// Duration the countdown was started with
    duration: u32,
    running: bool,
}

impl RestTimer {
    /// Create a stopped timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown.
    ///
    /// A zero duration leaves the timer stopped.
    pub fn start(&mut self, seconds: u32) {
        self.duration = seconds;
        self.remaining = seconds;
        self.running = seconds > 0;
        tracing::debug!("Rest timer started for {}s", seconds);
    }

    /// Stop the countdown.
    pub fn stop(&mut self) {
        self.remaining = 0;
        self.running = false;
    }

    /// Add time to a running countdown.
    pub fn extend(&mut self, seconds: u32) {
        if self.running {
            self.remaining = self.remaining.saturating_add(seconds);
            self.duration = self.duration.saturating_add(seconds);
        }
    }

    /// Advance by one second. Returns true when the countdown just finished.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            tracing::debug!("Rest timer finished");
            return true;
        }

        false
    }

    /// Check whether the countdown is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds left, if running.
    pub fn remaining(&self) -> Option<u32> {
        self.running.then_some(self.remaining)
    }

    /// Progress through the rest period (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        if !self.running || self.duration == 0 {
            return 0.0;
        }
        1.0 - self.remaining as f32 / self.duration as f32
    }
}
