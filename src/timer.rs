//! Elapsed-seconds counter for a single game.
//!
//! The host decides when a second has passed and calls [`GameTimer::advance`];
//! the counter only accumulates while it is both enabled and active.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTimer {
    elapsed: u64,
    enabled: bool,
    active: bool,
}

impl GameTimer {
    pub fn new(enabled: bool) -> Self {
        Self {
            elapsed: 0,
            enabled,
            active: true,
        }
    }

    /// Back to zero for a fresh deal.
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.active = true;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Cleared once the game is won.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_running(&self) -> bool {
        self.enabled && self.active
    }

    pub fn advance(&mut self, seconds: u64) {
        if self.is_running() {
            self.elapsed = self.elapsed.saturating_add(seconds);
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed
    }

    pub fn formatted(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

/// `HH:MM:SS`; hours keep counting past 99.
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
