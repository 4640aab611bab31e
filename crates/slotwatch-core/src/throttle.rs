//! Notification throttle.
//!
//! Bounds notification volume while slots stay open across many checks.
//! For a window of `N`, successes `1..=N` notify, `N+1..=2N` are
//! suppressed, success `2N+1` notifies and the cycle starts over. Any
//! failure restarts the cycle immediately.
//!
//! Invariant: `suppressed_count > 0` implies `consecutive_successes >= window`.

use tracing::debug;

/// Counts consecutive successes and decides which of them notify.
#[derive(Debug, Clone)]
pub struct NotifyThrottle {
    /// Length of both the notify run and the suppression episode.
    window: u32,
    /// Successes since the last failure or reset.
    consecutive_successes: u32,
    /// Successes suppressed in the current episode. `0` when not suppressing.
    suppressed_count: u32,
}

impl NotifyThrottle {
    /// Create a throttle. A window below 1 is treated as 1.
    pub fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            consecutive_successes: 0,
            suppressed_count: 0,
        }
    }

    /// Record a success. Returns `true` if this success should notify.
    pub fn on_success(&mut self) -> bool {
        self.consecutive_successes += 1;

        if self.suppressed_count > 0 {
            self.suppressed_count += 1;
            if self.suppressed_count > self.window {
                debug!(window = self.window, "suppression episode over");
                self.reset();
                return true;
            }
            return false;
        }

        // The first `window` successes notify; the one after opens the episode.
        if self.consecutive_successes > self.window {
            debug!(
                successes = self.consecutive_successes,
                window = self.window,
                "entering suppression"
            );
            self.suppressed_count = 1;
            return false;
        }

        true
    }

    /// Record a failure. Both counters go back to zero.
    pub fn on_failure(&mut self) {
        self.reset();
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn consecutive_successes(&self) -> u32 {
        self.consecutive_successes
    }

    pub fn suppressed_count(&self) -> u32 {
        self.suppressed_count
    }

    /// Whether a suppression episode is in progress.
    pub fn is_suppressing(&self) -> bool {
        self.suppressed_count > 0
    }

    fn reset(&mut self) {
        self.consecutive_successes = 0;
        self.suppressed_count = 0;
    }
}
