//! Transient "saved" flag.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Visibility of the "saved" confirmation.
///
/// Each [`show`](Self::show) queues its own reset deadline. Resets never
/// cancel one another: the earliest outstanding one clears the flag.
#[derive(Debug, Default)]
pub struct NotificationFlag {
    visible: bool,
    resets: VecDeque<Instant>,
}

impl NotificationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag and schedule a reset `duration` after `now`.
    pub fn show(&mut self, now: Instant, duration: Duration) {
        self.visible = true;
        self.resets.push_back(now + duration);
    }

    /// Run every reset due at `now`. Returns true if the flag went down.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut fired = false;
        while self.resets.front().is_some_and(|deadline| *deadline <= now) {
            self.resets.pop_front();
            fired = true;
        }
        if fired && self.visible {
            self.visible = false;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Earliest outstanding reset.
    pub fn next_reset(&self) -> Option<Instant> {
        self.resets.front().copied()
    }
}
