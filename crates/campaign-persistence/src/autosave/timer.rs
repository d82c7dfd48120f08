//! Debounce timer with an explicit current handle.

use std::time::Instant;

/// Identifies one arming of a [`Debounce`] timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A single-slot timer: arming it always cancels the previous arming.
#[derive(Debug, Default)]
pub struct Debounce {
    current: Option<(TimerHandle, Instant)>,
    generation: u64,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any armed timer, then arm a new one for `deadline`.
    pub fn arm(&mut self, deadline: Instant) -> TimerHandle {
        self.cancel();
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.current = Some((handle, deadline));
        handle
    }

    /// Disarm the timer, returning the handle that was armed.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.current.take().map(|(handle, _)| handle)
    }

    /// Take the armed handle if its deadline has been reached.
    pub fn fire(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.current {
            Some((handle, deadline)) if deadline <= now => {
                self.current = None;
                Some(handle)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.current.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.map(|(_, deadline)| deadline)
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.current.map(|(handle, _)| handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_arm_replaces_previous() {
        let start = Instant::now();
        let mut timer = Debounce::new();

        let first = timer.arm(start + Duration::from_millis(100));
        let second = timer.arm(start + Duration::from_millis(300));

        assert_ne!(first, second);
        assert_eq!(timer.handle(), Some(second));
        // The first deadline no longer fires anything
        assert_eq!(timer.fire(start + Duration::from_millis(150)), None);
        assert_eq!(timer.fire(start + Duration::from_millis(300)), Some(second));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = Debounce::new();
        assert_eq!(timer.cancel(), None);

        let handle = timer.arm(start);
        assert_eq!(timer.cancel(), Some(handle));
        assert_eq!(timer.fire(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_fire_is_one_shot() {
        let start = Instant::now();
        let mut timer = Debounce::new();
        timer.arm(start + Duration::from_millis(10));

        assert!(timer.fire(start + Duration::from_millis(10)).is_some());
        assert!(timer.fire(start + Duration::from_millis(20)).is_none());
    }
}
