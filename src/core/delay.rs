//! Fire-once delayed actions polled from the frame loop

use std::time::{Duration, Instant};

/// A single pending deadline
///
/// Arming replaces any previous deadline. `take_expired` reports expiry
/// exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Delayed {
    deadline: Option<Instant>,
}

impl Delayed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Armed and not yet expired
    pub fn is_pending(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now < d)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the deadline, if still pending
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .filter(|&d| now < d)
            .map(|d| d.duration_since(now))
    }

    /// True once, on the first poll at or after the deadline
    pub fn take_expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_exactly_once() {
        let start = Instant::now();
        let mut delay = Delayed::new();
        delay.arm(start, Duration::from_millis(500));

        assert!(delay.is_pending(start + Duration::from_millis(499)));
        assert!(!delay.take_expired(start + Duration::from_millis(499)));
        assert!(delay.take_expired(start + Duration::from_millis(500)));
        assert!(!delay.take_expired(start + Duration::from_secs(5)));
        assert!(!delay.is_armed());
    }

    #[test]
    fn test_rearm_replaces_deadline() {
        let start = Instant::now();
        let mut delay = Delayed::new();
        delay.arm(start, Duration::from_millis(100));
        delay.arm(start, Duration::from_millis(900));
        assert!(!delay.take_expired(start + Duration::from_millis(200)));
        assert!(delay.is_pending(start + Duration::from_millis(899)));
        assert!(delay.take_expired(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_remaining_counts_down_to_none() {
        let start = Instant::now();
        let mut delay = Delayed::new();
        assert_eq!(delay.remaining(start), None);

        delay.arm(start, Duration::from_millis(800));
        assert_eq!(
            delay.remaining(start + Duration::from_millis(300)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(delay.remaining(start + Duration::from_millis(800)), None);
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut delay = Delayed::new();
        delay.arm(start, Duration::ZERO);
        delay.cancel();
        assert!(!delay.take_expired(start + Duration::from_secs(1)));
    }
}
