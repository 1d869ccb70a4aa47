//! Timing utilities for scheduled work on the frame loop.
//!
//! Both timers are driven by an explicit `Instant` passed in on every tick
//! instead of owning a clock, so the frame driver (and tests) decide what
//! "now" means.

use std::time::{Duration, Instant};

/// Coalesces bursts of mutations into a single action after a quiet period.
///
/// Each [`touch`](Self::touch) stamps the last mutation time; [`poll`](Self::poll)
/// fires exactly once when the quiet period has elapsed since the latest stamp.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    last_mutation: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_mutation: None,
        }
    }

    /// Record a mutation at `now`, pushing the deadline back.
    pub fn touch(&mut self, now: Instant) {
        self.last_mutation = Some(now);
    }

    /// Returns true once when the quiet period since the last mutation has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_mutation {
            Some(stamp) if now.saturating_duration_since(stamp) >= self.quiet => {
                self.last_mutation = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a mutation is waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.last_mutation.is_some()
    }

    /// Drop any pending mutation without firing (used after an explicit flush).
    pub fn clear(&mut self) {
        self.last_mutation = None;
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

/// Fixed-interval trigger. The first tick arms the timer; it then fires every
/// `period` of elapsed time.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    last_fire: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_fire: None,
        }
    }

    /// Returns true when a full period has elapsed since the last firing.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_fire {
            None => {
                self.last_fire = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.period => {
                self.last_fire = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_coalesces_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));

        for i in 0..10 {
            debouncer.touch(start + Duration::from_millis(i * 100));
        }
        // Last touch at 900ms; still quiet-waiting at 1800ms
        assert!(!debouncer.poll(start + Duration::from_millis(1800)));
        assert!(debouncer.poll(start + Duration::from_millis(1900)));
        // Fires only once
        assert!(!debouncer.poll(start + Duration::from_millis(5000)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debouncer_idle_never_fires() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        assert!(!debouncer.poll(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_debouncer_clear() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.touch(start);
        debouncer.clear();
        assert!(!debouncer.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_interval_timer() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new(Duration::from_secs(1));

        assert!(!timer.ready(start));
        assert!(!timer.ready(start + Duration::from_millis(999)));
        assert!(timer.ready(start + Duration::from_millis(1000)));
        assert!(!timer.ready(start + Duration::from_millis(1500)));
        assert!(timer.ready(start + Duration::from_millis(2100)));
    }
}
