//! Polled timer handles
//!
//! The UI runs one frame loop; deferred and periodic callbacks are modelled as
//! deadlines that the owner polls with the current clock (milliseconds).
//! Arming always replaces the previous deadline, and owners cancel on teardown.

use tracing::trace;

/// One-shot deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    deadline: Option<f64>,
}

impl Timer {
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm to fire `delay_ms` after `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: f64, delay_ms: f64) {
        self.deadline = Some(now + delay_ms);
        trace!(deadline = now + delay_ms, "Timer armed");
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Fire if due. Returns the deadline that elapsed and disarms.
    pub fn fire(&mut self, now: f64) -> Option<f64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(deadline)
            }
            _ => None,
        }
    }
}

/// Fixed-period repeating deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period_ms: f64,
    next: Option<f64>,
}

impl Interval {
    pub const fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            next: None,
        }
    }

    /// Start counting periods from `now`, discarding any pending tick.
    pub fn start(&mut self, now: f64) {
        self.next = Some(now + self.period_ms);
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.next
    }

    /// Number of whole periods elapsed since the last poll.
    ///
    /// A frame that arrives late reports every missed tick so callers stay
    /// aligned with wall-clock time.
    pub fn poll(&mut self, now: f64) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };
        let mut ticks = 0;
        while now >= next {
            ticks += 1;
            next += self.period_ms;
        }
        self.next = Some(next);
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = Timer::new();
        assert_eq!(timer.fire(0.0), None);

        timer.arm(100.0, 1000.0);
        assert!(timer.is_armed());
        assert_eq!(timer.fire(1099.0), None);
        assert_eq!(timer.fire(1100.0), Some(1100.0));
        assert!(!timer.is_armed());
        assert_eq!(timer.fire(5000.0), None);
    }

    #[test]
    fn test_timer_rearm_replaces_deadline() {
        let mut timer = Timer::new();
        timer.arm(0.0, 1000.0);
        timer.arm(800.0, 1000.0);
        assert_eq!(timer.fire(1000.0), None);
        assert_eq!(timer.fire(1800.0), Some(1800.0));

        timer.arm(0.0, 10.0);
        timer.cancel();
        assert_eq!(timer.fire(100.0), None);
    }

    #[test]
    fn test_interval_counts_missed_periods() {
        let mut interval = Interval::new(3000.0);
        assert_eq!(interval.poll(10_000.0), 0);

        interval.start(0.0);
        assert_eq!(interval.poll(2999.0), 0);
        assert_eq!(interval.poll(3000.0), 1);
        assert_eq!(interval.poll(3001.0), 0);
        // Stalled frame: two periods pass at once
        assert_eq!(interval.poll(9500.0), 2);
        assert_eq!(interval.next_deadline(), Some(12_000.0));

        interval.cancel();
        assert_eq!(interval.poll(50_000.0), 0);
    }
}
