//! Star rating input that refuses anything below five stars
//!
//! Picking fewer than five stars drops the rating to zero, pulses the stars,
//! and pops a notification. One second later the rating snaps back to five,
//! the pulse stops half a second after that, and the notification hides three
//! seconds after the click. Every low click re-arms all three timers.

use tracing::debug;

use crate::core::message::MAX_RATING;
use crate::core::Timer;

/// Delay before the rating is forced back to five
pub const RESTORE_MS: f64 = 1000.0;
/// Pulse continues this long after the restore
pub const SETTLE_MS: f64 = 500.0;
/// Notification lifetime, measured from the click
pub const TOAST_MS: f64 = 3000.0;
/// Notification text for a rejected rating
pub const LOW_RATING_NOTICE: &str = "Why would you lower the rating?";

#[derive(Debug)]
pub struct RatingControl {
    rating: u8,
    resetting: bool,
    toast_visible: bool,
    restore: Timer,
    settle: Timer,
    toast: Timer,
}

impl Default for RatingControl {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingControl {
    pub fn new() -> Self {
        Self {
            rating: MAX_RATING,
            resetting: false,
            toast_visible: false,
            restore: Timer::new(),
            settle: Timer::new(),
            toast: Timer::new(),
        }
    }

    /// Handle a click on star `star` (1-based) at time `now`.
    pub fn click(&mut self, star: u8, now: f64) {
        if star >= MAX_RATING {
            self.rating = MAX_RATING;
            return;
        }

        debug!(star, "Low rating rejected");
        self.toast_visible = true;
        self.resetting = true;
        self.rating = 0;

        self.restore.arm(now, RESTORE_MS);
        self.settle.cancel();
        self.toast.arm(now, TOAST_MS);
    }

    /// Fire any due timers.
    pub fn poll(&mut self, now: f64) {
        if let Some(restored_at) = self.restore.fire(now) {
            self.rating = MAX_RATING;
            self.settle.arm(restored_at, SETTLE_MS);
        }
        if self.settle.fire(now).is_some() {
            self.resetting = false;
        }
        if self.toast.fire(now).is_some() {
            self.toast_visible = false;
        }
    }

    /// Current displayed rating (0 while a rejection is in progress)
    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// Rating to store if the form is submitted right now.
    ///
    /// During a rejection the displayed value is 0, but the control is
    /// committed to restoring five.
    pub fn committed(&self) -> u8 {
        if self.rating == 0 {
            MAX_RATING
        } else {
            self.rating
        }
    }

    pub fn is_resetting(&self) -> bool {
        self.resetting
    }

    pub fn toast_visible(&self) -> bool {
        self.toast_visible
    }

    /// Earliest pending deadline, for scheduling the next repaint
    pub fn next_deadline(&self) -> Option<f64> {
        [
            self.restore.deadline(),
            self.settle.deadline(),
            self.toast.deadline(),
        ]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    }

    /// Back to the default rating after a submission. Pending timers keep running.
    pub fn reset(&mut self) {
        self.rating = MAX_RATING;
    }

    /// Cancel all timers and settle into the default state.
    pub fn teardown(&mut self) {
        self.restore.cancel();
        self.settle.cancel();
        self.toast.cancel();
        self.rating = MAX_RATING;
        self.resetting = false;
        self.toast_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Sample (rating, resetting, toast) at each time point
    fn trace(control: &mut RatingControl, times: &[f64]) -> Vec<(u8, bool, bool)> {
        times
            .iter()
            .map(|&t| {
                control.poll(t);
                (control.rating(), control.is_resetting(), control.toast_visible())
            })
            .collect()
    }

    #[test]
    fn test_five_stars_has_no_side_effects() {
        let mut control = RatingControl::new();
        control.click(5, 0.0);
        assert_eq!(control.rating(), 5);
        assert!(!control.toast_visible());
        assert!(!control.is_resetting());
        assert_eq!(control.next_deadline(), None);
    }

    #[test]
    fn test_low_click_sequence() {
        let mut control = RatingControl::new();
        assert_eq!(control.rating(), 5);
        assert!(!control.toast_visible());

        control.click(3, 0.0);
        assert_eq!(control.rating(), 0);
        assert!(control.toast_visible());
        assert!(control.is_resetting());

        let seen = trace(&mut control, &[999.0, 1000.0, 1499.0, 1500.0, 2999.0, 3000.0]);
        assert_eq!(
            seen,
            vec![
                (0, true, true),
                (5, true, true),
                (5, true, true),
                (5, false, true),
                (5, false, true),
                (5, false, false),
            ]
        );
        assert_eq!(control.next_deadline(), None);
    }

    #[test]
    fn test_repeat_click_rearms_all_timers() {
        let mut control = RatingControl::new();
        control.click(1, 0.0);
        control.poll(1200.0);
        assert_eq!(control.rating(), 5);

        // Second click while settling: settle cancelled, restore/toast re-armed
        control.click(4, 1300.0);
        let seen = trace(&mut control, &[1800.0, 2300.0, 2799.0, 2800.0, 3000.0, 4300.0]);
        assert_eq!(
            seen,
            vec![
                (0, true, true),
                (5, true, true),
                (5, true, true),
                (5, false, true),
                (5, false, true),
                (5, false, false),
            ]
        );
    }

    #[test]
    fn test_late_frame_fires_chained_timers() {
        let mut control = RatingControl::new();
        control.click(2, 0.0);
        control.poll(10_000.0);
        assert_eq!(control.rating(), 5);
        assert!(!control.is_resetting());
        assert!(!control.toast_visible());
    }

    #[test]
    fn test_committed_rating_never_zero() {
        let mut control = RatingControl::new();
        control.click(2, 0.0);
        assert_eq!(control.rating(), 0);
        assert_eq!(control.committed(), 5);
    }

    #[test]
    fn test_teardown_cancels() {
        let mut control = RatingControl::new();
        control.click(2, 0.0);
        control.teardown();
        assert_eq!(control.next_deadline(), None);
        assert_eq!(control.rating(), 5);
        assert!(!control.toast_visible());
    }
}
