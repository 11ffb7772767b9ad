//! Rotating message display
//!
//! Shows one message at a time and advances every 3 s while more than one
//! message exists. Each message's slot sits above, on, or below the visible
//! window depending on where it falls relative to the active index.

use tracing::{debug, trace};

use crate::core::Interval;

/// Time each message stays in focus
pub const ROTATE_MS: f64 = 3000.0;
/// Slide transition length
pub const SLIDE_MS: f64 = 500.0;

/// What the display is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselState {
    /// No messages: placeholder, no timer
    Empty,
    Showing(usize),
}

/// Where a message slot sits relative to the active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPlacement {
    /// Shifted fully off-screen upward
    Above,
    Active,
    /// Shifted fully off-screen downward
    Below,
}

impl SlotPlacement {
    pub fn of(index: usize, active: usize) -> Self {
        match index.cmp(&active) {
            std::cmp::Ordering::Less => SlotPlacement::Above,
            std::cmp::Ordering::Equal => SlotPlacement::Active,
            std::cmp::Ordering::Greater => SlotPlacement::Below,
        }
    }

    /// Vertical offset in slot heights
    pub fn offset(self) -> f32 {
        match self {
            SlotPlacement::Above => -1.0,
            SlotPlacement::Active => 0.0,
            SlotPlacement::Below => 1.0,
        }
    }
}

/// Cubic ease-in-out on [0..1].
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Active-index state machine for the message display.
#[derive(Debug)]
pub struct Carousel {
    count: usize,
    active: usize,
    /// Active index before the latest advance (slide origin)
    previous: usize,
    /// When the latest advance happened
    changed_at: Option<f64>,
    interval: Interval,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new()
    }
}

impl Carousel {
    pub fn new() -> Self {
        Self {
            count: 0,
            active: 0,
            previous: 0,
            changed_at: None,
            interval: Interval::new(ROTATE_MS),
        }
    }

    /// Inform the carousel of the current message count.
    ///
    /// A change cancels the rotation timer and restarts it from `now`
    /// (only when there is something to rotate).
    pub fn sync(&mut self, count: usize, now: f64) {
        if count == self.count {
            return;
        }
        debug!(from = self.count, to = count, "Carousel message count changed");
        self.count = count;
        self.interval.cancel();

        if self.active >= count {
            self.active = 0;
            self.previous = 0;
            self.changed_at = None;
        }
        if count > 1 {
            self.interval.start(now);
        }
    }

    /// Advance for every rotation period elapsed by `now`.
    pub fn poll(&mut self, now: f64) {
        let ticks = self.interval.poll(now);
        if ticks == 0 || self.count < 2 {
            return;
        }
        self.previous = self.active;
        self.active = (self.active + ticks as usize) % self.count;
        self.changed_at = Some(now);
        trace!(active = self.active, ticks, "Carousel advanced");
    }

    /// Stop rotating (view torn down).
    pub fn unmount(&mut self) {
        self.interval.cancel();
    }

    pub fn state(&self) -> CarouselState {
        if self.count == 0 {
            CarouselState::Empty
        } else {
            CarouselState::Showing(self.active)
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn timer_armed(&self) -> bool {
        self.interval.is_armed()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.interval.next_deadline()
    }

    /// Indicator dots are shown only when there is more than one message
    pub fn shows_dots(&self) -> bool {
        self.count > 1
    }

    pub fn placement(&self, index: usize) -> SlotPlacement {
        SlotPlacement::of(index, self.active)
    }

    /// Animated vertical offset of slot `index`, in slot heights.
    pub fn slot_offset(&self, index: usize, now: f64) -> f32 {
        let to = self.placement(index).offset();
        match self.changed_at {
            Some(at) if now - at < SLIDE_MS => {
                let from = SlotPlacement::of(index, self.previous).offset();
                let progress = ease_in_out(((now - at).max(0.0) / SLIDE_MS) as f32);
                from + (to - from) * progress
            }
            _ => to,
        }
    }

    pub fn is_sliding(&self, now: f64) -> bool {
        matches!(self.changed_at, Some(at) if now - at < SLIDE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_messages_rotate_every_three_seconds() {
        let mut carousel = Carousel::new();
        carousel.sync(3, 0.0);

        let mut seen = Vec::new();
        for step in 0..9 {
            let now = step as f64 * 1000.0;
            carousel.poll(now);
            seen.push(carousel.active_index());
        }
        assert_eq!(seen, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);

        carousel.poll(9000.0);
        assert_eq!(carousel.state(), CarouselState::Showing(0));
    }

    #[test]
    fn test_empty_registers_no_timer() {
        let mut carousel = Carousel::new();
        carousel.sync(0, 0.0);
        assert_eq!(carousel.state(), CarouselState::Empty);
        assert!(!carousel.timer_armed());
        assert!(!carousel.shows_dots());
    }

    #[test]
    fn test_single_message_does_not_rotate() {
        let mut carousel = Carousel::new();
        carousel.sync(1, 0.0);
        assert!(!carousel.timer_armed());
        carousel.poll(10_000.0);
        assert_eq!(carousel.state(), CarouselState::Showing(0));
        assert!(!carousel.shows_dots());
    }

    #[test]
    fn test_new_message_restarts_timer() {
        let mut carousel = Carousel::new();
        carousel.sync(2, 0.0);
        carousel.poll(2500.0);
        carousel.sync(3, 2500.0);
        // Original deadline (3000) no longer applies
        carousel.poll(3000.0);
        assert_eq!(carousel.active_index(), 0);
        carousel.poll(5500.0);
        assert_eq!(carousel.active_index(), 1);
    }

    #[test]
    fn test_unmount_cancels_rotation() {
        let mut carousel = Carousel::new();
        carousel.sync(3, 0.0);
        carousel.unmount();
        assert!(!carousel.timer_armed());
        carousel.poll(30_000.0);
        assert_eq!(carousel.active_index(), 0);
    }

    #[test]
    fn test_placement_and_slide() {
        let mut carousel = Carousel::new();
        carousel.sync(3, 0.0);
        carousel.poll(3000.0);

        assert_eq!(carousel.placement(0), SlotPlacement::Above);
        assert_eq!(carousel.placement(1), SlotPlacement::Active);
        assert_eq!(carousel.placement(2), SlotPlacement::Below);

        // Mid-slide: slot 1 moves up from below, slot 0 moves out upward
        assert!(carousel.is_sliding(3250.0));
        assert_eq!(carousel.slot_offset(1, 3000.0), 1.0);
        assert_eq!(carousel.slot_offset(1, 3250.0), 0.5);
        assert_eq!(carousel.slot_offset(0, 3250.0), -0.5);
        assert_eq!(carousel.slot_offset(2, 3250.0), 1.0);

        assert!(!carousel.is_sliding(3500.0));
        assert_eq!(carousel.slot_offset(1, 3500.0), 0.0);
        assert_eq!(carousel.slot_offset(0, 3500.0), -1.0);
    }

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }
}
