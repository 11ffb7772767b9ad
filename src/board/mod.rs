//! Guestbook message board
//!
//! Carousel over the stored messages plus the submission form and its
//! star rating control. Pure state; the app draws it.

mod carousel;
mod form;
mod rating;

pub use carousel::{ease_in_out, Carousel, CarouselState, SlotPlacement, ROTATE_MS, SLIDE_MS};
pub use form::MessageForm;
pub use rating::{RatingControl, LOW_RATING_NOTICE, RESTORE_MS, SETTLE_MS, TOAST_MS};
