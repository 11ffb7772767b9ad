//! Platform-agnostic time utilities
//!
//! Monotonic time since app start drives animation and UI timers; wall-clock
//! time stamps messages and their relative ages.

use chrono::{DateTime, Utc};

#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Monotonic milliseconds, the unit of every UI timer
pub fn now_millis() -> f64 {
    now_seconds() * 1000.0
}

/// Wall-clock time
pub fn wall_clock() -> DateTime<Utc> {
    Utc::now()
}
