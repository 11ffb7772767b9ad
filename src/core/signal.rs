//! Shared light/dark theme state
//!
//! One `ThemeSignal` lives in the host view. Components that depend on the
//! theme hold a `ThemeWatcher` and poll it once per frame; dropping the
//! watcher is how a component stops observing.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Light or dark presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Parse `"dark"` / `"light"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Shared {
    mode: ThemeMode,
    /// Bumped on every actual change
    version: u64,
}

/// Process-wide current theme with change notification.
#[derive(Clone, Debug)]
pub struct ThemeSignal {
    shared: Rc<RefCell<Shared>>,
}

impl ThemeSignal {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared { mode, version: 0 })),
        }
    }

    pub fn get(&self) -> ThemeMode {
        self.shared.borrow().mode
    }

    /// Set the mode. Watchers are notified only if the value changed.
    pub fn set(&self, mode: ThemeMode) {
        let mut shared = self.shared.borrow_mut();
        if shared.mode != mode {
            shared.mode = mode;
            shared.version += 1;
            debug!(?mode, version = shared.version, "Theme changed");
        }
    }

    pub fn toggle(&self) {
        let next = self.get().toggled();
        self.set(next);
    }

    /// Start observing. The watcher treats the current value as already seen.
    pub fn watch(&self) -> ThemeWatcher {
        ThemeWatcher {
            shared: self.shared.clone(),
            seen: self.shared.borrow().version,
        }
    }
}

/// Observer handle for a `ThemeSignal`.
#[derive(Debug)]
pub struct ThemeWatcher {
    shared: Rc<RefCell<Shared>>,
    seen: u64,
}

impl ThemeWatcher {
    pub fn current(&self) -> ThemeMode {
        self.shared.borrow().mode
    }

    /// Returns the new mode if it changed since the last call.
    pub fn changed(&mut self) -> Option<ThemeMode> {
        let shared = self.shared.borrow();
        if shared.version == self.seen {
            return None;
        }
        self.seen = shared.version;
        Some(shared.mode)
    }
}
