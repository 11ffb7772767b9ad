//! Platform-agnostic core module - shared between WASM and native builds

pub mod error;
pub mod message;
pub mod parser;
pub mod signal;
pub mod timer;

pub use error::ApiError;
pub use message::{format_relative, Message, MessageDraft, MessageLog, DEFAULT_AUTHOR};
pub use parser::{parse_message, parse_message_list};
pub use signal::{ThemeMode, ThemeSignal, ThemeWatcher};
pub use timer::{Interval, Timer};
