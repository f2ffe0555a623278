//! Structured logging for dungeontracker
//!
//! Standard log levels (Error/Warning/Info/Debug) with per-module debug
//! control via --debug-<module> flags and colored console output.
//!
//! Call `logger::init()` once at startup, then use the level functions:
//!
//! ```rust
//! use dungeontracker::logger::{self, LogTag};
//!
//! logger::info(LogTag::Prices, "Gold price refreshed");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only with --debug-api
//! ```

mod core;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Scans command-line arguments for --debug-<module> and --verbose flags
/// and configures filtering. Call once in main before any logging.
pub fn init() {
    core::init_from_args();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues, shown by default)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations, shown by default)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (only shown with --debug-<module> or --verbose)
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}
