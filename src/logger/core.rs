/// Core logging implementation with automatic filtering
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Debug level requires the --debug-<module> flag for that tag
/// 3. --verbose enables debug output for every tag
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Utc;
use colored::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::RwLock;

struct LoggerConfig {
    verbose: bool,
    debug_tags: HashSet<String>,
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> = Lazy::new(|| {
    RwLock::new(LoggerConfig {
        verbose: false,
        debug_tags: HashSet::new(),
    })
});

/// Scan command-line arguments for --verbose and --debug-<module> flags
pub fn init_from_args() {
    let args = crate::arguments::get_cmd_args();
    let mut config = LOGGER_CONFIG.write().unwrap();

    config.verbose = args.iter().any(|a| a == "--verbose");
    config.debug_tags = args
        .iter()
        .filter_map(|a| a.strip_prefix("--debug-").map(|s| s.to_string()))
        .collect();
}

/// Check if a log message should be displayed
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level == LogLevel::Debug {
        let config = LOGGER_CONFIG.read().unwrap();
        return config.verbose || config.debug_tags.contains(tag.to_debug_key());
    }

    true
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
    let tag_str = format!("[{}]", tag.as_str());

    let line = match level {
        LogLevel::Error => format!(
            "{} {} {} {}",
            format!("[{}]", timestamp).dimmed(),
            "ERROR".red().bold(),
            tag_str.red(),
            message.red()
        ),
        LogLevel::Warning => format!(
            "{} {} {} {}",
            format!("[{}]", timestamp).dimmed(),
            "WARN ".yellow().bold(),
            tag_str.yellow(),
            message
        ),
        LogLevel::Info => format!(
            "{} {} {} {}",
            format!("[{}]", timestamp).dimmed(),
            "INFO ".blue().bold(),
            tag_str.blue(),
            message
        ),
        LogLevel::Debug => format!(
            "{} {} {} {}",
            format!("[{}]", timestamp).dimmed(),
            "DEBUG".purple().bold(),
            tag_str.purple(),
            message.dimmed()
        ),
    };

    println!("{}", line);
    let _ = io::stdout().flush();
}
