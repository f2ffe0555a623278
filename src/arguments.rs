/// Centralized argument handling for dungeontracker
///
/// Consolidates command-line argument parsing and debug flag checking so
/// every module reads flags the same way.
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// MODE FLAGS
// =============================================================================

/// Run the game data fetcher once and exit
pub fn is_fetch_once_enabled() -> bool {
    has_arg("--fetch-once")
}

/// Help requested
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Override for the config file path
pub fn get_config_path() -> Option<String> {
    get_arg_value("--config")
}

/// Override for the webserver port
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|v| v.parse().ok())
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// API calls debug mode
pub fn is_debug_api_enabled() -> bool {
    has_arg("--debug-api")
}

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Print usage information
pub fn print_help() {
    println!("dungeontracker - in-game economy tracker");
    println!();
    println!("USAGE:");
    println!("    dungeontracker [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <PATH>      Path to config.json (default: ./config.json)");
    println!("    --port <PORT>        Override webserver port");
    println!("    --fetch-once        Run the game data fetcher once and exit");
    println!("    --debug-prices      Enable price cache debug output");
    println!("    --debug-api         Enable API client debug output");
    println!("    --debug-database    Enable database debug output");
    println!("    --debug-webserver   Enable webserver debug output");
    println!("    --debug-fetcher     Enable fetcher debug output");
    println!("    --verbose           Enable all debug output");
    println!("    -h, --help          Print this help message");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_value_parsing() {
        set_cmd_args(vec![
            "dungeontracker".to_string(),
            "--port".to_string(),
            "9090".to_string(),
            "--debug-api".to_string(),
        ]);

        assert_eq!(get_arg_value("--port"), Some("9090".to_string()));
        assert_eq!(get_port_override(), Some(9090));
        assert!(is_debug_api_enabled());
        assert!(!is_debug_webserver_enabled());
    }
}
