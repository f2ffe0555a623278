/// Log tags identifying the module a message originates from
///
/// Each tag maps to a --debug-<key> command-line flag.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Prices,
    Roi,
    Api,
    Database,
    Webserver,
    Fetcher,
}

impl LogTag {
    /// Get the display name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Prices => "PRICES",
            LogTag::Roi => "ROI",
            LogTag::Api => "API",
            LogTag::Database => "DATABASE",
            LogTag::Webserver => "WEBSERVER",
            LogTag::Fetcher => "FETCHER",
        }
    }

    /// Get the key used for --debug-<key> flag matching
    pub fn to_debug_key(&self) -> &'static str {
        match self {
            LogTag::System => "system",
            LogTag::Prices => "prices",
            LogTag::Roi => "roi",
            LogTag::Api => "api",
            LogTag::Database => "database",
            LogTag::Webserver => "webserver",
            LogTag::Fetcher => "fetcher",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
