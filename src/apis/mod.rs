//! HTTP API clients
//!
//! One client per upstream service, each with its own hardcoded base URL
//! and timeout, sharing the `HttpClient` wrapper. Price clients return
//! `ApiError`; the fallback chain in `prices` absorbs every variant.

pub mod birdeye;
pub mod client;
pub mod game;
pub mod magiceden;

/// Errors returned by API clients
#[derive(Debug, Clone)]
pub enum ApiError {
    NetworkError(String),
    InvalidResponse(String),
    NotFound,
    Timeout,
    Disabled,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::NotFound => write!(f, "Not found"),
            ApiError::Timeout => write!(f, "Request timeout"),
            ApiError::Disabled => write!(f, "API disabled"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}
