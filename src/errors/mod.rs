/// Structured error handling for dungeontracker
///
/// Failure taxonomy:
/// - Transient source failures (network, malformed payloads, bad values)
///   are absorbed by the price fallback chain and never reach callers.
/// - Storage failures degrade to empty reads / skipped writes.
/// - `PriceUnavailable` is the one error surfaced outward, and only from
///   the composite NFT floor USD computation.
use thiserror::Error;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Price unavailable: {0}")]
    PriceUnavailable(String),
}

impl TrackerError {
    /// True when the error may be surfaced to an HTTP caller instead of
    /// being absorbed by a fallback value.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, TrackerError::PriceUnavailable(_))
    }
}
