//! Common error types for globhook-platform.

use globhook_core::KeyCode;
use thiserror::Error;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
    #[error("no platform key for key code {0}")]
    UnmappedKey(KeyCode),
    #[error("event of type {0} cannot be simulated on this engine")]
    UnsupportedEvent(String),
    #[error("simulation failed: {0}")]
    SimulateFailed(String),
    #[error("display query failed: {0}")]
    Display(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
