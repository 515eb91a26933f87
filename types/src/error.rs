//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for parsing shared values.
#[derive(Debug, Error)]
pub enum AgoraError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
