//! Error types for the cache crate
//!
//! Cache operations themselves never fail: absence, expiry and a disabled
//! cache are reported in-band. Errors only come from loading configuration.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration document could not be parsed or was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::InvalidConfig(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
