//! Error types for dicemm-quoter.

use thiserror::Error;

/// Quoter errors. Only configuration problems at game start are fatal;
/// everything else degrades to a per-instrument skip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoterError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for quoter operations.
pub type QuoterResult<T> = std::result::Result<T, QuoterError>;
