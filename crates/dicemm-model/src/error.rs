//! Error types for dicemm-model.

use thiserror::Error;

/// Numerical failures while pricing a single instrument.
///
/// These never abort a quoting call: the orchestrator records the
/// instrument as skipped and moves on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("non-finite {context}: {value}")]
    NonFinite { context: &'static str, value: f64 },
}

/// Result type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
