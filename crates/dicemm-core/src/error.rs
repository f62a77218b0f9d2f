//! Error types for dicemm-core.

use thiserror::Error;

/// Errors raised while parsing product identifiers.
///
/// A parse failure is always scoped to one instrument: callers skip
/// the offending id and keep quoting the rest of the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("product id {id:?}: expected {expected} fields, got {got}")]
    FieldCount {
        id: String,
        expected: usize,
        got: usize,
    },

    #[error("product id {id:?}: unknown kind token {kind:?}")]
    UnknownKind { id: String, kind: String },

    #[error("product id {id:?}: {field} is not a valid number: {value:?}")]
    InvalidNumber {
        id: String,
        field: &'static str,
        value: String,
    },
}

/// Result type alias for parsing operations.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
