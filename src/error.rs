//! Error taxonomy for linked-data operations

use thiserror::Error;

/// Errors that can occur in nodus operations.
///
/// The first four kinds are construction and codec failures and surface
/// immediately to the caller. `NoLinkedData` and `AmbiguousLinkedData` are
/// the expected-and-handleable outcomes of a query that required exactly one
/// result but found zero or several; callers typically branch on them or use
/// the `*_or_else` accessor forms instead.
#[derive(Debug, Error)]
pub enum NodusError {
    /// Malformed identifier, disallowed datatype combination, or otherwise
    /// structurally invalid constructor input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required value was absent where a concrete value was mandatory.
    #[error("Missing value: {0}")]
    MissingValue(String),

    /// A sequence index outside the valid positive range.
    #[error("Sequence index out of range: {0}")]
    OutOfRange(i64),

    /// A sequence index numeral that exceeds the 64-bit signed range.
    #[error("Sequence index overflows the 64-bit range: {0}")]
    NumericOverflow(String),

    /// A query that required exactly one answer found none.
    #[error("No linked data: {0}")]
    NoLinkedData(String),

    /// A query that required exactly one answer found several.
    #[error("Ambiguous linked data: {0}")]
    AmbiguousLinkedData(String),
}

/// Result type for nodus operations
pub type NodusResult<T> = Result<T, NodusError>;
