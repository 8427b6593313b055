//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations by the caller.
///
/// Every variant is an invalid-argument condition: the helpers are pure
/// computations, so nothing here is transient or worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("target base is empty")]
    EmptyBase,

    #[error("radix {0} exceeds the canonical alphabet (max 62); pass an explicit alphabet")]
    RadixTooLarge(u32),

    #[error("base needs at least two symbols, got {0}")]
    RadixTooSmall(usize),

    #[error("symbol `{symbol}` appears twice in alphabet `{alphabet}`")]
    DuplicateSymbol { symbol: char, alphabet: String },

    #[error("symbol `{symbol}` at index {index} does not exist in alphabet `{alphabet}`")]
    UnknownSymbol {
        symbol: char,
        index: usize,
        alphabet: String,
    },

    #[error("wrong decimal number: {0}")]
    NotDecimal(String),

    #[error("invalid size notation: {0}")]
    InvalidSize(String),

    #[error("invalid datetime format: {0}")]
    InvalidFormat(String),

    #[error("cannot encode as JSON: {0}")]
    JsonEncode(String),

    #[error("invalid split pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
