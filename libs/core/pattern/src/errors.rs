//! [libs/core/pattern/src/errors.rs]
//! Typed failure modes for prefix compilation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("INVALID_PREFIX: prefix must start with '1'")]
    MustStartWithOne,

    #[error("INVALID_PREFIX: prefix longer than 28 characters")]
    TooLong,

    #[error("INVALID_PREFIX: address '{0}' contains a character outside the Base58 alphabet")]
    InvalidCharacter(String),

    #[error("NO_VALID_PREFIXES: at least one prefix must be supplied")]
    NoPrefixesSupplied,

    #[error("TOO_MANY_PATTERNS: pattern table exceeded 10000 entries after coalescing")]
    TooManyPatterns,
}
