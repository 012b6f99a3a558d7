//! [libs/core/math-engine/src/errors.rs]
//! Typed failure modes for field, curve and key operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MathError {
    #[error("FIELD_FAULT: {0}")]
    FieldFault(String),

    #[error("INVALID_KEY_FORMAT: {0}")]
    InvalidKeyFormat(String),

    #[error("SCALAR_OVERFLOW: value is >= curve order n")]
    ScalarOverflow,

    #[error("SCALAR_ZERO: value reduces to zero")]
    ScalarZero,

    #[error("ELLIPTIC_CURVE_ERROR: {0}")]
    EllipticCurveError(#[from] secp256k1::Error),

    #[error("RANDOMNESS_UNAVAILABLE: {0}")]
    RandomnessUnavailable(String),

    #[error("AFFINE_CONVERSION_OF_INFINITY: cannot map the point at infinity to affine coordinates")]
    AffineConversionOfInfinity,

    #[error("BATCH_LENGTH_MISMATCH: results and scratch buffers must match the input length")]
    BatchLengthMismatch,
}
