//! [libs/core/math-engine/src/lib.rs]
//!
//! Low-level secp256k1 arithmetic for the vanity-address search engine:
//! Montgomery-form field elements, Jacobian curve points, scalar
//! reduction, key wrappers, HASH160 composition and the pubkey range
//! test used in the hot-path inner scan.

pub mod arithmetic;
pub mod context;
pub mod curve;
pub mod errors;
pub mod field;
pub mod hashing;
pub mod point;
pub mod private_key;
pub mod public_key;
pub mod range;
pub mod scalar;

/// Runtime hardware capability checks, consulted once at startup to
/// decide whether to log that accelerated carry-chain arithmetic is
/// available. Informational only — the fallback path is always correct.
pub mod hardware {
    #[cfg(target_arch = "x86_64")]
    pub fn is_optimized_arithmetic_supported() -> bool {
        is_x86_feature_detected!("adx") && is_x86_feature_detected!("bmi2")
    }

    #[cfg(not(target_arch = "x86_64"))]
    pub fn is_optimized_arithmetic_supported() -> bool {
        false
    }
}

pub mod prelude {
    pub use crate::context::global_context;
    pub use crate::curve::{add_mixed, double};
    pub use crate::errors::MathError;
    pub use crate::field::FieldElement;
    pub use crate::hashing::hash160;
    pub use crate::point::JacobianPoint;
    pub use crate::private_key::SafePrivateKey;
    pub use crate::public_key::SafePublicKey;
    pub use crate::range::is_within_range;
    pub use crate::scalar::Scalar;
}
