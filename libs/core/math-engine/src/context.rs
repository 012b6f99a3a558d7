//! [libs/core/math-engine/src/context.rs]
//! Process-wide secp256k1 context, built once and shared read-only.

use secp256k1::{All, Secp256k1};
use std::sync::LazyLock;

pub static GLOBAL_CONTEXT: LazyLock<Secp256k1<All>> = LazyLock::new(Secp256k1::new);

/// Returns the shared context used for key generation and verification.
pub fn global_context() -> &'static Secp256k1<All> {
    &GLOBAL_CONTEXT
}
