//! [libs/core/math-engine/src/private_key.rs]
//!
//! A secp256k1 private key, wrapped to keep callers from handling raw
//! `secp256k1::SecretKey` values directly outside this crate.

use crate::errors::MathError;
use secp256k1::SecretKey;
use secp256k1::rand::rngs::OsRng;

#[derive(Debug, Clone, Copy)]
pub struct SafePrivateKey {
    inner: SecretKey,
}

impl SafePrivateKey {
    /// Draws a fresh key from the OS CSPRNG via the secp256k1 crate's
    /// bundled `rand` integration.
    pub fn new_random() -> Self {
        let (secret_key, _) = crate::context::global_context().generate_keypair(&mut OsRng);
        Self { inner: secret_key }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MathError> {
        let secret_key = SecretKey::from_slice(bytes).map_err(MathError::EllipticCurveError)?;
        Ok(Self { inner: secret_key })
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.secret_bytes()
    }

    pub fn as_inner(&self) -> &SecretKey {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_keys_do_not_collide_over_a_modest_sample() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let key = SafePrivateKey::new_random();
            assert!(seen.insert(key.to_bytes()));
        }
    }

    #[test]
    fn from_bytes_rejects_zero() {
        assert!(SafePrivateKey::from_bytes(&[0u8; 32]).is_err());
    }
}
