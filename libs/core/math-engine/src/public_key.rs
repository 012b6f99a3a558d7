//! [libs/core/math-engine/src/public_key.rs]
//!
//! A secp256k1 public key, wrapped to centralize (de)serialization
//! around the shared global context.

use crate::errors::MathError;
use crate::private_key::SafePrivateKey;
use secp256k1::PublicKey;

#[derive(Debug, Clone, Copy)]
pub struct SafePublicKey {
    internal_point: PublicKey,
}

impl SafePublicKey {
    pub fn from_private(private_key: &SafePrivateKey) -> Self {
        let internal_point =
            PublicKey::from_secret_key(crate::context::global_context(), private_key.as_inner());
        Self { internal_point }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MathError> {
        let internal_point = PublicKey::from_slice(bytes).map_err(MathError::EllipticCurveError)?;
        Ok(Self { internal_point })
    }

    pub fn to_bytes(&self, use_compression: bool) -> Vec<u8> {
        if use_compression {
            self.internal_point.serialize().to_vec()
        } else {
            self.internal_point.serialize_uncompressed().to_vec()
        }
    }

    pub fn as_inner(&self) -> &PublicKey {
        &self.internal_point
    }
}
