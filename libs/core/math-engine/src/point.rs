//! [libs/core/math-engine/src/point.rs]
//!
//! Points on secp256k1 carried in Jacobian projective coordinates
//! `(X, Y, Z)` during batch search, with `x = X/Z^2`, `y = Y/Z^3`.

use crate::errors::MathError;
use crate::field::FieldElement;
use crate::private_key::SafePrivateKey;

/// secp256k1 generator point, affine coordinates (big-endian bytes).
pub const GENERATOR_G_X: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B, 0x07,
    0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8, 0x17, 0x98,
];
pub const GENERATOR_G_Y: [u8; 32] = [
    0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08, 0xA8,
    0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10, 0xD4, 0x4B,
];

#[derive(Debug, Clone, Copy)]
pub struct JacobianPoint {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
    pub is_infinity: bool,
}

impl JacobianPoint {
    pub fn infinity() -> Self {
        Self {
            x: FieldElement::from_u64(1),
            y: FieldElement::from_u64(1),
            z: FieldElement::from_u64(0),
            is_infinity: true,
        }
    }

    pub fn from_affine_bytes(x: &[u8; 32], y: &[u8; 32]) -> Self {
        Self {
            x: FieldElement::from_bytes_be(x),
            y: FieldElement::from_bytes_be(y),
            z: FieldElement::from_u64(1),
            is_infinity: false,
        }
    }

    /// Computes `k*G` via the secp256k1 crate's constant-time scalar
    /// multiplication, then lifts the resulting affine point into
    /// Jacobian coordinates with `Z = 1`.
    pub fn from_private(private_key: &SafePrivateKey) -> Self {
        let public_key = crate::public_key::SafePublicKey::from_private(private_key);
        let uncompressed = public_key.to_bytes(false);
        let x: [u8; 32] = uncompressed[1..33].try_into().unwrap();
        let y: [u8; 32] = uncompressed[33..65].try_into().unwrap();
        Self::from_affine_bytes(&x, &y)
    }

    pub fn generator() -> Self {
        Self::from_affine_bytes(&GENERATOR_G_X, &GENERATOR_G_Y)
    }

    /// Converts to affine `(x, y)` big-endian bytes. Requires `Z` to have
    /// already been inverted into an affine `z_inverse` by the caller
    /// (the batched engine always goes through `FieldElement::batch_invert_into`
    /// rather than calling this per-point).
    pub fn to_affine_bytes_with_inverse(
        &self,
        z_inverse: &FieldElement,
    ) -> Result<([u8; 32], [u8; 32]), MathError> {
        if self.is_infinity {
            return Err(MathError::AffineConversionOfInfinity);
        }
        let z_inv_sq = z_inverse.square_modular();
        let z_inv_cubed = z_inv_sq.multiply_modular(z_inverse);
        let affine_x = self.x.multiply_modular(&z_inv_sq);
        let affine_y = self.y.multiply_modular(&z_inv_cubed);
        Ok((affine_x.internal_words_to_be_bytes(), affine_y.internal_words_to_be_bytes()))
    }

    /// Direct single-point affine conversion (used by tests and the
    /// one-off generator-multiple derivation at rekey, not the hot loop).
    pub fn to_affine_bytes(&self) -> Result<([u8; 32], [u8; 32]), MathError> {
        let z_inverse = self.z.invert()?;
        self.to_affine_bytes_with_inverse(&z_inverse)
    }
}

impl Default for JacobianPoint {
    fn default() -> Self {
        Self::infinity()
    }
}
