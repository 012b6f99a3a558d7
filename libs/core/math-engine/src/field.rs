//! [libs/core/math-engine/src/field.rs]
//!
//! Finite field arithmetic for the secp256k1 base field
//! `p = 2^256 - 2^32 - 977`, represented as four little-endian
//! 64-bit limbs and multiplied through the Montgomery domain.

use crate::errors::MathError;
use tracing::{instrument, trace};

/// secp256k1 field prime, little-endian limbs.
pub const SECP256K1_FIELD_PRIME: [u64; 4] = [
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// m = -p^-1 mod 2^64, the Montgomery REDC multiplier.
const MONTGOMERY_NEG_INV_P: u64 = 0xD838091DD2253531;

/// R^2 mod p, used to enter the Montgomery domain.
const MONTGOMERY_R2_MOD_P: [u64; 4] = [
    0x00000001000003D1,
    0x0000000000000001,
    0x0000000000000000,
    0x0000000000000000,
];

/// Solinas folding constant for this prime: 2^256 mod p == 0x1000003D1.
const SOLINAS_FOLD_CONSTANT: u128 = 0x1000003D1;

/// An element of Fp, always held in the range `[0, p-1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldElement {
    pub internal_words: [u64; 4],
}

impl FieldElement {
    #[inline(always)]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self { internal_words: [value, 0, 0, 0] }
    }

    #[inline(always)]
    #[must_use]
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self { internal_words: limbs }
    }

    /// Builds an element from a big-endian 32-byte buffer. Does not reduce;
    /// callers must ensure the value is already `< p`.
    pub fn from_bytes_be(bytes_input: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for index in 0..4 {
            let offset = (3 - index) * 8;
            limbs[index] = u64::from_be_bytes(bytes_input[offset..offset + 8].try_into().unwrap());
        }
        Self { internal_words: limbs }
    }

    #[inline(always)]
    #[must_use]
    pub fn internal_words_to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for index in 0..4 {
            let offset = (3 - index) * 8;
            out[offset..offset + 8].copy_from_slice(&self.internal_words[index].to_be_bytes());
        }
        out
    }

    #[inline(always)]
    #[must_use]
    pub fn multiply_modular(&self, other: &Self) -> Self {
        let a = self.to_montgomery_domain();
        let b = other.to_montgomery_domain();
        a.multiply_modular_montgomery(&b).from_montgomery_domain()
    }

    #[inline(always)]
    #[must_use]
    pub fn square_modular(&self) -> Self {
        self.multiply_modular(self)
    }

    #[inline(always)]
    #[must_use]
    pub fn subtract_modular(&self, other: &Self) -> Self {
        let mut result = [0u64; 4];
        let mut borrow: i128 = 0;
        for i in 0..4 {
            let diff = (self.internal_words[i] as i128) - (other.internal_words[i] as i128) - borrow;
            if diff < 0 {
                result[i] = (diff + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                result[i] = diff as u64;
                borrow = 0;
            }
        }
        let element = Self { internal_words: result };
        if borrow != 0 { element.perform_internal_addition_of_prime() } else { element }
    }

    #[inline(always)]
    #[must_use]
    pub fn add_modular(&self, other: &Self) -> Self {
        let mut result = [0u64; 4];
        let mut carry: u128 = 0;
        for i in 0..4 {
            let sum = (self.internal_words[i] as u128) + (other.internal_words[i] as u128) + carry;
            result[i] = sum as u64;
            carry = sum >> 64;
        }
        let element = Self { internal_words: result };
        if carry != 0 || element.is_greater_than_or_equal_to_prime() {
            element.perform_internal_subtraction_of_prime()
        } else {
            element
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn multiply_by_u64(&self, multiplier: u64) -> Self {
        let mut product = [0u64; 8];
        let mut carry: u128 = 0;
        for i in 0..4 {
            let term = (self.internal_words[i] as u128) * (multiplier as u128) + carry;
            product[i] = term as u64;
            carry = term >> 64;
        }
        product[4] = carry as u64;
        self.apply_solinas_reduction_internal(product)
    }

    // --- Montgomery core ---

    #[inline(always)]
    #[must_use]
    pub fn to_montgomery_domain(&self) -> Self {
        let r2 = Self { internal_words: MONTGOMERY_R2_MOD_P };
        let (low, high) = self.multiply_256x256_to_512(&r2);
        self.execute_redc(low, high)
    }

    #[inline(always)]
    #[must_use]
    pub fn from_montgomery_domain(&self) -> Self {
        self.execute_redc(self.internal_words, [0u64; 4])
    }

    #[inline(always)]
    #[must_use]
    pub fn multiply_modular_montgomery(&self, other: &Self) -> Self {
        let (low, high) = self.multiply_256x256_to_512(other);
        self.execute_redc(low, high)
    }

    /// The REDC reduction loop: folds a 512-bit product back into `[0, p)`
    /// four limbs at a time, canceling one limb of the modulus per round.
    fn execute_redc(&self, low: [u64; 4], high: [u64; 4]) -> Self {
        let mut accumulator = [0u64; 9];
        accumulator[0..4].copy_from_slice(&low);
        accumulator[4..8].copy_from_slice(&high);

        for i in 0..4 {
            let m = accumulator[i].wrapping_mul(MONTGOMERY_NEG_INV_P);
            let mut carry: u128 = 0;
            for j in 0..4 {
                let term = (m as u128) * (SECP256K1_FIELD_PRIME[j] as u128)
                    + (accumulator[i + j] as u128)
                    + carry;
                accumulator[i + j] = term as u64;
                carry = term >> 64;
            }
            let mut k = i + 4;
            while carry > 0 && k < 9 {
                let sum = (accumulator[k] as u128) + carry;
                accumulator[k] = sum as u64;
                carry = sum >> 64;
                k += 1;
            }
        }

        let mut result_limbs = [0u64; 4];
        result_limbs.copy_from_slice(&accumulator[4..8]);
        let element = Self { internal_words: result_limbs };
        if element.is_greater_than_or_equal_to_prime() {
            element.perform_internal_subtraction_of_prime()
        } else {
            element
        }
    }

    fn multiply_256x256_to_512(&self, other: &Self) -> ([u64; 4], [u64; 4]) {
        let mut product = [0u64; 8];
        for i in 0..4 {
            let mut carry: u128 = 0;
            for j in 0..4 {
                let term = (self.internal_words[i] as u128) * (other.internal_words[j] as u128)
                    + (product[i + j] as u128)
                    + carry;
                product[i + j] = term as u64;
                carry = term >> 64;
            }
            product[i + 4] = carry as u64;
        }
        let mut low = [0u64; 4];
        let mut high = [0u64; 4];
        low.copy_from_slice(&product[0..4]);
        high.copy_from_slice(&product[4..8]);
        (low, high)
    }

    #[inline(always)]
    fn is_greater_than_or_equal_to_prime(&self) -> bool {
        for i in (0..4).rev() {
            if self.internal_words[i] > SECP256K1_FIELD_PRIME[i] {
                return true;
            }
            if self.internal_words[i] < SECP256K1_FIELD_PRIME[i] {
                return false;
            }
        }
        true
    }

    fn perform_internal_subtraction_of_prime(&self) -> Self {
        let mut result = [0u64; 4];
        let mut borrow: i128 = 0;
        for i in 0..4 {
            let diff = (self.internal_words[i] as i128) - (SECP256K1_FIELD_PRIME[i] as i128) - borrow;
            if diff < 0 {
                result[i] = (diff + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                result[i] = diff as u64;
                borrow = 0;
            }
        }
        Self { internal_words: result }
    }

    fn perform_internal_addition_of_prime(&self) -> Self {
        let mut result = [0u64; 4];
        let mut carry: u128 = 0;
        for i in 0..4 {
            let sum = (self.internal_words[i] as u128) + (SECP256K1_FIELD_PRIME[i] as u128) + carry;
            result[i] = sum as u64;
            carry = sum >> 64;
        }
        Self { internal_words: result }
    }

    fn apply_solinas_reduction_internal(&self, product: [u64; 8]) -> Self {
        let low = Self { internal_words: [product[0], product[1], product[2], product[3]] };
        let high = [product[4], product[5], product[6], product[7]];
        let mut folded = [0u64; 4];
        let mut carry: u128 = 0;
        for i in 0..4 {
            let term = (high[i] as u128) * SOLINAS_FOLD_CONSTANT + carry;
            folded[i] = term as u64;
            carry = term >> 64;
        }
        low.add_modular(&Self { internal_words: folded })
    }

    pub fn is_zero(&self) -> bool {
        self.internal_words.iter().all(|&w| w == 0)
    }

    pub fn is_odd(&self) -> bool {
        (self.internal_words[0] & 1) == 1
    }

    /// Modular inverse via Fermat's little theorem (`self^(p-2) mod p`).
    #[instrument(level = "trace", skip(self))]
    pub fn invert(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::FieldFault("cannot invert zero".into()));
        }
        trace!("computing modular inverse via Fermat exponentiation");
        let mut base = self.to_montgomery_domain();
        let mut result = FieldElement::from_u64(1).to_montgomery_domain();
        let mut exponent = SECP256K1_FIELD_PRIME;
        exponent[0] -= 2;

        for &word in &exponent {
            let mut bits = word;
            for _ in 0..64 {
                if bits & 1 == 1 {
                    result = result.multiply_modular_montgomery(&base);
                }
                base = base.multiply_modular_montgomery(&base);
                bits >>= 1;
            }
        }
        Ok(result.from_montgomery_domain())
    }

    /// Montgomery's trick: inverts `elements` with a single field inversion.
    /// `scratch` and `results` must be the same length as `elements`.
    #[instrument(level = "trace", skip_all, fields(count = elements.len()))]
    pub fn batch_invert_into(
        elements: &[FieldElement],
        results: &mut [FieldElement],
        scratch: &mut [FieldElement],
    ) -> Result<(), MathError> {
        let count = elements.len();
        if results.len() != count || scratch.len() != count {
            return Err(MathError::BatchLengthMismatch);
        }
        if count == 0 {
            return Ok(());
        }
        trace!("batch-inverting via a single running-product inversion");

        let mut running_product = FieldElement::from_u64(1);
        for (index, element) in elements.iter().enumerate() {
            if element.is_zero() {
                return Err(MathError::FieldFault("batch inversion hit a zero element".into()));
            }
            running_product = running_product.multiply_modular(element);
            scratch[index] = running_product;
        }

        let mut accumulator = running_product.invert()?;
        for index in (1..count).rev() {
            results[index] = accumulator.multiply_modular(&scratch[index - 1]);
            accumulator = accumulator.multiply_modular(&elements[index]);
        }
        results[0] = accumulator;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_bytes() {
        let bytes = [0x11u8; 32];
        let element = FieldElement::from_bytes_be(&bytes);
        assert_eq!(element.internal_words_to_be_bytes(), bytes);
    }

    #[test]
    fn add_then_subtract_is_identity() {
        let a = FieldElement::from_u64(123456789);
        let b = FieldElement::from_u64(987654321);
        let sum = a.add_modular(&b);
        let back = sum.subtract_modular(&b);
        assert_eq!(back, a);
    }

    #[test]
    fn inverse_round_trips_through_multiplication() {
        let a = FieldElement::from_u64(42);
        let inv = a.invert().unwrap();
        let product = a.multiply_modular(&inv);
        assert_eq!(product, FieldElement::from_u64(1));
    }

    #[test]
    fn batch_invert_matches_individual_inversions() {
        let elements: Vec<FieldElement> =
            (1u64..=16).map(FieldElement::from_u64).collect();
        let mut results = vec![FieldElement::default(); elements.len()];
        let mut scratch = vec![FieldElement::default(); elements.len()];
        FieldElement::batch_invert_into(&elements, &mut results, &mut scratch).unwrap();

        for (element, batched) in elements.iter().zip(results.iter()) {
            assert_eq!(*batched, element.invert().unwrap());
        }
    }
}
