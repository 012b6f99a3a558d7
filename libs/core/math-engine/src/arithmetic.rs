//! [libs/core/math-engine/src/arithmetic.rs]
//!
//! Multi-precision carry arithmetic over 256-bit big-endian byte
//! buffers, used by the batched engine to reconstruct `k + i + 1` on a
//! hit and to step `k += STEP` between batches.

use crate::errors::MathError;

/// Adds a `u64` to a 256-bit big-endian value in place. Returns an error
/// on overflow past 256 bits rather than silently wrapping, since an
/// overflowing rekey would otherwise corrupt the private-key/point
/// correspondence maintained by the batch loop.
pub fn add_u64_to_u256_be(value: &mut [u8; 32], addend: u64) -> Result<(), MathError> {
    add_u64_to_u256_be_portable(value, addend)
}

#[cfg(target_arch = "x86_64")]
fn add_u64_to_u256_be_portable(value: &mut [u8; 32], addend: u64) -> Result<(), MathError> {
    use std::arch::asm;

    let mut limbs = [0u64; 4];
    for i in 0..4 {
        limbs[i] = u64::from_be_bytes(value[i * 8..i * 8 + 8].try_into().unwrap());
    }

    let carry: u8;
    // SAFETY: four plain 64-bit registers threaded through an ADD/ADC
    // chain, most-significant limb last; no memory access beyond the
    // register operands themselves.
    unsafe {
        asm!(
            "add {l3}, {addend}",
            "adc {l2}, 0",
            "adc {l1}, 0",
            "adc {l0}, 0",
            "setc {carry_out}",
            l3 = inout(reg) limbs[3],
            l2 = inout(reg) limbs[2],
            l1 = inout(reg) limbs[1],
            l0 = inout(reg) limbs[0],
            addend = in(reg) addend,
            carry_out = out(reg_byte) carry,
            options(nomem, nostack),
        );
    }
    if carry != 0 {
        return Err(MathError::ScalarOverflow);
    }

    for i in 0..4 {
        value[i * 8..i * 8 + 8].copy_from_slice(&limbs[i].to_be_bytes());
    }
    Ok(())
}

#[cfg(not(target_arch = "x86_64"))]
fn add_u64_to_u256_be_portable(value: &mut [u8; 32], addend: u64) -> Result<(), MathError> {
    let mut limbs = [0u64; 4];
    for i in 0..4 {
        limbs[i] = u64::from_be_bytes(value[i * 8..i * 8 + 8].try_into().unwrap());
    }

    let (sum, mut carry) = limbs[3].overflowing_add(addend);
    limbs[3] = sum;
    for i in (0..3).rev() {
        if !carry {
            break;
        }
        let (sum, next_carry) = limbs[i].overflowing_add(1);
        limbs[i] = sum;
        carry = next_carry;
    }
    if carry {
        return Err(MathError::ScalarOverflow);
    }

    for i in 0..4 {
        value[i * 8..i * 8 + 8].copy_from_slice(&limbs[i].to_be_bytes());
    }
    Ok(())
}

pub fn compare_u256_be(a: &[u8; 32], b: &[u8; 32]) -> std::cmp::Ordering {
    a.cmp(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_one_increments_last_byte() {
        let mut value = [0u8; 32];
        add_u64_to_u256_be(&mut value, 1).unwrap();
        assert_eq!(value[31], 1);
    }

    #[test]
    fn add_carries_across_limb_boundary() {
        let mut value = [0u8; 32];
        value[24..32].copy_from_slice(&u64::MAX.to_be_bytes());
        add_u64_to_u256_be(&mut value, 1).unwrap();
        assert_eq!(&value[24..32], &0u64.to_be_bytes());
        assert_eq!(value[23], 1);
    }

    #[test]
    fn add_overflowing_all_limbs_is_rejected() {
        let mut value = [0xFFu8; 32];
        assert!(add_u64_to_u256_be(&mut value, 1).is_err());
    }
}
