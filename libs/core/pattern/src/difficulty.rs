//! [libs/core/pattern/src/difficulty.rs]
//!
//! Expected-attempts estimator: how many random keys, on average, are
//! needed before one lands inside the pattern table.

use crate::table::PatternTable;

/// Returns the expected number of keys that must be generated before
/// one matches any pattern in `table`, or `None` if the table is empty
/// (no finite expectation). The match probability is the total covered
/// width of the 160-bit HASH160 space divided by 2^160, computed via
/// staged floating-point division to avoid a full big-integer divide.
///
/// The running sum is carried in six 32-bit words rather than five: a
/// single interval's width (`high - low + 1`) can equal exactly 2^160
/// when a one-character prefix like `"1"` covers the entire space, and
/// five words alone cannot represent that without silently wrapping to
/// zero. The sixth, most-significant word only ever holds that one
/// extra carry bit.
pub fn expected_attempts(table: &PatternTable) -> Option<f64> {
    if table.is_empty() {
        return None;
    }

    let mut total = [0u32; 6];
    for interval in table.intervals() {
        let width_words = interval_width_words(&interval.low, &interval.high);
        add_words_with_carry(&mut total, &width_words);
    }

    let probability = words_to_probability(&total);
    if probability <= 0.0 {
        return Some(f64::INFINITY);
    }
    Some((1.0 / probability).max(1.0))
}

/// Computes `high - low + 1` as six big-endian 32-bit words (the
/// leading word only ever carries the single bit produced when the
/// result is exactly 2^160).
fn interval_width_words(low: &[u8; 20], high: &[u8; 20]) -> [u32; 6] {
    let mut carry: i64 = 1; // the "+1" folded in as an initial carry-in
    let mut words = [0u32; 6];
    for i in (1..6).rev() {
        let low_word = be32(low, (i - 1) * 4);
        let high_word = be32(high, (i - 1) * 4);
        let diff = high_word as i64 - low_word as i64 + carry;
        if diff < 0 {
            words[i] = (diff + (1i64 << 32)) as u32;
            carry = -1;
        } else if diff >= 1i64 << 32 {
            words[i] = (diff - (1i64 << 32)) as u32;
            carry = 1;
        } else {
            words[i] = diff as u32;
            carry = 0;
        }
    }
    words[0] = carry.max(0) as u32;
    words
}

fn be32(bytes: &[u8; 20], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

fn add_words_with_carry(total: &mut [u32; 6], addend: &[u32; 6]) {
    let mut carry: u64 = 0;
    for i in (0..6).rev() {
        let sum = total[i] as u64 + addend[i] as u64 + carry;
        total[i] = sum as u32;
        carry = sum >> 32;
    }
}

/// Converts the sum of widths into `sum / 2^160` via staged float64
/// division, most-significant word first. `total[0]`'s weight is
/// `2^160` itself, so a fully-covered table yields exactly `1.0`.
fn words_to_probability(total: &[u32; 6]) -> f64 {
    let mut probability = 0.0f64;
    for (index, &word) in total.iter().enumerate() {
        let shift = 32 * (5 - index);
        probability += (word as f64) / (2f64).powi(shift as i32);
    }
    probability
}
