//! [libs/core/pattern/src/compiler.rs]
//!
//! Turns a Base58 address prefix into one or more `[low, high]`
//! HASH160 intervals and feeds them into a `PatternTableBuilder`.

use crate::errors::PatternError;
use crate::table::PatternTableBuilder;

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const MAX_PREFIX_LEN: usize = 28;
const PAYLOAD_LEN: usize = 25;
const HASH_LEN: usize = 20;

fn base58_digit_value(c: u8) -> Option<u8> {
    BASE58_ALPHABET.iter().position(|&b| b == c).map(|p| p as u8)
}

/// Decodes `digits` (already validated Base58 characters) into a
/// `width`-byte big-endian buffer. Returns `None` if the decoded value
/// does not fit in `width` bytes.
fn decode_base58_into(digits: &[u8], width: usize) -> Option<Vec<u8>> {
    let mut buffer = vec![0u8; width];
    for &digit in digits {
        let value = base58_digit_value(digit)? as u32;
        let mut carry = value;
        for byte in buffer.iter_mut().rev() {
            let accumulated = (*byte as u32) * 58 + carry;
            *byte = (accumulated & 0xFF) as u8;
            carry = accumulated >> 8;
        }
        if carry != 0 {
            return None;
        }
    }
    Some(buffer)
}

fn validate_prefix(prefix: &str) -> Result<(), PatternError> {
    if !prefix.starts_with('1') {
        return Err(PatternError::MustStartWithOne);
    }
    if prefix.len() > MAX_PREFIX_LEN {
        return Err(PatternError::TooLong);
    }
    for c in prefix.bytes() {
        if base58_digit_value(c).is_none() {
            return Err(PatternError::InvalidCharacter(prefix.to_string()));
        }
    }
    Ok(())
}

/// Closed-form interval for a prefix consisting entirely of `'1'`
/// characters: every leading `'1'` corresponds to exactly one leading
/// zero byte in the decoded payload, so the matching HASH160 range is
/// `[0, (0x00 * zero_count) || (0xFF * (20 - zero_count))]`.
fn all_ones_interval(len: usize) -> ([u8; HASH_LEN], [u8; HASH_LEN]) {
    let zero_count = (len - 1).min(HASH_LEN);
    let low = [0u8; HASH_LEN];
    let mut high = [0xFFu8; HASH_LEN];
    for byte in high.iter_mut().take(zero_count) {
        *byte = 0x00;
    }
    (low, high)
}

/// Base58 string marking the exact boundary between 33- and 34-character
/// encodings of a 25-byte payload: any digit string less than this one
/// (lexicographically, over the Base58 alphabet's own ordering) needs 34
/// characters to cover the full payload range; anything at or above it
/// fits in 33.
const LENGTH_BOUNDARY: &str = "1QLbz7JHiBTspS962RLKV8GndWFw";

/// Builds the minimal (`'1'`-filled) and maximal (`'z'`-filled) digit
/// strings of length `target_len` for `offset` extra leading `'1'`s
/// followed by `prefix` — the low/high extremes of every digit string
/// that begins with that many leading ones and then `prefix`.
fn build_digit_strings(prefix: &str, offset: usize, target_len: usize) -> (Vec<u8>, Vec<u8>) {
    let base: Vec<u8> = std::iter::repeat(b'1').take(offset).chain(prefix.bytes()).collect();
    let pad_len = target_len.saturating_sub(base.len());
    let mut low = base.clone();
    low.extend(std::iter::repeat(b'1').take(pad_len));
    let mut high = base;
    high.extend(std::iter::repeat(b'z').take(pad_len));
    (low, high)
}

fn length_is_below_boundary(prefix: &str, offset: usize) -> bool {
    let base: Vec<u8> = std::iter::repeat(b'1').take(offset).chain(prefix.bytes()).collect();
    base.as_slice() < LENGTH_BOUNDARY.as_bytes()
}

fn decode_payload(digits: &[u8]) -> Option<[u8; PAYLOAD_LEN]> {
    let bytes = decode_base58_into(digits, PAYLOAD_LEN)?;
    let mut out = [0u8; PAYLOAD_LEN];
    out.copy_from_slice(&bytes);
    Some(out)
}

fn reencoded_starts_with(payload: &[u8; PAYLOAD_LEN], prefix: &str) -> bool {
    bs58::encode(payload).into_string().as_bytes().starts_with(prefix.as_bytes())
}

fn extract_hash(payload: &[u8; PAYLOAD_LEN]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&payload[1..1 + HASH_LEN]);
    out
}

/// Computes the `[low, high]` HASH160 interval(s) matching every address
/// whose Base58Check encoding starts with `prefix`.
///
/// Because 58 isn't a power of two, filling the unconstrained trailing
/// digits of a fixed-length digit string with the minimum/maximum Base58
/// digit does not always round-trip back to a string starting with
/// `prefix` when re-encoded — the boundary between 33- and 34-character
/// encodings, and the version byte's own leading-zero compression, can
/// shift digits across byte boundaries. This walks the same retry loop
/// as the reference implementation: try a candidate length, re-encode
/// the low bound, and if it doesn't actually start with `prefix`, retry
/// with one more assumed leading zero byte (one more leading `'1'`)
/// until it does. It then clamps the interval to the first byte where
/// the low and high bounds diverge, since bytes before that point are
/// shared by every address with this prefix and bytes strictly after it
/// may not be — the trailing digits were never actually constrained by
/// `prefix` at all.
fn prefix_intervals(prefix: &str) -> Vec<([u8; HASH_LEN], [u8; HASH_LEN])> {
    let mut offset = 0usize;
    let (low, high, lt);
    loop {
        let is_lt = length_is_below_boundary(prefix, offset);
        let target_len = if is_lt { 34 } else { 33 };
        let (low_digits, high_digits) = build_digit_strings(prefix, offset, target_len);
        let low_payload = decode_payload(&low_digits);
        let high_payload = decode_payload(&high_digits);
        let matched = low_payload.is_some_and(|payload| reencoded_starts_with(&payload, prefix));
        offset += 1;
        if matched || offset >= MAX_PREFIX_LEN {
            low = low_payload.unwrap_or([0u8; PAYLOAD_LEN]);
            high = high_payload.unwrap_or([0xFFu8; PAYLOAD_LEN]);
            lt = is_lt;
            break;
        }
    }

    let mut nonzero = 0usize;
    while nonzero < PAYLOAD_LEN && low[nonzero] == 0 && high[nonzero] == 0 {
        nonzero += 1;
    }

    let mut out = Vec::new();
    let mut nonzero = if low[nonzero] != 0 {
        out.push((extract_hash(&low), extract_hash(&high)));
        nonzero
    } else {
        // The low bound's first differing byte is zero while the high
        // bound's isn't: the high bound beyond this point was never
        // actually pinned down by `prefix`, so widen it to the most
        // permissive value still sharing everything up to `nonzero`.
        let mut clamped_high = high;
        clamped_high[nonzero] = 0;
        for byte in clamped_high.iter_mut().take(HASH_LEN + 1).skip(nonzero + 1) {
            *byte = 0xFF;
        }
        out.push((extract_hash(&low), extract_hash(&clamped_high)));
        nonzero + 1
    };

    if !lt {
        return out;
    }

    let (y_low_digits, y_high_digits) = build_digit_strings(prefix, offset, 34);
    let y_low = decode_payload(&y_low_digits);
    let y_high = decode_payload(&y_high_digits);
    if let (Some(y_low), Some(y_high)) = (y_low, y_high) {
        if y_low[nonzero] != 0 && y_high[nonzero] != 0 {
            out.push((extract_hash(&y_low), extract_hash(&y_high)));
        } else if y_low[nonzero] == 0 && y_high[nonzero] != 0 {
            let mut y_low_clamped = y_low;
            y_low_clamped[nonzero] = 1;
            for byte in y_low_clamped.iter_mut().take(HASH_LEN + 1).skip(nonzero + 1) {
                *byte = 0;
            }

            let mut y_high_clamped = y_high;
            if let Some(last_nonzero) = (0..nonzero).rev().find(|&i| y_high[i] != 0) {
                for byte in y_high_clamped.iter_mut().take(last_nonzero + 1) {
                    *byte = 0;
                }
                for byte in y_high_clamped.iter_mut().take(HASH_LEN + 1).skip(last_nonzero + 1) {
                    *byte = 0xFF;
                }
            }
            out.push((extract_hash(&y_low_clamped), extract_hash(&y_high_clamped)));
        }
    }

    out
        .into_iter()
        .filter(|(low_hash, high_hash)| low_hash <= high_hash)
        .collect()
}

/// Compiles a single prefix and inserts its interval(s) into `builder`.
pub fn compile_prefix(builder: &mut PatternTableBuilder, prefix: &str) -> Result<(), PatternError> {
    validate_prefix(prefix)?;

    if prefix.bytes().all(|c| c == b'1') {
        let (low, high) = all_ones_interval(prefix.len());
        builder.add_pattern(low, high)?;
        return Ok(());
    }

    let intervals = prefix_intervals(prefix);
    for (low, high) in intervals {
        builder.add_pattern(low, high)?;
    }
    Ok(())
}

const AMBIGUOUS_LETTERS: &[u8] = b"abcdefghjkmnpqrstuvwxyz";

/// Expands a prefix for case-insensitive matching: every letter that
/// has both an upper- and lower-case form in the Base58 alphabet is
/// tried both ways, and each resulting concrete prefix is compiled.
/// `'l'` has no lowercase counterpart in Base58 (it collides visually
/// with `'1'`/`'I'`), so it is normalized to uppercase `'L'` up front.
pub fn compile_anycase_prefix(
    builder: &mut PatternTableBuilder,
    prefix: &str,
) -> Result<(), PatternError> {
    let mut base: Vec<u8> = prefix
        .bytes()
        .map(|c| {
            if c == b'l' {
                b'L'
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();

    let ambiguous_positions: Vec<usize> = base
        .iter()
        .enumerate()
        .filter(|(_, &c)| AMBIGUOUS_LETTERS.contains(&c))
        .map(|(i, _)| i)
        .collect();

    let variant_count = 1usize << ambiguous_positions.len();
    for mask in 0..variant_count {
        for (bit, &position) in ambiguous_positions.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                base[position] = base[position].to_ascii_uppercase();
            } else {
                base[position] = base[position].to_ascii_lowercase();
            }
        }
        let variant = String::from_utf8(base.clone()).expect("Base58 alphabet is ASCII");
        compile_prefix(builder, &variant)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_one_matches_the_entire_space() {
        let mut builder = PatternTableBuilder::new();
        compile_prefix(&mut builder, "1").unwrap();
        let table = builder.build();
        assert_eq!(table.intervals().len(), 1);
        assert_eq!(table.intervals()[0].low, [0u8; 20]);
        assert_eq!(table.intervals()[0].high, [0xFFu8; 20]);
    }

    #[test]
    fn prefix_must_start_with_one() {
        let mut builder = PatternTableBuilder::new();
        assert!(matches!(
            compile_prefix(&mut builder, "A"),
            Err(PatternError::MustStartWithOne)
        ));
    }

    #[test]
    fn prefix_rejects_invalid_characters() {
        let mut builder = PatternTableBuilder::new();
        // '0', 'O', 'I', 'l' are all excluded from the Base58 alphabet.
        assert!(matches!(
            compile_prefix(&mut builder, "10"),
            Err(PatternError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn prefix_too_long_is_rejected() {
        let mut builder = PatternTableBuilder::new();
        let long_prefix = "1".repeat(MAX_PREFIX_LEN + 1);
        assert!(matches!(compile_prefix(&mut builder, &long_prefix), Err(PatternError::TooLong)));
    }

    #[test]
    fn longer_prefix_yields_an_interval_nested_in_the_shorter_prefixs() {
        let mut short_builder = PatternTableBuilder::new();
        compile_prefix(&mut short_builder, "1A").unwrap();
        let short_table = short_builder.build();
        let short_interval = short_table.intervals()[0];

        let mut long_builder = PatternTableBuilder::new();
        compile_prefix(&mut long_builder, "1ABC").unwrap();
        let long_table = long_builder.build();
        let long_interval = long_table.intervals()[0];

        assert!(long_interval.low >= short_interval.low);
        assert!(long_interval.high <= short_interval.high);
    }

    #[test]
    fn anycase_expansion_produces_multiple_intervals_for_mixed_letters() {
        let mut builder = PatternTableBuilder::new();
        compile_anycase_prefix(&mut builder, "1A").unwrap();
        let table = builder.build();
        assert!(!table.is_empty());
    }
}
