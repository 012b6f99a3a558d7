//! [apps/vanity-miner/src/result.rs]
//!
//! Hit verification (re-derive HASH160 from the received private key
//! and compare) plus normal/quiet output formatting.

use vanity_core_gen::prelude::*;
use vanity_core_math::prelude::*;

/// Re-derives the HASH160 of `private_key`'s compressed public key and
/// returns it only if it matches `claimed_hash160`. Also rejects a
/// private key that does not reduce to a valid scalar.
pub fn verify_hit(private_key: &[u8; 32], claimed_hash160: &[u8; 20]) -> Option<[u8; 20]> {
    Scalar::from_u256_be(*private_key).ok()?;
    let safe_key = SafePrivateKey::from_bytes(private_key).ok()?;
    let public_key = SafePublicKey::from_private(&safe_key);
    let compressed = public_key.to_bytes(true);
    let derived_hash = hash160(&compressed);
    if &derived_hash == claimed_hash160 {
        Some(derived_hash)
    } else {
        None
    }
}

/// Formats a verified hit for normal (human-readable, three-line
/// block) or quiet (one CSV line) mode.
pub fn format_hit(private_key: &[u8; 32], hash160: &[u8; 20], quiet: bool) -> String {
    let wif = encode_wif_compressed(private_key);
    let address = encode_p2pkh_address(hash160);

    if quiet {
        format!("{wif},{address}")
    } else {
        format!("Private Key: {wif}\nAddress: {address}\n---")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_a_genuinely_matching_pair() {
        let private_key = SafePrivateKey::new_random();
        let bytes = private_key.to_bytes();
        let public_key = SafePublicKey::from_private(&private_key);
        let hash = hash160(&public_key.to_bytes(true));
        assert_eq!(verify_hit(&bytes, &hash), Some(hash));
    }

    #[test]
    fn verify_rejects_a_mismatched_hash() {
        let private_key = SafePrivateKey::new_random();
        let bytes = private_key.to_bytes();
        let wrong_hash = [0xAAu8; 20];
        assert!(verify_hit(&bytes, &wrong_hash).is_none());
    }

    #[test]
    fn verify_rejects_a_zero_private_key() {
        assert!(verify_hit(&[0u8; 32], &[0u8; 20]).is_none());
    }

    #[test]
    fn quiet_format_is_a_single_csv_line() {
        let private_key = [0x01u8; 32];
        let hash = [0x02u8; 20];
        let line = format_hit(&private_key, &hash, true);
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains(','));
    }

    #[test]
    fn normal_format_is_a_three_line_block() {
        let private_key = [0x01u8; 32];
        let hash = [0x02u8; 20];
        let block = format_hit(&private_key, &hash, false);
        assert_eq!(block.lines().count(), 3);
    }
}
