//! [libs/core/generators/src/address.rs]
//! P2PKH address encoding: version byte + HASH160 payload, Base58Check.

const MAINNET_P2PKH_VERSION: u8 = 0x00;

/// Encodes a 20-byte HASH160 as a mainnet P2PKH address string.
pub fn encode_p2pkh_address(hash160: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(MAINNET_P2PKH_VERSION);
    payload.extend_from_slice(hash160);
    bs58::encode(payload).with_check().into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    #[test]
    fn zero_hash_encodes_to_a_stable_address() {
        let hash = [0u8; 20];
        let address = encode_p2pkh_address(&hash);
        assert!(address.starts_with('1'));
    }

    #[test]
    fn address_round_trips_through_decode() {
        let mut hash = [0u8; 20];
        hash[0] = 0xAB;
        hash[19] = 0xCD;
        let address = encode_p2pkh_address(&hash);
        let decoded = bs58::decode(&address).with_check(Some(MAINNET_P2PKH_VERSION)).into_vec().unwrap();
        assert_eq!(&decoded[1..], &hash[..]);
    }

    #[test]
    fn checksum_is_double_sha256_of_version_and_payload() {
        let hash = [0x11u8; 20];
        let address = encode_p2pkh_address(&hash);
        let raw = bs58::decode(&address).into_vec().unwrap();
        let (payload, checksum) = raw.split_at(raw.len() - 4);
        let expected = Sha256::digest(Sha256::digest(payload));
        assert_eq!(&expected[..4], checksum);
    }
}
