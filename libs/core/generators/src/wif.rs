//! [libs/core/generators/src/wif.rs]
//! Wallet Import Format encoding for compressed private keys.

const MAINNET_PRIVATE_KEY_VERSION: u8 = 0x80;
const COMPRESSED_FLAG: u8 = 0x01;

/// Encodes a 32-byte private key as a compressed-pubkey WIF string.
pub fn encode_wif_compressed(private_key_bytes: &[u8; 32]) -> String {
    let mut payload = Vec::with_capacity(34);
    payload.push(MAINNET_PRIVATE_KEY_VERSION);
    payload.extend_from_slice(private_key_bytes);
    payload.push(COMPRESSED_FLAG);
    bs58::encode(payload).with_check().into_string()
}
