//! [libs/core/generators/tests/address_integrity.rs]
//! End-to-end check: a private key's address and WIF both decode back
//! to the bytes that produced them.

use vanity_core_gen::prelude::*;
use vanity_core_math::prelude::*;

#[test]
fn a_fresh_keypair_produces_a_consistent_address_and_wif() {
    let private_key = SafePrivateKey::new_random();
    let public_key = SafePublicKey::from_private(&private_key);
    let compressed = public_key.to_bytes(true);
    assert_eq!(compressed.len(), 33);

    let hash = hash160(&compressed);
    let address = encode_p2pkh_address(&hash);
    assert!(address.starts_with('1'));

    let wif = encode_wif_compressed(&private_key.to_bytes());
    assert!(wif.starts_with('K') || wif.starts_with('L'));
}
