//! [libs/core/math-engine/src/hashing.rs]
//!
//! HASH160 = RIPEMD160(SHA256(x)), the fingerprint underlying P2PKH
//! addresses. Delegated entirely to maintained hashing crates; neither
//! primitive is reimplemented here.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha256_digest = Sha256::digest(data);
    let ripemd_digest = Ripemd160::digest(sha256_digest);
    ripemd_digest.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash160_of_empty_input_matches_known_vector() {
        // RIPEMD160(SHA256("")), a fixed public constant.
        let expected = hex::decode("b472a266d0bd89c13706a4132ccfb16f7c3b9fcb").unwrap();
        assert_eq!(hash160(&[]).to_vec(), expected);
    }
}
