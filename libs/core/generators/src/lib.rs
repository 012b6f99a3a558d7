//! [libs/core/generators/src/lib.rs]
//!
//! Standard Bitcoin text-format encoders: P2PKH addresses and
//! compressed WIF private keys.

pub mod address;
pub mod wif;

pub mod prelude {
    pub use crate::address::encode_p2pkh_address;
    pub use crate::wif::encode_wif_compressed;
}
