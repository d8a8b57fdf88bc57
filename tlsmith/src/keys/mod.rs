//! Traffic key material: sizing, key-block slicing, and derivation.

mod generator;
mod key_block;

pub use generator::{generate_key_set, hkdf_expand_label, prf};
pub use key_block::{secret_set_size, KeyBlockParser};

/// AEAD nonce length shared by the GCM, CCM, and ChaCha20-Poly1305 suites.
pub const GCM_IV_LENGTH: usize = 12;

/// Bytes of each AEAD nonce spent on the record sequence number; the rest is
/// the per-connection salt carried in the key block.
pub const SEQUENCE_NUMBER_LENGTH: usize = 8;

/// One direction-pair of traffic keys, ready to feed a record cipher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeySet {
    pub client_write_key: Vec<u8>,
    pub server_write_key: Vec<u8>,
    pub client_write_iv: Vec<u8>,
    pub server_write_iv: Vec<u8>,
    /// MAC keys are only present for the legacy block and stream suites.
    pub client_write_mac_key: Option<Vec<u8>>,
    pub server_write_mac_key: Option<Vec<u8>>,
}
