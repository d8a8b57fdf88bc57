//! Sizing and slicing of the legacy (pre-1.3) key block.
//!
//! RFC 5246 section 6.3 lays the expanded key block out as
//! `client MAC || server MAC || client key || server key || client IV ||
//! server IV`, with each segment sized by the negotiated suite. TLS 1.1+
//! block suites carry the IV explicitly per record, so their blocks omit the
//! IV segments entirely.

use crate::{
    algorithms::{self, CipherFamily},
    codec::Reader,
    error::CryptoError,
    iana::{CipherSuite, ProtocolVersion},
    keys::{KeySet, GCM_IV_LENGTH, SEQUENCE_NUMBER_LENGTH},
};

/// Total key-block size in bytes for a version/suite pair.
pub fn secret_set_size(
    version: ProtocolVersion,
    suite: CipherSuite,
) -> Result<usize, CryptoError> {
    let profile = algorithms::resolve(suite)?;
    let size = match profile.cipher_family {
        CipherFamily::Aead => {
            // two keys plus two 4-byte AEAD salts
            2 * profile.key_size + 2 * (GCM_IV_LENGTH - SEQUENCE_NUMBER_LENGTH)
        }
        CipherFamily::Block => {
            let mut size = 2 * profile.key_size + 2 * profile.mac_length();
            if !version.uses_explicit_iv() {
                size += 2 * profile.block_size;
            }
            size
        }
        CipherFamily::Stream => 2 * profile.key_size + 2 * profile.mac_length(),
    };
    Ok(size)
}

/// Slices an expanded key block into a [`KeySet`].
///
/// Thin layer over [`Reader`] that converts underruns into
/// [`CryptoError::TruncatedKeyBlock`], since a short block here means the PRF
/// output was mis-sized rather than a wire-format problem.
pub struct KeyBlockParser<'a> {
    reader: Reader<'a>,
}

impl<'a> KeyBlockParser<'a> {
    pub fn new(key_block: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(key_block),
        }
    }

    fn take(&mut self, count: usize) -> Result<Vec<u8>, CryptoError> {
        let available = self.reader.bytes_remaining();
        self.reader
            .read_bytes(count)
            .map(|bytes| bytes.to_vec())
            .map_err(|_| CryptoError::TruncatedKeyBlock {
                needed: count,
                available,
            })
    }

    /// Slice a block for an AEAD suite: keys, then the 4-byte nonce salts.
    pub fn parse_aead(&mut self, key_size: usize) -> Result<KeySet, CryptoError> {
        let client_write_key = self.take(key_size)?;
        let server_write_key = self.take(key_size)?;
        let salt_length = GCM_IV_LENGTH - SEQUENCE_NUMBER_LENGTH;
        let client_write_iv = self.take(salt_length)?;
        let server_write_iv = self.take(salt_length)?;
        Ok(KeySet {
            client_write_key,
            server_write_key,
            client_write_iv,
            server_write_iv,
            client_write_mac_key: None,
            server_write_mac_key: None,
        })
    }

    /// Slice a block for a legacy block or stream suite: MAC keys first, then
    /// cipher keys, then IVs when the suite/version keeps IVs in the block.
    pub fn parse_mac_and_keys(
        &mut self,
        version: ProtocolVersion,
        family: CipherFamily,
        key_size: usize,
        block_size: usize,
        mac_length: usize,
    ) -> Result<KeySet, CryptoError> {
        let client_write_mac_key = self.take(mac_length)?;
        let server_write_mac_key = self.take(mac_length)?;
        let client_write_key = self.take(key_size)?;
        let server_write_key = self.take(key_size)?;

        let implicit_iv = family == CipherFamily::Block && !version.uses_explicit_iv();
        let iv_length = if implicit_iv { block_size } else { 0 };
        let client_write_iv = self.take(iv_length)?;
        let server_write_iv = self.take(iv_length)?;

        Ok(KeySet {
            client_write_key,
            server_write_key,
            client_write_iv,
            server_write_iv,
            client_write_mac_key: Some(client_write_mac_key),
            server_write_mac_key: Some(server_write_mac_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iana::constants;

    #[test]
    fn aead_block_size() {
        // 2 * 16-byte keys + 2 * 4-byte salts
        let size = secret_set_size(
            ProtocolVersion::TLSv1_2,
            constants::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
        )
        .unwrap();
        assert_eq!(size, 40);
    }

    #[test]
    fn cbc_block_size_depends_on_version() {
        // TLS 1.0 keeps the IVs in the block: 2*16 key + 2*20 mac + 2*16 iv
        let implicit = secret_set_size(
            ProtocolVersion::TLSv1_0,
            constants::TLS_RSA_WITH_AES_128_CBC_SHA,
        )
        .unwrap();
        assert_eq!(implicit, 104);

        // TLS 1.2 uses explicit per-record IVs: 2*16 key + 2*20 mac
        let explicit = secret_set_size(
            ProtocolVersion::TLSv1_2,
            constants::TLS_RSA_WITH_AES_128_CBC_SHA,
        )
        .unwrap();
        assert_eq!(explicit, 72);
    }

    #[test]
    fn stream_block_size() {
        // 2*16 key + 2*20 mac, never an IV
        let size = secret_set_size(
            ProtocolVersion::TLSv1_0,
            constants::TLS_RSA_WITH_RC4_128_SHA,
        )
        .unwrap();
        assert_eq!(size, 72);
    }

    #[test]
    fn null_cipher_is_rejected() {
        let error = secret_set_size(ProtocolVersion::TLSv1_2, constants::TLS_RSA_WITH_NULL_SHA)
            .unwrap_err();
        assert!(matches!(error, CryptoError::UnsupportedCipherType(_)));
    }

    #[test]
    fn cbc_slicing_follows_rfc_layout() {
        let block: Vec<u8> = (0..104u8).collect();
        let keys = KeyBlockParser::new(&block)
            .parse_mac_and_keys(ProtocolVersion::TLSv1_0, CipherFamily::Block, 16, 16, 20)
            .unwrap();

        assert_eq!(keys.client_write_mac_key.as_deref(), Some(&block[0..20]));
        assert_eq!(keys.server_write_mac_key.as_deref(), Some(&block[20..40]));
        assert_eq!(keys.client_write_key, &block[40..56]);
        assert_eq!(keys.server_write_key, &block[56..72]);
        assert_eq!(keys.client_write_iv, &block[72..88]);
        assert_eq!(keys.server_write_iv, &block[88..104]);
    }

    #[test]
    fn explicit_iv_slicing_has_empty_ivs() {
        let block: Vec<u8> = (0..72u8).collect();
        let keys = KeyBlockParser::new(&block)
            .parse_mac_and_keys(ProtocolVersion::TLSv1_2, CipherFamily::Block, 16, 16, 20)
            .unwrap();
        assert!(keys.client_write_iv.is_empty());
        assert!(keys.server_write_iv.is_empty());
    }

    #[test]
    fn short_block_is_reported() {
        let block = [0u8; 30];
        let error = KeyBlockParser::new(&block).parse_aead(16).unwrap_err();
        assert_eq!(
            error,
            CryptoError::TruncatedKeyBlock {
                needed: 16,
                available: 14,
            }
        );
    }
}
