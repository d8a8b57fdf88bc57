//! Algorithm resolution: cipher suite identifier in, algorithm metadata out.
//!
//! This module is the single source of truth for per-suite algorithm
//! parameters. Every other component (sizer, slicer, key set generator)
//! consults these tables instead of re-deriving metadata on its own.
//!
//! The tables are keyed off the IANA suite descriptions. Suite names encode
//! everything we need (`TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256` names the bulk
//! cipher, key size, mode, and hash), so token matching on the description is
//! the table.

use crate::{
    error::CryptoError,
    iana::{CipherSuite, ProtocolVersion},
};

/// Classification of a suite's bulk cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherFamily {
    Aead,
    Block,
    Stream,
}

/// The MAC used for record protection. `Aead` is the placeholder for suites
/// whose integrity comes from the AEAD tag, with MAC length zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacAlgorithm {
    Aead,
    HmacMd5,
    HmacSha1,
    HmacSha256,
    HmacSha384,
}

impl MacAlgorithm {
    pub fn mac_length(&self) -> usize {
        match self {
            MacAlgorithm::Aead => 0,
            MacAlgorithm::HmacMd5 => 16,
            MacAlgorithm::HmacSha1 => 20,
            MacAlgorithm::HmacSha256 => 32,
            MacAlgorithm::HmacSha384 => 48,
        }
    }
}

/// The hash behind HKDF for TLS 1.3 suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HkdfAlgorithm {
    Sha256,
    Sha384,
}

/// The PRF construction for legacy (pre-1.3) key expansion.
///
/// `LegacyMd5Sha1` is the MD5 ⊕ SHA-1 construction used by SSLv3 through
/// TLS 1.1 and DTLS 1.0; TLS 1.2 and DTLS 1.2 use P_SHA256 or P_SHA384
/// depending on the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrfAlgorithm {
    LegacyMd5Sha1,
    Sha256,
    Sha384,
}

/// Everything the key schedule needs to know about a cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSuiteProfile {
    pub cipher_family: CipherFamily,
    /// Bulk cipher key size in bytes.
    pub key_size: usize,
    /// Bulk cipher block size in bytes; zero for stream ciphers and ChaCha20.
    pub block_size: usize,
    pub mac_algorithm: MacAlgorithm,
    pub hkdf_algorithm: HkdfAlgorithm,
    /// The suite's TLS 1.2 PRF hash. Use [`prf_algorithm`] to account for the
    /// negotiated version.
    pub prf_algorithm: PrfAlgorithm,
}

impl CipherSuiteProfile {
    pub fn mac_length(&self) -> usize {
        self.mac_algorithm.mac_length()
    }
}

/// Resolve the full algorithm profile for a cipher suite.
///
/// Fails with [`CryptoError::UnsupportedCipherSuite`] when the suite has no
/// table entry, and never returns a partial profile.
pub fn resolve(suite: CipherSuite) -> Result<CipherSuiteProfile, CryptoError> {
    if CipherSuite::from_value(suite.value).is_none() {
        return Err(CryptoError::UnsupportedCipherSuite(suite));
    }
    let cipher_family = cipher_family(suite)?;
    let (key_size, block_size) = bulk_parameters(suite)?;
    let mac_algorithm = mac_algorithm(suite, cipher_family)?;
    let hkdf_algorithm = hkdf_algorithm(suite);
    let prf_algorithm = suite_prf(suite);

    Ok(CipherSuiteProfile {
        cipher_family,
        key_size,
        block_size,
        mac_algorithm,
        hkdf_algorithm,
        prf_algorithm,
    })
}

/// The bulk cipher family of a suite.
///
/// Fails with [`CryptoError::UnsupportedCipherType`] when the suite's bulk
/// cipher is none of AEAD/block/stream (NULL suites, mostly).
pub fn cipher_family(suite: CipherSuite) -> Result<CipherFamily, CryptoError> {
    let description = suite.description;
    if description.contains("_GCM")
        || description.contains("_CCM")
        || description.contains("_POLY1305")
    {
        Ok(CipherFamily::Aead)
    } else if description.contains("_CBC") {
        Ok(CipherFamily::Block)
    } else if description.contains("_RC4") {
        Ok(CipherFamily::Stream)
    } else {
        Err(CryptoError::UnsupportedCipherType(description))
    }
}

/// The HKDF hash for a suite, per RFC 8446 appendix B.4 naming.
pub fn hkdf_algorithm(suite: CipherSuite) -> HkdfAlgorithm {
    if suite.description.ends_with("SHA384") {
        HkdfAlgorithm::Sha384
    } else {
        HkdfAlgorithm::Sha256
    }
}

/// The PRF used for key expansion at `version` with `suite`.
pub fn prf_algorithm(version: ProtocolVersion, suite: CipherSuite) -> PrfAlgorithm {
    match version {
        ProtocolVersion::SSLv3
        | ProtocolVersion::TLSv1_0
        | ProtocolVersion::TLSv1_1
        | ProtocolVersion::DTLSv1_0 => PrfAlgorithm::LegacyMd5Sha1,
        _ => suite_prf(suite),
    }
}

fn suite_prf(suite: CipherSuite) -> PrfAlgorithm {
    if suite.description.ends_with("SHA384") {
        PrfAlgorithm::Sha384
    } else {
        PrfAlgorithm::Sha256
    }
}

fn bulk_parameters(suite: CipherSuite) -> Result<(usize, usize), CryptoError> {
    let description = suite.description;
    if description.contains("AES_128") {
        Ok((16, 16))
    } else if description.contains("AES_256") {
        Ok((32, 16))
    } else if description.contains("CHACHA20") {
        Ok((32, 0))
    } else if description.contains("3DES_EDE") {
        Ok((24, 8))
    } else if description.contains("RC4_128") {
        Ok((16, 0))
    } else {
        Err(CryptoError::UnsupportedCipherSuite(suite))
    }
}

fn mac_algorithm(suite: CipherSuite, family: CipherFamily) -> Result<MacAlgorithm, CryptoError> {
    if family == CipherFamily::Aead {
        return Ok(MacAlgorithm::Aead);
    }
    let description = suite.description;
    if description.ends_with("SHA384") {
        Ok(MacAlgorithm::HmacSha384)
    } else if description.ends_with("SHA256") {
        Ok(MacAlgorithm::HmacSha256)
    } else if description.ends_with("SHA") {
        Ok(MacAlgorithm::HmacSha1)
    } else if description.ends_with("MD5") {
        Ok(MacAlgorithm::HmacMd5)
    } else {
        Err(CryptoError::UnsupportedCipherSuite(suite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iana::constants;

    #[test]
    fn aead_profile() {
        let profile = resolve(constants::TLS_AES_128_GCM_SHA256).unwrap();
        assert_eq!(profile.cipher_family, CipherFamily::Aead);
        assert_eq!(profile.key_size, 16);
        assert_eq!(profile.mac_algorithm, MacAlgorithm::Aead);
        assert_eq!(profile.mac_length(), 0);
        assert_eq!(profile.hkdf_algorithm, HkdfAlgorithm::Sha256);

        let profile = resolve(constants::TLS_AES_256_GCM_SHA384).unwrap();
        assert_eq!(profile.key_size, 32);
        assert_eq!(profile.hkdf_algorithm, HkdfAlgorithm::Sha384);
    }

    #[test]
    fn block_profile() {
        let profile = resolve(constants::TLS_RSA_WITH_AES_128_CBC_SHA).unwrap();
        assert_eq!(profile.cipher_family, CipherFamily::Block);
        assert_eq!(profile.key_size, 16);
        assert_eq!(profile.block_size, 16);
        assert_eq!(profile.mac_algorithm, MacAlgorithm::HmacSha1);
        assert_eq!(profile.mac_length(), 20);

        let profile = resolve(constants::TLS_RSA_WITH_3DES_EDE_CBC_SHA).unwrap();
        assert_eq!(profile.key_size, 24);
        assert_eq!(profile.block_size, 8);
    }

    #[test]
    fn stream_profile() {
        let profile = resolve(constants::TLS_RSA_WITH_RC4_128_MD5).unwrap();
        assert_eq!(profile.cipher_family, CipherFamily::Stream);
        assert_eq!(profile.key_size, 16);
        assert_eq!(profile.block_size, 0);
        assert_eq!(profile.mac_algorithm, MacAlgorithm::HmacMd5);
        assert_eq!(profile.mac_length(), 16);
    }

    /// An unknown suite must fail cleanly; no partial profile comes back.
    #[test]
    fn unknown_suite_is_rejected() {
        let made_up = CipherSuite {
            value: [0xFF, 0xFF],
            description: "TLS_GREASE_WITH_NONSENSE_CBC_SHA9000",
        };
        assert_eq!(
            resolve(made_up),
            Err(CryptoError::UnsupportedCipherSuite(made_up))
        );
    }

    #[test]
    fn null_suite_has_no_family() {
        assert_eq!(
            cipher_family(constants::TLS_RSA_WITH_NULL_SHA),
            Err(CryptoError::UnsupportedCipherType("TLS_RSA_WITH_NULL_SHA"))
        );
    }

    #[test]
    fn prf_selection_by_version() {
        let suite = constants::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256;
        assert_eq!(
            prf_algorithm(ProtocolVersion::TLSv1_0, suite),
            PrfAlgorithm::LegacyMd5Sha1
        );
        assert_eq!(
            prf_algorithm(ProtocolVersion::DTLSv1_0, suite),
            PrfAlgorithm::LegacyMd5Sha1
        );
        assert_eq!(
            prf_algorithm(ProtocolVersion::TLSv1_2, suite),
            PrfAlgorithm::Sha256
        );
        assert_eq!(
            prf_algorithm(
                ProtocolVersion::DTLSv1_2,
                constants::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384
            ),
            PrfAlgorithm::Sha384
        );
    }
}
