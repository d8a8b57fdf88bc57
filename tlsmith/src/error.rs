//! Error types for the codec and key-schedule layers.
//!
//! Codec errors are deliberately narrow: a message that is merely *malformed*
//! (declared lengths disagreeing with the bytes actually present) is not an
//! error here, because sending malformed messages is the point of the
//! framework. Only a genuine buffer underrun on a fixed-size field surfaces
//! as [`CodecError::TruncatedInput`].

use std::fmt;

use crate::iana::CipherSuite;

/// Errors raised while decoding or encoding wire bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Not enough bytes remain to satisfy a fixed-size field.
    TruncatedInput { needed: usize, available: usize },
    /// `decode_from_exact` finished with unread bytes in the buffer.
    TrailingBytes { remaining: usize },
    /// A decoded value does not correspond to any variant of the target enum.
    InvalidDiscriminant {
        type_name: &'static str,
        value: u64,
    },
    /// A length does not fit in the wire-format length field.
    LengthOverflow { value: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::TruncatedInput { needed, available } => {
                write!(f, "truncated input: needed {needed} bytes, {available} available")
            }
            CodecError::TrailingBytes { remaining } => {
                write!(f, "unexpected data remaining: {remaining} bytes")
            }
            CodecError::InvalidDiscriminant { type_name, value } => {
                write!(f, "{value} is not a valid {type_name}")
            }
            CodecError::LengthOverflow { value } => {
                write!(f, "{value} does not fit in the length field")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Errors raised while resolving algorithms or deriving key material.
///
/// These are configuration-level or programming-level faults. None of them is
/// triggerable from wire bytes, and there is no legitimate partial key set, so
/// callers should treat every variant as fatal for the derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The cipher suite has no entry in the algorithm tables.
    UnsupportedCipherSuite(CipherSuite),
    /// The cipher suite's bulk cipher is not an AEAD, block, or stream cipher.
    UnsupportedCipherType(&'static str),
    /// The resolved PRF/HKDF hash is not available in the primitive library.
    UnsupportedAlgorithm(&'static str),
    /// The key block is shorter than the secret-set size formula computed.
    /// Always indicates a mismatch between the sizer and the slicer.
    TruncatedKeyBlock { needed: usize, available: usize },
    /// A traffic secret required for the derivation has not been established.
    MissingSecret(&'static str),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::UnsupportedCipherSuite(suite) => {
                write!(f, "unsupported cipher suite {suite}")
            }
            CryptoError::UnsupportedCipherType(suite) => {
                write!(f, "no cipher family for {suite}")
            }
            CryptoError::UnsupportedAlgorithm(what) => {
                write!(f, "unsupported algorithm: {what}")
            }
            CryptoError::TruncatedKeyBlock { needed, available } => {
                write!(f, "key block truncated: needed {needed} bytes, {available} available")
            }
            CryptoError::MissingSecret(which) => {
                write!(f, "the {which} secret has not been established")
            }
        }
    }
}

impl std::error::Error for CryptoError {}
