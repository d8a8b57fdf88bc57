pub mod constants;
mod definitions;

use crate::{
    codec::{DecodeValue, EncodeValue, Reader, Writer},
    discriminant::impl_byte_value,
    error::CodecError,
};
pub use definitions::*;
use strum::IntoEnumIterator;
use tlsmith_macros::{DecodeEnum, EncodeEnum};

/// The protocol versions this framework can negotiate keys for.
///
/// [IANA reference](https://www.iana.org/assignments/tls-parameters/tls-parameters.xhtml#tls-parameters-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, EncodeEnum, DecodeEnum)]
#[repr(u16)]
pub enum ProtocolVersion {
    SSLv3 = 0x0300,
    TLSv1_0 = 0x0301,
    TLSv1_1 = 0x0302,
    TLSv1_2 = 0x0303,
    TLSv1_3 = 0x0304,
    DTLSv1_0 = 0xFEFF,
    DTLSv1_2 = 0xFEFD,
}
impl_byte_value!(ProtocolVersion, u16);

impl ProtocolVersion {
    pub fn is_tls13(&self) -> bool {
        matches!(self, ProtocolVersion::TLSv1_3)
    }

    pub fn is_dtls(&self) -> bool {
        matches!(self, ProtocolVersion::DTLSv1_0 | ProtocolVersion::DTLSv1_2)
    }

    /// SSLv3 and TLS 1.0 carry the CBC IV in the key block ("implicit" IV).
    /// TLS 1.1 and later (and both DTLS versions) send a fresh IV in every
    /// record, so the key block has no IV component.
    pub fn uses_explicit_iv(&self) -> bool {
        matches!(
            self,
            ProtocolVersion::TLSv1_1
                | ProtocolVersion::TLSv1_2
                | ProtocolVersion::DTLSv1_0
                | ProtocolVersion::DTLSv1_2
        )
    }
}

/// The message contained in Handshake content.
///
/// https://www.iana.org/assignments/tls-parameters/tls-parameters.xhtml#tls-parameters-7
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, EncodeEnum, DecodeEnum)]
#[repr(u8)]
pub enum HandshakeType {
    HelloRequest = 0,
    ClientHello = 1,
    ServerHello = 2,
    NewSessionTicket = 4,
    EndOfEarlyData = 5,
    EncryptedExtensions = 8,
    Certificate = 11,
    ServerKeyExchange = 12,
    CertificateRequest = 13,
    ServerHelloDone = 14,
    CertificateVerify = 15,
    ClientKeyExchange = 16,
    Finished = 20,
    KeyUpdate = 24,
    MessageHash = 254,
}
impl_byte_value!(HandshakeType, u8);

impl HandshakeType {
    /// Look up a handshake type by its wire tag.
    ///
    /// Returns `None` for unrecognized tags; the message codec parses those as
    /// opaque payloads rather than failing.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::iter().find(|t| t.byte_value() == value)
    }
}

/// Defined in https://datatracker.ietf.org/doc/html/rfc5246#section-7.4.1.4.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, EncodeEnum, DecodeEnum)]
#[repr(u8)]
pub enum HashAlgorithm {
    None = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha224 = 3,
    Sha256 = 4,
    Sha384 = 5,
    Sha512 = 6,
}
impl_byte_value!(HashAlgorithm, u8);

impl HashAlgorithm {
    pub fn digest_size(&self) -> usize {
        match self {
            HashAlgorithm::None => 0,
            HashAlgorithm::Md5 => 16,    // 128 bits
            HashAlgorithm::Sha1 => 20,   // 160 bits
            HashAlgorithm::Sha224 => 28, // 224 bits
            HashAlgorithm::Sha256 => 32, // 256 bits
            HashAlgorithm::Sha384 => 48, // 384 bits
            HashAlgorithm::Sha512 => 64, // 512 bits
        }
    }
}

impl DecodeValue for CipherSuite {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        let value: [u8; 2] = DecodeValue::decode_from(reader)?;
        match CipherSuite::from_value(value) {
            Some(suite) => Ok(suite),
            None => Err(CodecError::InvalidDiscriminant {
                type_name: std::any::type_name::<Self>(),
                value: u16::from_be_bytes(value).into(),
            }),
        }
    }
}

impl EncodeValue for CipherSuite {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        self.value.encode_to(writer)
    }
}
