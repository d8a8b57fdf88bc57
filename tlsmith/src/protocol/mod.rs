pub mod messages;

pub use messages::*;

use crate::{
    codec::{DecodeValue, EncodeValue, Reader, Writer, U24},
    error::CodecError,
};
use tlsmith_macros::{DecodeStruct, EncodeStruct};

/// The envelope shared by every handshake message:
/// `type (1 byte) || length (3 bytes, big-endian) || body`.
///
/// The type is kept as a raw byte rather than a [`crate::iana::HandshakeType`]
/// so that messages with unrecognized tags survive a parse/serialize round
/// trip untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, DecodeStruct, EncodeStruct)]
pub struct HandshakeMessageHeader {
    pub message_type: u8,
    pub length: U24,
}

impl HandshakeMessageHeader {
    /// Header for an already-serialized body. The body codec writes its
    /// fields first; the envelope measures them and wraps type + length
    /// around them.
    pub fn for_body(message_type: u8, body: &[u8]) -> Result<Self, CodecError> {
        Ok(Self {
            message_type,
            length: U24::try_from(body.len())?,
        })
    }
}
