//! The message parser/serializer pairs.
//!
//! Parsing here is deliberately tolerant: this framework exists to put
//! *invalid* messages on the wire, so declared lengths that disagree with the
//! bytes actually present are preserved as data rather than rejected. The only
//! hard parse failure is a genuine buffer underrun on a fixed-size field.
//! Validation is the caller's job.
//!
//! Every message captures the exact byte span it was parsed from, so a parsed
//! message can always be re-serialized byte-identically, structurally valid or
//! not.

use crate::{
    codec::{DecodeValue, EncodeValue, Reader, Writer, U24},
    error::CodecError,
    iana::HandshakeType,
    protocol::HandshakeMessageHeader,
};

/// Raw application payload. Not a handshake message: there is no type/length
/// envelope, the body is simply every byte in the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationData {
    pub data: Vec<u8>,
    as_parsed: Vec<u8>,
}

impl ApplicationData {
    pub fn new(data: Vec<u8>) -> Self {
        let as_parsed = data.clone();
        Self { data, as_parsed }
    }

    pub fn as_parsed_bytes(&self) -> &[u8] {
        &self.as_parsed
    }
}

impl DecodeValue for ApplicationData {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        let data = reader.read_bytes(reader.bytes_remaining())?.to_vec();
        let as_parsed = data.clone();
        Ok(Self { data, as_parsed })
    }
}

impl EncodeValue for ApplicationData {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        writer.write_bytes(&self.data);
        Ok(())
    }
}

/// The Certificate handshake message, TLS 1.2 framing:
/// `certificates_length (3 bytes) || certificate chain bytes`.
///
/// The declared chain length is allowed to exceed the bytes actually present;
/// in that case the declared value is kept and only the available bytes are
/// captured. Consumers re-validate before trusting the length field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateMessage {
    pub header: HandshakeMessageHeader,
    pub certificates_length: U24,
    pub certificate_bytes: Vec<u8>,
    as_parsed: Vec<u8>,
}

impl CertificateMessage {
    pub fn new(certificate_bytes: Vec<u8>) -> Result<Self, CodecError> {
        let mut body = Writer::new();
        U24::try_from(certificate_bytes.len())?.encode_to(&mut body)?;
        body.write_bytes(&certificate_bytes);
        let header = HandshakeMessageHeader::for_body(
            HandshakeType::Certificate.byte_value(),
            body.written_so_far(),
        )?;

        let mut message = Self {
            header,
            certificates_length: U24::try_from(certificate_bytes.len())?,
            certificate_bytes,
            as_parsed: Vec::new(),
        };
        message.as_parsed = message.encode_to_vec()?;
        Ok(message)
    }

    pub fn as_parsed_bytes(&self) -> &[u8] {
        &self.as_parsed
    }

    fn decode_body(
        header: HandshakeMessageHeader,
        reader: &mut Reader,
    ) -> Result<Self, CodecError> {
        let certificates_length = U24::decode_from(reader)?;
        let declared: usize = certificates_length.into();
        // an attacker-crafted chain may declare more bytes than are present;
        // keep the declared value and capture what is actually there
        let available = reader.bytes_remaining().min(declared);
        let certificate_bytes = reader.read_bytes(available)?.to_vec();
        Ok(Self {
            header,
            certificates_length,
            certificate_bytes,
            as_parsed: Vec::new(),
        })
    }
}

impl EncodeValue for CertificateMessage {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        self.header.encode_to(writer)?;
        self.certificates_length.encode_to(writer)?;
        writer.write_bytes(&self.certificate_bytes);
        Ok(())
    }
}

/// EndOfEarlyData, RFC 8446 section 4.5. The body is empty; the serializer
/// emits a zero-length body no matter what the message was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndOfEarlyData {
    pub header: HandshakeMessageHeader,
    as_parsed: Vec<u8>,
}

impl EndOfEarlyData {
    pub fn new() -> Self {
        let header = HandshakeMessageHeader {
            message_type: HandshakeType::EndOfEarlyData.byte_value(),
            length: U24(0),
        };
        let mut message = Self {
            header,
            as_parsed: Vec::new(),
        };
        // encoding a header cannot fail
        message.as_parsed = message.encode_to_vec().unwrap_or_default();
        message
    }

    pub fn as_parsed_bytes(&self) -> &[u8] {
        &self.as_parsed
    }

    fn decode_body(
        header: HandshakeMessageHeader,
        _reader: &mut Reader,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            header,
            as_parsed: Vec::new(),
        })
    }
}

impl Default for EndOfEarlyData {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeValue for EndOfEarlyData {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        // empty body, only the envelope is written
        self.header.encode_to(writer)?;
        Ok(())
    }
}

/// Fallback for handshake messages whose type tag we do not recognize. The
/// body is treated as opaque payload so the message still travels through the
/// pipeline intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownHandshake {
    pub header: HandshakeMessageHeader,
    pub payload: Vec<u8>,
    as_parsed: Vec<u8>,
}

impl UnknownHandshake {
    pub fn new(message_type: u8, payload: Vec<u8>) -> Result<Self, CodecError> {
        let header = HandshakeMessageHeader::for_body(message_type, &payload)?;
        let mut message = Self {
            header,
            payload,
            as_parsed: Vec::new(),
        };
        message.as_parsed = message.encode_to_vec()?;
        Ok(message)
    }

    pub fn as_parsed_bytes(&self) -> &[u8] {
        &self.as_parsed
    }

    fn decode_body(
        header: HandshakeMessageHeader,
        reader: &mut Reader,
    ) -> Result<Self, CodecError> {
        let payload = reader.read_bytes(reader.bytes_remaining())?.to_vec();
        Ok(Self {
            header,
            payload,
            as_parsed: Vec::new(),
        })
    }
}

impl EncodeValue for UnknownHandshake {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        self.header.encode_to(writer)?;
        writer.write_bytes(&self.payload);
        Ok(())
    }
}

/// A parsed message. Closed enumeration plus the `UnknownHandshake` catch-all,
/// so dispatch stays exhaustive-checkable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    ApplicationData(ApplicationData),
    Certificate(CertificateMessage),
    EndOfEarlyData(EndOfEarlyData),
    UnknownHandshake(UnknownHandshake),
}

impl Message {
    /// Decode one handshake message from the reader.
    ///
    /// Unrecognized type tags fall through to [`UnknownHandshake`]; the only
    /// error here is an underrun while reading the envelope itself.
    pub fn decode_handshake(reader: &mut Reader) -> Result<Message, CodecError> {
        let start = reader.mark();
        let header = HandshakeMessageHeader::decode_from(reader)?;
        tracing::trace!("handshake message header: {header:?}");

        let mut message = match HandshakeType::from_value(header.message_type) {
            Some(HandshakeType::Certificate) => {
                Message::Certificate(CertificateMessage::decode_body(header, reader)?)
            }
            Some(HandshakeType::EndOfEarlyData) => {
                Message::EndOfEarlyData(EndOfEarlyData::decode_body(header, reader)?)
            }
            _ => Message::UnknownHandshake(UnknownHandshake::decode_body(header, reader)?),
        };
        message.set_as_parsed(reader.span_since(start));
        Ok(message)
    }

    /// Decode an ApplicationData record body.
    pub fn decode_application_data(reader: &mut Reader) -> Result<Message, CodecError> {
        Ok(Message::ApplicationData(ApplicationData::decode_from(
            reader,
        )?))
    }

    /// The handshake type of the message, if it is an enveloped message with a
    /// recognized tag.
    pub fn handshake_type(&self) -> Option<HandshakeType> {
        match self {
            Message::ApplicationData(_) => None,
            Message::Certificate(m) => HandshakeType::from_value(m.header.message_type),
            Message::EndOfEarlyData(m) => HandshakeType::from_value(m.header.message_type),
            Message::UnknownHandshake(m) => HandshakeType::from_value(m.header.message_type),
        }
    }

    /// The exact bytes this message was parsed from (or, for constructed
    /// messages, its canonical encoding).
    pub fn as_parsed_bytes(&self) -> &[u8] {
        match self {
            Message::ApplicationData(m) => m.as_parsed_bytes(),
            Message::Certificate(m) => m.as_parsed_bytes(),
            Message::EndOfEarlyData(m) => m.as_parsed_bytes(),
            Message::UnknownHandshake(m) => m.as_parsed_bytes(),
        }
    }

    fn set_as_parsed(&mut self, bytes: &[u8]) {
        let snapshot = bytes.to_vec();
        match self {
            Message::ApplicationData(m) => m.as_parsed = snapshot,
            Message::Certificate(m) => m.as_parsed = snapshot,
            Message::EndOfEarlyData(m) => m.as_parsed = snapshot,
            Message::UnknownHandshake(m) => m.as_parsed = snapshot,
        }
    }
}

impl EncodeValue for Message {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        match self {
            Message::ApplicationData(m) => m.encode_to(writer),
            Message::Certificate(m) => m.encode_to(writer),
            Message::EndOfEarlyData(m) => m.encode_to(writer),
            Message::UnknownHandshake(m) => m.encode_to(writer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_handshake(bytes: &[u8]) -> Message {
        let mut reader = Reader::new(bytes);
        let message = Message::decode_handshake(&mut reader).unwrap();
        assert!(reader.is_empty());
        message
    }

    #[test]
    fn certificate_round_trip() {
        // type 11, length 8, certificates_length 5, 5 chain bytes
        let bytes = [11, 0, 0, 8, 0, 0, 5, 0xDE, 0xAD, 0xBE, 0xEF, 0x42];
        let message = parse_handshake(&bytes);

        let Message::Certificate(certificate) = &message else {
            panic!("expected a certificate, got {message:?}");
        };
        assert_eq!(certificate.certificates_length, U24(5));
        assert_eq!(certificate.certificate_bytes, [0xDE, 0xAD, 0xBE, 0xEF, 0x42]);
        assert_eq!(certificate.as_parsed_bytes(), bytes);

        assert_eq!(message.encode_to_vec().unwrap(), bytes);
        // re-parsing the serialization yields the same fields
        assert_eq!(parse_handshake(&message.encode_to_vec().unwrap()), message);
    }

    /// A certificates_length larger than the available payload must parse, with
    /// the declared value preserved.
    #[test]
    fn certificate_with_overlong_declared_length() {
        // declares 100 chain bytes but only 3 are present
        let bytes = [11, 0, 0, 103, 0, 0, 100, 1, 2, 3];
        let message = parse_handshake(&bytes);

        let Message::Certificate(certificate) = &message else {
            panic!("expected a certificate, got {message:?}");
        };
        assert_eq!(certificate.certificates_length, U24(100));
        assert_eq!(certificate.certificate_bytes, [1, 2, 3]);

        // the mismatch survives serialization byte-for-byte
        assert_eq!(message.encode_to_vec().unwrap(), bytes);
    }

    #[test]
    fn certificate_constructor_measures_lengths() {
        let message = CertificateMessage::new(vec![7; 10]).unwrap();
        assert_eq!(message.header.length, U24(13)); // 3-byte length field + chain
        assert_eq!(message.certificates_length, U24(10));
        assert_eq!(message.as_parsed_bytes(), message.encode_to_vec().unwrap());
    }

    #[test]
    fn end_of_early_data_always_has_empty_body() {
        let constructed = EndOfEarlyData::new();
        assert_eq!(constructed.encode_to_vec().unwrap(), [5, 0, 0, 0]);

        // even a parse with a bogus declared length serializes with no body
        let bytes = [5, 0, 0, 3, 9, 9, 9];
        let mut reader = Reader::new(&bytes);
        let message = Message::decode_handshake(&mut reader).unwrap();
        assert_eq!(message.handshake_type(), Some(HandshakeType::EndOfEarlyData));
        assert_eq!(message.encode_to_vec().unwrap(), [5, 0, 0, 3]);
    }

    /// Unrecognized type tags must not fail the parse.
    #[test]
    fn unknown_type_tag_parses_as_opaque() {
        let bytes = [99, 0, 0, 2, 0xAA, 0xBB];
        let message = parse_handshake(&bytes);

        let Message::UnknownHandshake(unknown) = &message else {
            panic!("expected an unknown handshake, got {message:?}");
        };
        assert_eq!(unknown.header.message_type, 99);
        assert_eq!(unknown.header.length, U24(2));
        assert_eq!(unknown.payload, [0xAA, 0xBB]);
        assert_eq!(message.handshake_type(), None);

        assert_eq!(message.encode_to_vec().unwrap(), bytes);
    }

    /// A recognized tag without a dedicated codec also takes the opaque path.
    #[test]
    fn unimplemented_type_tag_parses_as_opaque() {
        // Finished (20) has no body codec in this core
        let bytes = [20, 0, 0, 12, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let message = parse_handshake(&bytes);
        assert!(matches!(message, Message::UnknownHandshake(_)));
        assert_eq!(message.handshake_type(), Some(HandshakeType::Finished));
        assert_eq!(message.encode_to_vec().unwrap(), bytes);
    }

    #[test]
    fn application_data_round_trip() {
        let bytes = [1, 2, 3, 4, 5];
        let mut reader = Reader::new(&bytes);
        let message = Message::decode_application_data(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(message.encode_to_vec().unwrap(), bytes);
        assert_eq!(message.as_parsed_bytes(), bytes);
    }

    /// Underrun on the envelope itself is the one hard failure.
    #[test]
    fn truncated_envelope_is_an_error() {
        let bytes = [11, 0, 0];
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            Message::decode_handshake(&mut reader),
            Err(CodecError::TruncatedInput {
                needed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn idempotent_reparse() {
        let inputs: &[&[u8]] = &[
            &[11, 0, 0, 8, 0, 0, 5, 0xDE, 0xAD, 0xBE, 0xEF, 0x42],
            &[11, 0, 0, 103, 0, 0, 100, 1, 2, 3],
            &[5, 0, 0, 0],
            &[99, 0, 0, 2, 0xAA, 0xBB],
        ];
        for bytes in inputs {
            let first = parse_handshake(bytes);
            let second = parse_handshake(&first.encode_to_vec().unwrap());
            assert_eq!(first, second);
        }
    }
}
