//! The `codec` module contains the byte cursor over raw buffers and the traits
//! used for serializing and deserializing protocol structs.
//!
//! The cursor is deliberately dumber than the decoder buffers in crates like
//! [`s2n_codec`](https://crates.io/crates/s2n-codec): it wraps a plain byte
//! slice and tracks a single position. What it adds over a bare slice is the
//! "already parsed" snapshot: every message retains the exact span it was
//! decoded from, so that re-serialization can reproduce byte-identical output
//! even for deliberately malformed input.

use byteorder::{BigEndian, ByteOrder};

use crate::error::CodecError;

/// Cursor over a borrowed byte buffer.
///
/// All integer reads are big-endian, because TLS is.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Read the next `count` bytes, advancing the cursor.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], CodecError> {
        if self.bytes_remaining() < count {
            return Err(CodecError::TruncatedInput {
                needed: count,
                available: self.bytes_remaining(),
            });
        }
        let start = self.cursor;
        self.cursor += count;
        Ok(&self.bytes[start..self.cursor])
    }

    /// Read a big-endian unsigned integer of `width` bytes, `width <= 4`.
    pub fn read_uint(&mut self, width: usize) -> Result<u32, CodecError> {
        debug_assert!(width <= 4);
        let bytes = self.read_bytes(width)?;
        Ok(BigEndian::read_uint(bytes, width) as u32)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(self.read_uint(2)? as u16)
    }

    pub fn read_u24(&mut self) -> Result<u32, CodecError> {
        self.read_uint(3)
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.read_uint(4)
    }

    pub fn bytes_remaining(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_remaining() == 0
    }

    /// Everything read since the cursor was created.
    pub fn consumed_so_far(&self) -> &'a [u8] {
        &self.bytes[..self.cursor]
    }

    /// Record the current position, for use with [`Reader::span_since`].
    pub fn mark(&self) -> usize {
        self.cursor
    }

    /// The span read since `mark`. Used by message parsers to capture their
    /// "as parsed" bytes.
    pub fn span_since(&self, mark: usize) -> &'a [u8] {
        &self.bytes[mark..self.cursor]
    }
}

/// Append-only sink for serialized bytes.
#[derive(Debug, Default)]
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Write a big-endian unsigned integer of `width` bytes, `width <= 4`.
    ///
    /// The value must fit in `width` bytes.
    pub fn write_uint(&mut self, value: u32, width: usize) {
        debug_assert!(width <= 4);
        let be = value.to_be_bytes();
        debug_assert!(be[..4 - width].iter().all(|b| *b == 0));
        self.bytes.extend_from_slice(&be[4 - width..]);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_uint(value as u32, 2);
    }

    pub fn write_u24(&mut self, value: u32) {
        self.write_uint(value, 3);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_uint(value, 4);
    }

    /// Everything written so far. A body codec writes its fields, then the
    /// enclosing envelope codec measures this to fill in its length field.
    pub fn written_so_far(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// This trait defines a type that can be decoded from a reader.
pub trait DecodeValue: Sized {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError>;

    /// Decode the value from a buffer of bytes, consuming the entire buffer.
    ///
    /// If there is data remaining in the buffer after decoding the value, an
    /// error is returned.
    fn decode_from_exact(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(bytes);
        let value = Self::decode_from(&mut reader)?;
        if reader.is_empty() {
            Ok(value)
        } else {
            Err(CodecError::TrailingBytes {
                remaining: reader.bytes_remaining(),
            })
        }
    }
}

/// This trait defines a type that can be encoded into a writer.
pub trait EncodeValue {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError>;

    fn encode_to_vec(&self) -> Result<Vec<u8>, CodecError> {
        let mut writer = Writer::new();
        self.encode_to(&mut writer)?;
        Ok(writer.into_bytes())
    }
}

//////////////////////////// Primitive Impls ///////////////////////////////////

impl DecodeValue for u8 {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        reader.read_u8()
    }
}

impl DecodeValue for u16 {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        reader.read_u16()
    }
}

impl DecodeValue for u32 {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        reader.read_u32()
    }
}

impl EncodeValue for u8 {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        writer.write_u8(*self);
        Ok(())
    }
}

impl EncodeValue for u16 {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        writer.write_u16(*self);
        Ok(())
    }
}

impl EncodeValue for u32 {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        writer.write_u32(*self);
        Ok(())
    }
}

impl<const L: usize> DecodeValue for [u8; L] {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        let mut value = [0; L];
        value.copy_from_slice(reader.read_bytes(L)?);
        Ok(value)
    }
}

impl<const L: usize> EncodeValue for [u8; L] {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        writer.write_bytes(self);
        Ok(())
    }
}

/// u24 is not defined in the rust standard library but handshake message
/// lengths are 3 bytes on the wire. Use `codec::U24` in message definitions to
/// encode or decode the correct value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct U24(pub u32);

impl DecodeValue for U24 {
    fn decode_from(reader: &mut Reader) -> Result<Self, CodecError> {
        reader.read_u24().map(U24)
    }
}

impl EncodeValue for U24 {
    fn encode_to(&self, writer: &mut Writer) -> Result<(), CodecError> {
        writer.write_u24(self.0);
        Ok(())
    }
}

impl TryFrom<usize> for U24 {
    type Error = CodecError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if value > 0x00FF_FFFF {
            return Err(CodecError::LengthOverflow { value });
        }
        Ok(Self(value as u32))
    }
}

impl From<U24> for usize {
    fn from(val: U24) -> Self {
        val.0 as _
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading() -> Result<(), CodecError> {
        let bytes: Vec<u8> = vec![1, 0b11111111, 0b10101010, 32];
        let mut reader = Reader::new(&bytes);

        let a = reader.read_u8()?;
        let b = reader.read_u16()?;
        let c = reader.read_u8()?;
        assert!(reader.is_empty());

        assert_eq!(a, 1);
        assert_eq!(b, 0b1111111110101010);
        assert_eq!(c, 32);
        assert_eq!(reader.consumed_so_far(), bytes.as_slice());

        let mut writer = Writer::new();
        a.encode_to(&mut writer)?;
        b.encode_to(&mut writer)?;
        c.encode_to(&mut writer)?;

        assert_eq!(writer.into_bytes(), bytes);

        Ok(())
    }

    #[test]
    fn underrun_is_an_error() {
        let bytes = [0x00, 0x01];
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            reader.read_u32(),
            Err(CodecError::TruncatedInput {
                needed: 4,
                available: 2
            })
        );
        // a failed read must not advance the cursor
        assert_eq!(reader.bytes_remaining(), 2);
        assert_eq!(reader.read_u16(), Ok(1));
    }

    #[test]
    fn spans() -> Result<(), CodecError> {
        let bytes = [1, 2, 3, 4, 5];
        let mut reader = Reader::new(&bytes);
        reader.read_u8()?;
        let mark = reader.mark();
        reader.read_bytes(3)?;
        assert_eq!(reader.span_since(mark), &[2, 3, 4]);
        assert_eq!(reader.consumed_so_far(), &[1, 2, 3, 4]);
        assert_eq!(reader.bytes_remaining(), 1);
        Ok(())
    }

    #[test]
    fn u24_round_trip() -> Result<(), CodecError> {
        let value = U24::try_from(0x01_02_03usize)?;
        let encoded = value.encode_to_vec()?;
        assert_eq!(encoded, vec![0x01, 0x02, 0x03]);
        assert_eq!(U24::decode_from_exact(&encoded)?, value);

        assert!(U24::try_from(0x0100_0000usize).is_err());
        Ok(())
    }

    #[test]
    fn exact_decode_rejects_trailing_bytes() {
        let bytes = [0x00, 0x01, 0x02];
        assert_eq!(
            u16::decode_from_exact(&bytes),
            Err(CodecError::TrailingBytes { remaining: 1 })
        );
    }
}
