//! Sequential byte reader/writer primitives used by the script parser and serializer.
//!
//! [`ScriptReader`] wraps any [`bytes::Buf`] and adds the handful of reads the parser needs on
//! top of it (an end-of-stream check, and a reversed-byte read for callers that display hashes in
//! big-endian order); [`ScriptWriter`] is the mirror set over [`bytes::BufMut`].

use bytes::{Buf, BufMut};

use crate::error::DecodeError;

/// Sequential reader over a byte buffer, exact-positioned: every read consumes exactly the bytes
/// it returns, and a short buffer fails with [`DecodeError::Truncated`] rather than padding.
pub struct ScriptReader<'b, B: Buf> {
    buf: &'b mut B,
}

impl<'b, B: Buf> ScriptReader<'b, B> {
    /// Wrap `buf` for sequential reads.
    #[inline]
    pub fn new(buf: &'b mut B) -> Self {
        ScriptReader { buf }
    }

    /// True if there is nothing left to read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Number of bytes remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Read a single unsigned byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        if self.buf.remaining() < 1 {
            return Err(DecodeError::Truncated);
        }
        Ok(self.buf.get_u8())
    }

    /// Read a 2-byte little-endian unsigned integer.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        if self.buf.remaining() < 2 {
            return Err(DecodeError::Truncated);
        }
        Ok(self.buf.get_u16_le())
    }

    /// Read a 4-byte little-endian unsigned integer.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        if self.buf.remaining() < 4 {
            return Err(DecodeError::Truncated);
        }
        Ok(self.buf.get_u32_le())
    }

    /// Read the Bitcoin compact varint form (1/3/5/9-byte encoding).
    #[inline]
    pub fn read_var_int(&mut self) -> Result<u64, DecodeError> {
        use crate::var_int::VarInt;
        use crate::Decodable;
        VarInt::decode(self.buf)
            .map(u64::from)
            .map_err(|_| DecodeError::Truncated)
    }

    /// Read exactly `len` raw bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        if self.buf.remaining() < len {
            return Err(DecodeError::Truncated);
        }
        let mut out = vec![0u8; len];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    /// Read exactly `len` raw bytes, then reverse their order (used for big-endian display of
    /// little-endian-stored hashes).
    #[inline]
    pub fn read_bytes_reversed(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        let mut out = self.read_bytes(len)?;
        out.reverse();
        Ok(out)
    }
}

/// Sequential writer over a byte buffer. Writes cannot fail: callers that need a capacity check
/// should consult [`crate::Encodable::encode`] instead of using this type directly.
pub struct ScriptWriter<'b, B: BufMut> {
    buf: &'b mut B,
}

impl<'b, B: BufMut> ScriptWriter<'b, B> {
    /// Wrap `buf` for sequential writes.
    #[inline]
    pub fn new(buf: &'b mut B) -> Self {
        ScriptWriter { buf }
    }

    /// Write a single unsigned byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a 2-byte little-endian unsigned integer.
    #[inline]
    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.put_u16_le(value);
    }

    /// Write a 4-byte little-endian unsigned integer.
    #[inline]
    pub fn write_u32_le(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    /// Write the Bitcoin compact varint form (1/3/5/9-byte encoding).
    #[inline]
    pub fn write_var_int(&mut self, value: u64) {
        use crate::var_int::VarInt;
        use crate::Encodable;
        VarInt(value).encode_raw(self.buf);
    }

    /// Write raw bytes verbatim.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_primitives_round_trip() {
        let mut raw: &[u8] = &[0x01, 0x02, 0x00, 0xAB, 0xCD, 0xEF, 0x01, 0x02, 0x03];
        let mut reader = ScriptReader::new(&mut raw);
        assert_eq!(reader.read_u8().unwrap(), 0x01);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0002);
        assert_eq!(reader.read_u32_le().unwrap(), 0x01EF_CDAB);
        assert_eq!(reader.read_bytes(2).unwrap(), vec![0x02, 0x03]);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_past_end_is_truncated() {
        let mut raw: &[u8] = &[0x01];
        let mut reader = ScriptReader::new(&mut raw);
        assert_eq!(reader.read_u16_le(), Err(DecodeError::Truncated));
    }

    #[test]
    fn reversed_read() {
        let mut raw: &[u8] = &[0x01, 0x02, 0x03, 0x04];
        let mut reader = ScriptReader::new(&mut raw);
        assert_eq!(
            reader.read_bytes_reversed(4).unwrap(),
            vec![0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn write_primitives() {
        let mut out = Vec::new();
        let mut writer = ScriptWriter::new(&mut out);
        writer.write_u8(0xAA);
        writer.write_u16_le(0x1234);
        writer.write_u32_le(0x89ABCDEF);
        writer.write_bytes(&[0xFF, 0xEE]);
        assert_eq!(
            out,
            vec![0xAA, 0x34, 0x12, 0xEF, 0xCD, 0xAB, 0x89, 0xFF, 0xEE]
        );
    }
}
