//! Fixed binary layout shared by every value type.
//!
//! # Responsibility
//! - Write and read primitive fields in the layout used by stored payloads.
//!
//! # Invariants
//! - Numbers are little-endian; bools are one byte (`0`/`1`).
//! - Strings are a 7-bit varint byte count followed by UTF-8 bytes.
//! - Decimals are 16 bytes: `lo`, `mid`, `hi`, then `flags` (scale in bits
//!   16..23, sign in bit 31).

use crate::error::DecodeError;
use rust_decimal::Decimal;

const DECIMAL_MAX_SCALE: u32 = 28;
const DECIMAL_SIGN_MASK: u32 = 0x8000_0000;
const DECIMAL_SCALE_MASK: u32 = 0x00FF_0000;

/// Append-only writer for payload fields.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_string(&mut self, value: &str) {
        let mut len = value.len() as u32;
        while len >= 0x80 {
            self.buf.push((len as u8) | 0x80);
            len >>= 7;
        }
        self.buf.push(len as u8);
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn write_decimal(&mut self, value: Decimal) {
        let mantissa = value.mantissa().unsigned_abs();
        let lo = mantissa as u32;
        let mid = (mantissa >> 32) as u32;
        let hi = (mantissa >> 64) as u32;
        let mut flags = value.scale() << 16;
        if value.is_sign_negative() {
            flags |= DECIMAL_SIGN_MASK;
        }
        for part in [lo, mid, hi, flags] {
            self.buf.extend_from_slice(&part.to_le_bytes());
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over stored payload bytes.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Fails when unread bytes are left over.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(DecodeError::TrailingBytes(extra)),
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < count {
            return Err(DecodeError::Truncated {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads the leading null flag of a cell.
    pub fn read_null_flag(&mut self) -> Result<bool, DecodeError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::InvalidNullFlag(other)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.take_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_varint_len()?;
        let raw = self.take(len)?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8)
    }

    fn read_varint_len(&mut self) -> Result<usize, DecodeError> {
        let mut value: u64 = 0;
        let mut shift = 0;
        loop {
            if shift >= 35 {
                return Err(DecodeError::InvalidLength);
            }
            let byte = self.read_u8()?;
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        if value > i32::MAX as u64 {
            return Err(DecodeError::InvalidLength);
        }
        Ok(value as usize)
    }

    pub fn read_decimal(&mut self) -> Result<Decimal, DecodeError> {
        let lo = self.read_u32()?;
        let mid = self.read_u32()?;
        let hi = self.read_u32()?;
        let flags = self.read_u32()?;

        if flags & !(DECIMAL_SIGN_MASK | DECIMAL_SCALE_MASK) != 0 {
            return Err(DecodeError::InvalidDecimal);
        }
        let scale = (flags & DECIMAL_SCALE_MASK) >> 16;
        if scale > DECIMAL_MAX_SCALE {
            return Err(DecodeError::InvalidDecimal);
        }
        let negative = flags & DECIMAL_SIGN_MASK != 0;
        Ok(Decimal::from_parts(lo, mid, hi, negative, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteReader, ByteWriter};
    use crate::error::DecodeError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn short_string_uses_single_length_byte() {
        let mut writer = ByteWriter::new();
        writer.write_string("abc");
        assert_eq!(writer.into_bytes(), vec![3, b'a', b'b', b'c']);
    }

    #[test]
    fn long_string_length_spills_into_second_byte() {
        let text = "x".repeat(200);
        let mut writer = ByteWriter::new();
        writer.write_string(&text);
        let bytes = writer.into_bytes();
        assert_eq!(&bytes[..2], &[0xC8, 0x01]);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_string().unwrap(), text);
        reader.finish().unwrap();
    }

    #[test]
    fn decimal_layout_puts_flags_last() {
        let mut writer = ByteWriter::new();
        writer.write_decimal(Decimal::from_str("-1.5").unwrap());
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &15u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0x8001_0000u32.to_le_bytes());

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_decimal().unwrap(), Decimal::from_str("-1.5").unwrap());
    }

    #[test]
    fn decimal_with_reserved_flag_bits_is_rejected() {
        let mut bytes = vec![0u8; 12];
        bytes.extend_from_slice(&0x0000_0001u32.to_le_bytes());
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_decimal(), Err(DecodeError::InvalidDecimal));
    }

    #[test]
    fn truncated_read_reports_missing_bytes() {
        let bytes = [0u8; 3];
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            reader.read_f64(),
            Err(DecodeError::Truncated {
                needed: 8,
                remaining: 3
            })
        );
    }

    #[test]
    fn null_flag_must_be_zero_or_one() {
        let mut reader = ByteReader::new(&[2]);
        assert_eq!(reader.read_null_flag(), Err(DecodeError::InvalidNullFlag(2)));
    }
}
