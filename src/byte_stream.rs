// src/byte_stream.rs
//
// The length-prefixed ("Pascal-style") byte-stream codec. No crypto
// awareness lives here: this module only knows how to turn bytes into
// STRING / BYTES / MPINT / fixed-width fields and back, in the order a
// format-instruction dictionary declares.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

use crate::error::{Error, Result};

/// A big-endian, length-prefixed signed integer (SSH's MPINT).
///
/// Read accepts non-canonical encodings (a redundant leading `0x00` or
/// `0xFF`); write always emits the canonical form: no leading `0x00` unless
/// the most significant bit of the first remaining byte would otherwise be
/// read as a sign bit on a non-negative value, and symmetrically for
/// negative values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mpint {
    negative: bool,
    /// Big-endian magnitude, no leading zero bytes.
    magnitude: Vec<u8>,
}

impl Mpint {
    pub fn zero() -> Self {
        Mpint { negative: false, magnitude: Vec::new() }
    }

    pub fn from_sign_magnitude(negative: bool, mut magnitude: Vec<u8>) -> Self {
        while magnitude.first() == Some(&0) {
            magnitude.remove(0);
        }
        let negative = negative && !magnitude.is_empty();
        Mpint { negative, magnitude }
    }

    /// Decode the two's-complement big-endian wire representation produced
    /// by `read_mpint`.
    pub fn from_twos_complement(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Mpint::zero();
        }
        if bytes[0] & 0x80 == 0 {
            Mpint::from_sign_magnitude(false, bytes.to_vec())
        } else {
            // Negative: invert and add one to recover the magnitude.
            let mut inverted: Vec<u8> = bytes.iter().map(|b| !b).collect();
            let mut carry = 1u16;
            for byte in inverted.iter_mut().rev() {
                let sum = *byte as u16 + carry;
                *byte = sum as u8;
                carry = sum >> 8;
                if carry == 0 {
                    break;
                }
            }
            Mpint::from_sign_magnitude(true, inverted)
        }
    }

    /// Canonical two's-complement big-endian wire representation.
    pub fn to_twos_complement(&self) -> Vec<u8> {
        if self.magnitude.is_empty() {
            return Vec::new();
        }
        if !self.negative {
            if self.magnitude[0] & 0x80 != 0 {
                let mut out = Vec::with_capacity(self.magnitude.len() + 1);
                out.push(0);
                out.extend_from_slice(&self.magnitude);
                out
            } else {
                self.magnitude.clone()
            }
        } else {
            let mut out = self.magnitude.clone();
            // Two's complement of the magnitude, padded by one byte if the
            // top bit of the magnitude's leading byte is already set so
            // the sign bit reads correctly.
            if out[0] & 0x80 != 0 {
                out.insert(0, 0);
            }
            for byte in out.iter_mut() {
                *byte = !*byte;
            }
            let mut carry = 1u16;
            for byte in out.iter_mut().rev() {
                let sum = *byte as u16 + carry;
                *byte = sum as u8;
                carry = sum >> 8;
                if carry == 0 {
                    break;
                }
            }
            out
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn magnitude(&self) -> &[u8] {
        &self.magnitude
    }
}

impl From<&num_bigint_dig::BigUint> for Mpint {
    fn from(value: &num_bigint_dig::BigUint) -> Self {
        Mpint::from_sign_magnitude(false, value.to_bytes_be())
    }
}

impl From<num_bigint_dig::BigUint> for Mpint {
    fn from(value: num_bigint_dig::BigUint) -> Self {
        Mpint::from(&value)
    }
}

impl From<&Mpint> for num_bigint_dig::BigUint {
    fn from(value: &Mpint) -> Self {
        num_bigint_dig::BigUint::from_bytes_be(&value.magnitude)
    }
}

/// One decoded field value. Field order, not field name lookup speed, is
/// what the wire format depends on, so callers address fields by name
/// through the owning record rather than through this enum directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Mpint(Mpint),
    U32(u32),
}

impl Value {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mpint(&self) -> Option<&Mpint> {
        match self {
            Value::Mpint(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::U32(v) => Some(*v),
            _ => None,
        }
    }
}

/// One field's wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatInstruction {
    /// 4-byte big-endian length, then that many bytes, decoded as UTF-8.
    String,
    /// 4-byte big-endian length, then that many raw bytes.
    Bytes,
    /// 4-byte big-endian length, then a two's-complement signed integer.
    Mpint,
    /// A fixed-width big-endian unsigned 32-bit integer.
    FixedU32,
}

/// An ordered field-name -> encoding mapping. Order is part of the format
/// and must be preserved exactly as declared here on both read and write.
pub type FormatInstructionsDict = &'static [(&'static str, FormatInstruction)];

/// An ordered field-name -> value mapping, produced by a read and consumed
/// by a write. Order always matches the originating format-instructions
/// dict.
pub type ValuesDict = Vec<(&'static str, Value)>;

pub fn get<'a>(values: &'a ValuesDict, name: &str) -> Option<&'a Value> {
    values.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
}

/// A cursor over an immutable byte buffer. Offset is always <= length;
/// reads past the end fail with `Error::Truncated`.
pub struct ByteStreamReader<'a> {
    cursor: Cursor<&'a [u8]>,
    data: &'a [u8],
}

impl<'a> ByteStreamReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteStreamReader { cursor: Cursor::new(data), data }
    }

    pub fn offset(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset())
    }

    pub fn at_end(&self) -> bool {
        self.remaining() == 0
    }

    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.offset()..]
    }

    fn truncated(&self, field: Option<&'static str>) -> Error {
        Error::Truncated { offset: self.offset(), field }
    }

    fn require(&self, n: usize, field: Option<&'static str>) -> Result<()> {
        if self.remaining() < n {
            Err(self.truncated(field))
        } else {
            Ok(())
        }
    }

    pub fn read_u32(&mut self, field: Option<&'static str>) -> Result<u32> {
        self.require(4, field)?;
        self.cursor
            .read_u32::<BigEndian>()
            .map_err(|_| self.truncated(field))
    }

    pub fn read_i32(&mut self, field: Option<&'static str>) -> Result<i32> {
        self.require(4, field)?;
        self.cursor
            .read_i32::<BigEndian>()
            .map_err(|_| self.truncated(field))
    }

    pub fn read_exact(&mut self, n: usize, field: Option<&'static str>) -> Result<Vec<u8>> {
        self.require(n, field)?;
        let mut buf = vec![0u8; n];
        self.cursor
            .read_exact(&mut buf)
            .map_err(|_| self.truncated(field))?;
        Ok(buf)
    }

    pub fn read_bytes(&mut self, field: Option<&'static str>) -> Result<Vec<u8>> {
        let len = self.read_u32(field)? as usize;
        self.read_exact(len, field)
    }

    pub fn read_string(&mut self, field: Option<&'static str>) -> Result<String> {
        let bytes = self.read_bytes(field)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 { offset: self.offset() })
    }

    pub fn read_mpint(&mut self, field: Option<&'static str>) -> Result<Mpint> {
        let bytes = self.read_bytes(field)?;
        Ok(Mpint::from_twos_complement(&bytes))
    }

    /// Constructs a sub-stream bounded to exactly the next length-prefixed
    /// BYTES payload, so nested schema parsers cannot read past it.
    pub fn read_framed_sub_stream(&mut self, field: Option<&'static str>) -> Result<Vec<u8>> {
        self.read_bytes(field)
    }

    /// Reads each field of `schema` in declared order into a `ValuesDict`.
    pub fn read_from_format_instructions_dict(
        &mut self,
        schema: FormatInstructionsDict,
    ) -> Result<ValuesDict> {
        let mut values = Vec::with_capacity(schema.len());
        for (name, instr) in schema {
            let value = match instr {
                FormatInstruction::String => Value::Text(self.read_string(Some(name))?),
                FormatInstruction::Bytes => Value::Bytes(self.read_bytes(Some(name))?),
                FormatInstruction::Mpint => Value::Mpint(self.read_mpint(Some(name))?),
                FormatInstruction::FixedU32 => Value::U32(self.read_u32(Some(name))?),
            };
            values.push((*name, value));
        }
        Ok(values)
    }
}

impl<'a> std::io::Read for ByteStreamReader<'a> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        std::io::Read::read(&mut self.cursor, buf)
    }
}

/// An appendable buffer used to serialize format-instruction dictionaries
/// and raw framing.
#[derive(Default)]
pub struct ByteStreamWriter {
    buf: Vec<u8>,
}

impl ByteStreamWriter {
    pub fn new() -> Self {
        ByteStreamWriter { buf: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.write_u32::<BigEndian>(value).expect("writing to Vec never fails");
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.write_i32::<BigEndian>(value).expect("writing to Vec never fails");
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_u32(bytes.len() as u32);
        self.write_raw(bytes);
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    pub fn write_mpint(&mut self, value: &Mpint) {
        self.write_bytes(&value.to_twos_complement());
    }

    /// Writes `values` in the order `schema` declares, which must be the
    /// same order the values were produced in.
    pub fn write_from_format_instructions_dict(
        &mut self,
        schema: FormatInstructionsDict,
        values: &ValuesDict,
    ) -> Result<()> {
        for (name, instr) in schema {
            let value = get(values, name).ok_or_else(|| {
                Error::Malformed(format!("missing field '{name}' for encoding"))
            })?;
            match (instr, value) {
                (FormatInstruction::String, Value::Text(s)) => self.write_string(s),
                (FormatInstruction::Bytes, Value::Bytes(b)) => self.write_bytes(b),
                (FormatInstruction::Mpint, Value::Mpint(m)) => self.write_mpint(m),
                (FormatInstruction::FixedU32, Value::U32(v)) => self.write_u32(*v),
                _ => {
                    return Err(Error::Malformed(format!(
                        "field '{name}' does not match its format instruction"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Wraps `payload` with its own 4-byte big-endian length prefix, as
    /// each public-key record and the encrypted payload are framed inside
    /// the envelope.
    pub fn write_framed(&mut self, payload: &[u8]) {
        self.write_bytes(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mpint_round_trips_positive_with_high_bit() {
        let m = Mpint::from_sign_magnitude(false, vec![0x80, 0x01]);
        let wire = m.to_twos_complement();
        assert_eq!(wire, vec![0x00, 0x80, 0x01]);
        assert_eq!(Mpint::from_twos_complement(&wire), m);
    }

    #[test]
    fn mpint_round_trips_negative() {
        let m = Mpint::from_sign_magnitude(true, vec![0x01]);
        let wire = m.to_twos_complement();
        assert_eq!(wire, vec![0xFF]);
        assert_eq!(Mpint::from_twos_complement(&wire), m);
    }

    #[test]
    fn mpint_zero_is_empty() {
        let m = Mpint::zero();
        assert_eq!(m.to_twos_complement(), Vec::<u8>::new());
        assert_eq!(Mpint::from_twos_complement(&[]), m);
    }

    #[test]
    fn mpint_accepts_non_canonical_on_read() {
        // A redundant leading zero byte still decodes to the same value.
        let redundant = Mpint::from_twos_complement(&[0x00, 0x00, 0x01]);
        let canonical = Mpint::from_twos_complement(&[0x01]);
        assert_eq!(redundant, canonical);
    }

    #[test]
    fn read_string_round_trips() {
        let mut w = ByteStreamWriter::new();
        w.write_string("ssh-ed25519");
        let bytes = w.into_bytes();
        let mut r = ByteStreamReader::new(&bytes);
        assert_eq!(r.read_string(None).unwrap(), "ssh-ed25519");
        assert!(r.at_end());
    }

    #[test]
    fn read_bytes_truncated_fails() {
        let mut r = ByteStreamReader::new(&[0, 0, 0, 5, 1, 2]);
        let err = r.read_bytes(Some("blob")).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));
    }

    #[test]
    fn sub_stream_cannot_overread() {
        // A nested schema reading past its own framed length should fail
        // against a bounded sub-stream even though the outer buffer has
        // more data after it.
        let mut outer = ByteStreamWriter::new();
        let mut inner = ByteStreamWriter::new();
        inner.write_string("only-one-field");
        outer.write_framed(&inner.into_bytes());
        outer.write_string("trailing-sibling-field");

        let bytes = outer.into_bytes();
        let mut r = ByteStreamReader::new(&bytes);
        let framed = r.read_framed_sub_stream(None).unwrap();
        let mut sub = ByteStreamReader::new(&framed);
        assert_eq!(sub.read_string(None).unwrap(), "only-one-field");
        assert!(sub.at_end());
        // The outer stream still has the sibling field available.
        assert_eq!(r.read_string(None).unwrap(), "trailing-sibling-field");
    }
}
