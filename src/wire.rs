//! Wire-level primitives: wire types, tags, and the byte cursor.
//!
//! A field record on the wire is a varint tag `(field_number << 3) |
//! wire_type` followed by a payload whose physical shape the wire type
//! selects. [Reader] walks a contiguous input buffer and hands
//! length-prefixed regions out as sub-slices, so decoded fields may borrow
//! the input directly.

use crate::{error::Error, varint};
use bytes::BufMut;

/// The largest field number a tag can carry.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// The payload encoding selected by the low three bits of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 variable-length integer.
    Varint = 0,
    /// Eight bytes, little-endian.
    I64 = 1,
    /// Length-prefixed bytes.
    Len = 2,
    /// Four bytes, little-endian.
    I32 = 5,
}

impl WireType {
    /// Decodes the low three bits of a tag.
    ///
    /// Groups (3 and 4) and the reserved values 6 and 7 are rejected.
    pub fn from_raw(raw: u8) -> Result<Self, Error> {
        match raw {
            0 => Ok(Self::Varint),
            1 => Ok(Self::I64),
            2 => Ok(Self::Len),
            5 => Ok(Self::I32),
            other => Err(Error::UnsupportedWireType(other)),
        }
    }
}

/// Writes the tag for `number` with `wire_type`.
pub fn write_tag(number: u32, wire_type: WireType, buf: &mut impl BufMut) {
    varint::write(((number as u64) << 3) | wire_type as u64, buf);
}

/// Calculates the encoded size of the tag for `number`.
///
/// The wire type occupies the low three bits and never changes the length.
pub fn tag_size(number: u32) -> usize {
    varint::size((number as u64) << 3)
}

/// Returns an error unless the observed wire type matches the declared one.
pub(crate) fn expect(expected: WireType, found: WireType) -> Result<(), Error> {
    if expected != found {
        return Err(Error::WireTypeMismatch { expected, found });
    }
    Ok(())
}

/// A cursor over a contiguous input buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Creates a cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// True when the cursor has consumed the entire input.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The number of unconsumed bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Reads one varint.
    pub fn read_varint(&mut self) -> Result<u64, Error> {
        varint::read(&mut self.buf)
    }

    /// Reads a tag and splits it into field number and wire type.
    pub fn read_tag(&mut self) -> Result<(u32, WireType), Error> {
        let key = self.read_varint()?;
        let wire_type = WireType::from_raw((key & 0b111) as u8)?;
        let number = key >> 3;
        if number == 0 || number > MAX_FIELD_NUMBER as u64 {
            return Err(Error::InvalidFieldNumber(number));
        }
        Ok((number as u32, wire_type))
    }

    /// Returns the next tag without consuming it.
    ///
    /// `None` at end of input or when the next bytes do not parse as a
    /// valid tag; the caller's main loop re-reads and surfaces the precise
    /// error in that case.
    pub fn peek_tag(&self) -> Option<(u32, WireType)> {
        self.clone().read_tag().ok()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.buf.len() < len {
            return Err(Error::Truncated);
        }
        let (data, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(data)
    }

    /// Reads four little-endian bytes.
    pub fn read_fixed32(&mut self) -> Result<u32, Error> {
        let data = self.take(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(data);
        Ok(u32::from_le_bytes(raw))
    }

    /// Reads eight little-endian bytes.
    pub fn read_fixed64(&mut self) -> Result<u64, Error> {
        let data = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(data);
        Ok(u64::from_le_bytes(raw))
    }

    /// Reads a length prefix and returns that many bytes.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], Error> {
        let len = self.read_varint()?;
        if len > self.buf.len() as u64 {
            return Err(Error::Truncated);
        }
        self.take(len as usize)
    }

    /// Consumes a full field of the given wire type.
    ///
    /// Used to tolerate fields whose numbers are not in the target's
    /// schema.
    pub fn skip_field(&mut self, wire_type: WireType) -> Result<(), Error> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::I64 => {
                self.take(8)?;
            }
            WireType::Len => {
                self.read_length_prefixed()?;
            }
            WireType::I32 => {
                self.take(4)?;
            }
        }
        Ok(())
    }
}
