//! Payload codecs for strings and byte sequences.
//!
//! Each kind comes in an owned and a borrowed carrier. Owned carriers copy
//! out of the input buffer; the borrowed carriers (`&str`, `&[u8]`) are
//! zero-copy sub-slices of it, sound only while the input outlives the
//! decoded record. [`bytes::Bytes`] is available as a third byte carrier
//! for hosts already working in `bytes` buffers.
//!
//! String carriers validate UTF-8; the wire format itself carries no
//! such guarantee.

use crate::{
    codec::WireValue,
    error::Error,
    varint,
    wire::{Reader, WireType},
};
use bytes::{BufMut, Bytes};

fn write_raw(data: &[u8], buf: &mut impl BufMut) {
    varint::write(data.len() as u64, buf);
    buf.put_slice(data);
}

fn raw_size(data: &[u8]) -> usize {
    varint::size(data.len() as u64) + data.len()
}

impl<'a> WireValue<'a> for String {
    const WIRE_TYPE: WireType = WireType::Len;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        let data = reader.read_length_prefixed()?;
        String::from_utf8(data.to_vec()).map_err(|_| Error::InvalidUtf8)
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        write_raw(self.as_bytes(), buf);
    }

    fn value_size(&self) -> usize {
        raw_size(self.as_bytes())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<'a> WireValue<'a> for &'a str {
    const WIRE_TYPE: WireType = WireType::Len;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        let data = reader.read_length_prefixed()?;
        std::str::from_utf8(data).map_err(|_| Error::InvalidUtf8)
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        write_raw(self.as_bytes(), buf);
    }

    fn value_size(&self) -> usize {
        raw_size(self.as_bytes())
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<'a> WireValue<'a> for Vec<u8> {
    const WIRE_TYPE: WireType = WireType::Len;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(reader.read_length_prefixed()?.to_vec())
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        write_raw(self, buf);
    }

    fn value_size(&self) -> usize {
        raw_size(self)
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<'a> WireValue<'a> for &'a [u8] {
    const WIRE_TYPE: WireType = WireType::Len;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        reader.read_length_prefixed()
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        write_raw(self, buf);
    }

    fn value_size(&self) -> usize {
        raw_size(self)
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}

impl<'a> WireValue<'a> for Bytes {
    const WIRE_TYPE: WireType = WireType::Len;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Bytes::copy_from_slice(reader.read_length_prefixed()?))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        write_raw(self, buf);
    }

    fn value_size(&self) -> usize {
        raw_size(self)
    }

    fn is_default(&self) -> bool {
        self.is_empty()
    }
}
