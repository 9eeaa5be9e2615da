//! Payload codecs for the numeric kinds and `bool`.
//!
//! The plain integer carriers encode as varints; `i32` and `i64`
//! sign-extend to 64 bits first, so negative values occupy ten bytes. The
//! fixed-width wrappers pin a carrier to the four- or eight-byte
//! little-endian encodings. Floats are carried bit-for-bit, so NaN payloads
//! and negative zero survive a round trip.

use crate::{
    codec::WireValue,
    error::Error,
    varint::{self, impl_wrapper_from, Sint32, Sint64},
    wire::{Reader, WireType},
};
use bytes::BufMut;

// ---------- Fixed-width wrappers ----------

/// Declares a field's payload as four little-endian bytes (proto3
/// `fixed32`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed32(pub u32);

/// Declares a field's payload as eight little-endian bytes (proto3
/// `fixed64`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed64(pub u64);

/// Declares a field's payload as four little-endian bytes, signed (proto3
/// `sfixed32`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sfixed32(pub i32);

/// Declares a field's payload as eight little-endian bytes, signed (proto3
/// `sfixed64`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sfixed64(pub i64);

impl_wrapper_from!(Fixed32 => u32, Fixed64 => u64, Sfixed32 => i32, Sfixed64 => i64);

// ---------- Plain varint integers ----------

impl<'a> WireValue<'a> for u64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        reader.read_varint()
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        varint::write(*self, buf);
    }

    fn value_size(&self) -> usize {
        varint::size(*self)
    }

    fn is_default(&self) -> bool {
        *self == 0
    }
}

impl<'a> WireValue<'a> for u32 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        // Oversized payloads keep their low 32 bits, matching reference
        // decoders.
        Ok(reader.read_varint()? as u32)
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        varint::write(*self as u64, buf);
    }

    fn value_size(&self) -> usize {
        varint::size(*self as u64)
    }

    fn is_default(&self) -> bool {
        *self == 0
    }
}

impl<'a> WireValue<'a> for i64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(reader.read_varint()? as i64)
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        varint::write(*self as u64, buf);
    }

    fn value_size(&self) -> usize {
        varint::size(*self as u64)
    }

    fn is_default(&self) -> bool {
        *self == 0
    }
}

impl<'a> WireValue<'a> for i32 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(reader.read_varint()? as i32)
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        // Sign-extend so negative values round-trip through the 64-bit
        // carrier.
        varint::write(*self as i64 as u64, buf);
    }

    fn value_size(&self) -> usize {
        varint::size(*self as i64 as u64)
    }

    fn is_default(&self) -> bool {
        *self == 0
    }
}

impl<'a> WireValue<'a> for bool {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(reader.read_varint()? != 0)
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_u8(*self as u8);
    }

    fn value_size(&self) -> usize {
        1
    }

    fn is_default(&self) -> bool {
        !*self
    }
}

// ---------- ZigZag varint integers ----------

impl<'a> WireValue<'a> for Sint32 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Sint32(varint::unzigzag32(reader.read_varint()? as u32)))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        varint::write(varint::zigzag32(self.0) as u64, buf);
    }

    fn value_size(&self) -> usize {
        varint::size(varint::zigzag32(self.0) as u64)
    }

    fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl<'a> WireValue<'a> for Sint64 {
    const WIRE_TYPE: WireType = WireType::Varint;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Sint64(varint::unzigzag64(reader.read_varint()?)))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        varint::write(varint::zigzag64(self.0), buf);
    }

    fn value_size(&self) -> usize {
        varint::size(varint::zigzag64(self.0))
    }

    fn is_default(&self) -> bool {
        self.0 == 0
    }
}

// ---------- Fixed-width integers ----------

impl<'a> WireValue<'a> for Fixed32 {
    const WIRE_TYPE: WireType = WireType::I32;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Fixed32(reader.read_fixed32()?))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.0);
    }

    fn value_size(&self) -> usize {
        4
    }

    fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl<'a> WireValue<'a> for Fixed64 {
    const WIRE_TYPE: WireType = WireType::I64;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Fixed64(reader.read_fixed64()?))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_u64_le(self.0);
    }

    fn value_size(&self) -> usize {
        8
    }

    fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl<'a> WireValue<'a> for Sfixed32 {
    const WIRE_TYPE: WireType = WireType::I32;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Sfixed32(reader.read_fixed32()? as i32))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_i32_le(self.0);
    }

    fn value_size(&self) -> usize {
        4
    }

    fn is_default(&self) -> bool {
        self.0 == 0
    }
}

impl<'a> WireValue<'a> for Sfixed64 {
    const WIRE_TYPE: WireType = WireType::I64;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(Sfixed64(reader.read_fixed64()? as i64))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_i64_le(self.0);
    }

    fn value_size(&self) -> usize {
        8
    }

    fn is_default(&self) -> bool {
        self.0 == 0
    }
}

// ---------- Floats ----------

impl<'a> WireValue<'a> for f32 {
    const WIRE_TYPE: WireType = WireType::I32;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(f32::from_bits(reader.read_fixed32()?))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_u32_le(self.to_bits());
    }

    fn value_size(&self) -> usize {
        4
    }

    fn is_default(&self) -> bool {
        // Bit comparison: negative zero is not suppressed, NaN is emitted.
        self.to_bits() == 0
    }
}

impl<'a> WireValue<'a> for f64 {
    const WIRE_TYPE: WireType = WireType::I64;

    fn read_value(reader: &mut Reader<'a>, _depth: usize) -> Result<Self, Error> {
        Ok(f64::from_bits(reader.read_fixed64()?))
    }

    fn write_value(&self, buf: &mut impl BufMut) {
        buf.put_u64_le(self.to_bits());
    }

    fn value_size(&self) -> usize {
        8
    }

    fn is_default(&self) -> bool {
        self.to_bits() == 0
    }
}
