//! Core codec traits.

use crate::{
    error::Error,
    wire::{Reader, WireType},
};
use bytes::{BufMut, BytesMut};

/// Trait for types that can write their encoding to a buffer.
pub trait Write {
    /// Appends this value's encoding to `buf`.
    fn write(&self, buf: &mut impl BufMut);
}

/// Trait for types that know their encoded length without encoding.
pub trait EncodeSize {
    /// Returns the number of bytes [Write::write] will produce.
    fn encode_size(&self) -> usize;
}

/// Blanket trait for one-call encoding into an exactly-sized buffer.
pub trait Encode: Write + EncodeSize {
    /// Encodes this value to bytes.
    fn encode(&self) -> BytesMut {
        let size = self.encode_size();
        let mut buffer = BytesMut::with_capacity(size);
        self.write(&mut buffer);
        assert_eq!(buffer.len(), size);
        buffer
    }
}

impl<T: Write + EncodeSize> Encode for T {}

/// A value that can appear as a field payload.
///
/// One implementation exists per declared semantic kind: the plain varint
/// integers, the ZigZag wrappers ([crate::Sint32], [crate::Sint64]), the
/// fixed-width wrappers ([crate::Fixed32] and friends), `bool`, the floats,
/// owned and borrowed strings and byte sequences, enumerations, and nested
/// records. The Rust carrier type selects the kind, so repeated elements
/// and map keys/values are driven by the same dispatch as singular fields.
///
/// `'a` is the lifetime of the input buffer; borrowed carriers (`&'a str`,
/// `&'a [u8]`) reference it directly.
pub trait WireValue<'a>: Sized + Default {
    /// The wire type of one encoded value.
    const WIRE_TYPE: WireType;

    /// Decodes one payload (no tag) from `reader`.
    ///
    /// `depth` tracks message nesting for the recursion cap; leaf kinds
    /// ignore it.
    fn read_value(reader: &mut Reader<'a>, depth: usize) -> Result<Self, Error>;

    /// Appends one encoded payload (no tag) to `buf`.
    fn write_value(&self, buf: &mut impl BufMut);

    /// Returns the encoded length of [WireValue::write_value]'s output.
    fn value_size(&self) -> usize;

    /// True when this value is the proto3 default for its kind.
    ///
    /// The encoder suppresses singular fields holding their default.
    /// Nested records always report `false` so a present message survives
    /// the round trip.
    fn is_default(&self) -> bool;
}
