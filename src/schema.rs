//! The schema contract between record types and the codec.
//!
//! A record type implements [Record] to expose, for each field number, a
//! mutable slot tagged with the field's declared semantic kind. The decoder
//! drives those slots without ever learning the record's concrete type;
//! lookup is a generated `match` on the field number, so it costs a jump
//! table rather than a search.
//!
//! One-of groups and optional fields are resolved inside [Record::field_mut]:
//! a one-of implementation recognizes every arm's number and re-selects the
//! variant (last arm wins), while an `Option` field materializes its value
//! on first use. Enumerations go through [Enumeration] so unrecognized
//! integers survive a decode/encode cycle.

use crate::{
    error::Error,
    wire::{Reader, WireType},
};

/// A statically-described record that can be populated from the wire
/// format.
///
/// `'a` is the lifetime of the input buffer; fields declared with borrowed
/// storage ([FieldMut::Str], [FieldMut::BytesBorrowed]) reference it
/// directly and the decoded record must not outlive it.
pub trait Record<'a> {
    /// Returns the mutable slot for `number`, or `None` when the number is
    /// not part of this record's schema (the decoder then skips the
    /// field's payload).
    fn field_mut(&mut self, number: u32) -> Option<FieldMut<'_, 'a>>;
}

/// A mutable field slot tagged with its declared semantic kind.
///
/// The decoder matches on this enumeration to pick payload handling; the
/// variant fixes the expected wire type.
pub enum FieldMut<'r, 'a> {
    /// Plain varint, sign-extended to 64 bits (`int32`).
    Int32(&'r mut i32),
    /// Plain varint (`int64`).
    Int64(&'r mut i64),
    /// Plain varint (`uint32`).
    UInt32(&'r mut u32),
    /// Plain varint (`uint64`).
    UInt64(&'r mut u64),
    /// ZigZag varint (`sint32`).
    SInt32(&'r mut i32),
    /// ZigZag varint (`sint64`).
    SInt64(&'r mut i64),
    /// Four bytes little-endian (`fixed32`).
    Fixed32(&'r mut u32),
    /// Eight bytes little-endian (`fixed64`).
    Fixed64(&'r mut u64),
    /// Four bytes little-endian, signed (`sfixed32`).
    SFixed32(&'r mut i32),
    /// Eight bytes little-endian, signed (`sfixed64`).
    SFixed64(&'r mut i64),
    /// Four bytes reinterpreted as IEEE-754 (`float`).
    Float(&'r mut f32),
    /// Eight bytes reinterpreted as IEEE-754 (`double`).
    Double(&'r mut f64),
    /// Varint restricted to zero and one on encode; any non-zero decodes
    /// as `true`.
    Bool(&'r mut bool),
    /// An enumeration carried as its underlying signed integer.
    Enum(&'r mut dyn EnumSlot),
    /// Owned UTF-8 text, copied out of the input.
    String(&'r mut String),
    /// Borrowed UTF-8 text referencing the input buffer.
    Str(&'r mut &'a str),
    /// Owned bytes, copied out of the input.
    Bytes(&'r mut Vec<u8>),
    /// Borrowed bytes referencing the input buffer.
    BytesBorrowed(&'r mut &'a [u8]),
    /// A nested record decoded from a length-prefixed region.
    Message(&'r mut dyn Record<'a>),
    /// A repeated field; whether an occurrence is packed or unpacked is
    /// decided per tag by the stream.
    Repeated(&'r mut dyn RepeatedSlot<'a>),
    /// A map field of length-prefixed key/value entries.
    Map(&'r mut dyn MapSlot<'a>),
}

/// An open enumeration carried on the wire as its underlying `i32`.
///
/// Decoding performs no validation: implementations must preserve values
/// outside the declared set (keep a catch-all arm), so re-encoding yields
/// the original integer. The [crate::wire_enum!] macro generates conforming
/// types.
pub trait Enumeration: Copy + Default {
    /// Converts a decoded integer into the enumeration.
    fn from_raw(raw: i32) -> Self;

    /// Returns the underlying integer.
    fn to_raw(self) -> i32;
}

/// Object-safe adapter the decoder stores through into enum fields.
pub trait EnumSlot {
    /// Stores a decoded raw value.
    fn set_raw(&mut self, raw: i32);

    /// Loads the current raw value.
    fn raw(&self) -> i32;
}

impl<E: Enumeration> EnumSlot for E {
    fn set_raw(&mut self, raw: i32) {
        *self = E::from_raw(raw);
    }

    fn raw(&self) -> i32 {
        self.to_raw()
    }
}

/// A repeated field the decoder appends elements into.
///
/// Implemented for [`Vec<T>`] over any payload kind.
pub trait RepeatedSlot<'a> {
    /// The wire type of one unpacked element.
    fn wire_type(&self) -> WireType;

    /// Decodes one element from `reader` and appends it.
    fn read_element(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<(), Error>;
}

/// A map field the decoder inserts entries into.
///
/// Implemented for [`std::collections::HashMap`] and
/// [`std::collections::BTreeMap`] with admissible key kinds.
pub trait MapSlot<'a> {
    /// Decodes one length-prefixed entry and inserts it, overwriting any
    /// previous value held under the same key.
    fn read_entry(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<(), Error>;
}

/// Declares an open proto3 enumeration.
///
/// Generates the enum with a catch-all arm for integers outside the
/// declared set, a [Default] impl resolving to the zero value, the
/// [Enumeration] impl, and the [crate::WireValue] impl that lets the type
/// appear in singular, repeated, and map-value positions.
///
/// ```
/// tagwire::wire_enum! {
///     /// Lifecycle of a job.
///     pub enum Phase {
///         Idle = 0,
///         Running = 1,
///         Done = 2,
///     }
///     unknown Unrecognized
/// }
///
/// use tagwire::Enumeration;
/// assert_eq!(Phase::from_raw(1), Phase::Running);
/// assert_eq!(Phase::from_raw(77), Phase::Unrecognized(77));
/// assert_eq!(Phase::from_raw(77).to_raw(), 77);
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
        unknown $other:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Catch-all preserving values outside the declared set.
            $other(i32),
        }

        impl Default for $name {
            fn default() -> Self {
                <Self as $crate::Enumeration>::from_raw(0)
            }
        }

        impl $crate::Enumeration for $name {
            fn from_raw(raw: i32) -> Self {
                match raw {
                    $(v if v == $value => Self::$variant,)+
                    v => Self::$other(v),
                }
            }

            fn to_raw(self) -> i32 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::$other(raw) => raw,
                }
            }
        }

        impl<'a> $crate::WireValue<'a> for $name {
            const WIRE_TYPE: $crate::WireType = $crate::WireType::Varint;

            fn read_value(
                reader: &mut $crate::Reader<'a>,
                _depth: usize,
            ) -> Result<Self, $crate::Error> {
                Ok(<Self as $crate::Enumeration>::from_raw(reader.read_varint()? as i32))
            }

            fn write_value(&self, buf: &mut impl ::bytes::BufMut) {
                let raw = <Self as $crate::Enumeration>::to_raw(*self);
                $crate::varint::write(raw as i64 as u64, buf);
            }

            fn value_size(&self) -> usize {
                let raw = <Self as $crate::Enumeration>::to_raw(*self);
                $crate::varint::size(raw as i64 as u64)
            }

            fn is_default(&self) -> bool {
                <Self as $crate::Enumeration>::to_raw(*self) == 0
            }
        }
    };
}

/// Implements [crate::WireValue] for a record type so it can appear as a
/// nested field payload: inside [`Vec`], as a map value, or as a one-of
/// arm.
///
/// The type must implement [Record], [Default], [crate::Write], and
/// [crate::EncodeSize]. A lifetime parameter may be passed through, e.g.
/// `message_value!(Raw<'a>)` for a record with borrowed fields.
#[macro_export]
macro_rules! message_value {
    ($name:ty) => {
        impl<'a> $crate::WireValue<'a> for $name {
            const WIRE_TYPE: $crate::WireType = $crate::WireType::Len;

            fn read_value(
                reader: &mut $crate::Reader<'a>,
                depth: usize,
            ) -> Result<Self, $crate::Error> {
                let mut record = <Self as Default>::default();
                $crate::decoder::read_nested(reader, &mut record, depth)?;
                Ok(record)
            }

            fn write_value(&self, buf: &mut impl ::bytes::BufMut) {
                $crate::varint::write($crate::EncodeSize::encode_size(self) as u64, buf);
                $crate::Write::write(self, buf);
            }

            fn value_size(&self) -> usize {
                let size = $crate::EncodeSize::encode_size(self);
                $crate::varint::size(size as u64) + size
            }

            fn is_default(&self) -> bool {
                false
            }
        }
    };
}
