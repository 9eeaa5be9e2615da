//! Encode and decode the protocol buffers (proto3) binary wire format.
//!
//! # Overview
//!
//! A reflection-driven codec designed to efficiently and safely:
//! - Serialize statically-typed records into proto3 wire bytes
//! - Deserialize untrusted wire bytes into statically-typed records
//!
//! Record types describe themselves through the [Record] trait: a lookup
//! from field number to a kind-tagged mutable slot ([FieldMut]). A single
//! type-directed decoder walks the tag/length/value stream against that
//! schema, and the [encoder] helpers produce the symmetric output, so
//! `decode(encode(x)) == x` for every admissible record.
//!
//! # Supported Shapes
//!
//! - Varint scalars: `i32`, `i64`, `u32`, `u64`, `bool`, open enumerations
//! - ZigZag and fixed-width variants via wrappers: [Sint32], [Sint64],
//!   [Fixed32], [Fixed64], [Sfixed32], [Sfixed64]
//! - Floats (`f32`, `f64`), bit-preserving
//! - Strings and bytes, owned (`String`, `Vec<u8>`, [`bytes::Bytes`]) or
//!   borrowed from the input (`&str`, `&[u8]`)
//! - Nested records, `Option<T>` presence, one-of groups (last arm wins)
//! - Repeated fields, packed and unpacked, and maps over `HashMap` or
//!   `BTreeMap`
//!
//! Unknown field numbers are skipped, groups are rejected, and nested
//! decoding is bounded by [decoder::RECURSION_LIMIT]. Failure modes are
//! enumerated in [Error].
//!
//! # Example
//!
//! ```
//! use bytes::BufMut;
//! use tagwire::{encoder, from_wire, Encode, EncodeSize, FieldMut, Record, Write};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: u32,
//!     y: u32,
//!     label: String,
//! }
//!
//! impl<'a> Record<'a> for Point {
//!     fn field_mut(&mut self, number: u32) -> Option<FieldMut<'_, 'a>> {
//!         match number {
//!             1 => Some(FieldMut::UInt32(&mut self.x)),
//!             2 => Some(FieldMut::UInt32(&mut self.y)),
//!             3 => Some(FieldMut::String(&mut self.label)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl Write for Point {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         encoder::write_field(1, &self.x, buf);
//!         encoder::write_field(2, &self.y, buf);
//!         encoder::write_field(3, &self.label, buf);
//!     }
//! }
//!
//! impl EncodeSize for Point {
//!     fn encode_size(&self) -> usize {
//!         encoder::field_size(1, &self.x)
//!             + encoder::field_size(2, &self.y)
//!             + encoder::field_size(3, &self.label)
//!     }
//! }
//!
//! let point = Point { x: 3, y: 300, label: "origin".into() };
//! let encoded = point.encode();
//!
//! let mut decoded = Point::default();
//! from_wire(&encoded, &mut decoded).unwrap();
//! assert_eq!(point, decoded);
//! ```

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod schema;
pub mod types;
pub mod varint;
pub mod wire;

// Re-export main types and traits
pub use codec::{Encode, EncodeSize, WireValue, Write};
pub use decoder::from_wire;
pub use error::Error;
pub use schema::{EnumSlot, Enumeration, FieldMut, MapSlot, Record, RepeatedSlot};
pub use types::{Fixed32, Fixed64, MapKey, Sfixed32, Sfixed64};
pub use varint::{Sint32, Sint64};
pub use wire::{Reader, WireType, MAX_FIELD_NUMBER};
