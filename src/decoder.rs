//! The type-directed wire-format decoder.
//!
//! [from_wire] consumes a contiguous byte range and populates a target
//! record through its [Record] schema: read a tag, look the field number up
//! in the schema, validate the observed wire type against the declared
//! kind, and dispatch on that kind. Field numbers outside the schema are
//! skipped, so streams from newer schemas still decode.
//!
//! Duplicate singular fields overwrite (last value wins). Repeated scalar
//! fields accept packed and unpacked occurrences interchangeably, even
//! mixed within one stream. Nested messages recurse over exact sub-slices
//! of the input, bounded by [RECURSION_LIMIT].

use crate::{
    codec::WireValue,
    error::Error,
    schema::{FieldMut, Record, RepeatedSlot},
    types::scalar::{Fixed32, Fixed64, Sfixed32, Sfixed64},
    varint::{Sint32, Sint64},
    wire::{self, Reader, WireType},
};

/// Nested-message depth cap.
///
/// Bounds decoder recursion explicitly instead of relying on the host
/// stack guard.
pub const RECURSION_LIMIT: usize = 100;

/// Decodes `bytes` into `record`, consuming the entire input.
///
/// On error the record's state is unspecified: it may be partially
/// mutated.
pub fn from_wire<'a, R: Record<'a>>(bytes: &'a [u8], record: &mut R) -> Result<(), Error> {
    let mut reader = Reader::new(bytes);
    decode_fields(&mut reader, record, 0)
}

/// Decodes a length-prefixed region from `reader` into `record`.
///
/// The region must be fully consumed; the depth cap is enforced here, at
/// the single seam every nested decode passes through.
pub fn read_nested<'a>(
    reader: &mut Reader<'a>,
    record: &mut dyn Record<'a>,
    depth: usize,
) -> Result<(), Error> {
    if depth >= RECURSION_LIMIT {
        return Err(Error::RecursionLimitExceeded);
    }
    let region = reader.read_length_prefixed()?;
    let mut nested = Reader::new(region);
    decode_fields(&mut nested, record, depth + 1)?;
    if !nested.is_empty() {
        return Err(Error::TrailingBytesInSubMessage(nested.remaining()));
    }
    Ok(())
}

fn decode_fields<'a>(
    reader: &mut Reader<'a>,
    record: &mut dyn Record<'a>,
    depth: usize,
) -> Result<(), Error> {
    while !reader.is_empty() {
        let (number, wire_type) = reader.read_tag()?;
        match record.field_mut(number) {
            None => reader.skip_field(wire_type)?,
            Some(slot) => decode_field(reader, slot, number, wire_type, depth)?,
        }
    }
    Ok(())
}

/// Decodes one field occurrence into `slot`.
///
/// Every singular arm validates the wire type, then delegates the payload
/// to the kind's [WireValue] impl; repeated and map arms own their
/// multi-occurrence loops.
fn decode_field<'a>(
    reader: &mut Reader<'a>,
    slot: FieldMut<'_, 'a>,
    number: u32,
    wire_type: WireType,
    depth: usize,
) -> Result<(), Error> {
    match slot {
        FieldMut::Int32(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = i32::read_value(reader, depth)?;
        }
        FieldMut::Int64(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = i64::read_value(reader, depth)?;
        }
        FieldMut::UInt32(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = u32::read_value(reader, depth)?;
        }
        FieldMut::UInt64(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = u64::read_value(reader, depth)?;
        }
        FieldMut::SInt32(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = Sint32::read_value(reader, depth)?.into();
        }
        FieldMut::SInt64(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = Sint64::read_value(reader, depth)?.into();
        }
        FieldMut::Fixed32(value) => {
            wire::expect(WireType::I32, wire_type)?;
            *value = Fixed32::read_value(reader, depth)?.into();
        }
        FieldMut::Fixed64(value) => {
            wire::expect(WireType::I64, wire_type)?;
            *value = Fixed64::read_value(reader, depth)?.into();
        }
        FieldMut::SFixed32(value) => {
            wire::expect(WireType::I32, wire_type)?;
            *value = Sfixed32::read_value(reader, depth)?.into();
        }
        FieldMut::SFixed64(value) => {
            wire::expect(WireType::I64, wire_type)?;
            *value = Sfixed64::read_value(reader, depth)?.into();
        }
        FieldMut::Float(value) => {
            wire::expect(WireType::I32, wire_type)?;
            *value = f32::read_value(reader, depth)?;
        }
        FieldMut::Double(value) => {
            wire::expect(WireType::I64, wire_type)?;
            *value = f64::read_value(reader, depth)?;
        }
        FieldMut::Bool(value) => {
            wire::expect(WireType::Varint, wire_type)?;
            *value = bool::read_value(reader, depth)?;
        }
        FieldMut::Enum(slot) => {
            wire::expect(WireType::Varint, wire_type)?;
            slot.set_raw(reader.read_varint()? as i32);
        }
        FieldMut::String(value) => {
            wire::expect(WireType::Len, wire_type)?;
            *value = String::read_value(reader, depth)?;
        }
        FieldMut::Str(value) => {
            wire::expect(WireType::Len, wire_type)?;
            *value = <&str>::read_value(reader, depth)?;
        }
        FieldMut::Bytes(value) => {
            wire::expect(WireType::Len, wire_type)?;
            *value = Vec::<u8>::read_value(reader, depth)?;
        }
        FieldMut::BytesBorrowed(value) => {
            wire::expect(WireType::Len, wire_type)?;
            *value = <&[u8]>::read_value(reader, depth)?;
        }
        FieldMut::Message(record) => {
            wire::expect(WireType::Len, wire_type)?;
            read_nested(reader, record, depth)?;
        }
        FieldMut::Repeated(elements) => {
            decode_repeated(reader, elements, number, wire_type, depth)?;
        }
        FieldMut::Map(entries) => {
            wire::expect(WireType::Len, wire_type)?;
            entries.read_entry(reader, depth)?;
            // Adjacent entries extend the map; a tag belonging to another
            // field is left for the main loop.
            while let Some((next, next_wire)) = reader.peek_tag() {
                if next != number || next_wire != WireType::Len {
                    break;
                }
                reader.read_tag()?;
                entries.read_entry(reader, depth)?;
            }
        }
    }
    Ok(())
}

/// Decodes one occurrence of a repeated field, packed or unpacked.
fn decode_repeated<'a>(
    reader: &mut Reader<'a>,
    elements: &mut dyn RepeatedSlot<'a>,
    number: u32,
    wire_type: WireType,
    depth: usize,
) -> Result<(), Error> {
    let element = elements.wire_type();
    if wire_type == WireType::Len && element != WireType::Len {
        // Packed: one length-prefixed run of scalar payloads. The declared
        // length is authoritative; an element straddling the end of the
        // run fails as truncated inside the sub-cursor.
        let run = reader.read_length_prefixed()?;
        let mut run = Reader::new(run);
        while !run.is_empty() {
            elements.read_element(&mut run, depth)?;
        }
        return Ok(());
    }

    wire::expect(element, wire_type)?;
    elements.read_element(reader, depth)?;
    // Peek-and-consume: adjacent same-number, same-shape tags extend this
    // field; anything else (another field, or a packed continuation) is
    // re-read by the main loop.
    while let Some((next, next_wire)) = reader.peek_tag() {
        if next != number || next_wire != element {
            break;
        }
        reader.read_tag()?;
        elements.read_element(reader, depth)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder;
    use bytes::BufMut;

    #[derive(Debug, Default, PartialEq)]
    struct Leaf {
        count: u32,
        tags: Vec<u32>,
    }

    impl<'a> Record<'a> for Leaf {
        fn field_mut(&mut self, number: u32) -> Option<FieldMut<'_, 'a>> {
            match number {
                1 => Some(FieldMut::UInt32(&mut self.count)),
                2 => Some(FieldMut::Repeated(&mut self.tags)),
                _ => None,
            }
        }
    }

    impl crate::Write for Leaf {
        fn write(&self, buf: &mut impl BufMut) {
            encoder::write_field(1, &self.count, buf);
            encoder::write_repeated(2, &self.tags, buf);
        }
    }

    impl crate::EncodeSize for Leaf {
        fn encode_size(&self) -> usize {
            encoder::field_size(1, &self.count) + encoder::repeated_size(2, &self.tags)
        }
    }

    #[test]
    fn test_round_trip() {
        let leaf = Leaf {
            count: 7,
            tags: vec![1, 300, 128],
        };
        let encoded = crate::Encode::encode(&leaf);
        let mut decoded = Leaf::default();
        from_wire(&encoded, &mut decoded).unwrap();
        assert_eq!(leaf, decoded);
    }

    #[test]
    fn test_empty_input_is_default() {
        let mut leaf = Leaf::default();
        from_wire(&[], &mut leaf).unwrap();
        assert_eq!(leaf, Leaf::default());
    }

    #[test]
    fn test_duplicate_singular_last_wins() {
        // Field 1 twice: 5 then 9.
        let input = [0x08, 0x05, 0x08, 0x09];
        let mut leaf = Leaf::default();
        from_wire(&input, &mut leaf).unwrap();
        assert_eq!(leaf.count, 9);
    }

    #[test]
    fn test_unknown_fields_skipped() {
        // Field 3 varint, field 4 length-prefixed, field 5 fixed32, then
        // field 1.
        let input = [
            0x18, 0x2A, // field 3, varint 42
            0x22, 0x02, 0xAA, 0xBB, // field 4, 2 bytes
            0x2D, 0x01, 0x02, 0x03, 0x04, // field 5, fixed32
            0x08, 0x07, // field 1 = 7
        ];
        let mut leaf = Leaf::default();
        from_wire(&input, &mut leaf).unwrap();
        assert_eq!(leaf.count, 7);
    }

    #[test]
    fn test_mixed_packed_and_unpacked() {
        // Field 2: packed run [1, 2], unpacked 3, packed run [4].
        let input = [
            0x12, 0x02, 0x01, 0x02, // packed
            0x10, 0x03, // unpacked
            0x12, 0x01, 0x04, // packed again
        ];
        let mut leaf = Leaf::default();
        from_wire(&input, &mut leaf).unwrap();
        assert_eq!(leaf.tags, [1, 2, 3, 4]);
    }

    #[test]
    fn test_unpacked_stops_at_foreign_tag() {
        // Field 2 unpacked twice, then field 1; the repeated loop must not
        // swallow field 1's tag.
        let input = [0x10, 0x01, 0x10, 0x02, 0x08, 0x09];
        let mut leaf = Leaf::default();
        from_wire(&input, &mut leaf).unwrap();
        assert_eq!(leaf.tags, [1, 2]);
        assert_eq!(leaf.count, 9);
    }

    #[test]
    fn test_wire_type_mismatch() {
        // Field 1 declared varint, sent as fixed32.
        let input = [0x0D, 0x00, 0x00, 0x00, 0x00];
        let mut leaf = Leaf::default();
        assert_eq!(
            from_wire(&input, &mut leaf),
            Err(Error::WireTypeMismatch {
                expected: WireType::Varint,
                found: WireType::I32,
            })
        );
    }

    #[test]
    fn test_packed_element_straddles_run() {
        // Packed run of length 1 whose single byte opens a two-byte
        // varint.
        let input = [0x12, 0x01, 0x80];
        let mut leaf = Leaf::default();
        assert_eq!(from_wire(&input, &mut leaf), Err(Error::Truncated));
    }
}
