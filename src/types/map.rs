//! Map-field support for [`HashMap`] and [`BTreeMap`].
//!
//! On the wire a map is a repeated nested message: each occurrence of the
//! map's tag is one length-prefixed entry holding the key under field 1 and
//! the value under field 2. Either half may be absent, in which case it
//! takes its kind's zero value; any other field number inside an entry is
//! an error. Re-inserting a key overwrites, so the stream's last write
//! wins.

use crate::{
    codec::WireValue,
    decoder::RECURSION_LIMIT,
    error::Error,
    schema::MapSlot,
    types::scalar::{Fixed32, Fixed64, Sfixed32, Sfixed64},
    varint::{Sint32, Sint64},
    wire::{self, Reader},
};
use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

/// Marker for the kinds admissible as map keys: the integral kinds, `bool`,
/// and strings. Floats, bytes, messages, and enumerations are excluded.
pub trait MapKey<'a>: WireValue<'a> {}

impl<'a> MapKey<'a> for i32 {}
impl<'a> MapKey<'a> for i64 {}
impl<'a> MapKey<'a> for u32 {}
impl<'a> MapKey<'a> for u64 {}
impl<'a> MapKey<'a> for bool {}
impl<'a> MapKey<'a> for String {}
impl<'a> MapKey<'a> for &'a str {}
impl<'a> MapKey<'a> for Sint32 {}
impl<'a> MapKey<'a> for Sint64 {}
impl<'a> MapKey<'a> for Fixed32 {}
impl<'a> MapKey<'a> for Fixed64 {}
impl<'a> MapKey<'a> for Sfixed32 {}
impl<'a> MapKey<'a> for Sfixed64 {}

/// Decodes one length-prefixed map entry into a key/value pair.
fn read_pair<'a, K, V>(reader: &mut Reader<'a>, depth: usize) -> Result<(K, V), Error>
where
    K: MapKey<'a>,
    V: WireValue<'a>,
{
    // An entry is a nested message and counts toward the recursion cap.
    if depth >= RECURSION_LIMIT {
        return Err(Error::RecursionLimitExceeded);
    }
    let region = reader.read_length_prefixed()?;
    let mut entry = Reader::new(region);

    let mut key = K::default();
    let mut value = V::default();
    while !entry.is_empty() {
        let (number, wire_type) = entry.read_tag()?;
        match number {
            1 => {
                wire::expect(K::WIRE_TYPE, wire_type)?;
                key = K::read_value(&mut entry, depth + 1)?;
            }
            2 => {
                wire::expect(V::WIRE_TYPE, wire_type)?;
                value = V::read_value(&mut entry, depth + 1)?;
            }
            other => return Err(Error::UnexpectedMapEntryField(other)),
        }
    }
    Ok((key, value))
}

impl<'a, K, V> MapSlot<'a> for HashMap<K, V>
where
    K: MapKey<'a> + Eq + Hash,
    V: WireValue<'a>,
{
    fn read_entry(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<(), Error> {
        let (key, value) = read_pair::<K, V>(reader, depth)?;
        self.insert(key, value);
        Ok(())
    }
}

impl<'a, K, V> MapSlot<'a> for BTreeMap<K, V>
where
    K: MapKey<'a> + Ord,
    V: WireValue<'a>,
{
    fn read_entry(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<(), Error> {
        let (key, value) = read_pair::<K, V>(reader, depth)?;
        self.insert(key, value);
        Ok(())
    }
}
