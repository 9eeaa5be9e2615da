//! The type-directed wire-format encoder.
//!
//! Hosts implement [crate::Write] and [crate::EncodeSize] for their records
//! by emitting each field through these helpers, one call per schema entry.
//! The decoder accepts fields in any order; emitting in field-number order
//! keeps output canonical. Every `write_*` helper has a `*_size` twin so
//! [crate::Encode::encode] can size its buffer exactly.
//!
//! Singular fields holding their kind's default are suppressed, the proto3
//! convention; the decoder resynthesizes them as defaults. Optional fields
//! and one-of arms are emitted whenever present, so a present default
//! survives the round trip.

use crate::{
    codec::WireValue,
    types::map::MapKey,
    varint,
    wire::{self, WireType},
};
use bytes::BufMut;

/// Writes a singular field, suppressing the default value.
pub fn write_field<'a, T: WireValue<'a>>(number: u32, value: &T, buf: &mut impl BufMut) {
    if value.is_default() {
        return;
    }
    wire::write_tag(number, T::WIRE_TYPE, buf);
    value.write_value(buf);
}

/// Calculates the encoded size of [write_field]'s output.
pub fn field_size<'a, T: WireValue<'a>>(number: u32, value: &T) -> usize {
    if value.is_default() {
        return 0;
    }
    wire::tag_size(number) + value.value_size()
}

/// Writes an optional field; a present value is written even when it holds
/// the default.
pub fn write_optional<'a, T: WireValue<'a>>(number: u32, value: &Option<T>, buf: &mut impl BufMut) {
    if let Some(value) = value {
        write_arm(number, value, buf);
    }
}

/// Calculates the encoded size of [write_optional]'s output.
pub fn optional_size<'a, T: WireValue<'a>>(number: u32, value: &Option<T>) -> usize {
    match value {
        Some(value) => arm_size(number, value),
        None => 0,
    }
}

/// Writes a selected one-of arm, never suppressed.
pub fn write_arm<'a, T: WireValue<'a>>(number: u32, value: &T, buf: &mut impl BufMut) {
    wire::write_tag(number, T::WIRE_TYPE, buf);
    value.write_value(buf);
}

/// Calculates the encoded size of [write_arm]'s output.
pub fn arm_size<'a, T: WireValue<'a>>(number: u32, value: &T) -> usize {
    wire::tag_size(number) + value.value_size()
}

/// Writes a repeated field: scalar kinds as one packed run, length-prefixed
/// kinds as one tag per element. An empty field writes nothing.
pub fn write_repeated<'a, T: WireValue<'a>>(number: u32, values: &[T], buf: &mut impl BufMut) {
    if values.is_empty() {
        return;
    }
    if T::WIRE_TYPE == WireType::Len {
        for value in values {
            write_arm(number, value, buf);
        }
        return;
    }
    wire::write_tag(number, WireType::Len, buf);
    let run: usize = values.iter().map(WireValue::value_size).sum();
    varint::write(run as u64, buf);
    for value in values {
        value.write_value(buf);
    }
}

/// Calculates the encoded size of [write_repeated]'s output.
pub fn repeated_size<'a, T: WireValue<'a>>(number: u32, values: &[T]) -> usize {
    if values.is_empty() {
        return 0;
    }
    if T::WIRE_TYPE == WireType::Len {
        return values.iter().map(|value| arm_size(number, value)).sum();
    }
    let run: usize = values.iter().map(WireValue::value_size).sum();
    wire::tag_size(number) + varint::size(run as u64) + run
}

/// Writes a map field as one length-prefixed entry per pair: key under
/// field 1, value under field 2, default halves suppressed.
///
/// Entries are written in key order so the encoding is deterministic
/// regardless of the map's internal ordering; re-encoding a decoded map
/// reproduces the bytes even for hash maps.
pub fn write_map<'a, 'm, K, V, I>(number: u32, entries: I, buf: &mut impl BufMut)
where
    K: MapKey<'a> + Ord + 'm,
    V: WireValue<'a> + 'm,
    I: IntoIterator<Item = (&'m K, &'m V)>,
{
    let mut pairs: Vec<(&K, &V)> = entries.into_iter().collect();
    pairs.sort_by(|left, right| left.0.cmp(right.0));
    for (key, value) in pairs {
        let entry = entry_size(key, value);
        wire::write_tag(number, WireType::Len, buf);
        varint::write(entry as u64, buf);
        write_field(1, key, buf);
        write_field(2, value, buf);
    }
}

/// Calculates the encoded size of [write_map]'s output.
pub fn map_size<'a, 'm, K, V, I>(number: u32, entries: I) -> usize
where
    K: MapKey<'a> + Ord + 'm,
    V: WireValue<'a> + 'm,
    I: IntoIterator<Item = (&'m K, &'m V)>,
{
    entries
        .into_iter()
        .map(|(key, value)| {
            let entry = entry_size(key, value);
            wire::tag_size(number) + varint::size(entry as u64) + entry
        })
        .sum()
}

fn entry_size<'a, K: WireValue<'a>, V: WireValue<'a>>(key: &K, value: &V) -> usize {
    field_size(1, key) + field_size(2, value)
}
