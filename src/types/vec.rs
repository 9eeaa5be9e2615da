//! Repeated-field support for [`Vec<T>`].
//!
//! The decoder drives this through [RepeatedSlot]: packed occurrences are
//! unrolled element by element from the length-prefixed run, unpacked
//! occurrences append one element per tag. In-stream element order is
//! preserved.

use crate::{
    codec::WireValue,
    error::Error,
    schema::RepeatedSlot,
    wire::{Reader, WireType},
};

impl<'a, T: WireValue<'a>> RepeatedSlot<'a> for Vec<T> {
    fn wire_type(&self) -> WireType {
        T::WIRE_TYPE
    }

    fn read_element(&mut self, reader: &mut Reader<'a>, depth: usize) -> Result<(), Error> {
        self.push(T::read_value(reader, depth)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_elements_in_order() {
        let payload = [0x01, 0xAC, 0x02, 0x80, 0x01];
        let mut reader = Reader::new(&payload);
        let mut values: Vec<u32> = Vec::new();
        while !reader.is_empty() {
            values.read_element(&mut reader, 0).unwrap();
        }
        assert_eq!(values, [1, 300, 128]);
    }

    #[test]
    fn test_element_wire_type() {
        assert_eq!(Vec::<u32>::new().wire_type(), WireType::Varint);
        assert_eq!(Vec::<f64>::new().wire_type(), WireType::I64);
        assert_eq!(Vec::<String>::new().wire_type(), WireType::Len);
    }

    #[test]
    fn test_element_straddling_input() {
        let payload = [0x80];
        let mut reader = Reader::new(&payload);
        let mut values: Vec<u32> = Vec::new();
        assert_eq!(
            values.read_element(&mut reader, 0),
            Err(Error::Truncated)
        );
    }
}
