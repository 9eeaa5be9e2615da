//! Decoding failure modes.

use crate::wire::WireType;
use thiserror::Error;

/// Errors returned while decoding the wire format.
///
/// Every error is fatal to the current decode call; the target record may
/// be partially mutated when one is returned. Unknown field numbers are not
/// errors (they are skipped).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input ended in the middle of a varint, a fixed-width value, or a
    /// length-prefixed region.
    #[error("truncated input")]
    Truncated,
    /// A varint ran past ten bytes or carried bits beyond 64.
    #[error("varint overflow")]
    Overflow,
    /// Wire types 3 and 4 (groups) and the reserved values 6 and 7.
    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u8),
    /// A tag carried field number zero or a number above 2^29 - 1.
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),
    /// The stream's wire type disagrees with the field's declared kind.
    #[error("wire type mismatch: expected {expected:?}, found {found:?}")]
    WireTypeMismatch {
        /// The wire type the declared kind requires.
        expected: WireType,
        /// The wire type observed in the stream.
        found: WireType,
    },
    /// A nested message left bytes of its length-prefixed region unconsumed.
    #[error("{0} trailing bytes in sub-message")]
    TrailingBytesInSubMessage(usize),
    /// A map entry contained a field other than key (1) or value (2).
    #[error("unexpected map entry field {0}")]
    UnexpectedMapEntryField(u32),
    /// Nested messages ran deeper than [crate::decoder::RECURSION_LIMIT].
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
    /// A string field held bytes that are not valid UTF-8.
    #[error("string field is not valid utf-8")]
    InvalidUtf8,
}
