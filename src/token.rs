//! Bencode tokens & charsets.

pub const INTEGER_START: u8 = b'i';
pub const LIST_START: u8 = b'l';
pub const MAP_START: u8 = b'd';
pub const BYTES_DELIMITER: u8 = b':';
pub const END: u8 = b'e';

/// Non-canonical compatibility extension: `u<bytestring>` is a UTF-8 string.
/// Decoders MAY accept it; this codec never emits it. See [`crate::DecodeOptions`].
pub const UTF8_EXTENSION_START: u8 = b'u';
