//! Bencode encoder (§4.2): renders a [`Value`] tree into its canonical byte
//! representation.

use std::io::{self, Write};

use num_bigint::BigInt;

use crate::error::{EncodeErrorKind, Error, Result};
use crate::value::Value;

/// Encodes `value` into a freshly allocated buffer.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_value(&mut out, value)?;
    Ok(out)
}

/// Encodes `value` and writes the result into `writer`.
///
/// A convenience over calling [`encode`] and writing the result yourself; it
/// still builds the full encoded buffer in memory before handing it to
/// `writer`; nothing about this crate's tree-walk is inherently streamable
/// once a dict's keys need sorting (§4.2) before any byte of the dict can be
/// written. `writer`'s own I/O failures (a full disk, a broken pipe) are
/// propagated rather than panicking.
pub fn encode_into<W: Write>(writer: &mut W, value: &Value) -> io::Result<()> {
    let bytes = encode(value).map_err(io::Error::from)?;
    writer.write_all(&bytes)
}

fn write_value(out: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Integer(n) => write_integer(out, n),
        Value::Bytes(bytes) => write_bytestring(out, bytes),
        Value::List(items) => write_list(out, items)?,
        Value::Dict(entries) => write_dict(out, entries)?,
        Value::Precomputed(bytes) => out.extend_from_slice(bytes),
    }
    Ok(())
}

fn write_integer(out: &mut Vec<u8>, n: &BigInt) {
    out.push(b'i');
    out.extend_from_slice(n.to_string().as_bytes());
    out.push(b'e');
}

fn write_bytestring(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes.len().to_string().as_bytes());
    out.push(b':');
    out.extend_from_slice(bytes);
}

fn write_list(out: &mut Vec<u8>, items: &[Value]) -> Result<()> {
    out.push(b'l');
    for item in items {
        write_value(out, item)?;
    }
    out.push(b'e');
    Ok(())
}

/// Dict keys aren't statically guaranteed to be byte strings (§3, see
/// [`Value::Dict`]) — a key that isn't [`Value::Bytes`] is rejected here
/// with `UnsupportedValue(NonByteStringKey)` (scenario S11), since there's no
/// byte-lex order to sort it into.
fn write_dict(out: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<()> {
    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match key {
            Value::Bytes(bytes) => pairs.push((bytes.as_slice(), value)),
            _ => return Err(Error::UnsupportedValue(EncodeErrorKind::NonByteStringKey)),
        }
    }
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));

    out.push(b'd');
    for (key, value) in pairs {
        write_bytestring(out, key);
        write_value(out, value)?;
    }
    out.push(b'e');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn encodes_integer() {
        assert_eq!(encode(&Value::integer(4)).unwrap(), b"i4e");
        assert_eq!(encode(&Value::integer(-4)).unwrap(), b"i-4e");
        assert_eq!(encode(&Value::integer(0)).unwrap(), b"i0e");
    }

    #[test]
    fn encodes_bytestring() {
        assert_eq!(encode(&Value::bytes(&b"spam"[..])).unwrap(), b"4:spam");
        assert_eq!(encode(&Value::bytes(&b""[..])).unwrap(), b"0:");
    }

    #[test]
    fn encodes_list() {
        let value = Value::list([Value::bytes(&b"asd"[..]), Value::bytes(&b"xy"[..])]);
        assert_eq!(encode(&value).unwrap(), b"l3:asd2:xye");
    }

    #[test]
    fn encodes_dict_in_key_order_regardless_of_insertion_order() {
        let value = Value::dict([
            (b"eyes".to_vec(), Value::bytes(&b"blue"[..])),
            (b"age".to_vec(), Value::integer(25)),
        ]);
        assert_eq!(encode(&value).unwrap(), b"d3:agei25e4:eyes4:bluee");
    }

    #[test]
    fn rejects_dict_with_non_byte_string_key() {
        let value = Value::dict([(Value::integer(1), Value::bytes(&b"x"[..]))]);
        let err = encode(&value).unwrap_err();
        assert_eq!(err, Error::UnsupportedValue(EncodeErrorKind::NonByteStringKey));
    }

    #[test]
    fn encodes_precomputed_fragment_verbatim() {
        let value = Value::precomputed(&b"i999e"[..]);
        assert_eq!(encode(&value).unwrap(), b"i999e");
    }

    #[test]
    fn bool_encodes_as_zero_or_one_integer() {
        assert_eq!(encode(&Value::from(true)).unwrap(), b"i1e");
        assert_eq!(encode(&Value::from(false)).unwrap(), b"i0e");
    }

    #[test]
    fn float_conversion_is_rejected() {
        assert!(Value::try_from(1.5_f64).is_err());
    }

    #[test]
    fn nested_structure_round_trips_through_encode_decode() {
        let value = Value::dict([(
            b"files".to_vec(),
            Value::list([Value::dict([
                (b"length".to_vec(), Value::integer(1024)),
                (b"path".to_vec(), Value::bytes(&b"a/b.txt"[..])),
            ])]),
        )]);

        let encoded = encode(&value).unwrap();
        let (decoded, consumed) = crate::decoder::decode(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());
        assert_eq!(decoded, value);
    }

    #[test]
    fn encode_into_writes_the_same_bytes_as_encode() {
        let value = Value::list([Value::integer(1), Value::bytes(&b"x"[..])]);

        let mut written = Vec::new();
        encode_into(&mut written, &value).unwrap();

        assert_eq!(written, encode(&value).unwrap());
    }

    #[test]
    fn encode_into_surfaces_domain_errors_as_io_errors() {
        let value = Value::dict([(Value::integer(1), Value::bytes(&b"x"[..]))]);

        let mut written = Vec::new();
        let err = encode_into(&mut written, &value).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
