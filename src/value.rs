//! The bencode value model (§3): four logical kinds, plus an opaque
//! [`Value::Precomputed`] fragment that is encoder-only.

use std::convert::TryFrom;

use num_bigint::BigInt;

use crate::error::{EncodeErrorKind, Error};

/// A decoded (or to-be-encoded) bencode value.
///
/// §3 requires dict keys to be byte strings in ascending lexicographic
/// order, but that's a requirement on the *wire form*, not one the value
/// model can enforce at the type level without losing the ability to
/// represent (and reject) a malformed key at encode time — see scenario
/// S11 and [`crate::encode`]. A dict is therefore stored as an
/// ordered list of key/value pairs rather than a `BTreeMap<Vec<u8>, Value>`;
/// the decoder always produces [`Value::Bytes`] keys in strictly ascending
/// order (§4.1), and the encoder sorts and validates them on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed integer of arbitrary magnitude (§4.1: "arbitrary magnitude;
    /// the implementation must preserve them without overflow").
    Integer(BigInt),
    /// An immutable sequence of raw bytes. No charset decoding is performed.
    Bytes(Vec<u8>),
    /// An ordered sequence of values. May be empty.
    List(Vec<Value>),
    /// A mapping from keys to values. The decoder only ever produces
    /// [`Value::Bytes`] keys, pre-sorted; a caller building a `Value` by
    /// hand may supply a non-byte-string key, which the encoder rejects
    /// with `UnsupportedValue(NonByteStringKey)` (§4.2).
    Dict(Vec<(Value, Value)>),
    /// An already-encoded byte slice, spliced verbatim by the encoder.
    ///
    /// The bytes are not verified to be valid bencode; see
    /// [`Value::precomputed`].
    Precomputed(Vec<u8>),
}

impl Value {
    /// Builds an [`Value::Integer`] from any type that converts into
    /// [`BigInt`] (all of Rust's built-in integer types do).
    pub fn integer<I: Into<BigInt>>(value: I) -> Self {
        Value::Integer(value.into())
    }

    /// Builds a [`Value::Bytes`] from anything that converts into a byte
    /// vector.
    pub fn bytes<B: Into<Vec<u8>>>(value: B) -> Self {
        Value::Bytes(value.into())
    }

    /// Builds a [`Value::List`] from an iterator of values.
    pub fn list<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Value::List(values.into_iter().collect())
    }

    /// Builds a [`Value::Dict`] from an iterator of key/value pairs, in
    /// whatever order they're given — the encoder sorts them (§4.2). `K` is
    /// typically `Vec<u8>` (a byte-string key); passing a `Value` directly
    /// allows constructing a dict with a non-byte-string key, which the
    /// encoder rejects at runtime rather than this constructor (scenario
    /// S11).
    pub fn dict<K, I>(pairs: I) -> Self
    where
        K: Into<Value>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Dict(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Wraps an already-encoded byte slice so the encoder splices it in
    /// verbatim instead of re-encoding. The caller is responsible for the
    /// bytes themselves being a valid bencoding; this is never checked.
    pub fn precomputed<B: Into<Vec<u8>>>(bytes: B) -> Self {
        Value::Precomputed(bytes.into())
    }

    /// Returns the inner bytes if this is [`Value::Bytes`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the inner integer if this is [`Value::Integer`].
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the inner list if this is [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the inner key/value pairs if this is [`Value::Dict`].
    pub fn as_dict(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a dict entry by a byte-string key. Returns `None` if this
    /// isn't a dict, the key isn't present, or is present under a key that
    /// isn't itself a byte string.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        let entries = self.as_dict()?;
        entries
            .iter()
            .find(|(k, _)| k.as_bytes() == Some(key))
            .map(|(_, v)| v)
    }
}

/// Boolean input convenience (§4.2): a boolean is encoded as the integer `0`
/// or `1`. There is no boolean kind on the wire.
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(BigInt::from(value as u8))
    }
}

/// Bencode has no floating-point kind (§1 Non-goals). This conversion always
/// fails with [`EncodeErrorKind::UnknownKind`] — it exists so that callers
/// holding a host-language float get a typed error instead of having no
/// conversion path at all (scenario S12).
impl TryFrom<f64> for Value {
    type Error = Error;

    fn try_from(_value: f64) -> Result<Self, Error> {
        Err(Error::UnsupportedValue(EncodeErrorKind::UnknownKind))
    }
}

macro_rules! impl_value_from_int {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for Value {
                fn from(value: $int) -> Self {
                    Value::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);

impl<'a> From<&'a str> for Value {
    fn from(value: &'a str) -> Self {
        Value::Bytes(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_looks_up_by_byte_string_key() {
        let value = Value::dict([
            (b"age".to_vec(), Value::integer(25)),
            (b"eyes".to_vec(), Value::bytes(&b"blue"[..])),
        ]);
        assert_eq!(value.get(b"age"), Some(&Value::integer(25)));
        assert_eq!(value.get(b"missing"), None);
    }

    #[test]
    fn get_ignores_non_byte_string_keys() {
        let value = Value::dict([(Value::integer(1), Value::bytes(&b"x"[..]))]);
        assert_eq!(value.get(b"1"), None);
    }

    #[test]
    fn dict_constructor_accepts_a_value_key_directly() {
        let value = Value::Dict(vec![(Value::integer(1), Value::bytes(&b"x"[..]))]);
        assert_eq!(value.as_dict().unwrap().len(), 1);
    }
}
