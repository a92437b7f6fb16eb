//! Bencode decoder (§4.1): recursive-descent parse of a byte buffer into a
//! [`Value`] tree.

use num_bigint::BigInt;

use crate::error::{DecodeErrorKind, Error, Result};
use crate::read::{Read, SliceRead};
use crate::token;
use crate::value::Value;

/// Whether trailing bytes after the top-level value are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Trailing bytes after the top-level value are rejected (§4.1).
    Strict,
    /// Trailing bytes are permitted; `consumed` tells the caller where the
    /// value ended. Used to frame multiple bencoded documents end-to-end.
    Sloppy,
}

/// Tunables for [`decode_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: Mode,
    /// Maximum nesting depth before `MalformedInput(DepthExceeded)` (§5).
    pub max_depth: usize,
    /// Whether to accept the non-canonical `u<bytestring>` extension (§4.1).
    /// Off by default: the safe choice for strict BitTorrent compatibility.
    pub accept_utf8_extension: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            mode: Mode::Strict,
            max_depth: 100,
            accept_utf8_extension: false,
        }
    }
}

impl DecodeOptions {
    /// Default options with [`Mode::Sloppy`].
    pub fn sloppy() -> Self {
        DecodeOptions {
            mode: Mode::Sloppy,
            ..DecodeOptions::default()
        }
    }

    /// Overrides the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Overrides whether the `u` extension is accepted.
    pub fn accept_utf8_extension(mut self, accept: bool) -> Self {
        self.accept_utf8_extension = accept;
        self
    }
}

/// Decodes `input` in strict mode with default options (max depth 100, `u`
/// extension rejected). See §4.1.
pub fn decode(input: &[u8]) -> Result<(Value, usize)> {
    decode_with_options(input, &DecodeOptions::default())
}

/// Decodes `input` in sloppy mode with default options.
pub fn decode_sloppy(input: &[u8]) -> Result<(Value, usize)> {
    decode_with_options(input, &DecodeOptions::sloppy())
}

/// Decodes `input` with explicit [`DecodeOptions`].
pub fn decode_with_options(input: &[u8], options: &DecodeOptions) -> Result<(Value, usize)> {
    let mut cursor = SliceRead::new(input);
    let value = decode_value(&mut cursor, options, 0)?;
    let consumed = cursor.position();

    if options.mode == Mode::Strict && cursor.remaining() > 0 {
        return Err(Error::malformed(DecodeErrorKind::TrailingGarbage, consumed));
    }

    Ok((value, consumed))
}

fn decode_value<'de, R: Read<'de>>(
    cursor: &mut R,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Value> {
    if depth > options.max_depth {
        return Err(Error::malformed(
            DecodeErrorKind::DepthExceeded,
            cursor.position(),
        ));
    }

    let offset = cursor.position();
    let byte = cursor
        .peek_byte()
        .ok_or_else(|| Error::malformed(DecodeErrorKind::UnexpectedEnd, offset))?;

    match byte {
        token::INTEGER_START => decode_integer(cursor),
        b'0'..=b'9' => decode_bytestring(cursor).map(Value::Bytes),
        token::LIST_START => decode_list(cursor, options, depth),
        token::MAP_START => decode_dict(cursor, options, depth),
        token::UTF8_EXTENSION_START if options.accept_utf8_extension => {
            decode_utf8_extension(cursor)
        }
        _ => Err(Error::malformed(DecodeErrorKind::BadDiscriminator, offset)),
    }
}

/// Decodes an integer whose discriminator `i` is at the cursor's current
/// position.
fn decode_integer<'de, R: Read<'de>>(cursor: &mut R) -> Result<Value> {
    let start = cursor.position();
    cursor.next_byte(); // 'i'

    let body = cursor
        .read_until(token::END)
        .ok_or_else(|| Error::malformed(DecodeErrorKind::UnexpectedEnd, start))?;

    parse_integer_body(body, start).map(Value::Integer)
}

fn parse_integer_body(body: &[u8], start: usize) -> Result<BigInt> {
    if body.is_empty() {
        return Err(Error::malformed(DecodeErrorKind::UnexpectedEnd, start));
    }

    let (negative, digits) = match body.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, body),
    };

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::malformed(DecodeErrorKind::BadDiscriminator, start));
    }
    if digits[0] == b'0' && digits.len() > 1 {
        return Err(Error::malformed(DecodeErrorKind::LeadingZero, start));
    }
    if negative && digits == b"0" {
        return Err(Error::malformed(DecodeErrorKind::NegativeZero, start));
    }

    let magnitude =
        BigInt::parse_bytes(digits, 10).expect("digits already validated as ASCII decimal");
    Ok(if negative { -magnitude } else { magnitude })
}

/// Decodes a length-prefixed byte string whose length digits start at the
/// cursor's current position.
fn decode_bytestring<'de, R: Read<'de>>(cursor: &mut R) -> Result<Vec<u8>> {
    let start = cursor.position();

    let len_digits = cursor
        .read_until(token::BYTES_DELIMITER)
        .ok_or_else(|| Error::malformed(DecodeErrorKind::UnexpectedEnd, start))?;
    let len = parse_length(len_digits, start)?;

    let bytes = cursor
        .next_bytes(len)
        .ok_or_else(|| Error::malformed(DecodeErrorKind::LengthOverflow, start))?;

    Ok(bytes.to_vec())
}

fn parse_length(len_digits: &[u8], start: usize) -> Result<usize> {
    if len_digits.is_empty() || !len_digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::malformed(DecodeErrorKind::UnexpectedEnd, start));
    }
    if len_digits[0] == b'0' && len_digits.len() > 1 {
        return Err(Error::malformed(DecodeErrorKind::LeadingZero, start));
    }

    std::str::from_utf8(len_digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| Error::malformed(DecodeErrorKind::LengthOverflow, start))
}

/// Decodes a list whose discriminator `l` is at the cursor's current
/// position.
fn decode_list<'de, R: Read<'de>>(
    cursor: &mut R,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Value> {
    cursor.next_byte(); // 'l'

    let mut items = Vec::new();
    loop {
        match cursor.peek_byte() {
            Some(token::END) => {
                cursor.next_byte();
                break;
            }
            Some(_) => items.push(decode_value(cursor, options, depth + 1)?),
            None => {
                return Err(Error::malformed(
                    DecodeErrorKind::UnexpectedEnd,
                    cursor.position(),
                ))
            }
        }
    }

    Ok(Value::List(items))
}

/// Decodes a dict whose discriminator `d` is at the cursor's current
/// position. Enforces that keys are byte strings in strictly ascending
/// byte-lex order (§4.1).
fn decode_dict<'de, R: Read<'de>>(
    cursor: &mut R,
    options: &DecodeOptions,
    depth: usize,
) -> Result<Value> {
    cursor.next_byte(); // 'd'

    let mut entries = Vec::new();
    let mut last_key: Option<Vec<u8>> = None;

    loop {
        match cursor.peek_byte() {
            Some(token::END) => {
                cursor.next_byte();
                break;
            }
            Some(b) if b.is_ascii_digit() => {
                let key_offset = cursor.position();
                let key = decode_bytestring(cursor)?;

                if let Some(prev) = &last_key {
                    if key <= *prev {
                        return Err(Error::malformed(DecodeErrorKind::BadKeyOrder, key_offset));
                    }
                }

                let value = decode_value(cursor, options, depth + 1)?;
                last_key = Some(key.clone());
                entries.push((Value::Bytes(key), value));
            }
            Some(_) => {
                return Err(Error::malformed(
                    DecodeErrorKind::NonByteStringKey,
                    cursor.position(),
                ))
            }
            None => {
                return Err(Error::malformed(
                    DecodeErrorKind::UnexpectedEnd,
                    cursor.position(),
                ))
            }
        }
    }

    Ok(Value::Dict(entries))
}

/// Decodes the `u<bytestring>` compatibility extension (§4.1). The value
/// model has no separate Unicode kind, so this simply yields a
/// [`Value::Bytes`]; callers that opted in via
/// [`DecodeOptions::accept_utf8_extension`] are expected to validate UTF-8
/// themselves if they care.
fn decode_utf8_extension<'de, R: Read<'de>>(cursor: &mut R) -> Result<Value> {
    cursor.next_byte(); // 'u'
    decode_bytestring(cursor).map(Value::Bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_decodes_fully(input: &[u8], expected: Value) {
        let (value, consumed) = decode(input).unwrap();
        assert_eq!(value, expected);
        assert_eq!(consumed, input.len());
    }

    fn assert_rejected(input: &[u8], expected_kind: DecodeErrorKind) {
        match decode(input) {
            Err(Error::MalformedInput { kind, .. }) => assert_eq!(kind, expected_kind),
            other => panic!("expected MalformedInput({:?}), got {:?}", expected_kind, other),
        }
    }

    // S1
    #[test]
    fn s1_simple_integer() {
        assert_decodes_fully(b"i4e", Value::integer(4));
    }

    // S2
    #[test]
    fn s2_negative_zero_rejected() {
        assert_rejected(b"i-0e", DecodeErrorKind::NegativeZero);
    }

    // S3
    #[test]
    fn s3_leading_zero_integer_rejected() {
        assert_rejected(b"i03e", DecodeErrorKind::LeadingZero);
    }

    // S4
    #[test]
    fn s4_leading_zero_length_rejected() {
        assert_rejected(b"02:xy", DecodeErrorKind::LeadingZero);
    }

    // S5
    #[test]
    fn s5_list_of_strings() {
        assert_decodes_fully(
            b"l3:asd2:xye",
            Value::list([Value::bytes(&b"asd"[..]), Value::bytes(&b"xy"[..])]),
        );
    }

    // S6
    #[test]
    fn s6_bad_key_order_rejected() {
        assert_rejected(b"d1:b0:1:a0:e", DecodeErrorKind::BadKeyOrder);
    }

    // S7
    #[test]
    fn s7_dict_with_mixed_values() {
        assert_decodes_fully(
            b"d3:agei25e4:eyes4:bluee",
            Value::dict([
                (b"age".to_vec(), Value::integer(25)),
                (b"eyes".to_vec(), Value::bytes(&b"blue"[..])),
            ]),
        );
    }

    // S8
    #[test]
    fn s8_length_overflow_rejected() {
        assert_rejected(b"9999:x", DecodeErrorKind::LengthOverflow);
    }

    // S9
    #[test]
    fn s9_trailing_garbage_strict_vs_sloppy() {
        match decode(b"0:0:") {
            Err(Error::MalformedInput { kind, .. }) => {
                assert_eq!(kind, DecodeErrorKind::TrailingGarbage)
            }
            other => panic!("expected TrailingGarbage, got {:?}", other),
        }

        let (value, consumed) = decode_sloppy(b"0:0:").unwrap();
        assert_eq!(value, Value::bytes(&b""[..]));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn rejects_empty_integer_body() {
        assert_rejected(b"ie", DecodeErrorKind::UnexpectedEnd);
    }

    #[test]
    fn rejects_unterminated_list() {
        assert_rejected(b"l3:asd", DecodeErrorKind::UnexpectedEnd);
    }

    #[test]
    fn rejects_non_bytestring_dict_key() {
        assert_rejected(b"di1e0:e", DecodeErrorKind::NonByteStringKey);
    }

    #[test]
    fn rejects_duplicate_dict_keys() {
        assert_rejected(b"d1:a0:1:a0:e", DecodeErrorKind::BadKeyOrder);
    }

    #[test]
    fn accepts_arbitrary_precision_integer() {
        let (value, _) = decode(b"i12345678901234567890e").unwrap();
        assert_eq!(
            value,
            Value::Integer("12345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn depth_bound_rejects_pathological_nesting() {
        let mut input = vec![b'l'; 200];
        input.extend(std::iter::repeat(b'e').take(200));
        assert_rejected(&input, DecodeErrorKind::DepthExceeded);
    }

    #[test]
    fn utf8_extension_rejected_by_default() {
        assert_rejected(b"u3:foo", DecodeErrorKind::BadDiscriminator);
    }

    #[test]
    fn utf8_extension_accepted_when_opted_in() {
        let options = DecodeOptions::default().accept_utf8_extension(true);
        let (value, consumed) = decode_with_options(b"u3:foo", &options).unwrap();
        assert_eq!(value, Value::bytes(&b"foo"[..]));
        assert_eq!(consumed, 6);
    }

    #[test]
    fn empty_list_and_dict() {
        assert_decodes_fully(b"le", Value::List(vec![]));
        assert_decodes_fully(b"de", Value::Dict(Vec::new()));
    }

    #[test]
    fn empty_byte_string() {
        assert_decodes_fully(b"0:", Value::bytes(&b""[..]));
    }
}
