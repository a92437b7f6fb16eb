//! Bencode errors during decoding & encoding.

use std::error;
use std::fmt::{self, Display};
use std::io;
use std::result;

/// The reason a decode failed, tagged onto [`Error::MalformedInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The buffer ended before a value was fully read.
    UnexpectedEnd,
    /// A length or integer body starts with `0` but isn't exactly `0`.
    LeadingZero,
    /// An integer body is `-0`.
    NegativeZero,
    /// A dict key is not strictly greater than the previous key.
    BadKeyOrder,
    /// The byte at the head of a value position isn't a valid discriminator.
    BadDiscriminator,
    /// A byte-string length would run past the end of the buffer.
    LengthOverflow,
    /// Strict mode: bytes remain after the top-level value.
    TrailingGarbage,
    /// A dict key position held something other than a byte string.
    NonByteStringKey,
    /// Nesting exceeded the configured maximum depth.
    DepthExceeded,
}

impl Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DecodeErrorKind::UnexpectedEnd => "unexpected end of input",
            DecodeErrorKind::LeadingZero => "leading zero in length or integer",
            DecodeErrorKind::NegativeZero => "negative zero is not a valid integer",
            DecodeErrorKind::BadKeyOrder => "dict keys are not strictly ascending",
            DecodeErrorKind::BadDiscriminator => "unrecognized discriminator byte",
            DecodeErrorKind::LengthOverflow => "byte-string length exceeds remaining input",
            DecodeErrorKind::TrailingGarbage => "trailing bytes after top-level value",
            DecodeErrorKind::NonByteStringKey => "dict key is not a byte string",
            DecodeErrorKind::DepthExceeded => "maximum nesting depth exceeded",
        })
    }
}

/// The reason an encode failed, tagged onto [`Error::UnsupportedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// A value of a kind outside the four-kind model (§3) was supplied.
    UnknownKind,
    /// A dict key was not a byte string.
    NonByteStringKey,
}

impl Display for EncodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            EncodeErrorKind::UnknownKind => "value kind has no bencode representation",
            EncodeErrorKind::NonByteStringKey => "dict key is not a byte string",
        })
    }
}

/// All errors the decoder and encoder can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input could not be interpreted as bencode.
    MalformedInput {
        kind: DecodeErrorKind,
        offset: Option<usize>,
    },
    /// The logical value is out of the bencode model.
    UnsupportedValue(EncodeErrorKind),
}

impl Error {
    pub(crate) fn malformed(kind: DecodeErrorKind, offset: usize) -> Self {
        Error::MalformedInput {
            kind,
            offset: Some(offset),
        }
    }
}

/// Alias for `Result` with this crate's own error type.
pub type Result<T> = result::Result<T, Error>;

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedInput { kind, offset: Some(offset) } => {
                write!(f, "malformed bencode at byte {}: {}", offset, kind)
            }
            Error::MalformedInput { kind, offset: None } => {
                write!(f, "malformed bencode: {}", kind)
            }
            Error::UnsupportedValue(kind) => write!(f, "unsupported value: {}", kind),
        }
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::MalformedInput { .. } => io::Error::new(io::ErrorKind::InvalidData, e),
            Error::UnsupportedValue(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}
