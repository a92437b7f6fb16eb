//! Bencode: the binary serialization format used by BitTorrent metainfo
//! files and peer-wire messages.
//!
//! A bencoded document is one of four kinds ([`Value`]): an arbitrary
//! precision signed integer, a raw byte string, a list, or a dict with
//! byte-string keys stored in ascending lexicographic order. There is no
//! schema: decoding yields a [`Value`] tree, and callers pick values back out
//! of it with [`Value::as_bytes`], [`Value::as_integer`], and friends.
//!
//! ```
//! use bencode::{decode, encode, Value};
//!
//! let (value, consumed) = decode(b"d3:agei25e4:eyes4:bluee").unwrap();
//! assert_eq!(consumed, 23);
//! assert_eq!(value.get(b"age"), Some(&Value::integer(25)));
//!
//! let round_tripped = encode(&value).unwrap();
//! assert_eq!(round_tripped, b"d3:agei25e4:eyes4:bluee");
//! ```

mod decoder;
mod encoder;
mod error;
mod read;
mod token;
mod value;

pub use decoder::{decode, decode_sloppy, decode_with_options, DecodeOptions, Mode};
pub use encoder::{encode, encode_into};
pub use error::{DecodeErrorKind, EncodeErrorKind, Error, Result};
pub use value::Value;
