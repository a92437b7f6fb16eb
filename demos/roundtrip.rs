//! Decodes a small torrent-like dict, prints the structure, then re-encodes
//! it and checks the bytes come back unchanged.

use bencode::{decode, encode, Value};

const EXAMPLE: &[u8] =
    b"d8:announce28:http://tracker.example/ann4:infod6:lengthi1024e4:name8:file.txtee";

fn main() {
    let (value, consumed) = decode(EXAMPLE).expect("EXAMPLE is well-formed bencode");
    assert_eq!(consumed, EXAMPLE.len());

    if let Some(announce) = value.get(b"announce").and_then(Value::as_bytes) {
        println!("announce: {}", String::from_utf8_lossy(announce));
    }
    if let Some(info) = value.get(b"info") {
        if let Some(length) = info.get(b"length").and_then(Value::as_integer) {
            println!("length: {}", length);
        }
    }

    let re_encoded = encode(&value).expect("decoded values always re-encode");
    assert_eq!(re_encoded, EXAMPLE, "round trip must be byte-identical");
    println!("round trip OK ({} bytes)", re_encoded.len());
}
