use crate::Error;
use std::fmt::Write;
use std::str;

/// A function that takes a hexadecimal representation of bytes
/// back into a stream of bytes. Accepts an optional `0x` prefix
/// and either letter case.
pub fn hex_str_to_bytes(s: &str) -> Result<Vec<u8>, Error> {
    let s = match s.strip_prefix("0x") {
        Some(s) => s,
        None => s,
    };
    let bytes = s
        .as_bytes()
        .chunks(2)
        .map::<Result<u8, Error>, _>(|ch| {
            let str = str::from_utf8(ch)?;
            let byte = u8::from_str_radix(str, 16)?;

            Ok(byte)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(bytes)
}

pub fn bytes_to_hex_str(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut acc, b| {
        write!(acc, "{b:02x}").unwrap();
        acc
    })
}

/// Checks that a string is made of whole bytes of hex digits, the way
/// compiled contract bytecode is delivered by solc. The `0x` prefix is
/// tolerated since both prefixed and bare forms are seen in the wild.
pub fn is_hex(s: &str) -> bool {
    let s = match s.strip_prefix("0x") {
        Some(s) => s,
        None => s,
    };
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[test]
fn decode_bytes() {
    assert_eq!(
        hex_str_to_bytes("deadbeef").expect("Unable to decode"),
        [222, 173, 190, 239]
    );
}

#[test]
fn decode_upper_case() {
    assert_eq!(hex_str_to_bytes("DEADBEEF").unwrap(), [222, 173, 190, 239]);
}

#[test]
fn bytes_raises_decode_error() {
    let e = hex_str_to_bytes("\u{012345}deadbeef").unwrap_err();

    match e {
        Error::InvalidUtf8(_) => {}
        _ => panic!(),
    };
}

#[test]
fn bytes_raises_parse_error() {
    let e = hex_str_to_bytes("Lorem ipsum").unwrap_err();
    match e {
        Error::InvalidHex(_) => {}
        _ => panic!(),
    }
}

#[test]
fn parse_prefixed_empty() {
    assert_eq!(hex_str_to_bytes("0x").unwrap(), Vec::<u8>::new());
}

#[test]
fn parse_prefixed_non_empty() {
    assert_eq!(
        hex_str_to_bytes("0xdeadbeef").unwrap(),
        vec![0xde, 0xad, 0xbe, 0xef]
    );
}

#[test]
fn encode_bytes() {
    assert_eq!(bytes_to_hex_str(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

#[test]
fn hex_validation() {
    assert!(is_hex("deadbeef"));
    assert!(is_hex("DEADBEEF"));
    assert!(is_hex("0xDEADBEEF"));
    assert!(!is_hex(""));
    assert!(!is_hex("0x"));
    // whole bytes only
    assert!(!is_hex("abc"));
    assert!(!is_hex("wrong-address"));
    assert!(!is_hex("Lorem ipsum"));
}
