//! Message deserialiser tests

use ledger_solar_core::tx::{Message, ParseError};

mod helpers;
use helpers::*;

#[test]
fn message_parses() {
    let raw = message(b"ccccccc");

    let m = Message::deserialise(&raw).unwrap();

    assert_eq!(m.len(), 7);
    assert_eq!(m.as_bytes(), b"ccccccc");
    assert_eq!(m.as_str(), "ccccccc");
}

#[test]
fn message_length_bounds() {
    // Zero-length payload
    let raw = message(b"");
    assert_eq!(Message::deserialise(&raw).err(), Some(ParseError::BadLength));

    // Declared length exceeding the maximum
    let mut raw = message(b"hello");
    raw[..2].copy_from_slice(&4096u16.to_le_bytes());
    assert_eq!(Message::deserialise(&raw).err(), Some(ParseError::BadLength));
}

#[test]
fn message_exact_consumption() {
    // Declared length shorter than the payload leaves trailing bytes
    let mut raw = message(b"hello");
    raw[..2].copy_from_slice(&4u16.to_le_bytes());
    assert_eq!(
        Message::deserialise(&raw).err(),
        Some(ParseError::TrailingData)
    );

    // Declared length longer than the payload truncates
    let mut raw = message(b"hello");
    raw[..2].copy_from_slice(&6u16.to_le_bytes());
    assert_eq!(Message::deserialise(&raw).err(), Some(ParseError::Truncated));
}

#[test]
fn message_encoding_rules() {
    // Embedded NUL byte
    let raw = message(b"ccc\x00ccc");
    assert_eq!(
        Message::deserialise(&raw).err(),
        Some(ParseError::MessageEncoding)
    );

    // LF and CRLF are permitted
    let raw = message(b"line one\nline two\r\nline three");
    assert!(Message::deserialise(&raw).is_ok());

    // A bare CR is not
    let raw = message(b"line one\rline two");
    assert_eq!(
        Message::deserialise(&raw).err(),
        Some(ParseError::MessageEncoding)
    );

    // Non-ascii bytes are rejected
    let raw = message(&[0x80, 0x81]);
    assert_eq!(
        Message::deserialise(&raw).err(),
        Some(ParseError::MessageEncoding)
    );
}
