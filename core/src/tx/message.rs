// Copyright (c) 2024-2025 The Solar Network Developers

//! Message wire format
//!
//! ```text
//! | LENGTH (2, LE) | PAYLOAD (LENGTH, ascii) |
//! ```
//!
//! LF and CRLF line breaks are permitted within the payload, a bare CR
//! (and every other control character) is not.

use static_assertions::const_assert;

use super::{ParseError, Reader};
use crate::helpers::check_ascii;
use crate::TRANSACTION_LEN_MAX;

/// Minimum message payload length
pub const MESSAGE_LEN_MIN: usize = 1;

/// Maximum message payload length
pub const MESSAGE_LEN_MAX: usize = TRANSACTION_LEN_MAX - 1;

// Message lengths are carried in a u16 on the wire
const_assert!(MESSAGE_LEN_MAX <= u16::MAX as usize);

/// Parsed message, borrowing from the reassembled buffer
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Message<'a> {
    data: &'a [u8],
}

impl<'a> Message<'a> {
    /// Deserialise a message from a complete wire-format buffer.
    ///
    /// The buffer must contain exactly one message, missing or trailing
    /// bytes are rejected.
    pub fn deserialise(buff: &'a [u8]) -> Result<Self, ParseError> {
        let mut r = Reader::new(buff);

        let len = r.read_u16()? as usize;
        if !(MESSAGE_LEN_MIN..=MESSAGE_LEN_MAX).contains(&len) {
            return Err(ParseError::BadLength);
        }

        let data = r.read_bytes(len)?;
        if !check_ascii(data, true) {
            return Err(ParseError::MessageEncoding);
        }

        r.finish()?;

        Ok(Self { data })
    }

    /// Message payload bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Message payload as a string slice
    pub fn as_str(&self) -> &'a str {
        // ASCII validated at parse
        core::str::from_utf8(self.data).unwrap_or("")
    }

    /// Message payload length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for an empty payload (unreachable for parsed values)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
