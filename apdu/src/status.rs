// Copyright (c) 2024-2025 The Solar Network Developers

//! Response status words
//!
//! Every response carries a trailing 2-byte status word, `0x9000` on
//! success and a distinct code per rejection class otherwise. Values in
//! the `0x6nnn` range follow ISO 7816-4, the `0xBnnn` range is
//! application-specific.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

/// Response status words
#[derive(
    Copy, Clone, PartialEq, Debug, Display, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u16)]
pub enum StatusWord {
    /// Operation completed
    Ok = 0x9000,

    /// Request denied by the user
    Deny = 0x6985,

    /// Command data length invalid
    WrongLength = 0x6700,

    /// P1 / P2 parameter invalid for the instruction
    WrongP1P2 = 0x6b00,

    /// Instruction not supported
    InsNotSupported = 0x6d00,

    /// Class not supported
    ClaNotSupported = 0x6e00,

    /// Derivation path could not be displayed
    DisplayBip32PathFail = 0xb001,

    /// Address could not be derived or displayed
    DisplayAddressFail = 0xb002,

    /// Reassembled transaction length invalid (overflow or bad chunk)
    WrongTxLength = 0xb004,

    /// Transaction or message failed to parse
    TxParsingFail = 0xb005,

    /// Transaction hashing failed
    TxHashFail = 0xb006,

    /// Command does not match the session state
    BadState = 0xb007,

    /// Signing operation failed
    SignatureFail = 0xb008,

    /// Chunk received out of order
    ReqOrderFail = 0xb009,

    /// Display operation failed
    DisplayFail = 0xb00a,

    /// Public key derivation failed
    PubkeyFail = 0xb00b,

    /// Re-verification of the reference hash failed
    ValidationHashMismatch = 0xb00c,
}

impl StatusWord {
    /// Encode the status word as trailing response bytes (big-endian per
    /// ISO 7816)
    pub fn to_bytes(self) -> [u8; 2] {
        u16::from(self).to_be_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_word_values() {
        assert_eq!(StatusWord::Ok.to_bytes(), [0x90, 0x00]);
        assert_eq!(StatusWord::Deny.to_bytes(), [0x69, 0x85]);
        assert_eq!(StatusWord::ReqOrderFail.to_bytes(), [0xb0, 0x09]);
    }

    #[test]
    fn status_word_decode() {
        assert_eq!(StatusWord::try_from(0x9000u16), Ok(StatusWord::Ok));
        assert_eq!(
            StatusWord::try_from(0xb00cu16),
            Ok(StatusWord::ValidationHashMismatch)
        );
        assert!(StatusWord::try_from(0x1234u16).is_err());
    }
}
