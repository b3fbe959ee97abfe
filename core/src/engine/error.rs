// Copyright (c) 2024-2025 The Solar Network Developers

use ledger_solar_apdu::status::StatusWord;

use crate::tx::ParseError;

/// [Engine][super::Engine] errors
///
/// Every error is terminal for the current request and maps to a
/// distinct response status word; the host retries by issuing a fresh
/// request from chunk zero.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum Error {
    /// APDU class not supported
    #[cfg_attr(feature = "thiserror", error("class not supported"))]
    ClaNotSupported,

    /// APDU instruction not supported
    #[cfg_attr(feature = "thiserror", error("instruction not supported"))]
    InsNotSupported,

    /// P1 / P2 invalid for the instruction
    #[cfg_attr(feature = "thiserror", error("invalid p1 / p2 parameters"))]
    InvalidParams,

    /// Command payload length invalid
    #[cfg_attr(feature = "thiserror", error("invalid command data length"))]
    InvalidLength,

    /// Command does not match the session state
    #[cfg_attr(feature = "thiserror", error("command does not match session state"))]
    BadState,

    /// Chunk index out of sequence
    #[cfg_attr(feature = "thiserror", error("chunk received out of order"))]
    OutOfOrder,

    /// Reassembled payload would exceed the transaction buffer
    #[cfg_attr(feature = "thiserror", error("transaction exceeds maximum length"))]
    TxTooLarge,

    /// Wire-format parsing failed
    #[cfg_attr(feature = "thiserror", error("parsing failed: {0}"))]
    Parse(ParseError),

    /// Re-verification of the reference hash failed
    #[cfg_attr(feature = "thiserror", error("reference hash mismatch"))]
    HashMismatch,

    /// Public key derivation failed
    #[cfg_attr(feature = "thiserror", error("key derivation failed"))]
    KeyDerivationFailed,

    /// Address encoding failed
    #[cfg_attr(feature = "thiserror", error("address encoding failed"))]
    AddressEncodingFailed,

    /// Signing operation failed
    #[cfg_attr(feature = "thiserror", error("signing failed"))]
    SigningFailed,
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl Error {
    /// Map an error to its response status word
    pub fn status(&self) -> StatusWord {
        match self {
            Error::ClaNotSupported => StatusWord::ClaNotSupported,
            Error::InsNotSupported => StatusWord::InsNotSupported,
            Error::InvalidParams => StatusWord::WrongP1P2,
            Error::InvalidLength => StatusWord::WrongLength,
            Error::BadState => StatusWord::BadState,
            Error::OutOfOrder => StatusWord::ReqOrderFail,
            Error::TxTooLarge => StatusWord::WrongTxLength,
            Error::Parse(_) => StatusWord::TxParsingFail,
            Error::HashMismatch => StatusWord::ValidationHashMismatch,
            Error::KeyDerivationFailed => StatusWord::PubkeyFail,
            Error::AddressEncodingFailed => StatusWord::DisplayAddressFail,
            Error::SigningFailed => StatusWord::SignatureFail,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_mapping() {
        let tests = &[
            (Error::OutOfOrder, StatusWord::ReqOrderFail),
            (Error::TxTooLarge, StatusWord::WrongTxLength),
            (Error::Parse(ParseError::BadAsset), StatusWord::TxParsingFail),
            (Error::HashMismatch, StatusWord::ValidationHashMismatch),
            (Error::BadState, StatusWord::BadState),
        ];

        for (e, sw) in tests {
            assert_eq!(e.status(), *sw);
        }
    }
}
