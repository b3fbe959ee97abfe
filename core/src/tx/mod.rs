// Copyright (c) 2024-2025 The Solar Network Developers

//! Transaction wire-format deserialisation
//!
//! Transactions arrive as untrusted binary in the following layout, all
//! multi-byte fields little-endian:
//!
//! ```text
//! | MARKER (1) | VERSION (1) | NETWORK (1) | TYPEGROUP (4) | TYPE (2) |
//! | NONCE (8, skipped) | SENDER_PUBKEY (33) | FEE (8) |
//! | MEMO_LEN (1) | MEMO (MEMO_LEN) | ASSET (variable, per type) |
//! ```
//!
//! [`Transaction::deserialise`] is a pure function over a borrowed
//! buffer; the parsed value borrows the sender key, memo, and asset
//! payloads from it rather than copying. A buffer only parses if the
//! asset consumes it exactly, trailing bytes are rejected.

use ledger_solar_apdu::Network;

use crate::helpers::check_ascii;

pub mod reader;
pub use reader::Reader;

mod transfer;
pub use transfer::{Payment, TransferAsset, PAYMENT_LEN};

mod burn;
pub use burn::BurnAsset;

mod ipfs;
pub use ipfs::IpfsAsset;

mod vote;
pub use vote::{Vote, VoteAsset};

mod message;
pub use message::Message;

/// Transaction starting marker byte
pub const TRANSACTION_MARKER: u8 = 0xff;

/// Sole supported transaction version
pub const TRANSACTION_VERSION: u8 = 0x03;

/// Core transaction type group
pub const TYPEGROUP_CORE: u32 = 1;

/// Solar transaction type group
pub const TYPEGROUP_SOLAR: u32 = 2;

/// IPFS transaction type (core group)
pub const CORE_TYPE_IPFS: u16 = 5;

/// Transfer transaction type (core group)
pub const CORE_TYPE_TRANSFER: u16 = 6;

/// Burn transaction type (solar group)
pub const SOLAR_TYPE_BURN: u16 = 0;

/// Vote transaction type (solar group)
pub const SOLAR_TYPE_VOTE: u16 = 2;

/// Sender public key length
pub const SENDER_PUBKEY_LEN: usize = 33;

const NONCE_LEN: usize = 8;

/// Wire-format parse errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum ParseError {
    /// Read past the end of the buffer
    #[cfg_attr(feature = "thiserror", error("unexpected end of buffer"))]
    Truncated,

    /// Bytes remain after a complete parse
    #[cfg_attr(feature = "thiserror", error("trailing bytes after transaction"))]
    TrailingData,

    /// A length field is outside its permitted bounds
    #[cfg_attr(feature = "thiserror", error("length field out of bounds"))]
    BadLength,

    /// Starting marker byte invalid
    #[cfg_attr(feature = "thiserror", error("invalid starting marker"))]
    BadMarker,

    /// Unsupported transaction version
    #[cfg_attr(feature = "thiserror", error("unsupported transaction version"))]
    BadVersion,

    /// Network byte not in the permitted set
    #[cfg_attr(feature = "thiserror", error("invalid network"))]
    BadNetwork,

    /// (type group, type) pair not supported
    #[cfg_attr(feature = "thiserror", error("unsupported transaction type"))]
    UnsupportedType,

    /// Asset payload failed validation
    #[cfg_attr(feature = "thiserror", error("invalid asset payload"))]
    BadAsset,

    /// Memo contains non-printable characters
    #[cfg_attr(feature = "thiserror", error("memo encoding invalid"))]
    MemoEncoding,

    /// Message contains invalid characters
    #[cfg_attr(feature = "thiserror", error("message encoding invalid"))]
    MessageEncoding,
}

/// Type-specific transaction payload
#[derive(Clone, PartialEq, Debug)]
pub enum Asset<'a> {
    Transfer(TransferAsset<'a>),
    Burn(BurnAsset),
    Ipfs(IpfsAsset<'a>),
    Vote(VoteAsset<'a>),
}

/// Parsed transaction, borrowing from the reassembled buffer
#[derive(Clone, PartialEq, Debug)]
pub struct Transaction<'a> {
    /// Transaction type group
    pub type_group: u32,

    /// Transaction type within the group
    pub tx_type: u16,

    /// Network the transaction is bound to
    pub network: Network,

    /// Sender public key reference
    pub sender_public_key: &'a [u8; SENDER_PUBKEY_LEN],

    /// Fee in base units
    pub fee: u64,

    /// Optional memo (printable ASCII, no line breaks), empty when unset
    pub memo: &'a [u8],

    /// Type-specific payload
    pub asset: Asset<'a>,
}

impl<'a> Transaction<'a> {
    /// Deserialise a transaction from a complete wire-format buffer.
    ///
    /// The buffer must contain exactly one transaction, missing or
    /// trailing bytes are rejected.
    pub fn deserialise(buff: &'a [u8]) -> Result<Self, ParseError> {
        let mut r = Reader::new(buff);

        let marker = r.read_u8()?;
        if marker != TRANSACTION_MARKER {
            return Err(ParseError::BadMarker);
        }

        let version = r.read_u8()?;
        if version != TRANSACTION_VERSION {
            return Err(ParseError::BadVersion);
        }

        let network =
            Network::try_from(r.read_u8()?).map_err(|_| ParseError::BadNetwork)?;

        let type_group = r.read_u32()?;
        let tx_type = r.read_u16()?;

        r.skip(NONCE_LEN)?;

        let sender_public_key = r.read_array::<SENDER_PUBKEY_LEN>()?;

        let fee = r.read_u64()?;

        let memo_len = r.read_u8()?;
        let memo = r.read_bytes(memo_len as usize)?;
        if !check_ascii(memo, false) {
            return Err(ParseError::MemoEncoding);
        }

        let asset = match (type_group, tx_type) {
            (TYPEGROUP_CORE, CORE_TYPE_IPFS) => Asset::Ipfs(IpfsAsset::parse(&mut r)?),
            (TYPEGROUP_CORE, CORE_TYPE_TRANSFER) => Asset::Transfer(TransferAsset::parse(&mut r)?),
            (TYPEGROUP_SOLAR, SOLAR_TYPE_BURN) => Asset::Burn(BurnAsset::parse(&mut r)?),
            (TYPEGROUP_SOLAR, SOLAR_TYPE_VOTE) => Asset::Vote(VoteAsset::parse(&mut r)?),
            _ => return Err(ParseError::UnsupportedType),
        };

        // The asset must consume the buffer exactly
        r.finish()?;

        Ok(Self {
            type_group,
            tx_type,
            network,
            sender_public_key,
            fee,
            memo,
            asset,
        })
    }
}
