// Copyright (c) 2024-2025 The Solar Network Developers

//! Protocol / APDU definitions for Solar hardware wallet communication
//!
//! This module provides a protocol specification and reference implementation
//! for communication with Solar hardware wallets.
//!
//! Commands use the ISO 7816-4 envelope (`CLA | INS | P1 | P2 | LC | DATA`)
//! with primitive binary payload encodings to simplify implementation across
//! languages and platforms. All multi-byte payload fields are little-endian.
//!
//! Large inputs (transactions, messages) are split across multiple `SIGN_TX`
//! / `SIGN_MESSAGE` chunks, with `P1` carrying the chunk index and `P2`
//! flagging whether further chunks follow, see [sign].

#![no_std]

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub use ledger_proto::{ApduError, ApduHeader, ApduReq, ApduStatic};

pub mod address;
pub mod app_info;
pub mod path;
pub mod prelude;
pub mod public_key;
pub mod sign;
pub mod status;

/// Solar APDU class
pub const SOLAR_APDU_CLA: u8 = 0xe0;

/// Solar APDU instruction codes
#[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch the ASCII application name
    GetAppName = 0xa1,

    /// Fetch the application version
    GetVersion = 0xa2,

    /// Fetch the public key for a derivation path
    GetPublicKey = 0xb1,

    /// Fetch the address for a derivation path
    GetAddress = 0xb2,

    /// Sign a message (chunked)
    SignMessage = 0xc1,

    /// Sign a transaction (chunked)
    SignTx = 0xc2,
}

/// `P1` value for the first chunk of a chunked command
pub const P1_START: u8 = 0x00;

/// `P1` flag requesting on-screen confirmation (key / address requests)
pub const P1_CONFIRM: u8 = 0x01;

/// `P2` flag indicating further chunks follow
pub const P2_MORE: u8 = 0x80;

/// `P2` flag indicating the final chunk
pub const P2_LAST: u8 = 0x00;

/// Compressed secp256k1 public key length
pub const PUBKEY_LEN: usize = 33;

/// BIP32 chain code length
pub const CHAIN_CODE_LEN: usize = 32;

/// Base58check address string length
pub const ADDRESS_LEN: usize = 34;

/// BIP340 Schnorr signature length
pub const SIGNATURE_LEN: usize = 64;

/// Recipient address hash length (network byte + RIPEMD-160 digest)
pub const PUBKEY_HASH_LEN: usize = 21;

/// Network identifiers, carried in `P2` for `GET_ADDRESS` and as the
/// network byte of the transaction wire format
#[derive(Copy, Clone, PartialEq, Debug, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Network {
    Mainnet = 0x3f,
    Testnet = 0x1e,
}
