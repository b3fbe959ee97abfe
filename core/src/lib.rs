// Copyright (c) 2024-2025 The Solar Network Developers

//! Solar hardware wallet core
//!
//! This provides a common [Engine][engine] supporting transaction and
//! message signing for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via
//! [Event][engine::Event]s and [Output][engine::Output]s, see
//! [ledger_solar_apdu] for APDU objects and wire encodings.
//!
//! ## Operations
//!
//! ### Fetching keys and addresses
//!
//! Public keys can be requested via a
//! [`PublicKeyReq`][ledger_solar_apdu::public_key::PublicKeyReq] APDU,
//! returning a [`PublicKeyResp`][ledger_solar_apdu::public_key::PublicKeyResp]
//! with the compressed public key (and chain code when requested) for a
//! derivation path. Addresses are requested via
//! [`AddressReq`][ledger_solar_apdu::address::AddressReq], with the target
//! network selected in `P2`. Either request may demand on-screen
//! confirmation via `P1`, deferring the response until the user decides.
//!
//! ### Signing a transaction or message
//!
//! Signing is chunked. The first `SIGN_TX` / `SIGN_MESSAGE` chunk carries
//! the derivation path and resets the session; each following chunk
//! appends raw payload bytes, with the chunk index in `P1` increasing by
//! exactly one per chunk. On the final chunk (`P2_LAST`) the engine
//! captures a SHA-256 reference hash of the reassembled payload, parses
//! it ([tx]), and defers to user approval. The reference hash is
//! re-verified before the parsed content is displayed and again
//! immediately before signing, so no signature is ever produced over
//! bytes other than the ones hashed when reassembly completed.
//!
//! Platform cryptography (key derivation, BIP340 signing, base58check
//! address encoding) is provided by implementations of the
//! [`Driver`][engine::Driver] trait.

#![cfg_attr(not(feature = "std"), no_std)]

pub use ledger_solar_apdu::{self as apdu};

pub mod engine;

pub mod helpers;

pub mod tx;

/// Application name reported via `GET_APP_NAME`
pub const APP_NAME: &str = "Solar";

/// Application version reported via `GET_VERSION`
pub const APP_VERSION_MAJOR: u8 = 1;
pub const APP_VERSION_MINOR: u8 = 2;
pub const APP_VERSION_PATCH: u8 = 0;

/// Maximum reassembled transaction length in bytes.
///
/// The largest wire object is a Transfer carrying a full 255-byte memo
/// and 127 payments (59-byte header + 255 + 2 + 29 * 127 = 3999 bytes),
/// rounded up to the nearest power of two.
pub const TRANSACTION_LEN_MAX: usize = 4096;
