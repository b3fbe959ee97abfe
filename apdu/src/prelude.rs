// Copyright (c) 2024-2025 The Solar Network Developers

//! Prelude for APDU types

pub use ledger_proto::{ApduError, ApduHeader, ApduReq, ApduStatic};

pub use crate::{
    address::{AddressReq, AddressResp},
    app_info::{AppNameReq, AppNameResp, VersionReq, VersionResp},
    path::{DerivationPath, BIP32_PATH_MAX, BIP32_PATH_MIN, HARDENED},
    public_key::{PublicKeyReq, PublicKeyResp},
    sign::{
        SignMessageChunk, SignMessageStart, SignTxChunk, SignTxStart, SignatureResp,
    },
    status::StatusWord,
    Instruction, Network, ADDRESS_LEN, CHAIN_CODE_LEN, P1_CONFIRM, P1_START, P2_LAST, P2_MORE,
    PUBKEY_HASH_LEN, PUBKEY_LEN, SIGNATURE_LEN, SOLAR_APDU_CLA,
};
