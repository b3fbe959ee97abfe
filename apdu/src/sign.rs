// Copyright (c) 2024-2025 The Solar Network Developers

//! Signing APDUs
//!
//! `SIGN_TX` and `SIGN_MESSAGE` commands share a chunked envelope: the
//! first chunk (`P1 = 0x00`, `P2 = P2_MORE`) carries the derivation path,
//! each following chunk carries raw payload bytes with `P1` incrementing
//! by one per chunk and `P2` set to [`P2_MORE`][crate::P2_MORE] until the
//! final chunk, which uses [`P2_LAST`][crate::P2_LAST]. The signature
//! response is deferred until the user approves or rejects the request.

use encdec::{Decode, DecodeOwned, Encode};

use super::{
    ApduError, ApduStatic, Instruction, P1_START, P2_LAST, P2_MORE, SIGNATURE_LEN, SOLAR_APDU_CLA,
};
use crate::path::DerivationPath;

/// First chunk of a `SIGN_TX` command, carrying the derivation path
///
/// ## Encoding:
/// ```text
/// | NUM_COMPS (1) | PATH (4 * NUM_COMPS, u32 LE) |
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct SignTxStart {
    /// BIP32 derivation path for the signing key
    pub path: DerivationPath,
}

impl SignTxStart {
    /// Create a new [`SignTxStart`] APDU
    pub fn new(path: DerivationPath) -> Self {
        Self { path }
    }
}

impl ApduStatic for SignTxStart {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::SignTx as u8;

    fn p1(&self) -> u8 {
        P1_START
    }

    fn p2(&self) -> u8 {
        P2_MORE
    }
}

impl Encode for SignTxStart {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        self.path.encode_len()
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        self.path.encode(buff)
    }
}

impl DecodeOwned for SignTxStart {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        let (path, n) = DerivationPath::decode_owned(buff)?;
        Ok((Self { path }, n))
    }
}

/// Continuation chunk of a `SIGN_TX` command, carrying raw transaction
/// bytes. The chunk index and continuation flag travel in the header
/// (`P1` / `P2`) and are therefore not recovered by [`Decode`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SignTxChunk<'a> {
    /// Chunk index, incrementing from 1
    pub index: u8,

    /// Set on the final chunk of the transaction
    pub last: bool,

    /// Raw transaction bytes
    pub data: &'a [u8],
}

impl<'a> SignTxChunk<'a> {
    /// Create a new [`SignTxChunk`] APDU
    pub fn new(index: u8, last: bool, data: &'a [u8]) -> Self {
        Self { index, last, data }
    }
}

impl<'a> ApduStatic for SignTxChunk<'a> {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::SignTx as u8;

    fn p1(&self) -> u8 {
        self.index
    }

    fn p2(&self) -> u8 {
        match self.last {
            true => P2_LAST,
            false => P2_MORE,
        }
    }
}

impl<'a> Encode for SignTxChunk<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.data.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < self.data.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..self.data.len()].copy_from_slice(self.data);

        Ok(self.data.len())
    }
}

impl<'a> Decode<'a> for SignTxChunk<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        Ok((
            Self {
                index: 0,
                last: false,
                data: buff,
            },
            buff.len(),
        ))
    }
}

/// First chunk of a `SIGN_MESSAGE` command, carrying the derivation path
#[derive(Clone, PartialEq, Debug)]
pub struct SignMessageStart {
    /// BIP32 derivation path for the signing key
    pub path: DerivationPath,
}

impl SignMessageStart {
    /// Create a new [`SignMessageStart`] APDU
    pub fn new(path: DerivationPath) -> Self {
        Self { path }
    }
}

impl ApduStatic for SignMessageStart {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::SignMessage as u8;

    fn p1(&self) -> u8 {
        P1_START
    }

    fn p2(&self) -> u8 {
        P2_MORE
    }
}

impl Encode for SignMessageStart {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        self.path.encode_len()
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        self.path.encode(buff)
    }
}

impl DecodeOwned for SignMessageStart {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        let (path, n) = DerivationPath::decode_owned(buff)?;
        Ok((Self { path }, n))
    }
}

/// Continuation chunk of a `SIGN_MESSAGE` command, carrying raw message
/// bytes (length-prefixed message format, see the core message parser)
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SignMessageChunk<'a> {
    /// Chunk index, incrementing from 1
    pub index: u8,

    /// Set on the final chunk of the message
    pub last: bool,

    /// Raw message bytes
    pub data: &'a [u8],
}

impl<'a> SignMessageChunk<'a> {
    /// Create a new [`SignMessageChunk`] APDU
    pub fn new(index: u8, last: bool, data: &'a [u8]) -> Self {
        Self { index, last, data }
    }
}

impl<'a> ApduStatic for SignMessageChunk<'a> {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::SignMessage as u8;

    fn p1(&self) -> u8 {
        self.index
    }

    fn p2(&self) -> u8 {
        match self.last {
            true => P2_LAST,
            false => P2_MORE,
        }
    }
}

impl<'a> Encode for SignMessageChunk<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.data.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < self.data.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..self.data.len()].copy_from_slice(self.data);

        Ok(self.data.len())
    }
}

impl<'a> Decode<'a> for SignMessageChunk<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        Ok((
            Self {
                index: 0,
                last: false,
                data: buff,
            },
            buff.len(),
        ))
    }
}

/// Signature response APDU, emitted after user approval and successful
/// signing
///
/// ## Encoding:
/// ```text
/// | SIGNATURE (64) |
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SignatureResp {
    /// BIP340 Schnorr signature over the reference hash
    pub signature: [u8; SIGNATURE_LEN],
}

impl SignatureResp {
    /// Create a new [`SignatureResp`] APDU
    pub fn new(signature: [u8; SIGNATURE_LEN]) -> Self {
        Self { signature }
    }
}

impl Encode for SignatureResp {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(SIGNATURE_LEN)
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < SIGNATURE_LEN {
            return Err(ApduError::InvalidLength);
        }

        buff[..SIGNATURE_LEN].copy_from_slice(&self.signature);

        Ok(SIGNATURE_LEN)
    }
}

impl DecodeOwned for SignatureResp {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        if buff.len() < SIGNATURE_LEN {
            return Err(ApduError::InvalidLength);
        }

        let mut signature = [0u8; SIGNATURE_LEN];
        signature.copy_from_slice(&buff[..SIGNATURE_LEN]);

        Ok((Self { signature }, SIGNATURE_LEN))
    }
}
