// Copyright (c) 2024-2025 The Solar Network Developers

//! Public key APDUs, for fetching the compressed public key (and
//! optionally the chain code) for a derivation path

use encdec::{Decode, DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, CHAIN_CODE_LEN, PUBKEY_LEN, SOLAR_APDU_CLA};
use crate::path::DerivationPath;

/// Public key request APDU.
///
/// The derivation path is the only payload; the confirmation and
/// chain-code flags travel in the header (`P1` / `P2`) and are therefore
/// not recovered by [`DecodeOwned`].
///
/// ## Encoding:
/// ```text
/// | NUM_COMPS (1) | PATH (4 * NUM_COMPS, u32 LE) |
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKeyReq {
    /// BIP32 derivation path
    pub path: DerivationPath,

    /// Require on-screen confirmation before responding
    pub confirm: bool,

    /// Include the chain code in the response
    pub chain_code: bool,
}

impl PublicKeyReq {
    /// Create a new [`PublicKeyReq`] APDU
    pub fn new(path: DerivationPath, confirm: bool, chain_code: bool) -> Self {
        Self {
            path,
            confirm,
            chain_code,
        }
    }
}

impl ApduStatic for PublicKeyReq {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::GetPublicKey as u8;

    fn p1(&self) -> u8 {
        self.confirm as u8
    }

    fn p2(&self) -> u8 {
        self.chain_code as u8
    }
}

impl Encode for PublicKeyReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        self.path.encode_len()
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        self.path.encode(buff)
    }
}

impl DecodeOwned for PublicKeyReq {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        let (path, n) = DerivationPath::decode_owned(buff)?;

        Ok((
            Self {
                path,
                confirm: false,
                chain_code: false,
            },
            n,
        ))
    }
}

/// Public key response APDU
///
/// ## Encoding:
/// ```text
/// | KEY_LEN (1) | PUBLIC_KEY (33) | [ CODE_LEN (1) | CHAIN_CODE (32) ] |
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKeyResp {
    /// Compressed secp256k1 public key
    pub public_key: [u8; PUBKEY_LEN],

    /// BIP32 chain code, present when requested via `P2`
    pub chain_code: Option<[u8; CHAIN_CODE_LEN]>,
}

impl PublicKeyResp {
    /// Create a new [`PublicKeyResp`] APDU
    pub fn new(public_key: [u8; PUBKEY_LEN], chain_code: Option<[u8; CHAIN_CODE_LEN]>) -> Self {
        Self {
            public_key,
            chain_code,
        }
    }
}

impl Encode for PublicKeyResp {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        match self.chain_code {
            Some(_) => Ok(2 + PUBKEY_LEN + CHAIN_CODE_LEN),
            None => Ok(1 + PUBKEY_LEN),
        }
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < self.encode_len()? {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = PUBKEY_LEN as u8;
        let mut index = 1;

        buff[index..][..PUBKEY_LEN].copy_from_slice(&self.public_key);
        index += PUBKEY_LEN;

        if let Some(chain_code) = &self.chain_code {
            buff[index] = CHAIN_CODE_LEN as u8;
            index += 1;

            buff[index..][..CHAIN_CODE_LEN].copy_from_slice(chain_code);
            index += CHAIN_CODE_LEN;
        }

        Ok(index)
    }
}

impl<'a> Decode<'a> for PublicKeyResp {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        if buff.len() < 1 + PUBKEY_LEN {
            return Err(ApduError::InvalidLength);
        }
        if buff[0] as usize != PUBKEY_LEN {
            return Err(ApduError::InvalidEncoding);
        }

        let mut public_key = [0u8; PUBKEY_LEN];
        public_key.copy_from_slice(&buff[1..][..PUBKEY_LEN]);
        let mut index = 1 + PUBKEY_LEN;

        let chain_code = match buff.len() > index {
            false => None,
            true => {
                if buff[index] as usize != CHAIN_CODE_LEN
                    || buff.len() < index + 1 + CHAIN_CODE_LEN
                {
                    return Err(ApduError::InvalidEncoding);
                }
                index += 1;

                let mut chain_code = [0u8; CHAIN_CODE_LEN];
                chain_code.copy_from_slice(&buff[index..][..CHAIN_CODE_LEN]);
                index += CHAIN_CODE_LEN;

                Some(chain_code)
            }
        };

        Ok((
            Self {
                public_key,
                chain_code,
            },
            index,
        ))
    }
}
