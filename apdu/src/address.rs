// Copyright (c) 2024-2025 The Solar Network Developers

//! Address APDUs, for fetching the base58check address for a derivation
//! path on a given network

use encdec::{Decode, DecodeOwned, Encode};

use super::{ApduError, ApduStatic, Instruction, Network, ADDRESS_LEN, SOLAR_APDU_CLA};
use crate::path::DerivationPath;

/// Address request APDU.
///
/// The derivation path is the only payload; the confirmation flag and
/// network identifier travel in the header (`P1` / `P2`) and are therefore
/// not recovered by [`DecodeOwned`].
///
/// ## Encoding:
/// ```text
/// | NUM_COMPS (1) | PATH (4 * NUM_COMPS, u32 LE) |
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct AddressReq {
    /// BIP32 derivation path
    pub path: DerivationPath,

    /// Require on-screen confirmation before responding
    pub confirm: bool,

    /// Network the address is encoded for
    pub network: Network,
}

impl AddressReq {
    /// Create a new [`AddressReq`] APDU
    pub fn new(path: DerivationPath, confirm: bool, network: Network) -> Self {
        Self {
            path,
            confirm,
            network,
        }
    }
}

impl ApduStatic for AddressReq {
    const CLA: u8 = SOLAR_APDU_CLA;
    const INS: u8 = Instruction::GetAddress as u8;

    fn p1(&self) -> u8 {
        self.confirm as u8
    }

    fn p2(&self) -> u8 {
        self.network.into()
    }
}

impl Encode for AddressReq {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        self.path.encode_len()
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        self.path.encode(buff)
    }
}

impl DecodeOwned for AddressReq {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        let (path, n) = DerivationPath::decode_owned(buff)?;

        Ok((
            Self {
                path,
                confirm: false,
                network: Network::Mainnet,
            },
            n,
        ))
    }
}

/// Address response APDU
///
/// ## Encoding:
/// ```text
/// | ADDR_LEN (1) | ADDRESS (34, ascii) |
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AddressResp<'a> {
    /// Base58check address string
    pub address: &'a str,
}

impl<'a> AddressResp<'a> {
    /// Create a new [`AddressResp`] APDU
    pub fn new(address: &'a str) -> Self {
        Self { address }
    }
}

impl<'a> Encode for AddressResp<'a> {
    type Error = ApduError;

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(1 + self.address.len())
    }

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let d = self.address.as_bytes();

        if d.len() != ADDRESS_LEN || buff.len() < 1 + d.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[0] = d.len() as u8;
        buff[1..][..d.len()].copy_from_slice(d);

        Ok(1 + d.len())
    }
}

impl<'a> Decode<'a> for AddressResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        if buff.is_empty() {
            return Err(ApduError::InvalidLength);
        }

        let n = buff[0] as usize;
        if n != ADDRESS_LEN || buff.len() < 1 + n {
            return Err(ApduError::InvalidEncoding);
        }

        let address =
            core::str::from_utf8(&buff[1..][..n]).map_err(|_| ApduError::InvalidEncoding)?;

        Ok((Self { address }, 1 + n))
    }
}

#[cfg(test)]
mod test {
    use ledger_proto::ApduReq;

    use super::*;
    use crate::path::HARDENED;
    use crate::test::encode_decode_apdu;

    #[test]
    fn address_req_header() {
        let path = DerivationPath::new(&[44 | HARDENED, 3333 | HARDENED, 0]).unwrap();

        let apdu = AddressReq::new(path, false, Network::Testnet);
        let hdr = apdu.header();

        assert_eq!(hdr.cla, SOLAR_APDU_CLA);
        assert_eq!(hdr.ins, Instruction::GetAddress as u8);
        assert_eq!(hdr.p1, 0x00);
        assert_eq!(hdr.p2, 0x1e);
    }

    #[test]
    fn address_resp_apdu() {
        let mut buff = [0u8; 128];

        let apdu = AddressResp::new("SNSDNPyXk6JDk8eTT9FxPvMJaQgCkDrAhG");
        let n = encode_decode_apdu(&mut buff, &apdu);
        assert_eq!(n, 35);
    }

    #[test]
    fn address_resp_rejects_bad_length() {
        let apdu = AddressResp::new("too-short");

        let mut buff = [0u8; 128];
        assert!(apdu.encode(&mut buff).is_err());
    }
}
