// Copyright (c) 2024-2025 The Solar Network Developers

use encdec::DecodeOwned;

use ledger_solar_apdu::{
    path::DerivationPath, ApduHeader, Instruction, Network, P1_START, P2_LAST, P2_MORE,
    SOLAR_APDU_CLA,
};

use super::{Error, RequestKind};

/// [`Engine`][super::Engine] input events, decoded from request APDUs
/// by [`Event::parse`]
#[derive(Clone, Debug)]
pub enum Event<'a> {
    None,

    /// Fetch the application name
    GetAppName,

    /// Fetch the application version
    GetVersion,

    /// Fetch the public key for a derivation path
    GetPublicKey {
        path: DerivationPath,
        confirm: bool,
        chain_code: bool,
    },

    /// Fetch the address for a derivation path on a network
    GetAddress {
        path: DerivationPath,
        confirm: bool,
        network: Network,
    },

    /// First chunk of a signing request, carrying the derivation path
    SignStart {
        kind: RequestKind,
        path: DerivationPath,
    },

    /// Continuation chunk of a signing request, carrying payload bytes
    SignChunk {
        kind: RequestKind,
        index: u8,
        more: bool,
        data: &'a [u8],
    },
}

impl<'a> Event<'a> {
    /// Parse an incoming APDU to an engine event, validating the full
    /// command envelope (class, instruction, parameter bytes, payload
    /// length) before anything touches the session.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn parse(hdr: &ApduHeader, data: &'a [u8]) -> Result<Self, Error> {
        if hdr.cla != SOLAR_APDU_CLA {
            return Err(Error::ClaNotSupported);
        }

        let ins = Instruction::try_from(hdr.ins).map_err(|_| Error::InsNotSupported)?;

        match ins {
            Instruction::GetAppName => {
                check_params_unused(hdr)?;
                Ok(Event::GetAppName)
            }

            Instruction::GetVersion => {
                check_params_unused(hdr)?;
                Ok(Event::GetVersion)
            }

            // P1: require on-screen confirmation
            // P2: include the chain code in the response
            Instruction::GetPublicKey => {
                if (hdr.p1 & !1 != 0) || (hdr.p2 & !1 != 0) {
                    return Err(Error::InvalidParams);
                }

                Ok(Event::GetPublicKey {
                    path: decode_path(data)?,
                    confirm: hdr.p1 != 0,
                    chain_code: hdr.p2 != 0,
                })
            }

            // P1: require on-screen confirmation
            // P2: network identifier
            Instruction::GetAddress => {
                if hdr.p1 & !1 != 0 {
                    return Err(Error::InvalidParams);
                }
                let network = Network::try_from(hdr.p2).map_err(|_| Error::InvalidParams)?;

                Ok(Event::GetAddress {
                    path: decode_path(data)?,
                    confirm: hdr.p1 != 0,
                    network,
                })
            }

            // P1: chunk index (0 = first, carrying the derivation path)
            // P2: MORE while further chunks follow, LAST on the final chunk
            Instruction::SignTx | Instruction::SignMessage => {
                let kind = match ins {
                    Instruction::SignMessage => RequestKind::Message,
                    _ => RequestKind::Transaction,
                };

                match (hdr.p1, hdr.p2) {
                    // The first chunk can never be the last: payload
                    // bytes always follow the path
                    (P1_START, P2_MORE) => Ok(Event::SignStart {
                        kind,
                        path: decode_path(data)?,
                    }),
                    (P1_START, _) => Err(Error::InvalidParams),

                    (index, P2_MORE) => Ok(Event::SignChunk {
                        kind,
                        index,
                        more: true,
                        data,
                    }),
                    (index, P2_LAST) => Ok(Event::SignChunk {
                        kind,
                        index,
                        more: false,
                        data,
                    }),

                    _ => Err(Error::InvalidParams),
                }
            }
        }
    }
}

/// Require unused parameter bytes to be zero
fn check_params_unused(hdr: &ApduHeader) -> Result<(), Error> {
    match (hdr.p1, hdr.p2) {
        (0, 0) => Ok(()),
        _ => Err(Error::InvalidParams),
    }
}

/// Decode a derivation path payload, requiring exact consumption
fn decode_path(data: &[u8]) -> Result<DerivationPath, Error> {
    let (path, n) = DerivationPath::decode_owned(data).map_err(|_| Error::InvalidLength)?;

    if n != data.len() {
        return Err(Error::InvalidLength);
    }

    Ok(path)
}
